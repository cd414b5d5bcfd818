//! Discord adapter: serenity-backed [`pinforge_core::ChatPlatform`] and the
//! gateway event handler that feeds the pin relay.

pub mod convert;
pub mod error;
pub mod events;
pub mod platform;

pub use error::map_error;
pub use events::Handler;
pub use platform::DiscordPlatform;

use std::sync::Arc;

use serenity::http::Http;
use serenity::prelude::*;
use tracing::{error, info};

use pinforge_commands::CommandRegistry;
use pinforge_core::PinStore;
use pinforge_relay::{build_dispatcher, PinRelay, RelaySettings};

pub struct DiscordAdapter {
    token: String,
    settings: RelaySettings,
}

impl DiscordAdapter {
    pub fn new(token: String, settings: RelaySettings) -> Self {
        Self { token, settings }
    }

    /// Connect to the gateway and process events until the connection ends.
    pub async fn start(&self) -> anyhow::Result<()> {
        info!(prefix = %self.settings.prefix, "Starting Discord adapter");

        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let platform = Arc::new(DiscordPlatform::new(Arc::new(Http::new(&self.token))));
        let relay = Arc::new(PinRelay::new(platform, PinStore::new(), self.settings.clone()));
        let registry = CommandRegistry::new();
        let dispatcher = build_dispatcher(Arc::clone(&relay), &registry);

        let mut client = Client::builder(&self.token, intents)
            .event_handler(Handler::new(relay, dispatcher, registry))
            .await?;

        if let Err(why) = client.start().await {
            error!("Client error: {:?}", why);
            anyhow::bail!("Discord client error: {:?}", why);
        }

        Ok(())
    }
}
