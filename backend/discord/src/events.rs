use std::sync::Arc;

use async_trait::async_trait;
use serenity::model::channel::{Message as DiscordMessage, MessageType};
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{debug, error, info};

use pinforge_commands::{detect_command, CommandContext, CommandDispatcher, CommandRegistry};
use pinforge_relay::{PinRelay, PinTrigger};

use crate::convert;

/// Routes gateway messages to the relay: pin system notices and prefix commands.
pub struct Handler {
    relay: Arc<PinRelay>,
    dispatcher: CommandDispatcher,
    registry: CommandRegistry,
}

impl Handler {
    pub fn new(relay: Arc<PinRelay>, dispatcher: CommandDispatcher, registry: CommandRegistry) -> Self {
        Self {
            relay,
            dispatcher,
            registry,
        }
    }

    /// A message was pinned through the client UI.
    async fn on_pin_notice(&self, msg: &DiscordMessage) {
        if msg.guild_id.is_none() {
            return;
        }
        let channel = match self.relay.platform().channel(msg.channel_id.get()).await {
            Ok(channel) => channel,
            Err(e) => {
                error!(channel_id = %msg.channel_id, error = %e, "Could not resolve pin notice channel");
                return;
            }
        };
        let trigger = PinTrigger {
            channel,
            actor: convert::message_author(msg),
        };
        let outcome = self.relay.relocate_latest_pin(&trigger).await;
        debug!(?outcome, "Handled pin notice");
    }

    async fn on_command(&self, msg: &DiscordMessage) {
        let prefix = &self.relay.settings().prefix;
        let Some(inv) = detect_command(&msg.content, prefix, &self.registry) else {
            return;
        };

        let ctx = CommandContext {
            guild_id: msg.guild_id.map(|g| g.get()),
            channel_id: msg.channel_id.get(),
            message_id: msg.id.get(),
            author: convert::message_author(msg),
        };
        match self.dispatcher.dispatch(&ctx, &inv).await {
            Ok(response) => self.relay.deliver(ctx.channel_id, &response).await,
            Err(e) => error!(command = %inv.key, error = %e, "Command handler failed"),
        }
    }
}

/// Only humans drive the relay. Bot accounts, this bot included, and webhook
/// posts such as relocated copies are ignored.
fn accepts_author(author_id: u64, author_is_bot: bool, from_webhook: bool, bot_user_id: u64) -> bool {
    author_id != bot_user_id && !author_is_bot && !from_webhook
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: DiscordMessage) {
        let me = ctx.cache.current_user().id;
        let from_webhook = msg.webhook_id.is_some();
        if !accepts_author(msg.author.id.get(), msg.author.bot, from_webhook, me.get()) {
            return;
        }

        if msg.kind == MessageType::PinsAdd {
            self.on_pin_notice(&msg).await;
        } else {
            self.on_command(&msg).await;
        }
    }

    async fn ready(&self, _: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "{} is connected!", ready.user.name);
    }
}
