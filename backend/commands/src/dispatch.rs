/// Command dispatch: route detected commands to handlers.
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use pinforge_core::{ChannelId, GuildId, MessageId, UserRef};

use crate::types::CommandInvocation;

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Context passed to every command handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// `None` for direct messages.
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    /// The invoking command message.
    pub message_id: MessageId,
    pub author: UserRef,
}

/// What the caller should post back after a handler ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResponse {
    /// Nothing to say; any output already happened.
    Silent,
    /// Short notice that removes itself after a few seconds.
    Transient(String),
    /// Regular reply.
    Reply(String),
}

impl CommandResponse {
    pub fn transient(text: impl Into<String>) -> Self {
        CommandResponse::Transient(text.into())
    }

    pub fn reply(text: impl Into<String>) -> Self {
        CommandResponse::Reply(text.into())
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse>;
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::Arc;

pub struct CommandDispatcher {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    pub fn register(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into(), handler);
    }

    pub async fn dispatch(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        if let Some(handler) = self.handlers.get(&inv.key) {
            info!(command = %inv.key, channel_id = ctx.channel_id, user_id = ctx.author.id, "Dispatching command");
            handler.handle(ctx, inv).await
        } else {
            debug!(command = %inv.key, "No handler registered");
            Ok(CommandResponse::Silent)
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
