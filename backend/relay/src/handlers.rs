//! Command handlers for `pin`, `unpin` and `help`.
//!
//! Both relay commands delete the invoking message first and answer failures
//! with short-lived notices.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error, warn};

use pinforge_commands::{
    CommandContext, CommandDispatcher, CommandHandler, CommandInvocation, CommandRegistry, CommandResponse,
};
use pinforge_core::ErrorKind;

use crate::relay::{PinRelay, PinTrigger, RelocateOutcome, UnpinOutcome};

pub const INVALID_ID: &str = "❌ Please provide a valid message ID.";
pub const MESSAGE_NOT_FOUND: &str = "❌ Message not found.";
pub const PIN_FAILED: &str = "❌ An error occurred while trying to pin the message.";
pub const NOT_REGISTERED: &str = "❌ This message is not registered as pinned.";
pub const ARCHIVE_NOT_FOUND: &str = "❌ Pin channel not found.";
pub const UNPIN_NOT_FOUND: &str = "❌ Could not find the message to unpin. It may have been deleted.";
pub const UNPIN_FAILED: &str = "❌ An error occurred while trying to unpin. Try again later.";
pub const UNPIN_UNEXPECTED: &str = "❌ An unexpected error occurred while unpinning the message.";

/// Remove the command message; failure only gets logged.
async fn discard_command_message(relay: &PinRelay, ctx: &CommandContext) {
    if let Err(e) = relay.platform().delete_message(ctx.channel_id, ctx.message_id).await {
        warn!(message_id = ctx.message_id, error = %e, "Could not delete command message");
    }
}

// ---------------------------------------------------------------------------
// pin
// ---------------------------------------------------------------------------

pub struct PinHandler {
    pub relay: Arc<PinRelay>,
}

#[async_trait]
impl CommandHandler for PinHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        if ctx.guild_id.is_none() {
            debug!("Ignoring pin command outside a guild");
            return Ok(CommandResponse::Silent);
        }
        discard_command_message(&self.relay, ctx).await;

        let Some(message_id) = inv.integer_arg(0) else {
            return Ok(CommandResponse::transient(INVALID_ID));
        };

        let platform = self.relay.platform();
        let subject = match platform.fetch_message(ctx.channel_id, message_id).await {
            Ok(message) => message,
            Err(e) if e.is_not_found() => return Ok(CommandResponse::transient(MESSAGE_NOT_FOUND)),
            Err(e) => {
                error!(message_id, error = %e, "Error while pinning message");
                return Ok(CommandResponse::transient(PIN_FAILED));
            }
        };
        let channel = match platform.channel(ctx.channel_id).await {
            Ok(channel) => channel,
            Err(e) => {
                error!(channel_id = ctx.channel_id, error = %e, "Error resolving command channel");
                return Ok(CommandResponse::transient(PIN_FAILED));
            }
        };

        let trigger = PinTrigger {
            channel,
            actor: ctx.author.clone(),
        };
        match self.relay.relocate(&trigger, &subject).await {
            RelocateOutcome::Failed(_) => Ok(CommandResponse::transient(PIN_FAILED)),
            RelocateOutcome::Relocated(_) | RelocateOutcome::Skipped(_) => Ok(CommandResponse::Silent),
        }
    }
}

// ---------------------------------------------------------------------------
// unpin / unfix
// ---------------------------------------------------------------------------

pub struct UnpinHandler {
    pub relay: Arc<PinRelay>,
}

#[async_trait]
impl CommandHandler for UnpinHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        if ctx.guild_id.is_none() {
            debug!("Ignoring unpin command outside a guild");
            return Ok(CommandResponse::Silent);
        }
        discard_command_message(&self.relay, ctx).await;

        let Some(message_id) = inv.integer_arg(0) else {
            return Ok(CommandResponse::transient(INVALID_ID));
        };

        let response = match self.relay.unpin(&ctx.author, message_id).await {
            UnpinOutcome::Unpinned(_) => CommandResponse::Silent,
            UnpinOutcome::NotRegistered => CommandResponse::transient(NOT_REGISTERED),
            UnpinOutcome::ArchiveMissing => CommandResponse::transient(ARCHIVE_NOT_FOUND),
            UnpinOutcome::Failed(e) => CommandResponse::transient(match e.kind() {
                ErrorKind::NotFound => UNPIN_NOT_FOUND,
                ErrorKind::Unexpected => UNPIN_UNEXPECTED,
                ErrorKind::Transport | ErrorKind::Permission => UNPIN_FAILED,
            }),
        };
        Ok(response)
    }
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

pub struct HelpHandler {
    pub registry: CommandRegistry,
    pub prefix: String,
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(&self, _ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        let mut lines = vec!["**Available commands:**".to_string()];
        for cmd in self.registry.all() {
            let mut line = format!("• `{}` {}", cmd.usage(&self.prefix), cmd.description);
            if cmd.aliases.len() > 1 {
                let others: Vec<_> = cmd.aliases[1..].iter().map(|a| format!("`{}{a}`", self.prefix)).collect();
                line.push_str(&format!(" (also {})", others.join(", ")));
            }
            lines.push(line);
        }
        Ok(CommandResponse::reply(lines.join("\n")))
    }
}

/// Dispatcher wired with the relay commands.
pub fn build_dispatcher(relay: Arc<PinRelay>, registry: &CommandRegistry) -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new();
    let prefix = relay.settings().prefix.clone();

    dispatcher.register("pin", Arc::new(PinHandler { relay: Arc::clone(&relay) }));
    dispatcher.register("unpin", Arc::new(UnpinHandler { relay }));
    dispatcher.register(
        "help",
        Arc::new(HelpHandler {
            registry: registry.clone(),
            prefix,
        }),
    );

    dispatcher
}
