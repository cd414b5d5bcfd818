/// Command detection: identify prefixed commands in inbound messages.
use crate::registry::CommandRegistry;
use crate::types::CommandInvocation;

/// Detect a command at the start of a message.
///
/// The prefix must match exactly (case-sensitive) and be followed directly by
/// a known alias. Returns `None` for ordinary messages.
pub fn detect_command(text: &str, prefix: &str, registry: &CommandRegistry) -> Option<CommandInvocation> {
    if prefix.is_empty() {
        return None;
    }
    let body = text.trim_start().strip_prefix(prefix)?;

    let mut tokens = body.split_whitespace();
    let alias = tokens.next()?;
    // "! pin" is not a command
    if !body.starts_with(alias) {
        return None;
    }

    let def = registry.find_by_alias(alias)?;

    Some(CommandInvocation {
        key: def.key.clone(),
        raw_alias: alias.to_string(),
        args: tokens.map(str::to_string).collect(),
    })
}
