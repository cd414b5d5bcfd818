/// Command registry: the built-in prefix commands.
use crate::types::{ArgType, CommandArg, CommandDef};

fn message_id_arg(description: &str) -> CommandArg {
    CommandArg {
        name: "message_id".to_string(),
        description: description.to_string(),
        arg_type: ArgType::Integer,
        required: true,
    }
}

/// Build the built-in command list.
pub fn builtin_commands() -> Vec<CommandDef> {
    vec![
        CommandDef {
            key: "pin".into(),
            description: "Move a message of this channel to the pin archive.".into(),
            aliases: vec!["pin".into()],
            args: vec![message_id_arg("ID of the message to pin")],
        },
        CommandDef {
            key: "unpin".into(),
            description: "Remove a relocated pin from the archive.".into(),
            aliases: vec!["unpin".into(), "unfix".into()],
            args: vec![message_id_arg("ID of the originally pinned message")],
        },
        CommandDef {
            key: "help".into(),
            description: "Show available commands.".into(),
            aliases: vec!["help".into(), "commands".into()],
            args: vec![],
        },
    ]
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: builtin_commands() }
    }

    pub fn register(&mut self, def: CommandDef) {
        self.commands.push(def);
    }

    pub fn all(&self) -> &[CommandDef] {
        &self.commands
    }

    /// Find a command by alias. Matching is case-sensitive.
    pub fn find_by_alias(&self, alias: &str) -> Option<&CommandDef> {
        self.commands
            .iter()
            .find(|c| c.aliases.iter().any(|a| a == alias))
    }

    pub fn find_by_key(&self, key: &str) -> Option<&CommandDef> {
        self.commands.iter().find(|c| c.key == key)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
