/// Prefix command types.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Arg
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandArg {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub arg_type: ArgType,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    String,
    Integer,
}

// ---------------------------------------------------------------------------
// Command definition
// ---------------------------------------------------------------------------

/// A command entry in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    /// Unique key (e.g. "pin", "unpin").
    pub key: String,
    pub description: String,
    /// Names the command answers to, without prefix. The first is primary.
    pub aliases: Vec<String>,
    pub args: Vec<CommandArg>,
}

impl CommandDef {
    /// Primary alias (first in list), or key if none.
    pub fn primary_alias(&self) -> &str {
        self.aliases.first().map(|s| s.as_str()).unwrap_or(&self.key)
    }

    /// Usage line such as `!unpin <message_id>`.
    pub fn usage(&self, prefix: &str) -> String {
        let mut usage = format!("{prefix}{}", self.primary_alias());
        for arg in &self.args {
            if arg.required {
                usage.push_str(&format!(" <{}>", arg.name));
            } else {
                usage.push_str(&format!(" [{}]", arg.name));
            }
        }
        usage
    }
}

// ---------------------------------------------------------------------------
// Parsed invocation
// ---------------------------------------------------------------------------

/// A detected and parsed command invocation.
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    pub key: String,
    /// The alias as typed, without prefix.
    pub raw_alias: String,
    /// Whitespace-separated arguments.
    pub args: Vec<String>,
}

impl CommandInvocation {
    /// Argument at `index` parsed as a snowflake-style integer. Snowflakes
    /// are never zero.
    pub fn integer_arg(&self, index: usize) -> Option<u64> {
        self.args.get(index)?.parse().ok().filter(|id| *id != 0)
    }
}
