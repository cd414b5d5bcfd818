pub mod detection;
pub mod dispatch;
pub mod registry;
pub mod types;

pub use detection::detect_command;
pub use dispatch::{CommandContext, CommandDispatcher, CommandHandler, CommandResponse};
pub use registry::{builtin_commands, CommandRegistry};
pub use types::{ArgType, CommandArg, CommandDef, CommandInvocation};

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "!";
