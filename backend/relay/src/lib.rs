//! The pin relay.
//!
//! Moves a pinned message into an archive channel (a notification plus a
//! repost that looks like the original author wrote it), remembers where the
//! artifacts went, and removes them again on `unpin`.

pub mod handlers;
pub mod links;
pub mod notices;
pub mod relay;
pub mod routing;
pub mod webhooks;

#[cfg(test)]
pub mod mock;

pub use handlers::{build_dispatcher, HelpHandler, PinHandler, UnpinHandler};
pub use links::message_link;
pub use notices::Notices;
pub use relay::{PinRelay, PinTrigger, RelaySettings, RelocateOutcome, SkipReason, UnpinOutcome};
pub use routing::ArchiveRouting;
pub use webhooks::WebhookCache;
