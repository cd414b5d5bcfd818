pub mod error;
pub mod message;
pub mod store;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, RelayError, RelayResult};
pub use message::{AttachmentRef, ImpersonatedPost, MessageSnapshot, Notice, NoticeColor};
pub use store::{PinRecord, PinStore};
pub use traits::ChatPlatform;
pub use types::{ChannelId, ChannelInfo, GuildId, MessageId, UserId, UserRef, WebhookHandle};
