//! Rich notices posted around a relocation.

use pinforge_core::{ChannelInfo, MessageId, Notice, NoticeColor, UserRef};

const PINNED_TITLE: &str = "📌 MESSAGE PINNED";
const UNPINNED_TITLE: &str = "🗑 MESSAGE UNPINNED";

/// Builds the four notices, carrying the command prefix and footer.
#[derive(Debug, Clone)]
pub struct Notices {
    prefix: String,
    footer: Option<String>,
}

impl Notices {
    pub fn new(prefix: impl Into<String>, footer: Option<String>) -> Self {
        Self {
            prefix: prefix.into(),
            footer,
        }
    }

    /// Posted in the archive channel: who pinned what, and where it came from.
    pub fn pin_notification(
        &self,
        pinner: &UserRef,
        author: &UserRef,
        origin: &ChannelInfo,
        original_link: &str,
        message_id: MessageId,
    ) -> Notice {
        let description = format!(
            "👤 {} pinned a message from {} in {}.\n\
             ✉️ **[Click here to view the original message]({})**\n\
             🗑 **Run {}unpin {} to unpin the message.**",
            pinner.mention(),
            author.mention(),
            origin.mention(),
            original_link,
            self.prefix,
            message_id,
        );
        self.notice(PINNED_TITLE, description, NoticeColor::Blue)
    }

    /// Posted in the origin channel once the message has been relocated.
    pub fn pin_confirmation(
        &self,
        pinner: &UserRef,
        author: &UserRef,
        original_link: &str,
        relocated_link: &str,
        message_id: MessageId,
    ) -> Notice {
        let description = format!(
            "🗣️ **Message by** {}\n\
             👤 **Pinned by** {}\n\
             ✉️ **[Click here for original message]({})**\n\
             📍 **[Click here for pinned message]({})**\n\
             🗑 **Unpin with:** {}unpin {}",
            author.mention(),
            pinner.mention(),
            original_link,
            relocated_link,
            self.prefix,
            message_id,
        );
        self.notice(PINNED_TITLE, description, NoticeColor::Green)
    }

    pub fn unpin_archive(&self, actor: &UserRef, author: &UserRef) -> Notice {
        let description = format!(
            "👤 {} unpinned a message from {}.",
            actor.mention(),
            author.mention()
        );
        self.notice(UNPINNED_TITLE, description, NoticeColor::Red)
    }

    pub fn unpin_confirmation(&self, actor: &UserRef, author: &UserRef) -> Notice {
        let description = format!("{} unpinned a message from {}.", actor.mention(), author.mention());
        self.notice(UNPINNED_TITLE, description, NoticeColor::Red)
    }

    fn notice(&self, title: &str, description: String, color: NoticeColor) -> Notice {
        Notice {
            title: title.to_string(),
            description,
            color,
            footer: self.footer.clone(),
        }
    }
}
