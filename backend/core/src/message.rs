use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, MessageId, UserRef};

/// A file attached to a message, re-uploaded from its URL when relocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub filename: String,
    pub url: String,
}

/// The parts of a platform message the relay reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSnapshot {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author: UserRef,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    #[serde(default)]
    pub pinned: bool,
}

/// Accent colour of a rich notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeColor {
    Blue,
    Green,
    Red,
}

impl NoticeColor {
    pub fn rgb(self) -> u32 {
        match self {
            NoticeColor::Blue => 0x3498db,
            NoticeColor::Green => 0x2ecc71,
            NoticeColor::Red => 0xe74c3c,
        }
    }
}

/// A rich content block (embed) posted by the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub color: NoticeColor,
    pub footer: Option<String>,
}

/// A repost sent through a webhook under someone else's name and avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpersonatedPost {
    pub content: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub attachments: Vec<AttachmentRef>,
}

impl ImpersonatedPost {
    /// Copy of `message` presented as its author.
    pub fn from_message(message: &MessageSnapshot) -> Self {
        Self {
            content: message.content.clone(),
            username: message.author.display_name.clone(),
            avatar_url: message.author.avatar_url.clone(),
            attachments: message.attachments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impersonated_post_copies_author_identity() {
        let message = MessageSnapshot {
            id: 123456,
            channel_id: 10,
            author: UserRef::new(1, "Alice").with_avatar("https://cdn.example/a.png"),
            content: "hello".into(),
            attachments: vec![AttachmentRef {
                filename: "cat.png".into(),
                url: "https://cdn.example/cat.png".into(),
            }],
            pinned: true,
        };
        let post = ImpersonatedPost::from_message(&message);
        assert_eq!(post.username, "Alice");
        assert_eq!(post.avatar_url.as_deref(), Some("https://cdn.example/a.png"));
        assert_eq!(post.content, "hello");
        assert_eq!(post.attachments.len(), 1);
    }

    #[test]
    fn colours_match_embed_palette() {
        assert_eq!(NoticeColor::Blue.rgb(), 0x3498db);
        assert_eq!(NoticeColor::Red.rgb(), 0xe74c3c);
    }
}
