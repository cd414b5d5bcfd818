//! serenity model → relay types.

use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use serenity::model::channel::{GuildChannel, Message};
use serenity::model::user::User;

use pinforge_core::{AttachmentRef, ChannelInfo, MessageSnapshot, Notice, UserRef};

/// Nickname, then global display name, then username.
pub fn user_ref(user: &User, nick: Option<&str>) -> UserRef {
    let display_name = nick
        .map(str::to_string)
        .or_else(|| user.global_name.clone())
        .unwrap_or_else(|| user.name.clone());
    UserRef {
        id: user.id.get(),
        display_name,
        avatar_url: user.avatar_url(),
    }
}

pub fn message_author(msg: &Message) -> UserRef {
    let nick = msg.member.as_ref().and_then(|m| m.nick.as_deref());
    user_ref(&msg.author, nick)
}

pub fn snapshot(msg: &Message) -> MessageSnapshot {
    MessageSnapshot {
        id: msg.id.get(),
        channel_id: msg.channel_id.get(),
        author: message_author(msg),
        content: msg.content.clone(),
        attachments: msg
            .attachments
            .iter()
            .map(|a| AttachmentRef {
                filename: a.filename.clone(),
                url: a.url.clone(),
            })
            .collect(),
        pinned: msg.pinned,
    }
}

pub fn channel_info(channel: &GuildChannel) -> ChannelInfo {
    ChannelInfo::new(channel.id.get(), channel.guild_id.get(), channel.name.clone())
}

pub fn embed(notice: &Notice) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .title(&notice.title)
        .description(&notice.description)
        .colour(notice.color.rgb());
    match &notice.footer {
        Some(footer) => embed.footer(CreateEmbedFooter::new(footer)),
        None => embed,
    }
}
