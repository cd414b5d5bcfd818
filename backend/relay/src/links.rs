use pinforge_core::{ChannelId, GuildId, MessageId};

const LINK_BASE: &str = "https://discord.com/channels";

/// Deep link that opens a message in the client.
pub fn message_link(guild_id: GuildId, channel_id: ChannelId, message_id: MessageId) -> String {
    format!("{LINK_BASE}/{guild_id}/{channel_id}/{message_id}")
}
