//! Miscellaneous convenience methods

use crate::context::Context;

#[serenity::async_trait]
pub trait MessageHelper {
    async fn is_from_owner(&self, ctx: &Context) -> bool;
}

#[serenity::async_trait]
impl MessageHelper for serenity::all::Message {
    async fn is_from_owner(&self, ctx: &Context) -> bool {
        let owners = &ctx.cfg.read().await.general.bot_owners;
        let author_global_name = &self.author.name;

        owners.contains(author_global_name)
    }
}

/// The humans sharing a voice channel with `user_id`, or None if the user
/// is not in one (or the guild is not cached).
pub fn voice_participants(
    ctx: &Context,
    guild_id: Option<serenity::all::GuildId>,
    user_id: serenity::all::UserId,
) -> Option<Vec<serenity::all::UserId>> {
    let guild = guild_id?.to_guild_cached(ctx.cache)?;
    let channel_id = guild.voice_states.get(&user_id)?.channel_id?;
    let channel = guild.channels.get(&channel_id)?;
    let members = channel.members(ctx.cache).ok()?;

    Some(
        members
            .iter()
            .filter(|member| !member.user.bot)
            .map(|member| member.user.id)
            .collect(),
    )
}

pub trait ReactionHelper {
    /// The reaction's unicode symbol, if it is one.  Custom guild emoji
    /// return None; the bot only ever cares about its own unicode markers.
    fn unicode(&self) -> Option<&str>;
}

impl ReactionHelper for serenity::all::Reaction {
    fn unicode(&self) -> Option<&str> {
        match &self.emoji {
            serenity::all::ReactionType::Unicode(symbol) => Some(symbol.as_str()),
            _ => None,
        }
    }
}
