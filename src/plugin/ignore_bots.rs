use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Swallows bot-authored messages and bot reactions before any other plugin
/// sees them.
pub struct IgnoreBots;

#[serenity::async_trait]
impl Plugin for IgnoreBots {
    fn name(&self) -> &'static str {
        "ignore_bots"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, _ctx: &Context, event: &Event) -> Result<EventHandled> {
        match event {
            Event::Message(msg) if msg.author.bot => Ok(EventHandled::Yes),
            // Guild reaction events carry the member; reactions without one
            // are re-checked after the user is resolved.
            Event::ReactionAdd(reaction)
                if reaction
                    .member
                    .as_ref()
                    .map(|member| member.user.bot)
                    .unwrap_or(false) =>
            {
                Ok(EventHandled::Yes)
            }
            _ => Ok(EventHandled::No),
        }
    }
}
