use crate::embed::excluded_embed;
use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;
use serenity::all::CreateMessage;

/// Lists the weapons currently on the exclusion list.
pub struct Excluded;

#[serenity::async_trait]
impl Plugin for Excluded {
    fn name(&self) -> &'static str {
        "excluded"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} - list the excluded weapons",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let excluded = ctx.pstate.read().await.roster.excluded();
        if excluded.is_empty() {
            msg.reply(ctx.cache_http, "📋 No weapons are currently excluded.")
                .await?;
            return Ok(EventHandled::Yes);
        }

        msg.channel_id
            .send_message(
                ctx.cache_http,
                CreateMessage::new()
                    .embed(excluded_embed(&excluded))
                    .reference_message(msg),
            )
            .await?;
        Ok(EventHandled::Yes)
    }
}
