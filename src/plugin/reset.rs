use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Clears the exclusion list entirely.
pub struct Reset;

#[serenity::async_trait]
impl Plugin for Reset {
    fn name(&self) -> &'static str {
        "reset"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} - clear the exclusion list",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let count = {
            let mut pstate = ctx.pstate.write().await;
            let count = pstate.roster.reset_all();
            if count > 0 {
                pstate.save().await?;
            }
            count
        };

        let reply = if count == 0 {
            "📋 The exclusion list is already empty.".to_string()
        } else {
            format!("✅ Exclusion list cleared! ({} weapons restored)", count)
        };
        msg.reply(ctx.cache_http, reply).await?;
        Ok(EventHandled::Yes)
    }
}
