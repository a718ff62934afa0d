use crate::catalog::WeaponClass;
use crate::embed::catalog_embeds;
use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;
use serenity::all::CreateMessage;

/// Lists the whole catalog, excluded or not.
pub struct Weapons;

#[serenity::async_trait]
impl Plugin for Weapons {
    fn name(&self) -> &'static str {
        "weapons"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} [class] - list every weapon",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, args)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let class = match args.first() {
            None => None,
            Some(input) => match WeaponClass::parse(input) {
                Some(class) => Some(class),
                None => {
                    msg.reply(
                        ctx.cache_http,
                        format!("❌ Unknown weapon class `{}`", input),
                    )
                    .await?;
                    return Ok(EventHandled::Yes);
                }
            },
        };

        let names = ctx.pstate.read().await.roster.names(class);
        for embed in catalog_embeds(&names) {
            msg.channel_id
                .send_message(
                    ctx.cache_http,
                    CreateMessage::new().embed(embed).reference_message(msg),
                )
                .await?;
        }
        Ok(EventHandled::Yes)
    }
}
