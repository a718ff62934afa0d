use crate::catalog::WeaponClass;
use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Takes one weapon, or a whole class, back off the exclusion list.
pub struct Restore;

#[serenity::async_trait]
impl Plugin for Restore {
    fn name(&self) -> &'static str {
        "restore"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} <weapon|class> - remove a weapon or a whole class from the exclusion list",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, args)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let prefix = ctx.cfg.read().await.general.command_prefix.clone();
        let input = args.join(" ");
        if input.is_empty() {
            msg.reply(
                ctx.cache_http,
                format!(
                    "❌ Name a weapon or class to restore. Example: `{}restore Inkbrush` or `{}restore brush`",
                    prefix, prefix
                ),
            )
            .await?;
            return Ok(EventHandled::Yes);
        }

        if let Some(class) = WeaponClass::parse(&input) {
            let count = {
                let mut pstate = ctx.pstate.write().await;
                let count = pstate.roster.set_class_enabled(class, true);
                if count > 0 {
                    pstate.save().await?;
                }
                count
            };

            let reply = if count == 0 {
                format!("❌ No {} weapons are excluded", class)
            } else {
                format!(
                    "✅ Removed {} {} weapons from the exclusion list",
                    count, class
                )
            };
            msg.reply(ctx.cache_http, reply).await?;
            return Ok(EventHandled::Yes);
        }

        let changed = {
            let mut pstate = ctx.pstate.write().await;
            if !pstate.roster.contains(&input) {
                drop(pstate);
                msg.reply(
                    ctx.cache_http,
                    format!(
                        "❌ No weapon called **{}**. Check `{}weapons` for the list.",
                        input, prefix
                    ),
                )
                .await?;
                return Ok(EventHandled::Yes);
            }
            let changed = pstate.roster.set_enabled(&input, true);
            if changed {
                pstate.save().await?;
            }
            changed
        };

        let reply = if changed {
            format!("✅ **{}** removed from the exclusion list", input)
        } else {
            format!("❌ **{}** isn't excluded", input)
        };
        msg.reply(ctx.cache_http, reply).await?;
        Ok(EventHandled::Yes)
    }
}
