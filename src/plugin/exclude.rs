use crate::catalog::WeaponClass;
use crate::{context::Context, event::*, plugin::*};
use anyhow::Result;

/// Adds one weapon, or a whole class, to the exclusion list.
pub struct Exclude;

#[serenity::async_trait]
impl Plugin for Exclude {
    fn name(&self) -> &'static str {
        "exclude"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} <weapon|class> - add a weapon or a whole class to the exclusion list",
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
                    "❌ Name a weapon or class to exclude. Example: `{}exclude Inkbrush` or `{}exclude brush`",
                    prefix, prefix
                ),
            )
            .await?;
            return Ok(EventHandled::Yes);
        }

        // Class names win over weapon names where they collide.
        if let Some(class) = WeaponClass::parse(&input) {
            let count = {
                let mut pstate = ctx.pstate.write().await;
                let count = pstate.roster.set_class_enabled(class, false);
                if count > 0 {
                    pstate.save().await?;
                }
                count
            };

            let reply = if count == 0 {
                format!("❌ Every {} weapon is already excluded", class)
            } else {
                format!("✅ Added {} {} weapons to the exclusion list", count, class)
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
            let changed = pstate.roster.set_enabled(&input, false);
            if changed {
                pstate.save().await?;
            }
            changed
        };

        let reply = if changed {
            format!("✅ **{}** added to the exclusion list", input)
        } else {
            format!("❌ **{}** is already excluded", input)
        };
        msg.reply(ctx.cache_http, reply).await?;
        Ok(EventHandled::Yes)
    }
}
