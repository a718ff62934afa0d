use crate::catalog::WeaponClass;
use crate::embed::{RollView, NUMBER_EMOJIS, REROLL_EMOJI};
use crate::helper::voice_participants;
use crate::volatile_state::RollEntry;
use crate::{assignment, context::Context, event::*, expiry, plugin::*};
use anyhow::Result;
use serenity::all::{CreateMessage, ReactionType};
use std::time::Instant;

/// Rolls a random weapon for everyone in the caller's voice channel.
pub struct Roll;

#[serenity::async_trait]
impl Plugin for Roll {
    fn name(&self) -> &'static str {
        "roll"
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} [class] - roll a weapon for everyone in your voice channel",
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
                    let classes = WeaponClass::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    msg.reply(
                        ctx.cache_http,
                        format!("❌ Unknown weapon class `{}`. Valid classes: {}", input, classes),
                    )
                    .await?;
                    return Ok(EventHandled::Yes);
                }
            },
        };

        let Some(participants) = voice_participants(ctx, msg.guild_id, msg.author.id) else {
            msg.reply(ctx.cache_http, "❌ Join a voice channel first!")
                .await?;
            return Ok(EventHandled::Yes);
        };
        if participants.is_empty() {
            msg.reply(ctx.cache_http, "❌ Nobody in your voice channel to roll for!")
                .await?;
            return Ok(EventHandled::Yes);
        }

        let (window, max_players) = {
            let cfg = ctx.cfg.read().await;
            (cfg.roll.window(), cfg.roll.max_players)
        };
        if participants.len() > max_players {
            msg.reply(
                ctx.cache_http,
                format!(
                    "❌ Your voice channel has {} people; I only roll for up to {}.",
                    participants.len(),
                    max_players
                ),
            )
            .await?;
            return Ok(EventHandled::Yes);
        }

        let (eligible, excluded_count) = {
            let pstate = ctx.pstate.read().await;
            (
                pstate.roster.eligible(class),
                pstate.roster.excluded().len(),
            )
        };

        if eligible.is_empty() {
            let prefix = &ctx.cfg.read().await.general.command_prefix;
            let reply = match class {
                Some(class) => format!("❌ Every {} weapon is excluded!", class),
                None => format!(
                    "❌ Every weapon is excluded! Use `{}reset` to clear the exclusion list.",
                    prefix
                ),
            };
            msg.reply(ctx.cache_http, reply).await?;
            return Ok(EventHandled::Yes);
        }
        if participants.len() > eligible.len() {
            msg.reply(
                ctx.cache_http,
                format!(
                    "❌ Only {} weapons are available; your voice channel has {} people.",
                    eligible.len(),
                    participants.len()
                ),
            )
            .await?;
            return Ok(EventHandled::Yes);
        }

        let weapons = assignment::sample(&mut rand::rng(), &eligible, participants.len())?;
        let slots = assignment::bind(&participants, weapons)?;

        let embed = RollView {
            slots: &slots,
            excluded_count,
            class,
            rerolled: false,
            expired: false,
            window_secs: window.as_secs(),
        }
        .build();

        let sent = msg
            .channel_id
            .send_message(
                ctx.cache_http,
                CreateMessage::new().embed(embed).reference_message(msg),
            )
            .await?;

        // Register before seeding reactions so an eager reroll tap cannot
        // land on an unknown message.
        let slot_count = slots.len();
        ctx.vstate.write().await.rolls.register(
            sent.id,
            RollEntry::new(Instant::now(), window, slots, class, excluded_count),
        );

        sent.react(
            ctx.cache_http,
            ReactionType::Unicode(REROLL_EMOJI.to_string()),
        )
        .await?;
        for emoji in NUMBER_EMOJIS.iter().take(slot_count) {
            sent.react(ctx.cache_http, ReactionType::Unicode(emoji.to_string()))
                .await?;
        }

        expiry::arm(
            ctx.http.clone(),
            ctx.vstate.clone(),
            sent.channel_id,
            sent.id,
            window,
        );

        Ok(EventHandled::Yes)
    }
}
