//! Reactions on roll messages: the reroll marker and the per-slot number
//! markers.
//!
//! Reroll adjudication happens in one synchronous step under the state
//! write lock, so simultaneous taps on the same message serialize and at
//! most one is honored.  All reaction cleanup and feedback afterwards is
//! best-effort: a failed Discord call is logged, never retried, and never
//! fails the handler.

use crate::embed::{emoji_index, RollView, REROLL_EMOJI};
use crate::helper::{voice_participants, ReactionHelper};
use crate::log_error;
use crate::volatile_state::RerollVerdict;
use crate::{assignment, context::Context, event::*, plugin::*};
use anyhow::Result;
use serenity::all::{ChannelId, EditMessage, Message, Reaction, ReactionType, User};
use std::time::Instant;

pub struct Reactions;

#[serenity::async_trait]
impl Plugin for Reactions {
    fn name(&self) -> &'static str {
        "reactions"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        Some(format!(
            "{} on a roll - reroll it (once, while the window lasts)\n\
             |  number on a roll - exclude that slot's weapon",
            REROLL_EMOJI
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::ReactionAdd(reaction) = event else {
            return Ok(EventHandled::No);
        };

        // The gateway event only carries ids; resolve the actors.  A failed
        // resolve drops the event, it is not retried.
        let user = match reaction.user(ctx.cache_http).await {
            Ok(user) => user,
            Err(e) => {
                log_error!("Could not resolve reacting user: {}", e);
                return Ok(EventHandled::Yes);
            }
        };
        if user.bot {
            return Ok(EventHandled::Yes);
        }

        let message = match reaction.message(ctx.cache_http).await {
            Ok(message) => message,
            Err(e) => {
                log_error!("Could not resolve reacted message: {}", e);
                return Ok(EventHandled::Yes);
            }
        };

        // Only react to reactions on the bot's own messages.
        if message.author.id != ctx.cache.current_user().id {
            return Ok(EventHandled::No);
        }

        let Some(symbol) = reaction.unicode() else {
            return Ok(EventHandled::No);
        };

        if symbol == REROLL_EMOJI {
            handle_reroll(ctx, reaction, &message, &user).await?;
            return Ok(EventHandled::Yes);
        }
        if let Some(index) = emoji_index(symbol) {
            handle_exclusion(ctx, reaction, &message, &user, index).await;
            return Ok(EventHandled::Yes);
        }

        Ok(EventHandled::No)
    }
}

async fn handle_reroll(
    ctx: &Context<'_>,
    reaction: &Reaction,
    message: &Message,
    user: &User,
) -> Result<()> {
    // Check-then-mark in one lock scope; see module docs.
    let (verdict, window_secs) = {
        let mut state = ctx.vstate.write().await;
        let verdict = state.rolls.adjudicate_reroll(message.id, Instant::now());
        let window_secs = state
            .rolls
            .get(message.id)
            .map(|entry| entry.window.as_secs())
            .unwrap_or_default();
        (verdict, window_secs)
    };

    match verdict {
        RerollVerdict::NotRerollable => {
            feedback(ctx, message.channel_id, "⚠️ This message can't be rerolled").await;
            retract_user_mark(ctx, reaction).await;
            retract_shared_mark(ctx, message).await;
        }
        RerollVerdict::AlreadyUsed => {
            // Keep the shared marker so later attempts meet the same
            // rejection instead of silently losing the affordance.
            feedback(ctx, message.channel_id, "❌ Only one reroll is allowed").await;
            retract_user_mark(ctx, reaction).await;
        }
        RerollVerdict::Expired => {
            feedback(
                ctx,
                message.channel_id,
                &format!(
                    "❌ Rerolls are only available for the first {}s",
                    window_secs
                ),
            )
            .await;
            retract_user_mark(ctx, reaction).await;
            retract_shared_mark(ctx, message).await;
        }
        RerollVerdict::Accepted => {
            execute_reroll(ctx, message, user).await?;
            retract_user_mark(ctx, reaction).await;
            retract_shared_mark(ctx, message).await;
        }
    }

    Ok(())
}

/// Redraw the loadout for an honored reroll and update the message and the
/// stored record.  The reroll is already consumed at this point; a pool
/// that shrank below the party size since the post leaves the original
/// loadout standing.
async fn execute_reroll(ctx: &Context<'_>, message: &Message, user: &User) -> Result<()> {
    let Some((stored_players, class, window_secs)) = ({
        let state = ctx.vstate.read().await;
        state.rolls.get(message.id).map(|entry| {
            (
                entry
                    .slots
                    .iter()
                    .map(|slot| slot.user_id)
                    .collect::<Vec<_>>(),
                entry.class,
                entry.window.as_secs(),
            )
        })
    }) else {
        return Ok(());
    };

    // Participant source: the reactor's current voice channel wins; a
    // reactor outside voice rerolls for the originally posted players.
    let participants = match voice_participants(ctx, message.guild_id, user.id) {
        Some(members) if !members.is_empty() => members,
        _ => stored_players,
    };

    let (eligible, excluded_count) = {
        let pstate = ctx.pstate.read().await;
        (
            pstate.roster.eligible(class),
            pstate.roster.excluded().len(),
        )
    };
    if participants.len() > eligible.len() {
        return Ok(());
    }

    let weapons = assignment::sample(&mut rand::rng(), &eligible, participants.len())?;
    let slots = assignment::bind(&participants, weapons)?;

    let embed = RollView {
        slots: &slots,
        excluded_count,
        class,
        rerolled: true,
        expired: false,
        window_secs,
    }
    .build();
    message
        .channel_id
        .edit_message(ctx.cache_http, message.id, EditMessage::new().embed(embed))
        .await?;

    ctx.vstate
        .write()
        .await
        .rolls
        .update_slots(message.id, slots, excluded_count);

    Ok(())
}

/// A number reaction excludes the weapon shown on that slot.  An index with
/// no slot behind it (stray reaction, swept record) does nothing.  Roster
/// failures are silent toward the channel; only successes are confirmed.
async fn handle_exclusion(
    ctx: &Context<'_>,
    reaction: &Reaction,
    message: &Message,
    user: &User,
    index: usize,
) {
    let weapon = ctx
        .vstate
        .read()
        .await
        .rolls
        .get(message.id)
        .and_then(|entry| entry.slots.get(index))
        .map(|slot| slot.weapon.clone());

    if let Some(weapon) = weapon {
        let excluded = {
            let mut pstate = ctx.pstate.write().await;
            if pstate.roster.set_enabled(&weapon, false) {
                match pstate.save().await {
                    Ok(()) => true,
                    Err(e) => {
                        log_error!("Could not save roster after excluding {}: {}", weapon, e);
                        false
                    }
                }
            } else {
                false
            }
        };

        if excluded {
            feedback(
                ctx,
                message.channel_id,
                &format!(
                    "✅ <@{}> added **{}** to the exclusion list",
                    user.id, weapon
                ),
            )
            .await;
        }
    }

    retract_user_mark(ctx, reaction).await;
}

async fn feedback(ctx: &Context<'_>, channel_id: ChannelId, text: &str) {
    if let Err(e) = channel_id.say(ctx.cache_http, text).await {
        log_error!("Could not send reaction feedback: {}", e);
    }
}

/// Take back the acting user's own reaction mark, keeping the affordance
/// clean for the next user.
async fn retract_user_mark(ctx: &Context<'_>, reaction: &Reaction) {
    if let Err(e) = reaction.delete(ctx.cache_http).await {
        log_error!(
            "Could not remove a user's reaction from message {}: {}",
            reaction.message_id,
            e
        );
    }
}

/// Take down the shared reroll marker entirely; no future reroll on this
/// message can ever succeed.
async fn retract_shared_mark(ctx: &Context<'_>, message: &Message) {
    if let Err(e) = message
        .channel_id
        .delete_reaction_emoji(
            ctx.http,
            message.id,
            ReactionType::Unicode(REROLL_EMOJI.to_string()),
        )
        .await
    {
        log_error!(
            "Could not remove the reroll reaction from message {}: {}",
            message.id,
            e
        );
    }
}
