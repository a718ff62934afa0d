//! One-shot expiry of the reroll affordance.
//!
//! Each posted roll arms one of these.  The timer is deliberately never
//! cancelled: if a reroll already landed, the shared emoji is gone and the
//! fire reduces to the footer edit.  A reaction arriving after the window
//! but before the fire is caught by the lazy check in the reroll policy;
//! both read the window captured in the roll record.

use crate::embed::{RollView, REROLL_EMOJI};
use crate::volatile_state::VolatileState;
use crate::{log_error, log_internal};
use serenity::all::{ChannelId, EditMessage, Http, MessageId, ReactionType};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub fn arm(
    http: Arc<Http>,
    vstate: Arc<RwLock<VolatileState>>,
    channel_id: ChannelId,
    message_id: MessageId,
    window: Duration,
) {
    tokio::spawn(async move {
        tokio::time::sleep(window).await;

        log_internal!("Reroll window expired for message {}", message_id);

        // Drop the shared reroll marker.  Already gone if a reroll landed
        // inside the window.
        if let Err(e) = channel_id
            .delete_reaction_emoji(
                &http,
                message_id,
                ReactionType::Unicode(REROLL_EMOJI.to_string()),
            )
            .await
        {
            log_error!(
                "Could not remove reroll reaction from message {}: {}",
                message_id,
                e
            );
        }

        // Render from the current record, not a snapshot taken at post
        // time, so an in-window reroll is not visually reverted.
        let embed = {
            let state = vstate.read().await;
            let Some(entry) = state.rolls.get(message_id) else {
                // Swept, or never registered.  Nothing sensible to edit.
                return;
            };
            RollView {
                slots: &entry.slots,
                excluded_count: entry.excluded_count,
                class: entry.class,
                rerolled: state.rolls.is_rerolled(message_id),
                expired: true,
                window_secs: entry.window.as_secs(),
            }
            .build()
        };

        if let Err(e) = channel_id
            .edit_message(&http, message_id, EditMessage::new().embed(embed))
            .await
        {
            log_error!("Could not mark message {} as expired: {}", message_id, e);
        }
    });
}
