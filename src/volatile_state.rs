//! State which is lost across sessions

use crate::assignment::Slot;
use crate::catalog::WeaponClass;
use serenity::all::MessageId;
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

/// Drop roll records older than this.  Rerolls expire long before the
/// horizon; keeping records a while longer lets number reactions keep
/// working on recent rolls.
const RETENTION_HORIZON: Duration = Duration::from_secs(60 * 60);

/// How often the background sweep runs.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

pub struct VolatileState {
    pub rolls: RollBoard,
}

impl VolatileState {
    pub fn new() -> Self {
        Self {
            rolls: RollBoard::new(),
        }
    }
}

/// Everything the bot remembers about one posted roll message.
pub struct RollEntry {
    created_at: Instant,
    rerolled: bool,
    /// Reroll window captured at post time.  The lazy policy check and the
    /// expiry timer both read this value, so they always agree on the
    /// cutoff even if the configured window changes mid-flight.
    pub window: Duration,
    pub slots: Vec<Slot>,
    pub class: Option<WeaponClass>,
    pub excluded_count: usize,
}

impl RollEntry {
    pub fn new(
        now: Instant,
        window: Duration,
        slots: Vec<Slot>,
        class: Option<WeaponClass>,
        excluded_count: usize,
    ) -> Self {
        Self {
            created_at: now,
            rerolled: false,
            window,
            slots,
            class,
            excluded_count,
        }
    }
}

/// Outcome of adjudicating one reroll reaction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RerollVerdict {
    /// Unknown or swept message; nothing to reroll.
    NotRerollable,
    /// The single allowed reroll was already spent.
    AlreadyUsed,
    /// The reroll window has elapsed.
    Expired,
    /// Reroll honored.  The record is now marked as rerolled.
    Accepted,
}

/// Per-message roll records, keyed by the posted message id.
pub struct RollBoard(HashMap<MessageId, RollEntry>);

impl RollBoard {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Record a freshly posted roll.  First write wins: registering an id
    /// twice must not reset the clock, since only the first-post time
    /// governs the reroll window.
    pub fn register(&mut self, message_id: MessageId, entry: RollEntry) {
        self.0.entry(message_id).or_insert(entry);
    }

    pub fn get(&self, message_id: MessageId) -> Option<&RollEntry> {
        self.0.get(&message_id)
    }

    pub fn created_at(&self, message_id: MessageId) -> Option<Instant> {
        self.0.get(&message_id).map(|entry| entry.created_at)
    }

    pub fn is_rerolled(&self, message_id: MessageId) -> bool {
        self.0
            .get(&message_id)
            .map(|entry| entry.rerolled)
            .unwrap_or(false)
    }

    /// Decide whether a reroll reaction at `now` is honored, and mark the
    /// record as rerolled if it is.
    ///
    /// Check-then-mark is a single synchronous step under the caller's write
    /// lock, so concurrent attempts on one message serialize: exactly one
    /// sees `rerolled == false` and wins.  The checks run in priority order;
    /// "already used" outranks "expired" because both can hold at once and
    /// the user-facing replies differ.
    pub fn adjudicate_reroll(&mut self, message_id: MessageId, now: Instant) -> RerollVerdict {
        let Some(entry) = self.0.get_mut(&message_id) else {
            return RerollVerdict::NotRerollable;
        };

        if entry.rerolled {
            return RerollVerdict::AlreadyUsed;
        }

        if now.duration_since(entry.created_at) > entry.window {
            return RerollVerdict::Expired;
        }

        entry.rerolled = true;
        RerollVerdict::Accepted
    }

    /// Replace the displayed loadout after an honored reroll, so number
    /// reactions exclude what is actually shown.
    pub fn update_slots(&mut self, message_id: MessageId, slots: Vec<Slot>, excluded_count: usize) {
        if let Some(entry) = self.0.get_mut(&message_id) {
            entry.slots = slots;
            entry.excluded_count = excluded_count;
        }
    }

    /// Drop every record older than the retention horizon.  Memory bound
    /// only; reroll correctness never depends on the sweep running.
    pub fn sweep(&mut self, now: Instant) {
        self.0
            .retain(|_, entry| now.duration_since(entry.created_at) <= RETENTION_HORIZON);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::UserId;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    const WINDOW: Duration = Duration::from_secs(20);

    fn entry_at(now: Instant) -> RollEntry {
        let slots = vec![
            Slot {
                user_id: UserId::new(1),
                weapon: "Splattershot".to_string(),
            },
            Slot {
                user_id: UserId::new(2),
                weapon: "Inkbrush".to_string(),
            },
        ];
        RollEntry::new(now, WINDOW, slots, None, 0)
    }

    #[test]
    fn register_keeps_the_first_creation_time() {
        let mut board = RollBoard::new();
        let id = MessageId::new(10);
        let first = Instant::now();
        let later = first + Duration::from_secs(30);

        board.register(id, entry_at(first));
        board.register(id, entry_at(later));

        assert_eq!(board.created_at(id), Some(first));
    }

    #[test]
    fn verdicts_follow_the_priority_order() {
        let mut board = RollBoard::new();
        let id = MessageId::new(10);
        let posted = Instant::now();

        // Unknown message
        assert_eq!(
            board.adjudicate_reroll(id, posted),
            RerollVerdict::NotRerollable
        );

        board.register(id, entry_at(posted));

        // Inside the window
        let inside = posted + WINDOW - Duration::from_millis(1);
        assert_eq!(board.adjudicate_reroll(id, inside), RerollVerdict::Accepted);
        assert!(board.is_rerolled(id));

        // Spent, and also past the window: "already used" must win
        let late = posted + WINDOW + Duration::from_secs(5);
        assert_eq!(
            board.adjudicate_reroll(id, late),
            RerollVerdict::AlreadyUsed
        );
    }

    #[test]
    fn window_boundary_is_strict() {
        let mut board = RollBoard::new();
        let id = MessageId::new(10);
        let posted = Instant::now();
        board.register(id, entry_at(posted));

        // Strictly after the window: rejected, record untouched
        let mut expired_board = RollBoard::new();
        expired_board.register(id, entry_at(posted));
        let after = posted + WINDOW + Duration::from_millis(1);
        assert_eq!(
            expired_board.adjudicate_reroll(id, after),
            RerollVerdict::Expired
        );
        assert!(!expired_board.is_rerolled(id));
        let slots = &expired_board.get(id).unwrap().slots;
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].weapon, "Splattershot");

        // Exactly at the window: `elapsed > window` is false, still accepted
        assert_eq!(
            board.adjudicate_reroll(id, posted + WINDOW),
            RerollVerdict::Accepted
        );
    }

    #[test]
    fn honored_reroll_redraws_and_spends_the_record() {
        use crate::assignment;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut board = RollBoard::new();
        let id = MessageId::new(10);
        let posted = Instant::now();
        board.register(id, entry_at(posted));

        assert_eq!(board.adjudicate_reroll(id, posted), RerollVerdict::Accepted);

        // Redraw for the same two players from a three-weapon pool.
        let pool: Vec<String> = ["A", "B", "C"].iter().map(|w| w.to_string()).collect();
        let players: Vec<UserId> = board
            .get(id)
            .unwrap()
            .slots
            .iter()
            .map(|slot| slot.user_id)
            .collect();
        let mut rng = StdRng::seed_from_u64(5);
        let weapons = assignment::sample(&mut rng, &pool, players.len()).unwrap();
        let slots = assignment::bind(&players, weapons).unwrap();
        board.update_slots(id, slots, 0);

        let slots = &board.get(id).unwrap().slots;
        assert_eq!(slots.len(), 2);
        assert_ne!(slots[0].weapon, slots[1].weapon);
        assert!(pool.contains(&slots[0].weapon));

        // The single reroll is spent for every later attempt.
        assert_eq!(
            board.adjudicate_reroll(id, posted + Duration::from_secs(1)),
            RerollVerdict::AlreadyUsed
        );
    }

    #[test]
    fn slot_lookup_beyond_the_roll_is_empty() {
        let mut board = RollBoard::new();
        let id = MessageId::new(10);
        board.register(id, entry_at(Instant::now()));

        // A number reaction past the last slot resolves to no weapon, so
        // nothing downstream touches the roster.
        let entry = board.get(id).unwrap();
        assert_eq!(entry.slots.len(), 2);
        assert!(entry.slots.get(2).is_none());
    }

    #[test]
    fn sweep_forgets_old_rolls() {
        let mut board = RollBoard::new();
        let id = MessageId::new(10);
        let posted = Instant::now();
        board.register(id, entry_at(posted));

        board.sweep(posted + Duration::from_secs(30 * 60));
        assert_eq!(board.len(), 1);

        let past_horizon = posted + RETENTION_HORIZON + Duration::from_secs(1);
        board.sweep(past_horizon);
        assert_eq!(board.len(), 0);
        assert_eq!(board.created_at(id), None);
        assert_eq!(
            board.adjudicate_reroll(id, past_horizon),
            RerollVerdict::NotRerollable
        );
    }

    #[tokio::test]
    async fn concurrent_rerolls_honor_exactly_one() {
        let board = Arc::new(RwLock::new(RollBoard::new()));
        let id = MessageId::new(10);
        let posted = Instant::now();
        board.write().await.register(id, entry_at(posted));

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let board = Arc::clone(&board);
            tasks.push(tokio::spawn(async move {
                board.write().await.adjudicate_reroll(id, posted)
            }));
        }

        let mut accepted = 0;
        let mut rejected = 0;
        for task in tasks {
            match task.await.unwrap() {
                RerollVerdict::Accepted => accepted += 1,
                RerollVerdict::AlreadyUsed => rejected += 1,
                verdict => panic!("unexpected verdict {:?}", verdict),
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(rejected, 15);
    }
}
