//! Drawing weapons and binding them to players.

use anyhow::{bail, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use serenity::all::UserId;

/// One line of a roll: a player and the weapon drawn for them.
#[derive(Clone, Debug)]
pub struct Slot {
    pub user_id: UserId,
    pub weapon: String,
}

/// Draw `count` weapons from `pool` uniformly, without replacement.
///
/// Callers validate the pool size up front; a draw that cannot be satisfied
/// is a caller bug and errors rather than returning a short result.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, pool: &[String], count: usize) -> Result<Vec<String>> {
    if count > pool.len() {
        bail!(
            "cannot draw {} weapons from a pool of {}",
            count,
            pool.len()
        );
    }

    Ok(pool.choose_multiple(rng, count).cloned().collect())
}

/// Pair players with drawn weapons by position.
pub fn bind(participants: &[UserId], weapons: Vec<String>) -> Result<Vec<Slot>> {
    if participants.len() != weapons.len() {
        bail!(
            "{} participants but {} weapons drawn",
            participants.len(),
            weapons.len()
        );
    }

    Ok(participants
        .iter()
        .zip(weapons)
        .map(|(user_id, weapon)| Slot {
            user_id: *user_id,
            weapon,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn pool(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn sample_is_distinct_and_from_the_pool() {
        let pool = pool(&["A", "B", "C", "D", "E"]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let drawn = sample(&mut rng, &pool, 3).unwrap();
            assert_eq!(drawn.len(), 3);
            let distinct: HashSet<&String> = drawn.iter().collect();
            assert_eq!(distinct.len(), 3);
            for weapon in &drawn {
                assert!(pool.contains(weapon));
            }
        }
    }

    #[test]
    fn sample_of_the_whole_pool_is_a_permutation() {
        let pool = pool(&["A", "B", "C"]);
        let mut rng = StdRng::seed_from_u64(0);

        let mut drawn = sample(&mut rng, &pool, 3).unwrap();
        drawn.sort();
        assert_eq!(drawn, vec!["A", "B", "C"]);
    }

    #[test]
    fn oversized_draw_fails_rather_than_truncating() {
        let pool = pool(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(sample(&mut rng, &pool, 3).is_err());
        assert!(sample(&mut rng, &pool, 2).is_ok());
    }

    #[test]
    fn bind_pairs_by_position() {
        let players = [UserId::new(1), UserId::new(2)];
        let slots = bind(&players, vec!["A".to_string(), "B".to_string()]).unwrap();

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].user_id, UserId::new(1));
        assert_eq!(slots[0].weapon, "A");
        assert_eq!(slots[1].user_id, UserId::new(2));
        assert_eq!(slots[1].weapon, "B");
    }

    #[test]
    fn bind_rejects_mismatched_lengths() {
        let players = [UserId::new(1)];
        assert!(bind(&players, vec!["A".to_string(), "B".to_string()]).is_err());
    }
}
