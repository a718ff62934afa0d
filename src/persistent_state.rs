//! State which persists across sessions

use crate::catalog::{WeaponClass, CATALOG};
use anyhow::{anyhow, Result};
use std::{collections::BTreeMap, path::PathBuf};
use tokio::io::AsyncReadExt;

const PSTATE_PATH_REL_HOME: &str = ".config/bukibot/state.toml";

#[derive(serde::Serialize, serde::Deserialize)]
pub struct PersistentState {
    pub roster: Roster,
}

/// The weapon roster: every catalog weapon with its eligibility flag.
/// A `BTreeMap` keeps listings name-ordered for free.
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Roster(BTreeMap<String, RosterEntry>);

#[derive(serde::Serialize, serde::Deserialize)]
pub struct RosterEntry {
    pub class: WeaponClass,
    pub enabled: bool,
}

impl PersistentState {
    fn state_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(PSTATE_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    pub async fn load() -> Result<Self> {
        let path = Self::state_path()?;

        let mut file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // First run: everything in the catalog is eligible.
                return Ok(Self {
                    roster: Roster::seeded(),
                });
            }
            Err(e) => {
                return Err(anyhow!(
                    "Could not open state at `{}`: {}",
                    path.to_string_lossy(),
                    e
                ))
            }
        };

        let mut contents = String::new();
        file.read_to_string(&mut contents).await.map_err(|e| {
            anyhow!(
                "Could not read state at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        let mut pstate: PersistentState = toml::from_str(&contents).map_err(|e| {
            anyhow!(
                "Could not parse state at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        // Weapons added to the catalog since the file was written start out
        // eligible.
        pstate.roster.seed_missing();

        Ok(pstate)
    }

    pub async fn save(&self) -> Result<()> {
        let path = Self::state_path()?;
        let pstate_str = toml::to_string_pretty(&self)
            .map_err(|e| anyhow!("Could not serialize state: {}", e))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                anyhow!(
                    "Could not create directory `{}`: {}",
                    parent.to_string_lossy(),
                    e
                )
            })?;
        }

        // Create a temporary file in the same directory.
        let tmp_path = path.with_extension("toml.new");

        tokio::fs::write(&tmp_path, pstate_str).await.map_err(|e| {
            anyhow!(
                "Could not write state to temporary file `{}`: {}",
                tmp_path.to_string_lossy(),
                e
            )
        })?;

        // Atomically rename the temporary file over the target file.
        tokio::fs::rename(&tmp_path, &path).await.map_err(|e| {
            anyhow!(
                "Could not rename temporary file `{}` to `{}`: {}",
                tmp_path.to_string_lossy(),
                path.to_string_lossy(),
                e
            )
        })?;

        Ok(())
    }
}

impl Roster {
    fn seeded() -> Self {
        let mut roster = Self(BTreeMap::new());
        roster.seed_missing();
        roster
    }

    fn seed_missing(&mut self) {
        for (name, class) in CATALOG {
            self.0.entry(name.to_string()).or_insert(RosterEntry {
                class: *class,
                enabled: true,
            });
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Names of eligible weapons, optionally restricted to one class.
    pub fn eligible(&self, class: Option<WeaponClass>) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, entry)| entry.enabled)
            .filter(|(_, entry)| class.map(|c| entry.class == c).unwrap_or(true))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Names of excluded weapons.
    pub fn excluded(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, entry)| !entry.enabled)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Names of every weapon, eligible or not, optionally restricted to one
    /// class.
    pub fn names(&self, class: Option<WeaponClass>) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, entry)| class.map(|c| entry.class == c).unwrap_or(true))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Flip one weapon's flag.  Returns whether anything changed; an
    /// unknown name or an already-matching flag both leave the roster
    /// untouched.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.0.get_mut(name) {
            Some(entry) if entry.enabled != enabled => {
                entry.enabled = enabled;
                true
            }
            _ => false,
        }
    }

    /// Flip the flag for every weapon of a class.  Returns how many flags
    /// actually changed.
    pub fn set_class_enabled(&mut self, class: WeaponClass, enabled: bool) -> usize {
        let mut changed = 0;
        for entry in self.0.values_mut() {
            if entry.class == class && entry.enabled != enabled {
                entry.enabled = enabled;
                changed += 1;
            }
        }
        changed
    }

    /// Re-enable everything.  Returns how many weapons were excluded.
    pub fn reset_all(&mut self) -> usize {
        let mut changed = 0;
        for entry in self.0.values_mut() {
            if !entry.enabled {
                entry.enabled = true;
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_roster_has_everything_eligible() {
        let roster = Roster::seeded();
        assert_eq!(roster.eligible(None).len(), CATALOG.len());
        assert!(roster.excluded().is_empty());
    }

    #[test]
    fn eligible_listing_is_name_ordered_and_class_filtered() {
        let roster = Roster::seeded();

        let all = roster.eligible(None);
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted);

        let brushes = roster.eligible(Some(WeaponClass::Brush));
        assert_eq!(brushes, vec!["Inkbrush", "Octobrush", "Painbrush"]);
    }

    #[test]
    fn set_enabled_reports_real_changes_only() {
        let mut roster = Roster::seeded();

        assert!(roster.set_enabled("Inkbrush", false));
        assert!(!roster.set_enabled("Inkbrush", false));
        assert_eq!(roster.excluded(), vec!["Inkbrush"]);

        assert!(!roster.set_enabled("Splatterscope Mk XII", false));
        assert!(!roster.contains("Splatterscope Mk XII"));

        assert!(roster.set_enabled("Inkbrush", true));
        assert!(roster.excluded().is_empty());
    }

    #[test]
    fn class_toggles_count_flipped_flags() {
        let mut roster = Roster::seeded();
        roster.set_enabled("Inkbrush", false);

        // Inkbrush was already off, so only the other two brushes flip.
        assert_eq!(roster.set_class_enabled(WeaponClass::Brush, false), 2);
        assert_eq!(roster.set_class_enabled(WeaponClass::Brush, false), 0);
        assert_eq!(roster.excluded().len(), 3);
        assert!(roster.eligible(Some(WeaponClass::Brush)).is_empty());

        assert_eq!(roster.set_class_enabled(WeaponClass::Brush, true), 3);
    }

    #[test]
    fn reset_reenables_and_counts() {
        let mut roster = Roster::seeded();
        roster.set_class_enabled(WeaponClass::Charger, false);
        let excluded = roster.excluded().len();
        assert!(excluded > 0);

        assert_eq!(roster.reset_all(), excluded);
        assert_eq!(roster.reset_all(), 0);
        assert!(roster.excluded().is_empty());
    }
}
