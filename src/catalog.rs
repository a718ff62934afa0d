//! The built-in weapon catalog.
//!
//! The roster in persistent state tracks eligibility per weapon; this module
//! is the authoritative list of what exists and which class each weapon
//! belongs to.

use serde::{Deserialize, Serialize};

/// A weapon class, matching the in-game grouping.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum WeaponClass {
    Shooter,
    Blaster,
    Roller,
    Brush,
    Charger,
    Slosher,
    Splatling,
    Dualies,
    Brella,
    Stringer,
    Splatana,
}

impl WeaponClass {
    pub const ALL: [WeaponClass; 11] = [
        WeaponClass::Shooter,
        WeaponClass::Blaster,
        WeaponClass::Roller,
        WeaponClass::Brush,
        WeaponClass::Charger,
        WeaponClass::Slosher,
        WeaponClass::Splatling,
        WeaponClass::Dualies,
        WeaponClass::Brella,
        WeaponClass::Stringer,
        WeaponClass::Splatana,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponClass::Shooter => "shooter",
            WeaponClass::Blaster => "blaster",
            WeaponClass::Roller => "roller",
            WeaponClass::Brush => "brush",
            WeaponClass::Charger => "charger",
            WeaponClass::Slosher => "slosher",
            WeaponClass::Splatling => "splatling",
            WeaponClass::Dualies => "dualies",
            WeaponClass::Brella => "brella",
            WeaponClass::Stringer => "stringer",
            WeaponClass::Splatana => "splatana",
        }
    }

    /// Parse user input into a class.  Case-insensitive, tolerates the
    /// singular form of "dualies".
    pub fn parse(input: &str) -> Option<WeaponClass> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("dualie") {
            return Some(WeaponClass::Dualies);
        }
        WeaponClass::ALL
            .into_iter()
            .find(|class| input.eq_ignore_ascii_case(class.as_str()))
    }
}

impl std::fmt::Display for WeaponClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every weapon the bot knows about, with its class.
pub const CATALOG: &[(&str, WeaponClass)] = &[
    ("Sploosh-o-matic", WeaponClass::Shooter),
    ("Splattershot Jr.", WeaponClass::Shooter),
    ("Splash-o-matic", WeaponClass::Shooter),
    ("Aerospray MG", WeaponClass::Shooter),
    ("Splattershot", WeaponClass::Shooter),
    (".52 Gal", WeaponClass::Shooter),
    ("N-ZAP '85", WeaponClass::Shooter),
    ("Splattershot Pro", WeaponClass::Shooter),
    (".96 Gal", WeaponClass::Shooter),
    ("Jet Squelcher", WeaponClass::Shooter),
    ("Splattershot Nova", WeaponClass::Shooter),
    ("L-3 Nozzlenose", WeaponClass::Shooter),
    ("H-3 Nozzlenose", WeaponClass::Shooter),
    ("Squeezer", WeaponClass::Shooter),
    ("Luna Blaster", WeaponClass::Blaster),
    ("Blaster", WeaponClass::Blaster),
    ("Range Blaster", WeaponClass::Blaster),
    ("Clash Blaster", WeaponClass::Blaster),
    ("Rapid Blaster", WeaponClass::Blaster),
    ("Rapid Blaster Pro", WeaponClass::Blaster),
    ("S-BLAST '92", WeaponClass::Blaster),
    ("Carbon Roller", WeaponClass::Roller),
    ("Splat Roller", WeaponClass::Roller),
    ("Dynamo Roller", WeaponClass::Roller),
    ("Flingza Roller", WeaponClass::Roller),
    ("Big Swig Roller", WeaponClass::Roller),
    ("Inkbrush", WeaponClass::Brush),
    ("Octobrush", WeaponClass::Brush),
    ("Painbrush", WeaponClass::Brush),
    ("Classic Squiffer", WeaponClass::Charger),
    ("Splat Charger", WeaponClass::Charger),
    ("Splatterscope", WeaponClass::Charger),
    ("E-liter 4K", WeaponClass::Charger),
    ("E-liter 4K Scope", WeaponClass::Charger),
    ("Bamboozler 14 Mk I", WeaponClass::Charger),
    ("Goo Tuber", WeaponClass::Charger),
    ("Snipewriter 5H", WeaponClass::Charger),
    ("Slosher", WeaponClass::Slosher),
    ("Tri-Slosher", WeaponClass::Slosher),
    ("Sloshing Machine", WeaponClass::Slosher),
    ("Bloblobber", WeaponClass::Slosher),
    ("Explosher", WeaponClass::Slosher),
    ("Dread Wringer", WeaponClass::Slosher),
    ("Mini Splatling", WeaponClass::Splatling),
    ("Heavy Splatling", WeaponClass::Splatling),
    ("Hydra Splatling", WeaponClass::Splatling),
    ("Ballpoint Splatling", WeaponClass::Splatling),
    ("Nautilus 47", WeaponClass::Splatling),
    ("Heavy Edit Splatling", WeaponClass::Splatling),
    ("Dapple Dualies", WeaponClass::Dualies),
    ("Splat Dualies", WeaponClass::Dualies),
    ("Glooga Dualies", WeaponClass::Dualies),
    ("Dualie Squelchers", WeaponClass::Dualies),
    ("Dark Tetra Dualies", WeaponClass::Dualies),
    ("Douser Dualies FF", WeaponClass::Dualies),
    ("Splat Brella", WeaponClass::Brella),
    ("Tenta Brella", WeaponClass::Brella),
    ("Undercover Brella", WeaponClass::Brella),
    ("Recycled Brella 24 Mk I", WeaponClass::Brella),
    ("Tri-Stringer", WeaponClass::Stringer),
    ("REEF-LUX 450", WeaponClass::Stringer),
    ("Wellstring V", WeaponClass::Stringer),
    ("Splatana Stamper", WeaponClass::Splatana),
    ("Splatana Wiper", WeaponClass::Splatana),
    ("Mint Decavitator", WeaponClass::Splatana),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_names_are_unique_and_non_empty() {
        let mut seen = HashSet::new();
        assert!(!CATALOG.is_empty());
        for (name, _) in CATALOG {
            assert!(!name.is_empty());
            assert!(seen.insert(*name), "duplicate catalog entry: {}", name);
        }
    }

    #[test]
    fn every_class_round_trips_through_parse() {
        for class in WeaponClass::ALL {
            assert_eq!(WeaponClass::parse(class.as_str()), Some(class));
            assert_eq!(
                WeaponClass::parse(&class.as_str().to_uppercase()),
                Some(class)
            );
        }
        assert_eq!(WeaponClass::parse("dualie"), Some(WeaponClass::Dualies));
        assert_eq!(WeaponClass::parse("squeezer"), None);
    }

    #[test]
    fn every_class_has_at_least_one_weapon() {
        for class in WeaponClass::ALL {
            assert!(
                CATALOG.iter().any(|(_, c)| *c == class),
                "no weapons in class {}",
                class
            );
        }
    }
}
