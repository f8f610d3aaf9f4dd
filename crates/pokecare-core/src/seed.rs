//! # Seed Roster
//!
//! The starter creatures used whenever no valid roster is stored.
//!
//! Seed data is compiled in and immutable. All creatures start at the base
//! stage with both stats at zero.

use crate::{Creature, FormTarget, Roster};

/// Energy every starter carries in its override record.
const STARTER_ENERGY: u32 = 100;

fn line(
    id: &str,
    base: (&str, &str, u32, u32),
    second: (&str, &str, u32, u32),
    third: Option<(&str, &str, u32, u32)>,
) -> Creature {
    let form = |(name, slug, attack, defense): (&str, &str, u32, u32)| {
        FormTarget::new(
            name,
            format!("assets/gifs/{slug}.gif"),
            format!("assets/avatars/{slug}.png"),
            attack,
            defense,
        )
    };

    let (name, slug, attack, defense) = base;
    let creature = Creature::new(
        id,
        name,
        format!("assets/gifs/{slug}.gif"),
        format!("assets/avatars/{slug}.png"),
        attack,
        defense,
    )
    .with_energy(STARTER_ENERGY)
    .with_second(form(second));

    match third {
        Some(third) => creature.with_third(form(third)),
        None => creature,
    }
}

/// Build the default roster.
#[must_use]
pub fn default_roster() -> Roster {
    Roster::new(vec![
        line(
            "p1",
            ("Bulbasaur", "bulbasaur", 49, 49),
            ("Ivysaur", "ivysaur", 62, 63),
            Some(("Venusaur", "venusaur", 82, 83)),
        ),
        line(
            "p2",
            ("Charmander", "charmander", 52, 43),
            ("Charmeleon", "charmeleon", 64, 58),
            Some(("Charizard", "charizard", 84, 78)),
        ),
        line(
            "p3",
            ("Squirtle", "squirtle", 48, 65),
            ("Wartortle", "wartortle", 63, 80),
            Some(("Blastoise", "blastoise", 83, 100)),
        ),
        line(
            "p4",
            ("Pikachu", "pikachu", 55, 40),
            ("Raichu", "raichu", 90, 55),
            None,
        ),
        line(
            "p5",
            ("Gastly", "gastly", 35, 30),
            ("Haunter", "haunter", 50, 45),
            Some(("Gengar", "gengar", 65, 60)),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CreatureId, Stage, Stat};
    use std::collections::BTreeSet;

    #[test]
    fn seed_ids_are_unique() {
        let roster = default_roster();
        let ids: BTreeSet<&CreatureId> = roster.iter().map(|c| &c.id).collect();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn seed_starts_at_base_with_zero_stats() {
        for creature in &default_roster() {
            assert_eq!(creature.stage(), Stage::Base);
            assert_eq!(creature.health, Stat::MIN);
            assert_eq!(creature.happiness, Stat::MIN);
            assert!(!creature.evolution_sound_played);
            assert!(creature.target(Stage::Second).is_some());
        }
    }

    #[test]
    fn two_stage_line_has_no_final_form() {
        let roster = default_roster();
        let pikachu = roster.get(&CreatureId::new("p4")).expect("p4");
        assert!(pikachu.target(Stage::Third).is_none());
    }
}
