//! Effective ratings: base ratings plus archetype adjustments.

use crate::state::{
    BatterArchetype, BatterProfile, BatterRatings, PitcherArchetype, PitcherProfile,
    PitcherRatings, RATING_MAX,
};

/// Additive archetype shifts for `[contact, power, discipline, speed]`.
const fn batter_shift(archetype: BatterArchetype) -> [i16; 4] {
    match archetype {
        BatterArchetype::Balanced => [0, 0, 0, 0],
        BatterArchetype::Slugger => [-5, 10, -3, 0],
        BatterArchetype::ContactHitter => [10, -6, 2, 0],
        BatterArchetype::Speedster => [3, -5, 0, 15],
        BatterArchetype::Patient => [2, -2, 12, 0],
    }
}

/// Additive archetype shifts for `[stuff, control, movement, stamina]`.
const fn pitcher_shift(archetype: PitcherArchetype) -> [i16; 4] {
    match archetype {
        PitcherArchetype::Balanced => [0, 0, 0, 0],
        PitcherArchetype::PowerArm => [10, -5, 0, 0],
        PitcherArchetype::Finesse => [-5, 10, 3, 0],
        PitcherArchetype::Groundballer => [-3, 0, 12, 0],
    }
}

#[inline]
fn adjust(base: u8, shift: i16) -> u8 {
    (i16::from(base) + shift).clamp(0, i16::from(RATING_MAX)) as u8
}

/// Batter ratings as the resolver uses them, each clamped to `0..=100`.
pub fn effective_batter(profile: &BatterProfile) -> BatterRatings {
    let [contact, power, discipline, speed] = batter_shift(profile.archetype);
    let base = profile.ratings;
    BatterRatings {
        contact: adjust(base.contact, contact),
        power: adjust(base.power, power),
        discipline: adjust(base.discipline, discipline),
        speed: adjust(base.speed, speed),
    }
}

/// Pitcher ratings as the resolver uses them, each clamped to `0..=100`.
pub fn effective_pitcher(profile: &PitcherProfile) -> PitcherRatings {
    let [stuff, control, movement, stamina] = pitcher_shift(profile.archetype);
    let base = profile.ratings;
    PitcherRatings {
        stuff: adjust(base.stuff, stuff),
        control: adjust(base.control, control),
        movement: adjust(base.movement, movement),
        stamina: adjust(base.stamina, stamina),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugger_trades_contact_for_power() {
        let profile = BatterProfile {
            ratings: BatterRatings::default(),
            archetype: BatterArchetype::Slugger,
        };
        let ratings = effective_batter(&profile);
        assert_eq!(ratings.power, 60);
        assert_eq!(ratings.contact, 45);
    }

    #[test]
    fn adjustments_clamp_to_scale() {
        let profile = BatterProfile {
            ratings: BatterRatings {
                contact: 2,
                power: 98,
                discipline: 50,
                speed: 50,
            },
            archetype: BatterArchetype::Slugger,
        };
        let ratings = effective_batter(&profile);
        assert_eq!(ratings.power, 100);
        assert_eq!(ratings.contact, 0);
    }

    #[test]
    fn groundballer_gains_movement() {
        let profile = PitcherProfile {
            archetype: PitcherArchetype::Groundballer,
            ..PitcherProfile::default()
        };
        assert_eq!(effective_pitcher(&profile).movement, 62);
    }
}
