//! Contact quality bands and the batted-ball table.

use crate::env::ProbTable;
use crate::state::{BattedBallType, ContactQuality, Location, PitchFamily, PitchType};

/// Width of the solid-contact band above the crushed threshold.
const SOLID_BAND: f64 = 0.45;

/// Draw below which contact is crushed.
pub fn crushed_threshold(power: u8, pitch_type: PitchType, location: Location) -> f64 {
    let location_bonus = match location {
        Location::Middle => 0.05,
        Location::High => 0.0,
        Location::Low => -0.03,
    };
    let family_bonus = match pitch_type.family() {
        PitchFamily::Fastball => 0.0,
        PitchFamily::Breaking => -0.02,
        PitchFamily::Offspeed => -0.01,
    };
    (0.10 + (f64::from(power) - 50.0) / 250.0 + location_bonus + family_bonus).clamp(0.02, 0.5)
}

/// Classifies contact with one draw against threshold bands.
pub fn contact_quality(
    power: u8,
    pitch_type: PitchType,
    location: Location,
    draw: f64,
) -> ContactQuality {
    let crushed = crushed_threshold(power, pitch_type, location);
    if draw < crushed {
        ContactQuality::Crushed
    } else if draw < crushed + SOLID_BAND {
        ContactQuality::Solid
    } else {
        ContactQuality::Weak
    }
}

/// Batted-ball distribution after the contact and movement shifts.
///
/// Batter contact lifts line drives at the expense of pop-ups; pitcher
/// movement turns fly balls into grounders.
pub fn batted_ball_table(contact: u8, movement: u8) -> ProbTable<BattedBallType> {
    let contact_shift = (f64::from(contact) - 50.0) / 500.0;
    let movement_shift = (f64::from(movement) - 50.0) / 400.0;

    ProbTable::from_weights(&[
        (BattedBallType::Ground, 0.43),
        (BattedBallType::Fly, 0.33),
        (BattedBallType::Line, 0.16),
        (BattedBallType::Pop, 0.08),
    ])
    .apply(&[
        (BattedBallType::Line, contact_shift),
        (BattedBallType::Pop, -contact_shift),
    ])
    .apply(&[
        (BattedBallType::Ground, movement_shift),
        (BattedBallType::Fly, -movement_shift),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_partition_the_draw() {
        let crushed = crushed_threshold(50, PitchType::FF, Location::High);
        assert!((crushed - 0.10).abs() < 1e-12);
        assert_eq!(
            contact_quality(50, PitchType::FF, Location::High, 0.05),
            ContactQuality::Crushed
        );
        assert_eq!(
            contact_quality(50, PitchType::FF, Location::High, 0.30),
            ContactQuality::Solid
        );
        assert_eq!(
            contact_quality(50, PitchType::FF, Location::High, 0.90),
            ContactQuality::Weak
        );
    }

    #[test]
    fn power_and_middle_location_raise_crushed_band() {
        let base = crushed_threshold(50, PitchType::SL, Location::Low);
        let boosted = crushed_threshold(90, PitchType::FF, Location::Middle);
        assert!(boosted > base);
    }

    #[test]
    fn neutral_ratings_keep_base_table() {
        let table = batted_ball_table(50, 50);
        assert!((table.get(BattedBallType::Ground) - 0.43).abs() < 1e-9);
        assert!(table.is_closed());
    }

    #[test]
    fn movement_favors_ground_balls() {
        let sinker = batted_ball_table(50, 90);
        assert!(sinker.get(BattedBallType::Ground) > 0.43);
        assert!(sinker.get(BattedBallType::Fly) < 0.33);
    }
}
