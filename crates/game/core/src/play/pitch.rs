//! Swing decision and the pitch-outcome table pipeline.
//!
//! Stage order is fixed: ratings base → count → pitch type → location (with
//! intent) → take collapse. Reordering the stages changes sampled outcomes.

use crate::env::ProbTable;
use crate::state::{
    BatterRatings, Count, Intent, Location, PitchFamily, PitchResult, PitchType, PitcherRatings,
};

pub const SWING_BASE: f64 = 0.55;
pub const SWING_MIN: f64 = 0.05;
pub const SWING_MAX: f64 = 0.95;

/// Probability that the batter offers at the pitch.
pub fn swing_probability(discipline: u8, count: Count, location: Location) -> f64 {
    let mut p = SWING_BASE - (f64::from(discipline) - 50.0) / 200.0;
    if count.balls >= 3 {
        p -= 0.15;
    }
    if count.strikes >= 2 {
        p += 0.20;
    }
    match location {
        Location::Middle => p += 0.10,
        Location::High => p -= 0.05,
        Location::Low => {}
    }
    p.clamp(SWING_MIN, SWING_MAX)
}

/// Ratings-derived starting table.
///
/// Control pulls mass out of `ball`, stuff moves mass from contact to
/// `strike`, and batter contact pushes it back toward `in_play`.
pub fn base_table(batter: &BatterRatings, pitcher: &PitcherRatings) -> ProbTable<PitchResult> {
    let control = (f64::from(pitcher.control) - 50.0) / 250.0;
    let stuff = (f64::from(pitcher.stuff) - 50.0) / 250.0;
    let contact = (f64::from(batter.contact) - 50.0) / 300.0;

    ProbTable::from_weights(&[
        (PitchResult::Ball, 0.35 - control),
        (PitchResult::Strike, 0.22 + control / 2.0 + stuff - contact),
        (PitchResult::Foul, 0.20 + contact / 2.0),
        (PitchResult::InPlay, 0.23 - stuff + contact),
    ])
}

fn count_deltas(count: Count) -> Vec<(PitchResult, f64)> {
    let mut deltas = Vec::with_capacity(4);
    if count.balls >= 3 {
        deltas.extend([
            (PitchResult::Ball, -0.06),
            (PitchResult::Strike, 0.03),
            (PitchResult::InPlay, 0.03),
        ]);
    }
    if count.strikes >= 2 {
        deltas.extend([(PitchResult::Foul, 0.06), (PitchResult::Strike, -0.03)]);
    }
    if count == Count::default() {
        deltas.push((PitchResult::Strike, 0.03));
    }
    deltas
}

fn pitch_type_deltas(pitch_type: PitchType) -> [(PitchResult, f64); 4] {
    match pitch_type.family() {
        PitchFamily::Fastball => [
            (PitchResult::Ball, -0.04),
            (PitchResult::Strike, 0.02),
            (PitchResult::Foul, 0.02),
            (PitchResult::InPlay, 0.0),
        ],
        PitchFamily::Breaking => [
            (PitchResult::Ball, 0.03),
            (PitchResult::Strike, 0.03),
            (PitchResult::Foul, -0.02),
            (PitchResult::InPlay, -0.04),
        ],
        PitchFamily::Offspeed => [
            (PitchResult::Ball, 0.02),
            (PitchResult::Strike, 0.02),
            (PitchResult::Foul, -0.02),
            (PitchResult::InPlay, -0.02),
        ],
    }
}

fn location_deltas(location: Location, intent: Intent) -> [(PitchResult, f64); 6] {
    let location_stage = match location {
        Location::High => [
            (PitchResult::Ball, 0.04),
            (PitchResult::Foul, 0.02),
            (PitchResult::InPlay, -0.04),
        ],
        Location::Middle => [
            (PitchResult::Ball, -0.08),
            (PitchResult::Strike, 0.02),
            (PitchResult::InPlay, 0.06),
        ],
        Location::Low => [
            (PitchResult::Ball, 0.03),
            (PitchResult::Strike, 0.01),
            (PitchResult::InPlay, -0.01),
        ],
    };
    let intent_stage = match intent {
        Intent::Attack => [
            (PitchResult::Ball, -0.05),
            (PitchResult::Strike, 0.0),
            (PitchResult::InPlay, 0.03),
        ],
        Intent::Paint => [
            (PitchResult::Ball, 0.02),
            (PitchResult::Strike, 0.03),
            (PitchResult::InPlay, -0.03),
        ],
        Intent::Waste => [
            (PitchResult::Ball, 0.20),
            (PitchResult::Strike, -0.05),
            (PitchResult::InPlay, -0.08),
        ],
        Intent::Nibble => [
            (PitchResult::Ball, 0.06),
            (PitchResult::Strike, 0.01),
            (PitchResult::InPlay, -0.03),
        ],
    };
    let mut deltas = [(PitchResult::Ball, 0.0); 6];
    deltas[..3].copy_from_slice(&location_stage);
    deltas[3..].copy_from_slice(&intent_stage);
    deltas
}

/// Inputs for one pitch-outcome table.
#[derive(Clone, Copy, Debug)]
pub struct PitchContext {
    pub batter: BatterRatings,
    pub pitcher: PitcherRatings,
    pub count: Count,
    pub pitch_type: PitchType,
    pub location: Location,
    pub intent: Intent,
}

/// Runs the full modifier pipeline. Every stage renormalizes.
pub fn outcome_table(ctx: &PitchContext, swung: bool) -> ProbTable<PitchResult> {
    let table = base_table(&ctx.batter, &ctx.pitcher)
        .apply(&count_deltas(ctx.count))
        .apply(&pitch_type_deltas(ctx.pitch_type))
        .apply(&location_deltas(ctx.location, ctx.intent));

    if swung {
        table
    } else {
        table.collapse(&[PitchResult::Foul, PitchResult::InPlay])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx(count: Count, location: Location, intent: Intent) -> PitchContext {
        PitchContext {
            batter: BatterRatings::default(),
            pitcher: PitcherRatings::default(),
            count,
            pitch_type: PitchType::FF,
            location,
            intent,
        }
    }

    #[test]
    fn swing_probability_follows_count_and_location() {
        let neutral = swing_probability(50, Count::default(), Location::Low);
        assert!((neutral - 0.55).abs() < 1e-12);

        let two_strikes_middle = swing_probability(50, Count::new(0, 2), Location::Middle);
        assert!((two_strikes_middle - 0.85).abs() < 1e-12);

        let three_balls_high = swing_probability(50, Count::new(3, 0), Location::High);
        assert!((three_balls_high - 0.35).abs() < 1e-12);
    }

    #[test]
    fn swing_probability_is_clamped() {
        assert_eq!(swing_probability(0, Count::new(0, 2), Location::Middle), SWING_MAX);
        let patient = swing_probability(100, Count::new(3, 0), Location::High);
        assert!((patient - 0.10).abs() < 1e-12);
        assert!(swing_probability(255, Count::new(3, 0), Location::High) >= SWING_MIN);
    }

    #[test]
    fn take_leaves_only_balls_and_strikes() {
        let table = outcome_table(&ctx(Count::new(1, 1), Location::Middle, Intent::Attack), false);
        assert_eq!(table.get(PitchResult::Foul), 0.0);
        assert_eq!(table.get(PitchResult::InPlay), 0.0);
        assert!(table.is_closed());
    }

    #[test]
    fn waste_pitch_is_mostly_a_ball() {
        let waste = outcome_table(&ctx(Count::new(0, 2), Location::High, Intent::Waste), true);
        let attack = outcome_table(&ctx(Count::new(0, 2), Location::High, Intent::Attack), true);
        assert!(waste.get(PitchResult::Ball) > attack.get(PitchResult::Ball));
    }

    fn pitch_type() -> impl Strategy<Value = PitchType> {
        (0..PitchType::ALL.len()).prop_map(|i| PitchType::ALL[i])
    }

    fn location() -> impl Strategy<Value = Location> {
        prop_oneof![Just(Location::High), Just(Location::Middle), Just(Location::Low)]
    }

    fn intent() -> impl Strategy<Value = Intent> {
        prop_oneof![
            Just(Intent::Attack),
            Just(Intent::Paint),
            Just(Intent::Waste),
            Just(Intent::Nibble)
        ]
    }

    proptest! {
        #[test]
        fn every_pipeline_output_is_closed(
            contact in 0u8..=100,
            control in 0u8..=100,
            stuff in 0u8..=100,
            balls in 0u8..=3,
            strikes in 0u8..=2,
            pitch_type in pitch_type(),
            location in location(),
            intent in intent(),
            swung in any::<bool>(),
        ) {
            let ctx = PitchContext {
                batter: BatterRatings { contact, ..BatterRatings::default() },
                pitcher: PitcherRatings { control, stuff, ..PitcherRatings::default() },
                count: Count::new(balls, strikes),
                pitch_type,
                location,
                intent,
            };
            let table = outcome_table(&ctx, swung);
            prop_assert!(table.is_closed());
            prop_assert!(table.entries().iter().all(|&(_, p)| p >= 0.0));
        }
    }
}
