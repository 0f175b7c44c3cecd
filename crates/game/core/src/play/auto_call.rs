//! Automatic pitch calling for simulated play.
//!
//! Draw order: pitch type, then location, then intent.

use crate::env::{ProbTable, RngState, weighted_roll};
use crate::state::{Count, Intent, Location, PitchCall, PitchType, PitcherProfile};

/// Pitch type drawn from the repertoire's usage weights.
///
/// An empty (or all-zero) repertoire falls back to a four-seamer.
pub fn choose_pitch_type(profile: &PitcherProfile, draw: f64) -> PitchType {
    let weights: Vec<(PitchType, f64)> = profile
        .repertoire
        .iter()
        .map(|&(pitch, weight)| (pitch, f64::from(weight)))
        .collect();
    if weights.iter().all(|&(_, weight)| weight <= 0.0) {
        return PitchType::FF;
    }
    weighted_roll(&ProbTable::from_weights(&weights), draw)
}

fn location_table(count: Count) -> ProbTable<Location> {
    let weights = if count.strikes > count.balls {
        [0.35, 0.20, 0.45]
    } else if count.balls > count.strikes {
        [0.25, 0.45, 0.30]
    } else {
        [0.30, 0.35, 0.35]
    };
    ProbTable::from_weights(&[
        (Location::High, weights[0]),
        (Location::Middle, weights[1]),
        (Location::Low, weights[2]),
    ])
}

fn intent_table(count: Count) -> ProbTable<Intent> {
    let weights = if count.balls >= 3 {
        [0.70, 0.20, 0.0, 0.10]
    } else if count.strikes >= 2 && count.balls < 2 {
        [0.10, 0.35, 0.35, 0.20]
    } else {
        [0.40, 0.30, 0.10, 0.20]
    };
    ProbTable::from_weights(&[
        (Intent::Attack, weights[0]),
        (Intent::Paint, weights[1]),
        (Intent::Waste, weights[2]),
        (Intent::Nibble, weights[3]),
    ])
}

/// Picks the next pitch for a simulated at-bat.
pub fn auto_call(profile: &PitcherProfile, count: Count, rng: &mut RngState) -> PitchCall {
    let pitch_type = choose_pitch_type(profile, rng.draw());
    let location = weighted_roll(&location_table(count), rng.draw());
    let intent = weighted_roll(&intent_table(count), rng.draw());
    PitchCall::new(pitch_type, location, intent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Repertoire;

    #[test]
    fn three_ball_counts_never_waste() {
        let table = intent_table(Count::new(3, 1));
        assert_eq!(table.get(Intent::Waste), 0.0);
    }

    #[test]
    fn empty_repertoire_throws_fastballs() {
        let profile = PitcherProfile {
            repertoire: Repertoire::new(),
            ..PitcherProfile::default()
        };
        assert_eq!(choose_pitch_type(&profile, 0.7), PitchType::FF);
    }

    #[test]
    fn repertoire_weights_drive_selection() {
        let profile = PitcherProfile::default();
        assert_eq!(choose_pitch_type(&profile, 0.10), PitchType::FF);
        assert_eq!(choose_pitch_type(&profile, 0.70), PitchType::SL);
        assert_eq!(choose_pitch_type(&profile, 0.95), PitchType::CH);
    }

    #[test]
    fn auto_call_consumes_three_draws() {
        let mut rng = RngState::new(1);
        auto_call(&PitcherProfile::default(), Count::default(), &mut rng);
        assert_eq!(rng.cursor, 3);
    }
}
