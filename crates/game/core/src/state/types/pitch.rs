use super::{AtBatId, PitchId};

/// Pitch classification codes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum PitchType {
    /// Four-seam fastball.
    FF,
    /// Sinker.
    SI,
    /// Cutter.
    CT,
    /// Slider.
    SL,
    /// Sweeper.
    SW,
    /// Curveball.
    CU,
    /// Knuckle curve.
    KB,
    /// Changeup.
    CH,
    /// Splitter.
    SF,
}

/// Coarse grouping used by the contact-quality bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PitchFamily {
    Fastball,
    Breaking,
    Offspeed,
}

impl PitchType {
    pub const ALL: [PitchType; 9] = [
        PitchType::FF,
        PitchType::SI,
        PitchType::CT,
        PitchType::SL,
        PitchType::SW,
        PitchType::CU,
        PitchType::KB,
        PitchType::CH,
        PitchType::SF,
    ];

    pub const fn family(self) -> PitchFamily {
        match self {
            PitchType::FF | PitchType::SI | PitchType::CT => PitchFamily::Fastball,
            PitchType::SL | PitchType::SW | PitchType::CU | PitchType::KB => PitchFamily::Breaking,
            PitchType::CH | PitchType::SF => PitchFamily::Offspeed,
        }
    }
}

/// Vertical target of a pitch.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Location {
    High,
    Middle,
    Low,
}

/// What the pitcher is trying to do with the pitch.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Intent {
    /// Challenge the hitter in the zone.
    Attack,
    /// Aim for the edges.
    Paint,
    /// Deliberately out of the zone.
    Waste,
    /// Work around the zone without giving in.
    Nibble,
}

/// Pitch-level outcome.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PitchResult {
    Ball,
    Strike,
    Foul,
    InPlay,
}

/// Balls and strikes inside an at-bat.
///
/// Bounded by `balls <= 4` and `strikes <= 3`; reaching either bound ends the
/// at-bat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

impl Count {
    pub const MAX_BALLS: u8 = 4;
    pub const MAX_STRIKES: u8 = 3;

    pub const fn new(balls: u8, strikes: u8) -> Self {
        Self { balls, strikes }
    }

    /// Applies a pitch outcome. A two-strike foul leaves the count unchanged;
    /// a ball in play leaves it unchanged as well.
    #[must_use]
    pub fn after(self, result: PitchResult) -> Self {
        match result {
            PitchResult::Ball => Self {
                balls: (self.balls + 1).min(Self::MAX_BALLS),
                ..self
            },
            PitchResult::Strike => Self {
                strikes: (self.strikes + 1).min(Self::MAX_STRIKES),
                ..self
            },
            PitchResult::Foul if self.strikes < 2 => Self {
                strikes: self.strikes + 1,
                ..self
            },
            PitchResult::Foul | PitchResult::InPlay => self,
        }
    }

    pub const fn is_walk(self) -> bool {
        self.balls >= Self::MAX_BALLS
    }

    pub const fn is_strikeout(self) -> bool {
        self.strikes >= Self::MAX_STRIKES
    }

    pub const fn is_valid(self) -> bool {
        self.balls <= Self::MAX_BALLS && self.strikes <= Self::MAX_STRIKES
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.balls, self.strikes)
    }
}

/// What the pitcher is asked to throw: the payload of a pitch call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchCall {
    pub pitch_type: PitchType,
    pub location: Location,
    pub intent: Intent,
}

impl PitchCall {
    pub const fn new(pitch_type: PitchType, location: Location, intent: Intent) -> Self {
        Self {
            pitch_type,
            location,
            intent,
        }
    }
}

impl std::fmt::Display for PitchCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.pitch_type, self.location, self.intent)
    }
}

/// One thrown pitch. Immutable once recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch {
    pub id: PitchId,
    pub at_bat_id: AtBatId,
    pub pitch_type: PitchType,
    pub location: Location,
    pub intent: Intent,
    pub result: PitchResult,
    /// Whether the batter offered at the pitch.
    pub swung: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn count_caps_balls_and_strikes() {
        assert_eq!(Count::new(3, 0).after(PitchResult::Ball), Count::new(4, 0));
        assert_eq!(Count::new(4, 0).after(PitchResult::Ball), Count::new(4, 0));
        assert_eq!(Count::new(0, 2).after(PitchResult::Strike), Count::new(0, 3));
    }

    #[test]
    fn two_strike_foul_keeps_count() {
        assert_eq!(Count::new(1, 2).after(PitchResult::Foul), Count::new(1, 2));
        assert_eq!(Count::new(1, 1).after(PitchResult::Foul), Count::new(1, 2));
    }

    #[test]
    fn pitch_codes_parse() {
        assert_eq!(PitchType::from_str("FF").unwrap(), PitchType::FF);
        assert_eq!(PitchType::from_str("sw").unwrap(), PitchType::SW);
        assert_eq!(PitchType::KB.to_string(), "KB");
        assert_eq!(Location::from_str("middle").unwrap(), Location::Middle);
        assert_eq!(PitchResult::InPlay.as_ref(), "in_play");
    }
}
