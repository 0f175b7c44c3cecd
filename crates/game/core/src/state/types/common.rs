use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Player registry key. Assigned by the roster source, never by the engine.
    PlayerId,
    "P"
);
define_id!(
    /// Team registry key. Assigned by the roster source, never by the engine.
    TeamId,
    "T"
);
define_id!(SeasonId, "S");
define_id!(GameId, "G");
define_id!(HalfInningId, "H");
define_id!(AtBatId, "AB");
define_id!(PitchId, "PT");
define_id!(EventId, "E");
define_id!(ProposalId, "TR");

/// Logical clock advanced once per reducer dispatch.
///
/// Stands in for wall-clock time inside the engine so that identical action
/// sequences produce identical states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Monotonic allocators for engine-created entities.
///
/// Ids are never reused, including across seasons.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdCounters {
    season: u32,
    game: u32,
    half_inning: u32,
    at_bat: u32,
    pitch: u32,
    event: u32,
    proposal: u32,
}

impl IdCounters {
    pub const fn new() -> Self {
        Self {
            season: 1,
            game: 1,
            half_inning: 1,
            at_bat: 1,
            pitch: 1,
            event: 1,
            proposal: 1,
        }
    }

    pub fn next_season(&mut self) -> SeasonId {
        SeasonId(bump(&mut self.season))
    }

    pub fn next_game(&mut self) -> GameId {
        GameId(bump(&mut self.game))
    }

    pub fn next_half_inning(&mut self) -> HalfInningId {
        HalfInningId(bump(&mut self.half_inning))
    }

    pub fn next_at_bat(&mut self) -> AtBatId {
        AtBatId(bump(&mut self.at_bat))
    }

    pub fn next_pitch(&mut self) -> PitchId {
        PitchId(bump(&mut self.pitch))
    }

    pub fn next_event(&mut self) -> EventId {
        EventId(bump(&mut self.event))
    }

    pub fn next_proposal(&mut self) -> ProposalId {
        ProposalId(bump(&mut self.proposal))
    }
}

impl Default for IdCounters {
    fn default() -> Self {
        Self::new()
    }
}

fn bump(counter: &mut u32) -> u32 {
    let id = *counter;
    *counter = counter.wrapping_add(1);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_prefix() {
        assert_eq!(GameId(12).to_string(), "G-12");
        assert_eq!(AtBatId(3).to_string(), "AB-3");
    }

    #[test]
    fn counters_are_independent_and_monotonic() {
        let mut ids = IdCounters::new();
        assert_eq!(ids.next_game(), GameId(1));
        assert_eq!(ids.next_game(), GameId(2));
        assert_eq!(ids.next_at_bat(), AtBatId(1));
    }
}
