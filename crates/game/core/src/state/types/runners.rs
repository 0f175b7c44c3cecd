//! Base occupancy.
//!
//! [`RunnerState`] is a closed sum over the eight occupancy shapes. Each
//! variant carries exactly the runners it needs, so an illegal combination
//! (a runner id without a base, or a base flag without a runner) cannot be
//! represented.

use bitflags::bitflags;

use super::PlayerId;

bitflags! {
    /// Occupied-base mask derived from a [`RunnerState`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Bases: u8 {
        const FIRST  = 1 << 0;
        const SECOND = 1 << 1;
        const THIRD  = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunnerState {
    #[default]
    Empty,
    First {
        first: PlayerId,
    },
    Second {
        second: PlayerId,
    },
    Third {
        third: PlayerId,
    },
    FirstSecond {
        first: PlayerId,
        second: PlayerId,
    },
    FirstThird {
        first: PlayerId,
        third: PlayerId,
    },
    SecondThird {
        second: PlayerId,
        third: PlayerId,
    },
    Loaded {
        first: PlayerId,
        second: PlayerId,
        third: PlayerId,
    },
}

impl RunnerState {
    /// Builds the variant matching a `[first, second, third]` slot array.
    ///
    /// Total over all eight shapes, so the result always agrees with the
    /// slots it came from.
    pub fn from_slots(slots: [Option<PlayerId>; 3]) -> Self {
        match slots {
            [None, None, None] => Self::Empty,
            [Some(first), None, None] => Self::First { first },
            [None, Some(second), None] => Self::Second { second },
            [None, None, Some(third)] => Self::Third { third },
            [Some(first), Some(second), None] => Self::FirstSecond { first, second },
            [Some(first), None, Some(third)] => Self::FirstThird { first, third },
            [None, Some(second), Some(third)] => Self::SecondThird { second, third },
            [Some(first), Some(second), Some(third)] => Self::Loaded {
                first,
                second,
                third,
            },
        }
    }

    /// `[first, second, third]` view of the occupancy.
    pub fn slots(self) -> [Option<PlayerId>; 3] {
        [self.first(), self.second(), self.third()]
    }

    pub fn first(self) -> Option<PlayerId> {
        match self {
            Self::First { first }
            | Self::FirstSecond { first, .. }
            | Self::FirstThird { first, .. }
            | Self::Loaded { first, .. } => Some(first),
            Self::Empty | Self::Second { .. } | Self::Third { .. } | Self::SecondThird { .. } => {
                None
            }
        }
    }

    pub fn second(self) -> Option<PlayerId> {
        match self {
            Self::Second { second }
            | Self::FirstSecond { second, .. }
            | Self::SecondThird { second, .. }
            | Self::Loaded { second, .. } => Some(second),
            Self::Empty | Self::First { .. } | Self::Third { .. } | Self::FirstThird { .. } => None,
        }
    }

    pub fn third(self) -> Option<PlayerId> {
        match self {
            Self::Third { third }
            | Self::FirstThird { third, .. }
            | Self::SecondThird { third, .. }
            | Self::Loaded { third, .. } => Some(third),
            Self::Empty | Self::First { .. } | Self::Second { .. } | Self::FirstSecond { .. } => {
                None
            }
        }
    }

    pub fn bases(self) -> Bases {
        match self {
            Self::Empty => Bases::empty(),
            Self::First { .. } => Bases::FIRST,
            Self::Second { .. } => Bases::SECOND,
            Self::Third { .. } => Bases::THIRD,
            Self::FirstSecond { .. } => Bases::FIRST | Bases::SECOND,
            Self::FirstThird { .. } => Bases::FIRST | Bases::THIRD,
            Self::SecondThird { .. } => Bases::SECOND | Bases::THIRD,
            Self::Loaded { .. } => Bases::all(),
        }
    }

    pub fn runner_count(self) -> u8 {
        self.bases().bits().count_ones() as u8
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Removes the runner on third, as on a sacrifice fly.
    ///
    /// Only the four shapes with a runner on third change; the rest are
    /// returned as-is.
    pub fn without_third(self) -> Self {
        match self {
            Self::Third { .. } => Self::Empty,
            Self::FirstThird { first, .. } => Self::First { first },
            Self::SecondThird { second, .. } => Self::Second { second },
            Self::Loaded { first, second, .. } => Self::FirstSecond { first, second },
            other @ (Self::Empty
            | Self::First { .. }
            | Self::Second { .. }
            | Self::FirstSecond { .. }) => other,
        }
    }

    /// Variant tag in snake_case, e.g. `first_third`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::First { .. } => "first",
            Self::Second { .. } => "second",
            Self::Third { .. } => "third",
            Self::FirstSecond { .. } => "first_second",
            Self::FirstThird { .. } => "first_third",
            Self::SecondThird { .. } => "second_third",
            Self::Loaded { .. } => "loaded",
        }
    }

    /// Runner ids on base, lead runner last.
    pub fn runners(self) -> impl Iterator<Item = PlayerId> {
        self.slots().into_iter().flatten()
    }
}

impl std::fmt::Display for RunnerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PlayerId = PlayerId(1);
    const B: PlayerId = PlayerId(2);
    const C: PlayerId = PlayerId(3);

    #[test]
    fn slots_round_trip_for_every_shape() {
        let shapes = [
            [None, None, None],
            [Some(A), None, None],
            [None, Some(B), None],
            [None, None, Some(C)],
            [Some(A), Some(B), None],
            [Some(A), None, Some(C)],
            [None, Some(B), Some(C)],
            [Some(A), Some(B), Some(C)],
        ];
        for slots in shapes {
            let state = RunnerState::from_slots(slots);
            assert_eq!(state.slots(), slots);
            assert_eq!(state.runner_count() as usize, slots.iter().flatten().count());
        }
    }

    #[test]
    fn without_third_covers_third_base_shapes() {
        assert_eq!(RunnerState::Third { third: C }.without_third(), RunnerState::Empty);
        assert_eq!(
            RunnerState::Loaded {
                first: A,
                second: B,
                third: C
            }
            .without_third(),
            RunnerState::FirstSecond {
                first: A,
                second: B
            }
        );
        assert_eq!(
            RunnerState::First { first: A }.without_third(),
            RunnerState::First { first: A }
        );
    }

    #[test]
    fn tag_and_bases_agree() {
        let state = RunnerState::FirstThird {
            first: A,
            third: C,
        };
        assert_eq!(state.tag(), "first_third");
        assert_eq!(state.bases(), Bases::FIRST | Bases::THIRD);
    }
}
