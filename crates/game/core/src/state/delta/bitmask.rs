use bitflags::bitflags;

bitflags! {
    /// Tracks which parts of a [`LeagueState`](crate::state::LeagueState)
    /// changed during a dispatch.
    ///
    /// Each bit names one collection or scalar field; collections are compared
    /// by length and content, never by deep per-entity diffing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LeagueFields: u16 {
        const RNG          = 1 << 0;
        const PHASE        = 1 << 1;
        const USER_TEAM    = 1 << 2;
        const PLAYERS      = 1 << 3;
        const TEAMS        = 1 << 4;
        const SEASONS      = 1 << 5;
        const GAMES        = 1 << 6;
        const HALF_INNINGS = 1 << 7;
        const AT_BATS      = 1 << 8;
        const PITCHES      = 1 << 9;
        const BOX_SCORES   = 1 << 10;
        const TRADES       = 1 << 11;
        const LOG          = 1 << 12;
        const POINTERS     = 1 << 13;
    }
}
