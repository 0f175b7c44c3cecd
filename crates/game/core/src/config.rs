/// Simulation tunables and compile-time bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Hard cap on half-innings played by one game loop before it aborts.
    pub max_half_innings: u32,
    /// Meetings per team pair in a round-robin schedule.
    pub games_per_matchup: u32,
    /// Innings after which a decided game may end.
    pub regulation_innings: u16,
    /// Run the invariant checker after every dispatch.
    pub check_invariants: bool,
    /// Upper bound on queued follow-up actions drained by one caller loop.
    pub max_follow_ups: u32,
}

impl SimConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_HALF_INNINGS: u32 = 400;
    pub const DEFAULT_GAMES_PER_MATCHUP: u32 = 4;
    pub const DEFAULT_REGULATION_INNINGS: u16 = 9;
    pub const DEFAULT_MAX_FOLLOW_UPS: u32 = 10_000;

    pub fn new() -> Self {
        Self {
            max_half_innings: Self::DEFAULT_MAX_HALF_INNINGS,
            games_per_matchup: Self::DEFAULT_GAMES_PER_MATCHUP,
            regulation_innings: Self::DEFAULT_REGULATION_INNINGS,
            check_invariants: false,
            max_follow_ups: Self::DEFAULT_MAX_FOLLOW_UPS,
        }
    }

    pub fn with_check_invariants(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    pub fn with_max_half_innings(mut self, cap: u32) -> Self {
        self.max_half_innings = cap;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
