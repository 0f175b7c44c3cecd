//! Repository contracts for saving and loading session data.

use ballpark_core::{LeagueState, Tick};

use super::Result;
use crate::session::JournalEntry;

/// Repository for league state snapshots.
///
/// Snapshots are keyed by the logical clock of the state they hold, so a
/// save after every dispatch never overwrites an earlier one.
pub trait StateRepository: Send + Sync {
    fn save(&self, clock: Tick, state: &LeagueState) -> Result<()>;

    fn load(&self, clock: Tick) -> Result<Option<LeagueState>>;

    fn exists(&self, clock: Tick) -> bool;

    fn delete(&self, clock: Tick) -> Result<()>;

    /// All stored clocks in ascending order.
    fn list_clocks(&self) -> Result<Vec<Tick>>;

    /// Most recent snapshot, if any.
    fn load_latest(&self) -> Result<Option<(Tick, LeagueState)>> {
        let Some(&clock) = self.list_clocks()?.last() else {
            return Ok(None);
        };
        Ok(self.load(clock)?.map(|state| (clock, state)))
    }
}

/// Append-only journal of dispatched steps.
pub trait JournalRepository: Send {
    fn append(&mut self, entry: &JournalEntry) -> Result<()>;

    /// Every entry in append order.
    fn entries(&self) -> Result<Vec<JournalEntry>>;

    /// Flush buffered writes to the backing store.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn session_id(&self) -> &str;
}
