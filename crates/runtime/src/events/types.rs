use ballpark_core::{ActionKind, ActionResult, StateDelta, Tick};
use serde::{Deserialize, Serialize};

use crate::session::DiagnosticRecord;

/// League state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LeagueEvent {
    ActionApplied {
        sequence: u64,
        action: ActionKind,
        follow_up: bool,
        clock: Tick,
        delta: Box<StateDelta>,
        result: Box<ActionResult>,
    },
}

/// Actions the engine refused or cut short.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DiagnosticEvent {
    Reported {
        sequence: u64,
        action: ActionKind,
        diagnostic: DiagnosticRecord,
    },
}

/// Persistence and lifecycle notices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    StateSaved { clock: Tick },
    ProviderIdle,
}
