//! Common error infrastructure for ballpark-core.
//!
//! Domain-specific errors live next to the handlers that raise them. Every one
//! implements [`GameError`] so the engine can classify it and turn it into a
//! [`Diagnostic`] without knowing the concrete type.

use crate::state::Tick;

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Recoverable**: the action may succeed later (e.g. no game in progress yet)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency that needs investigation
/// - **Fatal**: the state is corrupted and cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all ballpark-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Classification used by diagnostics and tests.
    fn kind(&self) -> DiagnosticKind;

    /// Stable identifier for the error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Taxonomy of no-op outcomes reported to callers.
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
pub enum DiagnosticKind {
    /// A pointer or payload names an entity that does not exist.
    MissingReference,
    /// The action is not legal in the current league phase.
    InvalidPhase,
    /// A pitch was called against an at-bat that already has a result.
    AlreadyResolved,
    /// A simulation loop hit its safety cap.
    RunawayLoop,
    /// The action does not apply to the current shape of the state.
    InvalidState,
    /// The payload itself is malformed.
    InvalidInput,
}

/// Report attached to a dispatch that did not (fully) apply.
///
/// Diagnostics never live in the league state; a failed action leaves the
/// state exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: ErrorSeverity,
    pub code: &'static str,
    pub message: String,
    /// Logical clock of the state the action was dispatched against.
    pub clock: Tick,
}

impl Diagnostic {
    pub fn from_error<E: GameError + ?Sized>(error: &E, clock: Tick) -> Self {
        Self {
            kind: error.kind(),
            severity: error.severity(),
            code: error.error_code(),
            message: error.to_string(),
            clock,
        }
    }
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}] {} ({})", self.kind, self.message, self.code)
    }
}
