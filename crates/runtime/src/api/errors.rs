//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, configuration and
//! action providers so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;
use crate::session::RootError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    StateRoot(#[from] RootError),

    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("no state repository configured; set a save directory")]
    PersistenceDisabled,

    #[error("action provider not set")]
    ProviderNotSet,

    #[error("action provider state was poisoned")]
    ProviderPoisoned,
}
