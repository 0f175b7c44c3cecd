//! Repository layer for dynamic session data.
//!
//! Repositories handle data that changes during play:
//! - League state snapshots keyed by logical clock (save/load)
//! - The step journal used for audit and replay
//!
//! Roster content is loaded once by `ballpark-content` and is not stored here.

mod error;
mod file;
mod journal;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use journal::{FileJournal, InMemoryJournal};
pub use memory::InMemoryStateRepo;
pub use traits::{JournalRepository, StateRepository};
