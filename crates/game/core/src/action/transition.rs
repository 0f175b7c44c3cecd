use crate::config::SimConfig;
use crate::error::GameError;
use crate::state::LeagueState;

/// Defines how a concrete action variant transforms the league state.
///
/// Every variant of [`super::Action`] wraps a type implementing this trait.
/// The validation hooks surface pre- and post-conditions around the mutation
/// and must stay side-effect free; only `apply` writes.
pub trait ActionTransition {
    type Error: GameError;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the state directly. Implementations may
    /// assume that `pre_validate` has already run successfully.
    fn apply(
        &self,
        state: &mut LeagueState,
        config: &SimConfig,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &LeagueState, _config: &SimConfig) -> Result<(), Self::Error> {
        Ok(())
    }
}
