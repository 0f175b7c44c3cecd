//! Authoritative league state representation.
//!
//! This module owns the entity maps (players, teams, seasons, games,
//! half-innings, at-bats, pitches), the narrative log and the active-entity
//! pointers. Callers read it freely; only the engine produces new versions.
pub mod delta;
pub mod types;

use std::collections::BTreeMap;

use crate::env::RngState;

pub use delta::{LeagueFields, StateDelta};
pub use types::*;

/// Cursor into the currently active entities.
///
/// Every set pointer names an existing entity, and the chain is nested:
/// an at-bat pointer implies a half-inning pointer, which implies a game
/// pointer. The season pointer is independent of the game chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pointers {
    pub season_id: Option<SeasonId>,
    pub game_id: Option<GameId>,
    pub half_inning_id: Option<HalfInningId>,
    pub at_bat_id: Option<AtBatId>,
}

impl Pointers {
    /// Unsets the game chain together.
    pub fn clear_game(&mut self) {
        self.game_id = None;
        self.half_inning_id = None;
        self.at_bat_id = None;
    }
}

/// Canonical snapshot of the whole league.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeagueState {
    /// Random stream shared by every draw in the league.
    pub rng: RngState,
    /// Logical clock, advanced once per dispatch.
    pub clock: Tick,
    pub phase: LeaguePhase,
    pub user_team_id: Option<TeamId>,

    pub players: BTreeMap<PlayerId, Player>,
    pub teams: BTreeMap<TeamId, Team>,
    pub seasons: BTreeMap<SeasonId, Season>,
    pub games: BTreeMap<GameId, Game>,
    pub half_innings: BTreeMap<HalfInningId, HalfInning>,
    pub at_bats: BTreeMap<AtBatId, AtBat>,
    pub pitches: BTreeMap<PitchId, Pitch>,
    pub box_scores: BTreeMap<GameId, BoxScore>,
    pub trades: BTreeMap<ProposalId, TradeProposal>,

    /// Append-only narrative log.
    pub log: Vec<LogEvent>,
    pub pointers: Pointers,

    ids: IdCounters,
}

impl LeagueState {
    /// Empty league with the random stream seeded.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            rng: RngState::new(seed),
            ..Self::default()
        }
    }

    pub(crate) fn ids(&mut self) -> &mut IdCounters {
        &mut self.ids
    }

    pub fn current_season(&self) -> Option<&Season> {
        self.seasons.get(&self.pointers.season_id?)
    }

    pub fn current_game(&self) -> Option<&Game> {
        self.games.get(&self.pointers.game_id?)
    }

    pub fn current_half_inning(&self) -> Option<&HalfInning> {
        self.half_innings.get(&self.pointers.half_inning_id?)
    }

    pub fn current_at_bat(&self) -> Option<&AtBat> {
        self.at_bats.get(&self.pointers.at_bat_id?)
    }

    /// Appends a narrative event stamped with the current logical clock.
    pub fn record(&mut self, kind: EventKind, refs: EventRefs, description: impl Into<String>) {
        let id = self.ids.next_event();
        self.log.push(LogEvent {
            id,
            timestamp: self.clock,
            kind,
            refs,
            description: description.into(),
        });
    }

    /// Player display name, or the id when the player is unknown.
    pub fn player_name(&self, id: PlayerId) -> String {
        self.players
            .get(&id)
            .map(|player| player.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn team_abbreviation(&self, id: TeamId) -> String {
        self.teams
            .get(&id)
            .map(|team| team.abbreviation.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Two states with the same root are bit-identical, which is what replay
    /// and determinism checks compare.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}
