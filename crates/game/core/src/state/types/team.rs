use arrayvec::ArrayVec;

use super::{PlayerId, TeamId};

/// Batting order length. Leagues only accept full orders, so the batter due
/// up is never one still standing on base.
pub const LINEUP_SIZE: usize = 9;

pub type Lineup = ArrayVec<PlayerId, LINEUP_SIZE>;

/// Team registry record.
///
/// `roster` is the full player list; `lineup` and `rotation` are the subsets
/// the simulation draws batters and starting pitchers from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub abbreviation: String,
    pub roster: Vec<PlayerId>,
    pub lineup: Lineup,
    pub rotation: Vec<PlayerId>,
    /// Index into `rotation` of the next game's starter.
    pub rotation_index: usize,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            abbreviation: abbreviation.into(),
            roster: Vec::new(),
            lineup: Lineup::new(),
            rotation: Vec::new(),
            rotation_index: 0,
        }
    }

    /// Batter at `index`, wrapping around the lineup.
    pub fn batter_at(&self, index: usize) -> Option<PlayerId> {
        if self.lineup.is_empty() {
            return None;
        }
        self.lineup.get(index % self.lineup.len()).copied()
    }

    /// Next slot after `index`, wrapping around the lineup.
    pub fn next_lineup_index(&self, index: usize) -> usize {
        match self.lineup.len() {
            0 => 0,
            len => (index + 1) % len,
        }
    }

    /// Starter for the next game, if the rotation is set.
    pub fn next_starter(&self) -> Option<PlayerId> {
        if self.rotation.is_empty() {
            return None;
        }
        self.rotation
            .get(self.rotation_index % self.rotation.len())
            .copied()
    }

    pub fn advance_rotation(&mut self) {
        if !self.rotation.is_empty() {
            self.rotation_index = (self.rotation_index + 1) % self.rotation.len();
        }
    }

    /// Replaces `outgoing` with `incoming` everywhere it appears.
    ///
    /// Returns false if `outgoing` was not on the roster.
    pub fn swap_player(&mut self, outgoing: PlayerId, incoming: PlayerId) -> bool {
        let Some(slot) = self.roster.iter_mut().find(|id| **id == outgoing) else {
            return false;
        };
        *slot = incoming;
        for id in self.lineup.iter_mut().chain(self.rotation.iter_mut()) {
            if *id == outgoing {
                *id = incoming;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_with_lineup(len: u32) -> Team {
        let mut team = Team::new(TeamId(1), "Harbor Hawks", "HAR");
        for id in 0..len {
            team.roster.push(PlayerId(id));
            team.lineup.push(PlayerId(id));
        }
        team
    }

    #[test]
    fn lineup_wraps() {
        let team = team_with_lineup(9);
        assert_eq!(team.next_lineup_index(8), 0);
        assert_eq!(team.batter_at(10), Some(PlayerId(1)));
    }

    #[test]
    fn rotation_cycles() {
        let mut team = team_with_lineup(9);
        team.rotation = vec![PlayerId(20), PlayerId(21)];
        assert_eq!(team.next_starter(), Some(PlayerId(20)));
        team.advance_rotation();
        team.advance_rotation();
        assert_eq!(team.next_starter(), Some(PlayerId(20)));
    }

    #[test]
    fn swap_player_updates_lineup() {
        let mut team = team_with_lineup(9);
        assert!(team.swap_player(PlayerId(3), PlayerId(99)));
        assert_eq!(team.lineup[3], PlayerId(99));
        assert!(!team.swap_player(PlayerId(500), PlayerId(1)));
    }
}
