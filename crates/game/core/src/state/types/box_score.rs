use super::{BattingLine, GameId, PlayerId, TeamId, TeamTotals};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatterBox {
    pub player_id: PlayerId,
    pub line: BattingLine,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamBox {
    pub team_id: TeamId,
    pub totals: TeamTotals,
    /// In order of first plate appearance.
    pub batters: Vec<BatterBox>,
}

/// Runs per inning. `home` is `None` when the bottom half was not played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InningLine {
    pub inning: u16,
    pub away: u16,
    pub home: Option<u16>,
}

/// Post-game aggregate built from the game's immutable records.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxScore {
    pub game_id: GameId,
    pub summary: String,
    pub away: TeamBox,
    pub home: TeamBox,
    pub line_score: Vec<InningLine>,
}

impl BoxScore {
    pub fn team(&self, team_id: TeamId) -> Option<&TeamBox> {
        if self.home.team_id == team_id {
            Some(&self.home)
        } else if self.away.team_id == team_id {
            Some(&self.away)
        } else {
            None
        }
    }

    pub fn innings_played(&self) -> usize {
        self.line_score.len()
    }
}
