//! League roster loader.
//!
//! Reads `league.ron` into a [`LeagueSeed`] ready for a `NewLeague` action.
//! The file names players by plain integer ids; lineups and rotations refer to
//! those ids.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use ballpark_core::{
    BatterArchetype, BatterRatings, LeagueSeed, PitchType, PitcherArchetype, PitcherProfile,
    PitcherRatings, Player, PlayerId, Team, TeamId,
    state::{LINEUP_SIZE, MAX_REPERTOIRE, RATING_MAX, Repertoire},
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Top-level shape of `league.ron`.
///
/// ```ron
/// LeagueSpec(
///     seed: 2024,
///     year: 2030,
///     teams: [
///         TeamSpec(
///             id: 1,
///             name: "Harbor Hawks",
///             abbreviation: "HAR",
///             players: [
///                 PlayerSpec(
///                     id: 101,
///                     name: "J. Ortega",
///                     batting: Some((contact: 62, power: 48, discipline: 55, speed: 70)),
///                 ),
///                 PlayerSpec(
///                     id: 110,
///                     name: "R. Vance",
///                     pitching: Some(PitchingSpec(
///                         ratings: (stuff: 64, control: 58, movement: 51, stamina: 70),
///                     )),
///                 ),
///             ],
///         ),
///     ],
/// )
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeagueSpec {
    pub seed: u32,
    pub year: u16,
    pub teams: Vec<TeamSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSpec {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    pub players: Vec<PlayerSpec>,
    /// Batting order. Empty means the first nine position players.
    #[serde(default)]
    pub lineup: Vec<u32>,
    /// Starting rotation. Empty means every pitcher in roster order.
    #[serde(default)]
    pub rotation: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub batting: Option<BatterRatings>,
    #[serde(default)]
    pub batter_archetype: Option<BatterArchetype>,
    #[serde(default)]
    pub pitching: Option<PitchingSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PitchingSpec {
    pub ratings: PitcherRatings,
    #[serde(default)]
    pub archetype: Option<PitcherArchetype>,
    /// Pitch mix as `(type, weight)` pairs. Empty keeps the stock mix.
    #[serde(default)]
    pub repertoire: Vec<(PitchType, u8)>,
}

fn check_rating(owner: &str, name: &str, value: u8) -> LoadResult<()> {
    if value > RATING_MAX {
        anyhow::bail!("{owner}: {name} rating {value} exceeds {RATING_MAX}");
    }
    Ok(())
}

impl PlayerSpec {
    fn into_player(self, team: TeamId) -> LoadResult<Player> {
        let id = PlayerId(self.id);
        let owner = format!("player {id} ({})", self.name);
        let batting = self.batting.unwrap_or_default();
        for (name, value) in [
            ("contact", batting.contact),
            ("power", batting.power),
            ("discipline", batting.discipline),
            ("speed", batting.speed),
        ] {
            check_rating(&owner, name, value)?;
        }

        let mut player = match self.pitching {
            Some(pitching) => {
                let profile = pitching.into_profile(&owner)?;
                let mut player = Player::pitcher(id, self.name, profile.ratings);
                player.pitching = Some(profile);
                player.batting.ratings = batting;
                player
            }
            None => Player::batter(id, self.name, batting),
        };
        if let Some(archetype) = self.batter_archetype {
            player = player.with_batter_archetype(archetype);
        }
        Ok(player.on_team(team))
    }
}

impl PitchingSpec {
    fn into_profile(self, owner: &str) -> LoadResult<PitcherProfile> {
        let ratings = self.ratings;
        for (name, value) in [
            ("stuff", ratings.stuff),
            ("control", ratings.control),
            ("movement", ratings.movement),
            ("stamina", ratings.stamina),
        ] {
            check_rating(owner, name, value)?;
        }

        let mut profile = PitcherProfile {
            ratings,
            archetype: self.archetype.unwrap_or_default(),
            ..PitcherProfile::default()
        };
        if !self.repertoire.is_empty() {
            if self.repertoire.len() > MAX_REPERTOIRE {
                anyhow::bail!("{owner}: more than {MAX_REPERTOIRE} pitches in repertoire");
            }
            if self.repertoire.iter().all(|(_, weight)| *weight == 0) {
                anyhow::bail!("{owner}: repertoire weights are all zero");
            }
            profile.repertoire = self.repertoire.into_iter().collect::<Repertoire>();
        }
        Ok(profile)
    }
}

impl TeamSpec {
    fn into_team(self) -> LoadResult<(Team, Vec<Player>)> {
        let team_id = TeamId(self.id);
        let mut team = Team::new(team_id, self.name, self.abbreviation);
        let mut players = Vec::with_capacity(self.players.len());
        for spec in self.players {
            let player = spec.into_player(team_id)?;
            team.roster.push(player.id);
            players.push(player);
        }

        let lineup: Vec<PlayerId> = if self.lineup.is_empty() {
            players
                .iter()
                .filter(|p| !p.is_pitcher())
                .take(LINEUP_SIZE)
                .map(|p| p.id)
                .collect()
        } else {
            self.lineup.into_iter().map(PlayerId).collect()
        };
        if lineup.len() != LINEUP_SIZE {
            anyhow::bail!(
                "team {team_id}: lineup has {} batters, expected {LINEUP_SIZE}",
                lineup.len()
            );
        }
        let mut batting = BTreeSet::new();
        if let Some(repeat) = lineup.iter().find(|&&id| !batting.insert(id)) {
            anyhow::bail!("team {team_id}: {repeat} bats twice");
        }
        team.lineup.extend(lineup);

        team.rotation = if self.rotation.is_empty() {
            players.iter().filter(|p| p.is_pitcher()).map(|p| p.id).collect()
        } else {
            self.rotation.into_iter().map(PlayerId).collect()
        };
        Ok((team, players))
    }
}

impl LeagueSpec {
    /// Builds the engine's league seed.
    ///
    /// Only file-level shape is checked here: rating ranges, lineup shape
    /// and repertoire size. Cross-team rules are enforced when the league is
    /// created.
    pub fn into_seed(self) -> LoadResult<LeagueSeed> {
        let mut seen = BTreeSet::new();
        let mut teams = Vec::with_capacity(self.teams.len());
        let mut players = Vec::new();
        for spec in self.teams {
            if !seen.insert(spec.id) {
                anyhow::bail!("team id {} appears twice", spec.id);
            }
            let (team, roster) = spec.into_team()?;
            teams.push(team);
            players.extend(roster);
        }
        Ok(LeagueSeed {
            seed: self.seed,
            year: self.year,
            teams,
            players,
        })
    }
}

/// Loader for league rosters from RON files.
pub struct LeagueLoader;

impl LeagueLoader {
    pub fn load(path: &Path) -> LoadResult<LeagueSeed> {
        let content = read_file(path)?;
        let seed = Self::parse(&content)
            .with_context(|| format!("Failed to load league from {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            teams = seed.teams.len(),
            players = seed.players.len(),
            "league loaded"
        );
        Ok(seed)
    }

    pub fn parse(content: &str) -> LoadResult<LeagueSeed> {
        let spec: LeagueSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse league RON: {}", e))?;
        spec.into_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_ron(id: u32, abbreviation: &str) -> String {
        let mut players = String::new();
        for slot in 0..9 {
            players.push_str(&format!(
                "PlayerSpec(id: {}, name: \"B{slot}\", \
                 batting: Some((contact: 55, power: 45, discipline: 50, speed: 60))),\n",
                id * 100 + slot
            ));
        }
        players.push_str(&format!(
            "PlayerSpec(id: {}, name: \"Ace\", pitching: Some(PitchingSpec(\
             ratings: (stuff: 70, control: 60, movement: 55, stamina: 80), \
             archetype: Some(PowerArm), repertoire: [(FF, 60), (SL, 40)]))),\n",
            id * 100 + 9
        ));
        format!(
            "TeamSpec(id: {id}, name: \"Team {id}\", abbreviation: \"{abbreviation}\", \
             players: [{players}]),"
        )
    }

    fn league_ron() -> String {
        format!(
            "LeagueSpec(seed: 7, year: 2031, teams: [{}{}])",
            team_ron(1, "ONE"),
            team_ron(2, "TWO")
        )
    }

    #[test]
    fn parses_teams_and_defaults() {
        let seed = LeagueLoader::parse(&league_ron()).expect("valid league");
        assert_eq!(seed.seed, 7);
        assert_eq!(seed.year, 2031);
        assert_eq!(seed.teams.len(), 2);
        assert_eq!(seed.players.len(), 20);

        let team = &seed.teams[0];
        assert_eq!(team.roster.len(), 10);
        assert_eq!(team.lineup.len(), 9);
        assert_eq!(team.rotation, vec![PlayerId(109)]);

        let ace = seed
            .players
            .iter()
            .find(|p| p.id == PlayerId(109))
            .expect("ace");
        assert_eq!(ace.team_id, Some(TeamId(1)));
        let pitching = ace.pitching.as_ref().expect("pitcher");
        assert_eq!(pitching.archetype, PitcherArchetype::PowerArm);
        assert_eq!(pitching.repertoire.as_slice(), &[(PitchType::FF, 60), (PitchType::SL, 40)]);
    }

    #[test]
    fn rejects_rating_above_scale() {
        let ron = league_ron().replacen("contact: 55", "contact: 140", 1);
        let err = LeagueLoader::parse(&ron).unwrap_err();
        assert!(err.to_string().contains("contact rating 140"));
    }

    fn with_lineup(lineup: &str) -> String {
        format!(
            "LeagueSpec(seed: 7, year: 2031, teams: [{}{}])",
            team_ron(1, "ONE").replacen("players:", &format!("lineup: {lineup}, players:"), 1),
            team_ron(2, "TWO")
        )
    }

    #[test]
    fn rejects_short_lineup() {
        let err = LeagueLoader::parse(&with_lineup("[100]")).unwrap_err();
        assert!(err.to_string().contains("lineup has 1 batters"));
    }

    #[test]
    fn rejects_batter_listed_twice() {
        let ron = with_lineup("[100, 101, 102, 103, 104, 105, 106, 107, 100]");
        let err = LeagueLoader::parse(&ron).unwrap_err();
        assert!(err.to_string().contains("P-100 bats twice"), "{err}");
    }

    #[test]
    fn rejects_duplicate_team_ids() {
        let ron = format!(
            "LeagueSpec(seed: 1, year: 2030, teams: [{}{}])",
            team_ron(1, "ONE"),
            team_ron(1, "UNO")
        );
        assert!(LeagueLoader::parse(&ron).is_err());
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("league.ron");
        std::fs::write(&path, "LeagueSpec(").expect("write");
        let err = LeagueLoader::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("league.ron"));
    }
}
