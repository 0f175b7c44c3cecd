//! Built-in demo league.
//!
//! A fixed roster generator for tests and the command-line client. Ratings
//! are drawn from the engine's own seeded stream, so a given
//! `(team_count, seed)` pair always yields the same league.

use ballpark_core::{
    BatterArchetype, BatterRatings, LeagueSeed, PitchType, PitcherArchetype, PitcherRatings,
    Player, PlayerId, RngState, Team, TeamId, state::Repertoire,
};

const CLUBS: [(&str, &str); 12] = [
    ("Harbor Hawks", "HAR"),
    ("Mesa Miners", "MES"),
    ("Pine Valley Owls", "PVO"),
    ("River City Barons", "RCB"),
    ("Summit Goats", "SUM"),
    ("Bayside Gulls", "BAY"),
    ("Ironworks Forge", "IRN"),
    ("Prairie Comets", "PRA"),
    ("Lakeshore Pilots", "LAK"),
    ("Canyon Rattlers", "CAN"),
    ("Northgate Foxes", "NOR"),
    ("Delta Herons", "DEL"),
];

const SURNAMES: [&str; 16] = [
    "Alvarez", "Brooks", "Castillo", "Dunn", "Easton", "Fujita", "Garner", "Holt", "Ibarra",
    "Jensen", "Kowalski", "Lindqvist", "Moreno", "Nakamura", "Okafor", "Pruitt",
];

const INITIALS: &[u8] = b"ABCDEFGHJKLMNPRSTW";

/// Position players per team.
pub const BATTERS_PER_TEAM: u32 = 9;

/// Starting pitchers per team.
pub const PITCHERS_PER_TEAM: u32 = 5;

fn rating(rng: &mut RngState, floor: u8, spread: u8) -> u8 {
    floor + (rng.draw() * f64::from(spread)) as u8
}

fn name(rng: &mut RngState) -> String {
    let initial = INITIALS[rng.draw_index(INITIALS.len())] as char;
    let surname = SURNAMES[rng.draw_index(SURNAMES.len())];
    format!("{initial}. {surname}")
}

fn batter_archetype(r: &BatterRatings) -> BatterArchetype {
    let best = r.contact.max(r.power).max(r.speed).max(r.discipline);
    if best < 62 {
        BatterArchetype::Balanced
    } else if best == r.power {
        BatterArchetype::Slugger
    } else if best == r.contact {
        BatterArchetype::ContactHitter
    } else if best == r.speed {
        BatterArchetype::Speedster
    } else {
        BatterArchetype::Patient
    }
}

fn pitcher_profile(r: &PitcherRatings) -> (PitcherArchetype, Repertoire) {
    let (archetype, mix): (_, &[(PitchType, u8)]) = if r.stuff >= 65 {
        (
            PitcherArchetype::PowerArm,
            &[(PitchType::FF, 55), (PitchType::SL, 30), (PitchType::SF, 15)],
        )
    } else if r.control >= 65 {
        (
            PitcherArchetype::Finesse,
            &[(PitchType::CT, 30), (PitchType::CH, 30), (PitchType::CU, 25), (PitchType::FF, 15)],
        )
    } else if r.movement >= 65 {
        (
            PitcherArchetype::Groundballer,
            &[(PitchType::SI, 55), (PitchType::SL, 25), (PitchType::CH, 20)],
        )
    } else {
        (
            PitcherArchetype::Balanced,
            &[(PitchType::FF, 50), (PitchType::SL, 25), (PitchType::CH, 15), (PitchType::CU, 10)],
        )
    };
    (archetype, mix.iter().copied().collect())
}

fn club(index: usize) -> (String, String) {
    let (name, abbreviation) = CLUBS[index % CLUBS.len()];
    match index / CLUBS.len() {
        0 => (name.to_owned(), abbreviation.to_owned()),
        lap => (format!("{name} {}", lap + 1), format!("{abbreviation}{}", lap + 1)),
    }
}

/// Builds a league of `team_count` clubs with nine batters and five starters
/// each. Player ids are `team * 100 + slot`.
pub fn demo_league(team_count: usize, seed: u32) -> LeagueSeed {
    let mut rng = RngState::new(seed ^ 0x5eed_ba11);
    let mut teams = Vec::with_capacity(team_count);
    let mut players = Vec::new();

    for index in 0..team_count {
        let team_id = TeamId(index as u32 + 1);
        let (club_name, abbreviation) = club(index);
        let mut team = Team::new(team_id, club_name, abbreviation);

        for slot in 0..BATTERS_PER_TEAM {
            let id = PlayerId(team_id.0 * 100 + slot);
            let ratings = BatterRatings {
                contact: rating(&mut rng, 35, 45),
                power: rating(&mut rng, 30, 50),
                discipline: rating(&mut rng, 35, 40),
                speed: rating(&mut rng, 30, 50),
            };
            let player = Player::batter(id, name(&mut rng), ratings)
                .with_batter_archetype(batter_archetype(&ratings))
                .on_team(team_id);
            team.roster.push(id);
            team.lineup.push(id);
            players.push(player);
        }

        for slot in 0..PITCHERS_PER_TEAM {
            let id = PlayerId(team_id.0 * 100 + BATTERS_PER_TEAM + slot);
            let ratings = PitcherRatings {
                stuff: rating(&mut rng, 40, 40),
                control: rating(&mut rng, 40, 40),
                movement: rating(&mut rng, 40, 40),
                stamina: rating(&mut rng, 50, 40),
            };
            let (archetype, repertoire) = pitcher_profile(&ratings);
            let mut player = Player::pitcher(id, name(&mut rng), ratings)
                .with_pitcher_archetype(archetype)
                .on_team(team_id);
            if let Some(profile) = player.pitching.as_mut() {
                profile.repertoire = repertoire;
            }
            team.roster.push(id);
            team.rotation.push(id);
            players.push(player);
        }
        teams.push(team);
    }

    LeagueSeed {
        seed,
        year: 2030,
        teams,
        players,
    }
}

#[cfg(test)]
mod tests {
    use ballpark_core::{Action, LeaguePhase, LeagueState, SimConfig, dispatch};

    use super::*;

    #[test]
    fn same_seed_same_league() {
        assert_eq!(demo_league(6, 99), demo_league(6, 99));
        assert_ne!(demo_league(6, 99).players, demo_league(6, 100).players);
    }

    #[test]
    fn rosters_have_full_lineups_and_rotations() {
        let league = demo_league(4, 1);
        assert_eq!(league.teams.len(), 4);
        assert_eq!(league.players.len(), 4 * 14);
        for team in &league.teams {
            assert_eq!(team.lineup.len(), 9);
            assert_eq!(team.rotation.len(), 5);
            assert_eq!(team.roster.len(), 14);
        }
        assert!(league.players.iter().all(|p| {
            let r = p.batting.ratings;
            r.contact <= 100 && r.power <= 100 && r.speed <= 100
        }));
    }

    #[test]
    fn more_teams_than_names_stay_unique() {
        let league = demo_league(14, 3);
        let mut abbreviations: Vec<_> = league.teams.iter().map(|t| &t.abbreviation).collect();
        abbreviations.sort();
        abbreviations.dedup();
        assert_eq!(abbreviations.len(), 14);
    }

    #[test]
    fn engine_accepts_the_demo_league() {
        let step = dispatch(
            &LeagueState::default(),
            &Action::new_league(demo_league(4, 12)),
            &SimConfig::default(),
        );
        assert!(step.applied(), "{:?}", step.diagnostic);
        assert_eq!(step.state.phase, LeaguePhase::RegularSeason);
        assert_eq!(step.state.teams.len(), 4);
    }
}
