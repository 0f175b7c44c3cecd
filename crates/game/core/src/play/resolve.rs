//! At-bat resolver: one called pitch against the open at-bat.

use crate::env::weighted_roll;
use crate::state::{
    AtBat, AtBatId, AtBatPlay, AtBatResult, Count, EventKind, EventRefs, LeagueState, Pitch,
    PitchCall, PitchId, PitchResult, PitcherProfile,
};

use super::contact::{batted_ball_table, contact_quality};
use super::defense::{FieldingSituation, resolve_defense};
use super::pitch::{PitchContext, outcome_table, swing_probability};
use super::ratings::{effective_batter, effective_pitcher};
use super::PlayError;

/// What a called pitch did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchOutcome {
    pub pitch_id: PitchId,
    pub at_bat_id: AtBatId,
    pub result: PitchResult,
    pub swung: bool,
    pub count: Count,
    /// Set when this pitch ended the at-bat.
    pub at_bat_result: Option<AtBatResult>,
}

impl PitchOutcome {
    pub fn ended_at_bat(&self) -> bool {
        self.at_bat_result.is_some()
    }
}

/// Returns the open at-bat the pointer names, checking that it can take a
/// pitch: it exists, has no result, and both players exist.
pub fn pitchable_at_bat(state: &LeagueState) -> Result<&AtBat, PlayError> {
    let at_bat_id = state.pointers.at_bat_id.ok_or(PlayError::NoActiveAtBat)?;
    let at_bat = state
        .at_bats
        .get(&at_bat_id)
        .ok_or_else(|| PlayError::missing("at-bat", at_bat_id))?;
    if at_bat.is_resolved() {
        return Err(PlayError::AlreadyResolved(at_bat_id));
    }
    if !state.players.contains_key(&at_bat.batter_id) {
        return Err(PlayError::missing("batter", at_bat.batter_id));
    }
    if !state.players.contains_key(&at_bat.pitcher_id) {
        return Err(PlayError::missing("pitcher", at_bat.pitcher_id));
    }
    if !state.half_innings.contains_key(&at_bat.half_inning_id) {
        return Err(PlayError::missing("half-inning", at_bat.half_inning_id));
    }
    Ok(at_bat)
}

/// Pitching profile of a player; position players fall back to the default.
pub(crate) fn pitching_profile(state: &LeagueState, at_bat: &AtBat) -> PitcherProfile {
    state
        .players
        .get(&at_bat.pitcher_id)
        .and_then(|player| player.pitching.clone())
        .unwrap_or_default()
}

/// Resolves one pitch.
///
/// Draw order: swing, outcome, then on balls in play contact quality,
/// batted-ball type and the defensive draws.
pub fn call_pitch(state: &mut LeagueState, call: PitchCall) -> Result<PitchOutcome, PlayError> {
    let at_bat = pitchable_at_bat(state)?.clone();
    let half = state
        .half_innings
        .get(&at_bat.half_inning_id)
        .ok_or_else(|| PlayError::missing("half-inning", at_bat.half_inning_id))?;
    let situation = FieldingSituation {
        outs: half.outs,
        runners: half.runner_state,
    };
    let refs = EventRefs {
        game: Some(half.game_id),
        half_inning: Some(half.id),
        at_bat: Some(at_bat.id),
        player: Some(at_bat.batter_id),
        team: Some(half.batting_team_id),
        ..EventRefs::default()
    };

    let batter = state
        .players
        .get(&at_bat.batter_id)
        .map(|player| effective_batter(&player.batting))
        .ok_or_else(|| PlayError::missing("batter", at_bat.batter_id))?;
    let pitcher = effective_pitcher(&pitching_profile(state, &at_bat));

    let ctx = PitchContext {
        batter,
        pitcher,
        count: at_bat.count,
        pitch_type: call.pitch_type,
        location: call.location,
        intent: call.intent,
    };

    let mut rng = state.rng;
    let swung = rng.draw() < swing_probability(batter.discipline, at_bat.count, call.location);
    let result = weighted_roll(&outcome_table(&ctx, swung), rng.draw());
    let count = at_bat.count.after(result);

    let (at_bat_result, play): (Option<AtBatResult>, Option<AtBatPlay>) = match result {
        PitchResult::InPlay => {
            let contact = contact_quality(batter.power, call.pitch_type, call.location, rng.draw());
            let batted = weighted_roll(
                &batted_ball_table(batter.contact, pitcher.movement),
                rng.draw(),
            );
            let (result, play) = resolve_defense(batted, contact, situation, &mut rng);
            (Some(result), Some(play))
        }
        _ if count.is_strikeout() => (Some(AtBatResult::Strikeout), None),
        _ if count.is_walk() => (Some(AtBatResult::Walk), None),
        _ => (None, None),
    };
    state.rng = rng;

    let pitch_id = state.ids().next_pitch();
    state.pitches.insert(
        pitch_id,
        Pitch {
            id: pitch_id,
            at_bat_id: at_bat.id,
            pitch_type: call.pitch_type,
            location: call.location,
            intent: call.intent,
            result,
            swung,
        },
    );

    let entry = state
        .at_bats
        .get_mut(&at_bat.id)
        .ok_or_else(|| PlayError::missing("at-bat", at_bat.id))?;
    entry.count = count;
    entry.pitch_ids.push(pitch_id);
    entry.result = at_bat_result;
    entry.play = play.clone();

    let batter_name = state.player_name(at_bat.batter_id);
    state.record(
        EventKind::Pitch,
        EventRefs {
            pitch: Some(pitch_id),
            ..refs
        },
        format!("{call} to {batter_name}: {result}, count {count}"),
    );
    tracing::trace!(
        at_bat = %at_bat.id,
        pitch = %pitch_id,
        %result,
        swung,
        %count,
        "pitch resolved"
    );

    if let Some(outcome) = at_bat_result {
        state.record(
            EventKind::AtBatResolved,
            refs,
            describe_result(&batter_name, outcome, play.as_ref()),
        );
    }

    Ok(PitchOutcome {
        pitch_id,
        at_bat_id: at_bat.id,
        result,
        swung,
        count,
        at_bat_result,
    })
}

/// Narrative line for a finished at-bat.
pub fn describe_result(batter: &str, result: AtBatResult, play: Option<&AtBatPlay>) -> String {
    let batted = play
        .and_then(|play| play.batted_ball_type)
        .map(|kind| format!(" ({kind} ball)"))
        .unwrap_or_default();
    match (result, play.and_then(|play| play.note.as_deref())) {
        (_, Some(note)) => format!("{batter}: {note}{batted}"),
        (AtBatResult::Strikeout, None) => format!("{batter} strikes out"),
        (AtBatResult::Walk, None) => format!("{batter} walks"),
        (AtBatResult::Out, None) => format!("{batter} is out{batted}"),
        (AtBatResult::Single, None) => format!("{batter} singles{batted}"),
        (AtBatResult::Double, None) => format!("{batter} doubles{batted}"),
        (AtBatResult::Triple, None) => format!("{batter} triples{batted}"),
        (AtBatResult::HomeRun, None) => format!("{batter} homers{batted}"),
    }
}
