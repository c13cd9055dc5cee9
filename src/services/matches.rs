use chrono::Utc;
use log::info;

use crate::domain::models::{ChallengeId, MatchId, MatchRecord, MatchStatus, PlayerId};
use crate::domain::standings::rank_pair;
use crate::domain::League;
use crate::errors::{LadderError, Result};
use crate::rating::{self, RankContext, RatingUpdate};
use crate::services::challenges;

/// How a reported result takes effect: immediately, or only after the
/// opponent confirms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingMode {
    Direct,
    RequiresConfirmation,
}

/// Report a ladder result. In `Direct` mode ratings move at once; in
/// `RequiresConfirmation` mode the record is stored as pending and
/// ratings move when the opponent confirms. A linked challenge must be
/// accepted and name the same two players.
pub fn record_match(
    league: &mut League,
    winner_id: PlayerId,
    loser_id: PlayerId,
    recorded_by: PlayerId,
    challenge_id: Option<ChallengeId>,
    mode: RecordingMode,
) -> Result<MatchId> {
    if winner_id == loser_id {
        return Err(LadderError::SelfPlay);
    }
    league.player(winner_id)?;
    league.player(loser_id)?;
    if recorded_by != winner_id && recorded_by != loser_id {
        return Err(LadderError::NotAParticipant(recorded_by));
    }
    if let Some(challenge_id) = challenge_id {
        challenges::ensure_links_match(league, challenge_id, winner_id, loser_id)?;
    }

    let winner_before = league.player(winner_id)?.rating;
    let loser_before = league.player(loser_id)?.rating;
    let now = Utc::now();
    let id = league.allocate_id();

    match mode {
        RecordingMode::Direct => {
            let update = apply_exchange(league, winner_id, loser_id, true)?;
            league.insert_match(MatchRecord {
                id,
                winner_id,
                loser_id,
                winner_rating_before: winner_before,
                loser_rating_before: loser_before,
                rating_change: update.change,
                challenge_id,
                tournament_id: None,
                recorded_by,
                status: MatchStatus::Confirmed,
                played_at: now,
                confirmed_at: Some(now),
            });
            if let Some(challenge_id) = challenge_id {
                challenges::complete_challenge(league, challenge_id)?;
            }
            info!(
                "Match {}: player {} beat player {} (+{})",
                id, winner_id, loser_id, update.change
            );
        }
        RecordingMode::RequiresConfirmation => {
            // Provisional figures only; the real exchange is computed from
            // whatever the ratings are at confirmation time.
            let ranks = build_rank_context(league, winner_id, loser_id);
            let provisional = rating::elo_change(winner_before, loser_before, ranks);
            league.insert_match(MatchRecord {
                id,
                winner_id,
                loser_id,
                winner_rating_before: winner_before,
                loser_rating_before: loser_before,
                rating_change: provisional,
                challenge_id,
                tournament_id: None,
                recorded_by,
                status: MatchStatus::Pending,
                played_at: now,
                confirmed_at: None,
            });
            info!(
                "Match {}: player {} reports a win over player {}, awaiting confirmation",
                id, winner_id, loser_id
            );
        }
    }
    Ok(id)
}

/// Confirm a pending result. Only the participant who did not report it
/// may confirm. The exchange is recomputed from current ratings, then
/// applied, and any linked challenge is closed out.
pub fn confirm_match(
    league: &mut League,
    match_id: MatchId,
    confirmer_id: PlayerId,
) -> Result<RatingUpdate> {
    let record = league.match_record(match_id)?;
    if record.status != MatchStatus::Pending {
        return Err(LadderError::MatchNotPending(match_id));
    }
    if !record.involves(confirmer_id) {
        return Err(LadderError::NotAParticipant(confirmer_id));
    }
    if record.recorded_by == confirmer_id {
        return Err(LadderError::RecorderCannotSettle);
    }
    let winner_id = record.winner_id;
    let loser_id = record.loser_id;
    let challenge_id = record.challenge_id;

    let winner_before = league.player(winner_id)?.rating;
    let loser_before = league.player(loser_id)?.rating;
    let update = apply_exchange(league, winner_id, loser_id, true)?;

    let now = Utc::now();
    let record = league.match_record_mut(match_id)?;
    record.winner_rating_before = winner_before;
    record.loser_rating_before = loser_before;
    record.rating_change = update.change;
    record.status = MatchStatus::Confirmed;
    record.confirmed_at = Some(now);

    if let Some(challenge_id) = challenge_id {
        challenges::complete_challenge(league, challenge_id)?;
    }
    info!(
        "Match {} confirmed by player {} (+{})",
        match_id, confirmer_id, update.change
    );
    Ok(update)
}

/// Reject a pending result. Ratings never moved, so nothing to undo.
pub fn decline_match(league: &mut League, match_id: MatchId, decliner_id: PlayerId) -> Result<()> {
    let record = league.match_record(match_id)?;
    if record.status != MatchStatus::Pending {
        return Err(LadderError::MatchNotPending(match_id));
    }
    if !record.involves(decliner_id) {
        return Err(LadderError::NotAParticipant(decliner_id));
    }
    if record.recorded_by == decliner_id {
        return Err(LadderError::RecorderCannotSettle);
    }

    let record = league.match_record_mut(match_id)?;
    record.status = MatchStatus::Declined;
    info!("Match {} declined by player {}", match_id, decliner_id);
    Ok(())
}

/// Move ratings and win/loss tallies for one result. Ladder results are
/// scaled by standings position; bracket results use the plain exchange.
pub(crate) fn apply_exchange(
    league: &mut League,
    winner_id: PlayerId,
    loser_id: PlayerId,
    rank_aware: bool,
) -> Result<RatingUpdate> {
    let winner_rating = league.player(winner_id)?.rating;
    let loser_rating = league.player(loser_id)?.rating;
    let ranks = if rank_aware {
        build_rank_context(league, winner_id, loser_id)
    } else {
        None
    };

    let update = rating::apply_result(winner_rating, loser_rating, ranks);

    let winner = league.player_mut(winner_id)?;
    winner.rating = update.new_winner_rating;
    winner.wins += 1;

    let loser = league.player_mut(loser_id)?;
    loser.rating = update.new_loser_rating;
    loser.losses += 1;

    Ok(update)
}

/// Standings snapshot for the pair, taken just before the exchange.
/// Ranks shift as ratings move, so this is never cached.
fn build_rank_context(
    league: &League,
    winner_id: PlayerId,
    loser_id: PlayerId,
) -> Option<RankContext> {
    let (winner_rank, loser_rank) = rank_pair(league.players(), winner_id, loser_id)?;
    Some(RankContext {
        winner_rank,
        loser_rank,
        total_players: league.players().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeagueSettings;

    fn league_with(names: &[&str]) -> (League, Vec<PlayerId>) {
        let mut league = League::new(LeagueSettings::default());
        let ids = names
            .iter()
            .map(|name| league.register_player(name).unwrap())
            .collect();
        (league, ids)
    }

    #[test]
    fn test_direct_recording_moves_ratings_at_once() {
        let (mut league, ids) = league_with(&["Ana", "Bruno"]);

        // Equal ratings, but Ana holds rank 1 on the tie-break, so her
        // expected win is damped: 32 * 0.75 * 0.5 = 12.
        let match_id =
            record_match(&mut league, ids[0], ids[1], ids[0], None, RecordingMode::Direct).unwrap();

        assert_eq!(league.player(ids[0]).unwrap().rating, 1212);
        assert_eq!(league.player(ids[1]).unwrap().rating, 1188);
        assert_eq!(league.player(ids[0]).unwrap().wins, 1);
        assert_eq!(league.player(ids[1]).unwrap().losses, 1);

        let record = league.match_record(match_id).unwrap();
        assert_eq!(record.status, MatchStatus::Confirmed);
        assert_eq!(record.rating_change, 12);
        assert_eq!(record.winner_rating_before, 1200);
    }

    #[test]
    fn test_underdog_win_pays_more_on_the_ladder() {
        let (mut league, ids) = league_with(&["Ana", "Bruno"]);

        // Bruno sits at rank 2, so his win is boosted: 32 * 1.25 * 0.5 = 20.
        record_match(&mut league, ids[1], ids[0], ids[1], None, RecordingMode::Direct).unwrap();

        assert_eq!(league.player(ids[1]).unwrap().rating, 1220);
        assert_eq!(league.player(ids[0]).unwrap().rating, 1180);
    }

    #[test]
    fn test_self_play_is_rejected() {
        let (mut league, ids) = league_with(&["Ana", "Bruno"]);
        assert!(matches!(
            record_match(&mut league, ids[0], ids[0], ids[0], None, RecordingMode::Direct),
            Err(LadderError::SelfPlay)
        ));
    }

    #[test]
    fn test_recorder_must_play_in_the_match() {
        let (mut league, ids) = league_with(&["Ana", "Bruno", "Carla"]);
        assert!(matches!(
            record_match(&mut league, ids[0], ids[1], ids[2], None, RecordingMode::Direct),
            Err(LadderError::NotAParticipant(_))
        ));
    }

    #[test]
    fn test_pending_result_leaves_ratings_alone() {
        let (mut league, ids) = league_with(&["Ana", "Bruno"]);

        let match_id = record_match(
            &mut league,
            ids[0],
            ids[1],
            ids[0],
            None,
            RecordingMode::RequiresConfirmation,
        )
        .unwrap();

        assert_eq!(league.player(ids[0]).unwrap().rating, 1200);
        assert_eq!(league.player(ids[1]).unwrap().rating, 1200);
        assert_eq!(league.player(ids[0]).unwrap().wins, 0);
        assert_eq!(
            league.match_record(match_id).unwrap().status,
            MatchStatus::Pending
        );
    }

    #[test]
    fn test_confirmation_applies_the_exchange() {
        let (mut league, ids) = league_with(&["Ana", "Bruno"]);
        let match_id = record_match(
            &mut league,
            ids[0],
            ids[1],
            ids[0],
            None,
            RecordingMode::RequiresConfirmation,
        )
        .unwrap();

        let update = confirm_match(&mut league, match_id, ids[1]).unwrap();

        assert_eq!(update.change, 12);
        assert_eq!(league.player(ids[0]).unwrap().rating, 1212);
        assert_eq!(league.player(ids[1]).unwrap().rating, 1188);

        let record = league.match_record(match_id).unwrap();
        assert_eq!(record.status, MatchStatus::Confirmed);
        assert!(record.confirmed_at.is_some());
    }

    #[test]
    fn test_reporter_cannot_confirm_their_own_report() {
        let (mut league, ids) = league_with(&["Ana", "Bruno"]);
        let match_id = record_match(
            &mut league,
            ids[0],
            ids[1],
            ids[0],
            None,
            RecordingMode::RequiresConfirmation,
        )
        .unwrap();

        assert!(matches!(
            confirm_match(&mut league, match_id, ids[0]),
            Err(LadderError::RecorderCannotSettle)
        ));
    }

    #[test]
    fn test_outsider_cannot_confirm() {
        let (mut league, ids) = league_with(&["Ana", "Bruno", "Carla"]);
        let match_id = record_match(
            &mut league,
            ids[0],
            ids[1],
            ids[0],
            None,
            RecordingMode::RequiresConfirmation,
        )
        .unwrap();

        assert!(matches!(
            confirm_match(&mut league, match_id, ids[2]),
            Err(LadderError::NotAParticipant(_))
        ));
    }

    #[test]
    fn test_confirmation_uses_ratings_at_confirmation_time() {
        let (mut league, ids) = league_with(&["Ana", "Bruno", "Carla"]);
        let pending = record_match(
            &mut league,
            ids[0],
            ids[1],
            ids[0],
            None,
            RecordingMode::RequiresConfirmation,
        )
        .unwrap();

        // Both players play other matches while the report sits pending.
        record_match(&mut league, ids[2], ids[0], ids[2], None, RecordingMode::Direct).unwrap();
        record_match(&mut league, ids[2], ids[1], ids[2], None, RecordingMode::Direct).unwrap();

        let winner_now = league.player(ids[0]).unwrap().rating;
        let loser_now = league.player(ids[1]).unwrap().rating;
        confirm_match(&mut league, pending, ids[1]).unwrap();

        let record = league.match_record(pending).unwrap();
        assert_eq!(record.winner_rating_before, winner_now);
        assert_eq!(record.loser_rating_before, loser_now);
    }

    #[test]
    fn test_declining_keeps_everything_unchanged() {
        let (mut league, ids) = league_with(&["Ana", "Bruno"]);
        let match_id = record_match(
            &mut league,
            ids[0],
            ids[1],
            ids[0],
            None,
            RecordingMode::RequiresConfirmation,
        )
        .unwrap();

        decline_match(&mut league, match_id, ids[1]).unwrap();

        assert_eq!(league.player(ids[0]).unwrap().rating, 1200);
        assert_eq!(league.player(ids[1]).unwrap().rating, 1200);
        assert_eq!(
            league.match_record(match_id).unwrap().status,
            MatchStatus::Declined
        );
    }

    #[test]
    fn test_declined_match_cannot_be_confirmed_later() {
        let (mut league, ids) = league_with(&["Ana", "Bruno"]);
        let match_id = record_match(
            &mut league,
            ids[0],
            ids[1],
            ids[0],
            None,
            RecordingMode::RequiresConfirmation,
        )
        .unwrap();
        decline_match(&mut league, match_id, ids[1]).unwrap();

        assert!(matches!(
            confirm_match(&mut league, match_id, ids[1]),
            Err(LadderError::MatchNotPending(_))
        ));
    }

    #[test]
    fn test_ladder_matches_scale_by_standings_position() {
        // Give Carla the top rating, then have the bottom player beat her.
        let (mut league, ids) = league_with(&["Ana", "Bruno", "Carla"]);
        record_match(&mut league, ids[2], ids[1], ids[2], None, RecordingMode::Direct).unwrap();

        let carla_before = league.player(ids[2]).unwrap().rating;
        let bruno_before = league.player(ids[1]).unwrap().rating;

        let match_id =
            record_match(&mut league, ids[1], ids[2], ids[1], None, RecordingMode::Direct).unwrap();
        let record = league.match_record(match_id).unwrap();

        // Bottom beats top in a three-player field: multiplier 1 + (3-1)/3 * 0.5.
        let plain = rating::elo_change(bruno_before, carla_before, None);
        assert!(record.rating_change > plain);
    }
}
