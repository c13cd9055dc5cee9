use chrono::Utc;
use log::info;

use crate::bracket::{generate_bracket, next_slot, seed_players, slot_at, slot_at_mut};
use crate::domain::models::{
    MatchId, MatchRecord, MatchStatus, Participant, PlayerId, Tournament, TournamentId,
    TournamentStatus,
};
use crate::domain::League;
use crate::errors::{LadderError, Result};
use crate::services::matches;

/// Announce a tournament. It starts in draft with the organizer already
/// entered; registration opens as a separate step.
pub fn create_tournament(
    league: &mut League,
    name: &str,
    description: Option<String>,
    max_players: Option<usize>,
    created_by: PlayerId,
) -> Result<TournamentId> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LadderError::EmptyName);
    }
    league.player(created_by)?;
    let max_players = max_players.unwrap_or(league.settings.default_max_players);
    if max_players < 2 {
        return Err(LadderError::FieldTooSmall(2));
    }

    let now = Utc::now();
    let id = league.allocate_id();
    league.insert_tournament(Tournament {
        id,
        name: trimmed.to_string(),
        description,
        status: TournamentStatus::Draft,
        max_players,
        created_by,
        created_at: now,
        started_at: None,
        completed_at: None,
        participants: vec![Participant {
            player_id: created_by,
            seed: None,
            eliminated: false,
            joined_at: now,
        }],
        bracket: Vec::new(),
    });
    info!("Tournament {}: \"{}\" created (max {})", id, trimmed, max_players);
    Ok(id)
}

/// Open a drafted tournament for sign-ups. Organizer only.
pub fn open_registration(
    league: &mut League,
    tournament_id: TournamentId,
    actor_id: PlayerId,
) -> Result<()> {
    let tournament = league.tournament(tournament_id)?;
    if actor_id != tournament.created_by {
        return Err(LadderError::NotTheOrganizer);
    }
    if tournament.status != TournamentStatus::Draft {
        return Err(LadderError::WrongTournamentStatus {
            expected: TournamentStatus::Draft,
            actual: tournament.status,
        });
    }

    league.tournament_mut(tournament_id)?.status = TournamentStatus::Open;
    info!("Tournament {} open for registration", tournament_id);
    Ok(())
}

pub fn join_tournament(
    league: &mut League,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<()> {
    league.player(player_id)?;
    let tournament = league.tournament(tournament_id)?;
    if tournament.status != TournamentStatus::Open {
        return Err(LadderError::WrongTournamentStatus {
            expected: TournamentStatus::Open,
            actual: tournament.status,
        });
    }
    if tournament.is_entered(player_id) {
        return Err(LadderError::AlreadyEntered(player_id));
    }
    if tournament.participants.len() >= tournament.max_players {
        return Err(LadderError::TournamentFull {
            capacity: tournament.max_players,
        });
    }

    let now = Utc::now();
    league
        .tournament_mut(tournament_id)?
        .participants
        .push(Participant {
            player_id,
            seed: None,
            eliminated: false,
            joined_at: now,
        });
    info!("Tournament {}: player {} joined", tournament_id, player_id);
    Ok(())
}

/// Withdraw before the bracket is drawn
pub fn leave_tournament(
    league: &mut League,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<()> {
    let tournament = league.tournament(tournament_id)?;
    if tournament.status != TournamentStatus::Draft && tournament.status != TournamentStatus::Open {
        return Err(LadderError::WrongTournamentStatus {
            expected: TournamentStatus::Open,
            actual: tournament.status,
        });
    }
    if !tournament.is_entered(player_id) {
        return Err(LadderError::NotEntered(player_id));
    }

    let tournament = league.tournament_mut(tournament_id)?;
    tournament.participants.retain(|p| p.player_id != player_id);
    info!("Tournament {}: player {} withdrew", tournament_id, player_id);
    Ok(())
}

/// Draw the bracket and begin play. Participants are seeded by rating,
/// first-round byes go to the top seeds and are resolved on the spot,
/// and the tournament moves to in-progress. Organizer only.
pub fn start_tournament(
    league: &mut League,
    tournament_id: TournamentId,
    actor_id: PlayerId,
) -> Result<()> {
    let tournament = league.tournament(tournament_id)?;
    if actor_id != tournament.created_by {
        return Err(LadderError::NotTheOrganizer);
    }
    if tournament.status != TournamentStatus::Open {
        return Err(LadderError::WrongTournamentStatus {
            expected: TournamentStatus::Open,
            actual: tournament.status,
        });
    }
    let entrant_ids: Vec<PlayerId> = tournament.participants.iter().map(|p| p.player_id).collect();
    if entrant_ids.len() < 2 {
        return Err(LadderError::FieldTooSmall(2));
    }

    let mut entrants = Vec::with_capacity(entrant_ids.len());
    for id in &entrant_ids {
        entrants.push((*id, league.player(*id)?.rating));
    }

    // Build the whole bracket locally and commit it in one step, so a
    // failure part-way leaves the tournament untouched.
    let seeded = seed_players(&entrants);
    let mut bracket = generate_bracket(&seeded)?;
    let rounds = bracket.iter().map(|s| s.round).max().unwrap_or(1);

    let byes: Vec<(u32, u32, PlayerId)> = bracket
        .iter()
        .filter_map(|slot| slot.bye_winner().map(|w| (slot.round, slot.position, w)))
        .collect();
    for (round, position, winner) in byes {
        slot_at_mut(&mut bracket, round, position)?.winner = Some(winner);
        let target = next_slot(round, position);
        slot_at_mut(&mut bracket, target.round, target.position)?.place(target.side, winner);
    }

    let now = Utc::now();
    let tournament = league.tournament_mut(tournament_id)?;
    for (idx, player_id) in seeded.iter().enumerate() {
        if let Some(participant) = tournament.participant_mut(*player_id) {
            participant.seed = Some(idx as u32 + 1);
        }
    }
    tournament.bracket = bracket;
    tournament.status = TournamentStatus::InProgress;
    tournament.started_at = Some(now);

    info!(
        "Tournament {} started: {} players, {} rounds",
        tournament_id,
        entrant_ids.len(),
        rounds
    );
    Ok(())
}

/// Settle one bracket match. Ratings move immediately (no confirmation
/// step for tournament play), the loser is eliminated, and the winner
/// advances; settling the final completes the tournament.
pub fn record_tournament_match(
    league: &mut League,
    tournament_id: TournamentId,
    round: u32,
    position: u32,
    winner_id: PlayerId,
    recorded_by: PlayerId,
) -> Result<MatchId> {
    let tournament = league.tournament(tournament_id)?;
    if tournament.status != TournamentStatus::InProgress {
        return Err(LadderError::WrongTournamentStatus {
            expected: TournamentStatus::InProgress,
            actual: tournament.status,
        });
    }

    let slot = slot_at(&tournament.bracket, round, position)?;
    let (player1, player2) = match (slot.player1, slot.player2) {
        (Some(p1), Some(p2)) => (p1, p2),
        _ => return Err(LadderError::SlotNotReady { round, position }),
    };
    if slot.winner.is_some() {
        return Err(LadderError::SlotAlreadyDecided { round, position });
    }
    if winner_id != player1 && winner_id != player2 {
        return Err(LadderError::NotAParticipant(winner_id));
    }
    if recorded_by != player1 && recorded_by != player2 {
        return Err(LadderError::NotAParticipant(recorded_by));
    }
    let loser_id = if winner_id == player1 { player2 } else { player1 };

    // The advancement target must exist before anything is written.
    let rounds = tournament.rounds();
    let is_final = round == rounds;
    let target = next_slot(round, position);
    if !is_final {
        slot_at(&tournament.bracket, target.round, target.position)?;
    }

    let winner_before = league.player(winner_id)?.rating;
    let loser_before = league.player(loser_id)?.rating;
    let update = matches::apply_exchange(league, winner_id, loser_id, false)?;

    let now = Utc::now();
    let id = league.allocate_id();
    league.insert_match(MatchRecord {
        id,
        winner_id,
        loser_id,
        winner_rating_before: winner_before,
        loser_rating_before: loser_before,
        rating_change: update.change,
        challenge_id: None,
        tournament_id: Some(tournament_id),
        recorded_by,
        status: MatchStatus::Confirmed,
        played_at: now,
        confirmed_at: Some(now),
    });

    let tournament = league.tournament_mut(tournament_id)?;
    slot_at_mut(&mut tournament.bracket, round, position)?.winner = Some(winner_id);
    if let Some(participant) = tournament.participant_mut(loser_id) {
        participant.eliminated = true;
    }

    if is_final {
        tournament.status = TournamentStatus::Completed;
        tournament.completed_at = Some(now);
        info!(
            "Tournament {} completed: player {} is the champion",
            tournament_id, winner_id
        );
    } else {
        slot_at_mut(&mut tournament.bracket, target.round, target.position)?
            .place(target.side, winner_id);
        info!(
            "Tournament {}: player {} beat player {} in round {} (+{})",
            tournament_id, winner_id, loser_id, round, update.change
        );
    }
    Ok(id)
}
