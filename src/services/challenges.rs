use chrono::Utc;
use log::info;

use crate::domain::models::{Challenge, ChallengeId, ChallengeStatus, PlayerId};
use crate::domain::League;
use crate::errors::{LadderError, Result};

/// Response options for the challenged player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeResponse {
    Accept,
    Decline,
}

/// Issue a head-to-head challenge. The challenged player must accept
/// before a match can be recorded against it.
pub fn create_challenge(
    league: &mut League,
    challenger_id: PlayerId,
    challenged_id: PlayerId,
    message: Option<String>,
) -> Result<ChallengeId> {
    if challenger_id == challenged_id {
        return Err(LadderError::SelfPlay);
    }
    league.player(challenger_id)?;
    league.player(challenged_id)?;

    let id = league.allocate_id();
    league.insert_challenge(Challenge {
        id,
        challenger_id,
        challenged_id,
        status: ChallengeStatus::Pending,
        message,
        created_at: Utc::now(),
        responded_at: None,
        completed_at: None,
    });
    info!(
        "Challenge {}: player {} calls out player {}",
        id, challenger_id, challenged_id
    );
    Ok(id)
}

/// Accept or decline a pending challenge. Only the challenged player
/// may respond.
pub fn respond_to_challenge(
    league: &mut League,
    challenge_id: ChallengeId,
    responder_id: PlayerId,
    response: ChallengeResponse,
) -> Result<()> {
    let challenge = league.challenge(challenge_id)?;
    if responder_id != challenge.challenged_id {
        return Err(LadderError::NotTheChallenged);
    }
    if challenge.status != ChallengeStatus::Pending {
        return Err(LadderError::ChallengeNotPending(challenge_id));
    }

    let challenge = league.challenge_mut(challenge_id)?;
    challenge.status = match response {
        ChallengeResponse::Accept => ChallengeStatus::Accepted,
        ChallengeResponse::Decline => ChallengeStatus::Declined,
    };
    challenge.responded_at = Some(Utc::now());
    info!(
        "Challenge {} {} by player {}",
        challenge_id,
        match response {
            ChallengeResponse::Accept => "accepted",
            ChallengeResponse::Decline => "declined",
        },
        responder_id
    );
    Ok(())
}

/// Withdraw a challenge that has not been answered yet. Only the
/// challenger may cancel.
pub fn cancel_challenge(
    league: &mut League,
    challenge_id: ChallengeId,
    canceller_id: PlayerId,
) -> Result<()> {
    let challenge = league.challenge(challenge_id)?;
    if canceller_id != challenge.challenger_id {
        return Err(LadderError::NotTheChallenger);
    }
    if challenge.status != ChallengeStatus::Pending {
        return Err(LadderError::ChallengeNotPending(challenge_id));
    }

    let challenge = league.challenge_mut(challenge_id)?;
    challenge.status = ChallengeStatus::Cancelled;
    info!("Challenge {} cancelled", challenge_id);
    Ok(())
}

/// Check that a match being recorded against a challenge matches it:
/// the challenge is accepted and names the same two players.
pub(crate) fn ensure_links_match(
    league: &League,
    challenge_id: ChallengeId,
    winner_id: PlayerId,
    loser_id: PlayerId,
) -> Result<()> {
    let challenge = league.challenge(challenge_id)?;
    if challenge.status != ChallengeStatus::Accepted {
        return Err(LadderError::ChallengeNotAccepted(challenge_id));
    }
    let pair_matches = (challenge.challenger_id == winner_id
        && challenge.challenged_id == loser_id)
        || (challenge.challenger_id == loser_id && challenge.challenged_id == winner_id);
    if !pair_matches {
        return Err(LadderError::ChallengeMismatch(challenge_id));
    }
    Ok(())
}

/// Close out a challenge once its match has settled
pub(crate) fn complete_challenge(league: &mut League, challenge_id: ChallengeId) -> Result<()> {
    let challenge = league.challenge_mut(challenge_id)?;
    challenge.status = ChallengeStatus::Completed;
    challenge.completed_at = Some(Utc::now());
    Ok(())
}
