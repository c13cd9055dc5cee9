use anyhow::Result;
use log::info;
use rand::prelude::*;

use crate::config::AppConfig;
use crate::domain::models::{PlayerId, TournamentId};
use crate::domain::League;
use crate::rating;
use crate::services::challenges::{self, ChallengeResponse};
use crate::services::matches::{self, RecordingMode};
use crate::services::tournaments;

const ROSTER: [&str; 16] = [
    "Ana", "Bruno", "Carla", "Dora", "Emil", "Fran", "Gabi", "Hugo", "Iris", "Jonas", "Kasia",
    "Leo", "Mira", "Nadia", "Oskar", "Pia",
];

// Chance that a challenged player turns the challenge down
const DECLINE_CHANCE: f64 = 0.2;

/// Plays out a small season: casual ladder rounds, a few challenge
/// flows, then a full tournament. Results are drawn from the expected
/// score, so stronger ratings tend to reinforce themselves. Seeded,
/// so a given configuration always produces the same season.
pub struct SimulationService {
    config: AppConfig,
}

impl SimulationService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<League> {
        info!("=== Season Simulation ===");

        let mut rng = StdRng::seed_from_u64(self.config.simulation.seed);
        let mut league = League::new(self.config.league.clone());

        let players = self.register_roster(&mut league)?;
        info!("  → Registered {} players\n", players.len());

        for round in 1..=self.config.simulation.casual_rounds {
            info!("  Casual round {}/{}", round, self.config.simulation.casual_rounds);
            // Odd rounds are plain reports; even rounds run the full
            // challenge-and-confirm flow.
            if round % 2 == 1 {
                self.play_direct_round(&mut league, &players, &mut rng)?;
            } else {
                self.play_challenge_round(&mut league, &players, &mut rng)?;
            }
        }

        let tournament_id = self.run_tournament(&mut league, &players, &mut rng)?;
        let champion = league.tournament(tournament_id)?.champion();
        if let Some(champion) = champion {
            info!(
                "  → Champion: {}\n",
                league.player(champion)?.name
            );
        }

        info!("=== Simulation Complete ===");
        Ok(league)
    }

    fn register_roster(&self, league: &mut League) -> Result<Vec<PlayerId>> {
        let count = self.config.simulation.player_count.clamp(2, ROSTER.len());
        let mut players = Vec::with_capacity(count);
        for name in &ROSTER[..count] {
            players.push(league.register_player(name)?);
        }
        Ok(players)
    }

    /// Random pairings, reported directly by the winner
    fn play_direct_round(
        &self,
        league: &mut League,
        players: &[PlayerId],
        rng: &mut StdRng,
    ) -> Result<()> {
        for (a, b) in pair_up(players, rng) {
            let winner = self.decide_winner(league, a, b, rng)?;
            let loser = if winner == a { b } else { a };
            matches::record_match(league, winner, loser, winner, None, RecordingMode::Direct)?;
        }
        Ok(())
    }

    /// Challenge, accept (usually), play, report pending, confirm
    fn play_challenge_round(
        &self,
        league: &mut League,
        players: &[PlayerId],
        rng: &mut StdRng,
    ) -> Result<()> {
        for (challenger, challenged) in pair_up(players, rng) {
            let challenge_id =
                challenges::create_challenge(league, challenger, challenged, None)?;

            if rng.random_bool(DECLINE_CHANCE) {
                challenges::respond_to_challenge(
                    league,
                    challenge_id,
                    challenged,
                    ChallengeResponse::Decline,
                )?;
                continue;
            }
            challenges::respond_to_challenge(
                league,
                challenge_id,
                challenged,
                ChallengeResponse::Accept,
            )?;

            let winner = self.decide_winner(league, challenger, challenged, rng)?;
            let loser = if winner == challenger { challenged } else { challenger };
            let match_id = matches::record_match(
                league,
                winner,
                loser,
                winner,
                Some(challenge_id),
                RecordingMode::RequiresConfirmation,
            )?;
            matches::confirm_match(league, match_id, loser)?;
        }
        Ok(())
    }

    fn run_tournament(
        &self,
        league: &mut League,
        players: &[PlayerId],
        rng: &mut StdRng,
    ) -> Result<TournamentId> {
        let organizer = players[0];
        let tournament_id = tournaments::create_tournament(
            league,
            "Season Finale",
            Some("Winner takes the season".to_string()),
            Some(players.len()),
            organizer,
        )?;
        tournaments::open_registration(league, tournament_id, organizer)?;
        for player in &players[1..] {
            tournaments::join_tournament(league, tournament_id, *player)?;
        }
        tournaments::start_tournament(league, tournament_id, organizer)?;

        let rounds = league.tournament(tournament_id)?.rounds();
        for round in 1..=rounds {
            let playable: Vec<(u32, PlayerId, PlayerId)> = league
                .tournament(tournament_id)?
                .bracket
                .iter()
                .filter(|slot| slot.round == round && slot.is_ready())
                .filter_map(|slot| Some((slot.position, slot.player1?, slot.player2?)))
                .collect();
            for (position, player1, player2) in playable {
                let winner = self.decide_winner(league, player1, player2, rng)?;
                tournaments::record_tournament_match(
                    league,
                    tournament_id,
                    round,
                    position,
                    winner,
                    winner,
                )?;
            }
        }
        Ok(tournament_id)
    }

    fn decide_winner(
        &self,
        league: &League,
        a: PlayerId,
        b: PlayerId,
        rng: &mut StdRng,
    ) -> Result<PlayerId> {
        let rating_a = league.player(a)?.rating;
        let rating_b = league.player(b)?.rating;
        let a_wins = rng.random_bool(rating::expected_score(rating_a, rating_b));
        Ok(if a_wins { a } else { b })
    }
}

/// Shuffle and pair off; with an odd count the last player sits out
fn pair_up(players: &[PlayerId], rng: &mut StdRng) -> Vec<(PlayerId, PlayerId)> {
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);
    shuffled
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}
