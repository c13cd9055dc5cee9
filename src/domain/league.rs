use chrono::Utc;

use crate::config::LeagueSettings;
use crate::domain::models::{
    Challenge, ChallengeId, MatchId, MatchRecord, Player, PlayerId, Tournament, TournamentId,
};
use crate::errors::{LadderError, Result};

/// In-memory store for one league: players, the match ledger,
/// challenges and tournaments, with a shared id counter.
#[derive(Debug, Clone)]
pub struct League {
    pub settings: LeagueSettings,
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
    challenges: Vec<Challenge>,
    tournaments: Vec<Tournament>,
    next_id: i64,
}

impl League {
    pub fn new(settings: LeagueSettings) -> Self {
        Self {
            settings,
            players: Vec::new(),
            matches: Vec::new(),
            challenges: Vec::new(),
            tournaments: Vec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a player at the configured starting rating. Names are unique.
    pub fn register_player(&mut self, name: &str) -> Result<PlayerId> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(LadderError::EmptyName);
        }
        if self.players.iter().any(|p| p.name == trimmed) {
            return Err(LadderError::NameTaken(trimmed.to_string()));
        }

        let id = self.allocate_id();
        self.players.push(Player {
            id,
            name: trimmed.to_string(),
            rating: self.settings.starting_rating,
            wins: 0,
            losses: 0,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(LadderError::PlayerNotFound(id))
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LadderError::PlayerNotFound(id))
    }

    pub fn match_record(&self, id: MatchId) -> Result<&MatchRecord> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .ok_or(LadderError::MatchNotFound(id))
    }

    pub(crate) fn match_record_mut(&mut self, id: MatchId) -> Result<&mut MatchRecord> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(LadderError::MatchNotFound(id))
    }

    pub fn challenge(&self, id: ChallengeId) -> Result<&Challenge> {
        self.challenges
            .iter()
            .find(|c| c.id == id)
            .ok_or(LadderError::ChallengeNotFound(id))
    }

    pub(crate) fn challenge_mut(&mut self, id: ChallengeId) -> Result<&mut Challenge> {
        self.challenges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(LadderError::ChallengeNotFound(id))
    }

    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament> {
        self.tournaments
            .iter()
            .find(|t| t.id == id)
            .ok_or(LadderError::TournamentNotFound(id))
    }

    pub(crate) fn tournament_mut(&mut self, id: TournamentId) -> Result<&mut Tournament> {
        self.tournaments
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LadderError::TournamentNotFound(id))
    }

    pub(crate) fn insert_match(&mut self, record: MatchRecord) {
        self.matches.push(record);
    }

    pub(crate) fn insert_challenge(&mut self, challenge: Challenge) {
        self.challenges.push(challenge);
    }

    pub(crate) fn insert_tournament(&mut self, tournament: Tournament) {
        self.tournaments.push(tournament);
    }

    /// Matches a player appears in, newest first
    pub fn match_history(&self, player_id: PlayerId) -> Result<Vec<&MatchRecord>> {
        self.player(player_id)?;
        let mut history: Vec<&MatchRecord> = self
            .matches
            .iter()
            .filter(|m| m.involves(player_id))
            .collect();
        history.sort_by(|a, b| b.played_at.cmp(&a.played_at));
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeagueSettings;

    #[test]
    fn test_register_player_assigns_starting_rating() {
        let mut league = League::new(LeagueSettings::default());
        let id = league.register_player("Ana").unwrap();

        let player = league.player(id).unwrap();
        assert_eq!(player.rating, league.settings.starting_rating);
        assert_eq!(player.games_played(), 0);
    }

    #[test]
    fn test_register_player_rejects_duplicate_name() {
        let mut league = League::new(LeagueSettings::default());
        league.register_player("Ana").unwrap();

        assert!(matches!(
            league.register_player("Ana"),
            Err(LadderError::NameTaken(_))
        ));
    }

    #[test]
    fn test_register_player_rejects_blank_name() {
        let mut league = League::new(LeagueSettings::default());
        assert!(matches!(
            league.register_player("   "),
            Err(LadderError::EmptyName)
        ));
    }

    #[test]
    fn test_ids_are_unique_across_entities() {
        let mut league = League::new(LeagueSettings::default());
        let a = league.register_player("Ana").unwrap();
        let b = league.register_player("Bruno").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_player_lookup_fails() {
        let league = League::new(LeagueSettings::default());
        assert!(matches!(
            league.player(42),
            Err(LadderError::PlayerNotFound(42))
        ));
    }
}
