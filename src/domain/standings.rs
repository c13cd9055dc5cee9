use serde::Serialize;

use crate::domain::models::{Player, PlayerId};
use crate::domain::tiers::Tier;

/// One row of the ladder, ranked from 1
#[derive(Debug, Clone, Serialize)]
pub struct StandingsEntry {
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
    pub tier: Tier,
}

/// Order players by rating, highest first. Equal ratings keep their
/// registration order, so a newcomer never jumps above an incumbent.
pub fn standings(players: &[Player]) -> Vec<StandingsEntry> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.rating.cmp(&a.rating));

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, player)| StandingsEntry {
            rank: idx + 1,
            player_id: player.id,
            name: player.name.clone(),
            rating: player.rating,
            wins: player.wins,
            losses: player.losses,
            tier: Tier::for_rating(player.rating),
        })
        .collect()
}

/// Current ranks of two players, if both are on the ladder
pub fn rank_pair(players: &[Player], a: PlayerId, b: PlayerId) -> Option<(usize, usize)> {
    let table = standings(players);
    let rank_of = |id: PlayerId| table.iter().find(|e| e.player_id == id).map(|e| e.rank);
    Some((rank_of(a)?, rank_of(b)?))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn player(id: PlayerId, name: &str, rating: i32) -> Player {
        Player {
            id,
            name: name.to_string(),
            rating,
            wins: 0,
            losses: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_standings_sorted_by_rating_descending() {
        let players = vec![
            player(1, "Ana", 1200),
            player(2, "Bruno", 1450),
            player(3, "Carla", 1100),
        ];

        let table = standings(&players);

        assert_eq!(table[0].player_id, 2);
        assert_eq!(table[1].player_id, 1);
        assert_eq!(table[2].player_id, 3);
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[2].rank, 3);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let players = vec![
            player(1, "Ana", 1200),
            player(2, "Bruno", 1200),
            player(3, "Carla", 1200),
        ];

        let table = standings(&players);

        let ids: Vec<PlayerId> = table.iter().map(|e| e.player_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_rank_pair_missing_player() {
        let players = vec![player(1, "Ana", 1200)];
        assert!(rank_pair(&players, 1, 99).is_none());
    }

    #[test]
    fn test_rank_pair_returns_both_ranks() {
        let players = vec![player(1, "Ana", 1500), player(2, "Bruno", 1300)];
        assert_eq!(rank_pair(&players, 2, 1), Some((2, 1)));
    }
}
