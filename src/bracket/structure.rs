use serde::{Deserialize, Serialize};

use crate::bracket::seeding::{bracket_size, build_seed_order, round_count};
use crate::domain::models::PlayerId;
use crate::errors::{LadderError, Result};

/// Which side of a slot a player occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player1,
    Player2,
}

/// One match position in the bracket. Rounds and positions count from 1;
/// round 1 holds the full field, the last round is the final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlot {
    pub round: u32,
    pub position: u32,
    pub player1: Option<PlayerId>,
    pub player2: Option<PlayerId>,
    pub winner: Option<PlayerId>,
}

impl BracketSlot {
    pub fn empty(round: u32, position: u32) -> Self {
        Self {
            round,
            position,
            player1: None,
            player2: None,
            winner: None,
        }
    }

    pub fn player(&self, side: Side) -> Option<PlayerId> {
        match side {
            Side::Player1 => self.player1,
            Side::Player2 => self.player2,
        }
    }

    pub fn place(&mut self, side: Side, player: PlayerId) {
        match side {
            Side::Player1 => self.player1 = Some(player),
            Side::Player2 => self.player2 = Some(player),
        }
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.player1 == Some(player) || self.player2 == Some(player)
    }

    /// A first-round slot with exactly one player. Later rounds fill one
    /// side at a time as winners arrive, which is not a bye.
    pub fn is_bye(&self) -> bool {
        self.round == 1 && (self.player1.is_none() ^ self.player2.is_none())
    }

    pub fn bye_winner(&self) -> Option<PlayerId> {
        if self.is_bye() {
            self.player1.or(self.player2)
        } else {
            None
        }
    }

    /// Both players present and no result yet
    pub fn is_ready(&self) -> bool {
        self.player1.is_some() && self.player2.is_some() && self.winner.is_none()
    }
}

/// Lay out a full single-elimination bracket for the seeded field, best
/// seed first. Round one is paired from the seed order; the field is
/// padded to a power of two, so missing opponents show up as byes.
/// Later rounds start empty. Bye winners are not advanced here.
pub fn generate_bracket(seeded: &[PlayerId]) -> Result<Vec<BracketSlot>> {
    if seeded.len() < 2 {
        return Err(LadderError::FieldTooSmall(2));
    }

    let size = bracket_size(seeded.len());
    let rounds = round_count(seeded.len());
    let order = build_seed_order(size);

    let mut slots = Vec::with_capacity(size - 1);
    for (idx, pair) in order.chunks(2).enumerate() {
        slots.push(BracketSlot {
            round: 1,
            position: idx as u32 + 1,
            player1: seeded.get(pair[0]).copied(),
            player2: seeded.get(pair[1]).copied(),
            winner: None,
        });
    }
    for round in 2..=rounds {
        for position in 1..=(size >> round) {
            slots.push(BracketSlot::empty(round, position as u32));
        }
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_fields_below_two() {
        assert!(matches!(
            generate_bracket(&[]),
            Err(LadderError::FieldTooSmall(2))
        ));
        assert!(matches!(
            generate_bracket(&[7]),
            Err(LadderError::FieldTooSmall(2))
        ));
    }

    #[test]
    fn test_two_player_bracket_is_a_single_final() {
        let slots = generate_bracket(&[1, 2]).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].player1, Some(1));
        assert_eq!(slots[0].player2, Some(2));
        assert!(!slots[0].is_bye());
    }

    #[test]
    fn test_five_player_bracket_shape() {
        // Field of 5 pads to 8: four quarter-final slots, two semis, one final.
        let slots = generate_bracket(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(slots.len(), 7);
        assert_eq!(slots.iter().filter(|s| s.round == 1).count(), 4);
        assert_eq!(slots.iter().filter(|s| s.round == 2).count(), 2);
        assert_eq!(slots.iter().filter(|s| s.round == 3).count(), 1);
    }

    #[test]
    fn test_five_player_bracket_gives_byes_to_top_seeds() {
        let slots = generate_bracket(&[1, 2, 3, 4, 5]).unwrap();

        // Seeds 1-3 sit alone; seeds 4 and 5 meet in the only real pairing.
        assert_eq!(slots[0].bye_winner(), Some(1));
        assert_eq!(slots[2].bye_winner(), Some(2));
        assert_eq!(slots[3].bye_winner(), Some(3));
        assert!(!slots[1].is_bye());
        assert_eq!(slots[1].player1, Some(4));
        assert_eq!(slots[1].player2, Some(5));
    }

    #[test]
    fn test_no_slot_holds_two_byes() {
        // More than half the bracket is filled whenever the field is
        // legal, so a fully empty round-one slot cannot occur.
        for count in 2..=33usize {
            let field: Vec<PlayerId> = (1..=count as PlayerId).collect();
            let slots = generate_bracket(&field).unwrap();
            for slot in slots.iter().filter(|s| s.round == 1) {
                assert!(
                    slot.player1.is_some() || slot.player2.is_some(),
                    "empty pairing in a field of {count}"
                );
            }
        }
    }

    #[test]
    fn test_every_entrant_appears_exactly_once() {
        for count in 2..=17usize {
            let field: Vec<PlayerId> = (1..=count as PlayerId).collect();
            let slots = generate_bracket(&field).unwrap();
            for id in &field {
                let appearances = slots
                    .iter()
                    .filter(|s| s.round == 1 && s.contains(*id))
                    .count();
                assert_eq!(appearances, 1, "player {id} in a field of {count}");
            }
        }
    }

    #[test]
    fn test_later_rounds_start_empty() {
        let slots = generate_bracket(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        for slot in slots.iter().filter(|s| s.round > 1) {
            assert_eq!(slot.player1, None);
            assert_eq!(slot.player2, None);
            assert_eq!(slot.winner, None);
        }
    }
}
