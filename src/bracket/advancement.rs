use crate::bracket::structure::{BracketSlot, Side};
use crate::errors::{LadderError, Result};

/// Address of one side of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRef {
    pub round: u32,
    pub position: u32,
    pub side: Side,
}

/// Where the winner of a slot goes. Positions pair up two at a time:
/// odd positions feed the first side of the next slot, even positions
/// the second. The final's winner has nowhere to go; callers detect
/// that by the round number.
pub fn next_slot(round: u32, position: u32) -> SlotRef {
    SlotRef {
        round: round + 1,
        position: position.div_ceil(2),
        side: if position % 2 == 1 {
            Side::Player1
        } else {
            Side::Player2
        },
    }
}

pub fn slot_at(bracket: &[BracketSlot], round: u32, position: u32) -> Result<&BracketSlot> {
    bracket
        .iter()
        .find(|s| s.round == round && s.position == position)
        .ok_or(LadderError::SlotNotFound { round, position })
}

pub fn slot_at_mut(
    bracket: &mut [BracketSlot],
    round: u32,
    position: u32,
) -> Result<&mut BracketSlot> {
    bracket
        .iter_mut()
        .find(|s| s.round == round && s.position == position)
        .ok_or(LadderError::SlotNotFound { round, position })
}
