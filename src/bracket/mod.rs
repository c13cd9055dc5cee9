pub mod advancement;
pub mod seeding;
pub mod structure;

pub use advancement::{SlotRef, next_slot, slot_at, slot_at_mut};
pub use seeding::{bracket_size, build_seed_order, round_count, seed_players};
pub use structure::{BracketSlot, Side, generate_bracket};
