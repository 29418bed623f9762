//! Gameplay actions produced by the input thread.

use crate::models::engine::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Player shoved an NPC; feeds the anger meter.
    Push { source_id: u32 },
    /// Directional key went down.
    Arrow(Direction),

    // System
    AbortFight,
    Quit,
}
