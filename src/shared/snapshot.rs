//! Presentation snapshots for inter-thread communication.
//!
//! Snapshots are immutable captures of fight state sent from the logic
//! thread to whatever draws the meter and the note lanes.

use crate::models::engine::Direction;
use std::time::Instant;

/// Coarse lifecycle phase, as seen by presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Starting,
    Active,
    Resolving,
}

/// A note currently travelling down its lane.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteView {
    pub index: usize,
    pub direction: Direction,
    /// Pixels left before the receptor; negative once past it.
    pub offset_px: f64,
}

#[derive(Debug, Clone)]
pub struct FightSnapshot {
    /// Wall-clock time when the snapshot was created.
    pub timestamp: Instant,
    pub phase: PhaseKind,
    pub anger: f64,
    pub anger_combo: u32,

    /// Seconds since fight start, while a fight is running.
    pub elapsed_s: Option<f64>,
    pub opponent: Option<String>,
    pub score: u32,
    pub combo: u32,
    pub enemy_hp: f64,
    pub max_hp: f64,
    pub accuracy: Option<f64>,
    pub remaining_notes: usize,
    pub visible_notes: Vec<NoteView>,
}

impl FightSnapshot {
    /// One-line HUD summary used by the headless frontend.
    pub fn status_line(&self) -> String {
        match self.phase {
            PhaseKind::Active => format!(
                "vs {} | score {} | combo {} | hp {:.0}/{:.0} | acc {} | notes left {}",
                self.opponent.as_deref().unwrap_or("?"),
                self.score,
                self.combo,
                self.enemy_hp,
                self.max_hp,
                self.accuracy
                    .map(|a| format!("{:.0}%", a * 100.0))
                    .unwrap_or_else(|| "--".to_string()),
                self.remaining_notes,
            ),
            _ => format!(
                "anger {:>3.0}% (combo {})",
                self.anger * 100.0,
                self.anger_combo
            ),
        }
    }
}
