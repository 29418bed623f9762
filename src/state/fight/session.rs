//! Per-fight bookkeeping owned by the engine while a fight runs.

use crate::models::engine::{Direction, Note};
use crate::models::stats::{ComboMilestones, HitStats};
use crate::shared::OpponentRef;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct FightSession {
    pub opponent: OpponentRef,
    /// Clock reading at activation; everything else is relative to it.
    pub start_time: f64,

    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub stats: HitStats,
    pub enemy_hp: f64,
    pub max_hp: f64,

    /// The pattern, ordered by due time.
    pub notes: Vec<Note>,
    /// Early presses waiting for a note, as elapsed seconds.
    pub input_buffer: HashMap<Direction, f64>,
    /// Elapsed time of the last accepted hit per direction (debounce).
    pub(crate) last_accepted_hit: HashMap<Direction, f64>,
    pub(crate) milestones: ComboMilestones,

    pub beat_interval_s: f64,
    pub last_note_time: f64,
}

impl FightSession {
    pub(crate) fn new(
        opponent: OpponentRef,
        start_time: f64,
        notes: Vec<Note>,
        max_hp: f64,
        beat_interval_s: f64,
        last_note_time: f64,
        milestone_step: u32,
    ) -> Self {
        Self {
            opponent,
            start_time,
            score: 0,
            combo: 0,
            max_combo: 0,
            stats: HitStats::new(),
            enemy_hp: max_hp,
            max_hp,
            notes,
            input_buffer: HashMap::new(),
            last_accepted_hit: HashMap::new(),
            milestones: ComboMilestones::new(milestone_step),
            beat_interval_s,
            last_note_time,
        }
    }

    /// Seconds since activation. Negative readings clamp to zero; `None`
    /// for a NaN clock, meaning nothing is eligible this frame.
    pub fn elapsed(&self, now: f64) -> Option<f64> {
        let elapsed = now - self.start_time;
        if elapsed.is_nan() {
            None
        } else {
            Some(elapsed.max(0.0))
        }
    }

    pub fn hits(&self) -> u32 {
        self.stats.hits()
    }

    pub fn misses(&self) -> u32 {
        self.stats.misses()
    }

    pub fn all_judged(&self) -> bool {
        self.notes.iter().all(|n| n.judged)
    }

    pub fn remaining_notes(&self) -> usize {
        self.notes.iter().filter(|n| n.is_pending()).count()
    }

    /// Lowers HP, never below zero. Returns the damage actually dealt.
    pub(crate) fn damage(&mut self, amount: f64) -> f64 {
        let before = self.enemy_hp;
        self.enemy_hp = (self.enemy_hp - amount.max(0.0)).max(0.0);
        before - self.enemy_hp
    }

    pub fn is_defeated(&self) -> bool {
        self.enemy_hp <= 0.0
    }
}
