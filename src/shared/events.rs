//! Events the fight core emits for presentation code to react to.
//!
//! Events are fire-and-forget: the core never waits for, or reads back
//! from, whoever consumes them.

use crate::models::engine::Note;
use crate::models::stats::{ComboSource, HitStats, Judgement};
use crossbeam_channel::Sender;
use std::fmt;

/// Handle on the NPC chosen to fight the player.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpponentRef {
    pub id: u32,
    pub name: String,
}

impl fmt::Display for OpponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightOutcome {
    Win,
    Lose,
}

/// Which resolution rule ended the fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveReason {
    TargetScore,
    EnemyDefeated,
    PatternComplete,
    Timeout,
    Aborted,
}

/// Summary of a finished fight.
#[derive(Debug, Clone, PartialEq)]
pub struct FightResult {
    pub outcome: FightOutcome,
    pub reason: ResolveReason,
    pub opponent: OpponentRef,
    pub score: u32,
    pub max_combo: u32,
    pub stats: HitStats,
    pub enemy_hp: f64,
}

impl FightResult {
    pub fn accuracy(&self) -> Option<f64> {
        self.stats.accuracy()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FightEvent {
    /// Meter moved because of a push or a reset.
    AngerChanged { value: f64 },
    FightStarted { opponent: OpponentRef },
    NoteSpawned { index: usize, note: Note },
    NoteHit {
        index: usize,
        note: Note,
        judgement: Judgement,
        offset_s: f64,
    },
    NoteMissed { index: usize, note: Note },
    ComboMilestoneReached { source: ComboSource, count: u32 },
    EnemyDamaged { amount: f64, new_hp: f64 },
    FightEnded { result: FightResult },
}

/// Anything that can receive fight events.
pub trait EventSink {
    fn emit(&mut self, event: FightEvent);
}

impl EventSink for Vec<FightEvent> {
    fn emit(&mut self, event: FightEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<FightEvent> {
    fn emit(&mut self, event: FightEvent) {
        // The presentation side may already be gone during shutdown.
        let _ = self.send(event);
    }
}
