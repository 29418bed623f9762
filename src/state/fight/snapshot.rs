//! Snapshot creation for presentation.

use super::{FightEngine, FightPhase};
use crate::shared::{FightSnapshot, NoteView, PhaseKind};
use crate::state::traits::Snapshot;
use crate::system::clock::Clock;
use std::time::Instant;

impl<C: Clock> Snapshot for FightEngine<C> {
    type Output = FightSnapshot;

    fn create_snapshot(&self) -> FightSnapshot {
        let phase = match self.phase {
            FightPhase::Idle => PhaseKind::Idle,
            FightPhase::Starting => PhaseKind::Starting,
            FightPhase::Active => PhaseKind::Active,
            FightPhase::Resolving(_) => PhaseKind::Resolving,
        };

        let mut snapshot = FightSnapshot {
            timestamp: Instant::now(),
            phase,
            anger: self.anger.value(),
            anger_combo: self.anger.combo_count(),
            elapsed_s: None,
            opponent: None,
            score: 0,
            combo: 0,
            enemy_hp: self.settings.max_hp,
            max_hp: self.settings.max_hp,
            accuracy: None,
            remaining_notes: 0,
            visible_notes: Vec::new(),
        };

        let Some(session) = self.session.as_ref() else {
            return snapshot;
        };
        let elapsed = session.elapsed(self.clock.now());

        snapshot.elapsed_s = elapsed;
        snapshot.opponent = Some(session.opponent.name.clone());
        snapshot.score = session.score;
        snapshot.combo = session.combo;
        snapshot.enemy_hp = session.enemy_hp;
        snapshot.max_hp = session.max_hp;
        snapshot.accuracy = session.stats.accuracy();
        snapshot.remaining_notes = session.remaining_notes();

        if let Some(elapsed) = elapsed {
            snapshot.visible_notes = session
                .notes
                .iter()
                .enumerate()
                .filter(|(_, note)| note.is_pending() && self.is_eligible(note.offset(elapsed)))
                .map(|(index, note)| NoteView {
                    index,
                    direction: note.direction,
                    offset_px: self.pixels.offset_px(note.offset(elapsed)),
                })
                .collect();
        }

        snapshot
    }
}
