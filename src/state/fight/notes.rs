//! Note processing - spawn_notes, expire_notes

use super::FightEngine;
use crate::shared::FightEvent;
use crate::state::traits::FightContext;
use crate::system::clock::Clock;

impl<C: Clock> FightEngine<C> {
    /// Announces notes that entered their lane since the last frame.
    pub(crate) fn spawn_notes(&mut self, elapsed: f64, ctx: &mut FightContext) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        for (index, note) in session.notes.iter_mut().enumerate() {
            if note.spawned || !self.pixels.has_entered(note.offset(elapsed)) {
                continue;
            }
            note.spawned = true;
            ctx.events.emit(FightEvent::NoteSpawned {
                index,
                note: note.clone(),
            });
        }
    }

    /// Auto-misses every pending note past its grace window.
    pub(crate) fn expire_notes(&mut self, elapsed: f64, ctx: &mut FightContext) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        let expired: Vec<usize> = session
            .notes
            .iter()
            .enumerate()
            .filter(|(_, note)| {
                note.is_pending() && self.hit_window.is_past_grace(note.offset(elapsed))
            })
            .map(|(index, _)| index)
            .collect();

        for index in expired {
            self.register_miss(index, ctx);
        }
    }
}
