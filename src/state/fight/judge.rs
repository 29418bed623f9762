//! Timing judge: matches directional presses to notes.
//!
//! Live presses are judged on arrival against the clock. A press that finds
//! no qualifying note waits in the input buffer for `buffer_window_s` and is
//! retried every frame, which forgives presses landing just before a note's
//! window opens. Anything else is dropped silently.

use super::{FightEngine, FightPhase};
use crate::models::engine::Direction;
use crate::models::stats::{ComboSource, Judgement};
use crate::shared::{FightEvent, FightOutcome, ResolveReason};
use crate::state::traits::FightContext;
use crate::system::clock::Clock;
use ordered_float::OrderedFloat;

impl<C: Clock> FightEngine<C> {
    /// A directional key went down.
    pub fn on_directional_key_down(&mut self, direction: Direction, ctx: &mut FightContext) {
        if self.phase != FightPhase::Active {
            return;
        }
        let now = self.clock.now();
        let Some(elapsed) = self.session.as_ref().and_then(|s| s.elapsed(now)) else {
            return;
        };

        if self.is_debounced(direction, elapsed) {
            log::debug!("JUDGE: {} repeat at {:.3}s dropped", direction, elapsed);
            return;
        }

        match self.find_best_match(direction, elapsed) {
            Some(index) => {
                if self.apply_hit(index, elapsed, ctx) {
                    self.resolve(FightOutcome::Win, ResolveReason::EnemyDefeated, ctx);
                }
            }
            None => {
                if let Some(session) = self.session.as_mut() {
                    session.input_buffer.insert(direction, elapsed);
                    log::debug!("JUDGE: {} buffered at {:.3}s", direction, elapsed);
                }
            }
        }
    }

    /// Index of the pending note that best matches a press at `elapsed`.
    ///
    /// Candidates are eligible notes of the direction that qualify by time
    /// or by distance; the lowest normalized score wins, ties going to the
    /// smaller time offset.
    pub fn find_best_match(&self, direction: Direction, elapsed: f64) -> Option<usize> {
        let session = self.session.as_ref()?;
        session
            .notes
            .iter()
            .enumerate()
            .filter(|(_, note)| note.direction == direction && note.is_pending())
            .filter_map(|(index, note)| {
                let offset = note.offset(elapsed);
                if !self.is_eligible(offset) {
                    return None;
                }
                let distance = self.pixels.distance_from_receptor(offset);
                self.hit_window
                    .match_score(offset, distance)
                    .map(|score| (index, score, offset.abs()))
            })
            .min_by_key(|&(_, score, abs_offset)| (OrderedFloat(score), OrderedFloat(abs_offset)))
            .map(|(index, _, _)| index)
    }

    /// On screen: entered the lane and not yet past the grace window.
    pub(crate) fn is_eligible(&self, offset_s: f64) -> bool {
        self.pixels.has_entered(offset_s) && !self.hit_window.is_past_grace(offset_s)
    }

    fn is_debounced(&self, direction: Direction, elapsed: f64) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.last_accepted_hit.get(&direction))
            .is_some_and(|last| elapsed - last < self.settings.rehit_debounce_s)
    }

    /// Judges note `index` as hit. Returns true if the enemy went down.
    fn apply_hit(&mut self, index: usize, elapsed: f64, ctx: &mut FightContext) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(note) = session.notes.get_mut(index) else {
            return false;
        };
        if !note.judge(true) {
            return false;
        }
        let note = note.clone();
        let offset = note.offset(elapsed);

        let judgement = self.hit_window.classify(offset);
        let (points, damage) = match judgement {
            Judgement::Perfect => (self.settings.score_perfect, self.settings.damage_perfect),
            _ => (self.settings.score_good, self.settings.damage_good),
        };

        session.stats.record(judgement);
        session.score += points;
        session.combo += 1;
        session.max_combo = session.max_combo.max(session.combo);
        session.last_accepted_hit.insert(note.direction, elapsed);
        let dealt = session.damage(damage);
        let milestone = session.milestones.observe(session.combo);
        let new_hp = session.enemy_hp;

        log::debug!(
            "JUDGE: {} note #{} {} ({:+.0} ms)",
            note.direction,
            index,
            judgement.label(),
            offset * 1000.0
        );

        ctx.events.emit(FightEvent::NoteHit {
            index,
            note,
            judgement,
            offset_s: offset,
        });
        if dealt > 0.0 {
            ctx.events.emit(FightEvent::EnemyDamaged {
                amount: dealt,
                new_hp,
            });
        }
        if let Some(count) = milestone {
            ctx.events.emit(FightEvent::ComboMilestoneReached {
                source: ComboSource::Fight,
                count,
            });
        }

        session.is_defeated()
    }

    /// Judges note `index` as missed. A note that is already judged is left
    /// untouched and false is returned.
    pub(crate) fn register_miss(&mut self, index: usize, ctx: &mut FightContext) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(note) = session.notes.get_mut(index) else {
            return false;
        };
        if !note.judge(false) {
            return false;
        }
        let note = note.clone();

        session.stats.record(Judgement::Miss);
        session.combo = 0;
        session.milestones.clear();

        log::debug!("JUDGE: {} note #{} MISS", note.direction, index);
        ctx.events.emit(FightEvent::NoteMissed { index, note });
        true
    }

    /// Retries buffered presses. Returns true if a hit ended the fight.
    pub(crate) fn retry_buffered(&mut self, elapsed: f64, ctx: &mut FightContext) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let mut pending: Vec<(Direction, f64)> =
            session.input_buffer.iter().map(|(d, t)| (*d, *t)).collect();
        if pending.is_empty() {
            return false;
        }
        pending.sort_by_key(|(direction, _)| *direction);

        for (direction, pressed_at) in pending {
            if elapsed - pressed_at > self.settings.buffer_window_s
                || self.is_debounced(direction, elapsed)
            {
                self.clear_buffered(direction);
                continue;
            }

            if let Some(index) = self.find_best_match(direction, elapsed) {
                self.clear_buffered(direction);
                if self.apply_hit(index, elapsed, ctx) {
                    self.resolve(FightOutcome::Win, ResolveReason::EnemyDefeated, ctx);
                    return true;
                }
            }
        }
        false
    }

    fn clear_buffered(&mut self, direction: Direction) {
        if let Some(session) = self.session.as_mut() {
            session.input_buffer.remove(&direction);
        }
    }
}
