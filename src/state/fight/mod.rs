//! Fight controller: the anger-triggered rhythm fight state machine.
//!
//! The `FightEngine` owns the anger meter and, while a fight runs, the
//! `FightSession`. Its lifecycle is `Idle → Starting → Active → Resolving
//! → Idle`:
//! - a push that fills the anger meter starts a fight (edge-triggered),
//! - every frame while active advances notes, auto-misses late ones,
//!   retries buffered presses and checks the resolution rules,
//! - resolution hands the player and the opponent back to the host and
//!   empties the meter.
//!
//! All timing is read from the injected [`Clock`] as seconds since the
//! fight started; `on_tick`'s delta only drives anger decay.

mod judge;
mod notes;
mod session;
mod snapshot;


pub use session::FightSession;

use super::anger::{AngerMeter, AngerTuning};
use super::traits::FightContext;
use crate::models::engine::{
    HitWindow, Note, PixelSystem, beat_interval, generate, last_note_time,
};
use crate::models::settings::FightSettings;
use crate::models::stats::ComboSource;
use crate::shared::{FightEvent, FightOutcome, FightResult, ResolveReason};
use crate::system::clock::{Clock, MonotonicClock};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightPhase {
    Idle,
    /// Setup instant between the trigger and the first frame.
    Starting,
    Active,
    Resolving(FightOutcome),
}

pub struct FightEngine<C: Clock = MonotonicClock> {
    settings: FightSettings,
    hit_window: HitWindow,
    pixels: PixelSystem,
    clock: C,
    rng: StdRng,

    anger: AngerMeter,
    phase: FightPhase,
    session: Option<FightSession>,
    last_result: Option<FightResult>,
}

impl FightEngine<MonotonicClock> {
    /// Engine on the wall clock, seeded from the settings (or the OS).
    pub fn new(settings: FightSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_clock(settings, MonotonicClock::new(), rng)
    }
}

impl<C: Clock> FightEngine<C> {
    pub fn with_clock(settings: FightSettings, clock: C, rng: StdRng) -> Self {
        let anger = AngerMeter::new(
            AngerTuning::from_settings(&settings),
            settings.combo_milestone_step,
        );
        Self {
            hit_window: HitWindow::from_settings(&settings),
            pixels: PixelSystem::new(settings.approach_duration_s, settings.lane_travel_px),
            settings,
            clock,
            rng,
            anger,
            phase: FightPhase::Idle,
            session: None,
            last_result: None,
        }
    }

    pub fn phase(&self) -> FightPhase {
        self.phase
    }

    pub fn is_fighting(&self) -> bool {
        self.session.is_some()
    }

    pub fn anger(&self) -> &AngerMeter {
        &self.anger
    }

    pub fn session(&self) -> Option<&FightSession> {
        self.session.as_ref()
    }

    /// Summary of the most recently finished fight.
    pub fn last_result(&self) -> Option<&FightResult> {
        self.last_result.as_ref()
    }

    /// A push on an NPC. Ignored while a fight runs.
    pub fn on_push(&mut self, source_id: u32, ctx: &mut FightContext) {
        if self.phase != FightPhase::Idle {
            log::debug!("ANGER: Push from #{} ignored during fight", source_id);
            return;
        }

        let now = self.clock.now();
        let Some(hit) = self.anger.on_hit_event(now) else {
            return;
        };
        log::debug!(
            "ANGER: Push from #{} -> {:.3} (combo {})",
            source_id,
            hit.value,
            hit.combo_count
        );

        ctx.events.emit(FightEvent::AngerChanged { value: hit.value });
        if let Some(count) = hit.milestone {
            ctx.events.emit(FightEvent::ComboMilestoneReached {
                source: ComboSource::Anger,
                count,
            });
        }

        if hit.triggered {
            let notes = generate(
                self.settings.bpm,
                self.settings.lead_in_s,
                self.settings.note_count_range,
                &mut self.rng,
            );
            self.begin_fight(notes, now, ctx);
        }
    }

    /// Per-frame update: anger decay while idle, fight progress while active.
    pub fn on_tick(&mut self, dt: f64, ctx: &mut FightContext) {
        let now = self.clock.now();
        match self.phase {
            FightPhase::Idle => self.anger.tick(dt, now),
            FightPhase::Active => self.update_active(now, ctx),
            FightPhase::Starting | FightPhase::Resolving(_) => {}
        }
    }

    /// Ends a running fight as a loss with score and HP frozen.
    pub fn force_end(&mut self, ctx: &mut FightContext) {
        if self.phase == FightPhase::Active {
            log::info!("FIGHT: Aborted by host");
            self.resolve(FightOutcome::Lose, ResolveReason::Aborted, ctx);
        }
    }

    /// Runs a fight on a fixed pattern instead of a generated one.
    #[cfg(test)]
    pub(crate) fn start_fight_with_pattern(
        &mut self,
        notes: Vec<Note>,
        ctx: &mut FightContext,
    ) -> bool {
        let now = self.clock.now();
        self.begin_fight(notes, now, ctx)
    }

    /// Idle → Starting → Active. Only valid from Idle.
    fn begin_fight(&mut self, notes: Vec<Note>, now: f64, ctx: &mut FightContext) -> bool {
        if self.phase != FightPhase::Idle {
            log::debug!("FIGHT: Start ignored, already {:?}", self.phase);
            return false;
        }
        if !now.is_finite() {
            log::warn!("FIGHT: Start ignored, clock reading is {}", now);
            return false;
        }

        self.phase = FightPhase::Starting;
        self.anger.lock();
        ctx.host.lock_player_movement(true);
        ctx.host.lock_player_camera(true);
        let opponent = ctx.host.select_opponent();

        let interval = beat_interval(self.settings.bpm);
        let last = last_note_time(&notes, self.settings.lead_in_s);
        log::info!(
            "FIGHT: Started against {} ({} notes, {} bpm)",
            opponent,
            notes.len(),
            self.settings.bpm
        );

        self.session = Some(FightSession::new(
            opponent.clone(),
            now,
            notes,
            self.settings.max_hp,
            interval,
            last,
            self.settings.combo_milestone_step,
        ));
        ctx.events.emit(FightEvent::FightStarted { opponent });

        self.phase = FightPhase::Active;
        true
    }

    fn update_active(&mut self, now: f64, ctx: &mut FightContext) {
        let Some(elapsed) = self.session.as_ref().and_then(|s| s.elapsed(now)) else {
            return;
        };

        self.spawn_notes(elapsed, ctx);
        self.expire_notes(elapsed, ctx);
        if self.retry_buffered(elapsed, ctx) {
            return;
        }

        if let Some((outcome, reason)) = self.check_resolution(elapsed) {
            self.resolve(outcome, reason, ctx);
        }
    }

    /// Resolution rules, in priority order.
    fn check_resolution(&self, elapsed: f64) -> Option<(FightOutcome, ResolveReason)> {
        let session = self.session.as_ref()?;

        if session.score >= self.settings.target_score {
            return Some((FightOutcome::Win, ResolveReason::TargetScore));
        }
        if session.is_defeated() {
            return Some((FightOutcome::Win, ResolveReason::EnemyDefeated));
        }

        let timeout_at =
            session.last_note_time + self.settings.timeout_beats * session.beat_interval_s;
        let reason = if session.all_judged() {
            ResolveReason::PatternComplete
        } else if elapsed >= timeout_at {
            ResolveReason::Timeout
        } else {
            return None;
        };

        // Nothing judged means accuracy is undefined: that is a loss.
        let outcome = match session.stats.accuracy() {
            Some(accuracy) if accuracy >= self.settings.min_accuracy_to_win => FightOutcome::Win,
            _ => FightOutcome::Lose,
        };
        Some((outcome, reason))
    }

    /// Resolving → Idle. Hands everything back to the host.
    fn resolve(&mut self, outcome: FightOutcome, reason: ResolveReason, ctx: &mut FightContext) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.phase = FightPhase::Resolving(outcome);

        let result = FightResult {
            outcome,
            reason,
            opponent: session.opponent.clone(),
            score: session.score,
            max_combo: session.max_combo,
            stats: session.stats.clone(),
            enemy_hp: session.enemy_hp,
        };
        log::info!(
            "FIGHT: {:?} against {} by {:?} (score {}, max combo {}, hp {:.0})",
            outcome,
            result.opponent,
            reason,
            result.score,
            result.max_combo,
            result.enemy_hp
        );

        ctx.events.emit(FightEvent::FightEnded {
            result: result.clone(),
        });
        ctx.host.restore_opponent(session.opponent);
        ctx.host.lock_player_movement(false);
        ctx.host.lock_player_camera(false);

        self.anger.reset();
        ctx.events.emit(FightEvent::AngerChanged { value: 0.0 });

        self.last_result = Some(result);
        self.phase = FightPhase::Idle;
    }
}
