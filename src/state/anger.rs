//! Anger meter: bounded accumulator fed by pushes, the sole fight trigger.

use crate::models::settings::FightSettings;
use crate::models::stats::ComboMilestones;

/// Anger tunables copied out of the settings.
#[derive(Debug, Clone, Copy)]
pub struct AngerTuning {
    pub combo_window_s: f64,
    pub base_increment: f64,
    pub combo_bonus: f64,
    pub decay_rate: f64,
}

impl AngerTuning {
    pub fn from_settings(settings: &FightSettings) -> Self {
        Self {
            combo_window_s: settings.combo_window_s,
            base_increment: settings.base_increment,
            combo_bonus: settings.combo_bonus,
            decay_rate: settings.decay_rate,
        }
    }
}

impl Default for AngerTuning {
    fn default() -> Self {
        Self::from_settings(&FightSettings::default())
    }
}

/// Outcome of a single accepted push.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngerHit {
    pub value: f64,
    pub combo_count: u32,
    /// Set exactly once per crossing to a full meter.
    pub triggered: bool,
    pub milestone: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct AngerMeter {
    tuning: AngerTuning,
    value: f64,
    last_hit_timestamp: Option<f64>,
    combo_count: u32,
    /// Cleared when the fight signal fires; re-armed once below full.
    armed: bool,
    /// A fight is running; pushes and decay are suspended.
    locked: bool,
    milestones: ComboMilestones,
}

impl AngerMeter {
    pub fn new(tuning: AngerTuning, milestone_step: u32) -> Self {
        Self {
            tuning,
            value: 0.0,
            last_hit_timestamp: None,
            combo_count: 0,
            armed: true,
            locked: false,
            milestones: ComboMilestones::new(milestone_step),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn last_hit_timestamp(&self) -> Option<f64> {
        self.last_hit_timestamp
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether `now` still falls inside the combo window of the last push.
    pub fn in_combo_window(&self, now: f64) -> bool {
        self.last_hit_timestamp
            .is_some_and(|last| now - last <= self.tuning.combo_window_s)
    }

    /// Registers a push. Returns `None` when ignored (fight running or a
    /// broken clock reading).
    pub fn on_hit_event(&mut self, now: f64) -> Option<AngerHit> {
        if self.locked || !now.is_finite() {
            return None;
        }

        if self.in_combo_window(now) {
            self.combo_count += 1;
        } else {
            self.combo_count = 1;
            self.milestones.clear();
        }
        self.last_hit_timestamp = Some(now);

        let increment = self.tuning.base_increment
            + self.tuning.combo_bonus * (self.combo_count - 1) as f64;
        self.set_value(self.value + increment);

        let triggered = self.armed && self.value >= 1.0;
        if triggered {
            self.armed = false;
        }

        Some(AngerHit {
            value: self.value,
            combo_count: self.combo_count,
            triggered,
            milestone: self.milestones.observe(self.combo_count),
        })
    }

    /// Decays the meter outside the combo window while no fight runs.
    pub fn tick(&mut self, dt: f64, now: f64) {
        if self.locked || self.in_combo_window(now) {
            return;
        }
        // NaN and negative deltas count as no time passing.
        let dt = dt.max(0.0);
        self.set_value(self.value - self.tuning.decay_rate * dt);
    }

    /// Suspends pushes and decay while a fight runs.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Back to an empty, unlocked meter (fight ended).
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.last_hit_timestamp = None;
        self.combo_count = 0;
        self.armed = true;
        self.locked = false;
        self.milestones.clear();
    }

    fn set_value(&mut self, value: f64) {
        self.value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        if self.value < 1.0 {
            self.armed = true;
        }
    }
}

impl Default for AngerMeter {
    fn default() -> Self {
        Self::new(AngerTuning::default(), 5)
    }
}
