//! Definitions and constructors for hit window timing thresholds.

use crate::models::settings::FightSettings;
use crate::models::stats::Judgement;

/// Slack on every window edge. Offsets and distances derive from differences
/// of clock readings, so a press exactly on an edge can land a few ulps out.
const EDGE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
pub struct HitWindow {
    pub perfect_s: f64,
    pub good_s: f64,
    /// How long after its due time a note stays judgeable.
    pub miss_grace_s: f64,
    /// Screen-distance forgiveness; `None` for a time-only judge.
    pub distance_tolerance_px: Option<f64>,
}

impl HitWindow {
    /// Manual defaults used when no settings are loaded.
    pub fn new() -> Self {
        Self {
            perfect_s: 0.10,
            good_s: 0.18,
            miss_grace_s: 0.22,
            distance_tolerance_px: Some(48.0),
        }
    }

    pub fn from_settings(settings: &FightSettings) -> Self {
        Self {
            perfect_s: settings.perfect_window_s,
            good_s: settings.good_window_s,
            miss_grace_s: settings.miss_grace_window_s,
            distance_tolerance_px: settings
                .distance_forgiveness
                .then_some(settings.distance_tolerance_px),
        }
    }

    /// Utility constructor for fully custom values.
    pub fn from_custom(perfect: f64, good: f64, grace: f64, distance_px: Option<f64>) -> Self {
        Self {
            perfect_s: perfect,
            good_s: good,
            miss_grace_s: grace,
            distance_tolerance_px: distance_px,
        }
    }

    /// Quality of an accepted hit. Hits let in by distance forgiveness
    /// are never better than good.
    pub fn classify(&self, offset_s: f64) -> Judgement {
        if offset_s.abs() <= self.perfect_s + EDGE_EPSILON {
            Judgement::Perfect
        } else {
            Judgement::Good
        }
    }

    /// Normalized candidate score (lower is better), or `None` if the note
    /// does not qualify as a hit at this offset and distance.
    pub fn match_score(&self, offset_s: f64, distance_px: f64) -> Option<f64> {
        let time_score = offset_s.abs() / self.good_s;
        let time_ok = offset_s.abs() <= self.good_s + EDGE_EPSILON;

        match self.distance_tolerance_px {
            Some(tolerance) if tolerance > 0.0 => {
                let distance_score = distance_px / tolerance;
                let distance_ok = distance_px <= tolerance + EDGE_EPSILON;
                (time_ok || distance_ok).then(|| time_score.min(distance_score))
            }
            _ => time_ok.then_some(time_score),
        }
    }

    /// True once a note this late can no longer be judged.
    pub fn is_past_grace(&self, offset_s: f64) -> bool {
        offset_s > self.miss_grace_s + EDGE_EPSILON
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::new()
    }
}
