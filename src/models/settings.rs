//! Fight tunables, loaded from and saved to TOML.

use super::common::{load_toml, save_toml};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the settings file.
pub const SETTINGS_FILE: &str = "brawlbeat.toml";

/// Every tunable of the anger meter, the judge and the fight controller.
///
/// Times are in seconds, distances in pixels. Missing keys in the TOML
/// file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FightSettings {
    // Pattern
    pub bpm: f64,
    pub lead_in_s: f64,
    pub note_count_range: [usize; 2],

    // Judge
    pub perfect_window_s: f64,
    pub good_window_s: f64,
    pub miss_grace_window_s: f64,
    pub distance_forgiveness: bool,
    pub distance_tolerance_px: f64,
    pub approach_duration_s: f64,
    pub lane_travel_px: f64,
    pub buffer_window_s: f64,
    pub rehit_debounce_s: f64,

    // Anger meter
    pub combo_window_s: f64,
    pub base_increment: f64,
    pub combo_bonus: f64,
    pub decay_rate: f64,

    // Scoring and resolution
    pub target_score: u32,
    pub score_perfect: u32,
    pub score_good: u32,
    pub damage_perfect: f64,
    pub damage_good: f64,
    pub max_hp: f64,
    pub combo_milestone_step: u32,
    pub min_accuracy_to_win: f64,
    pub timeout_beats: f64,

    /// Fixed RNG seed for reproducible patterns; random when absent.
    pub seed: Option<u64>,
    /// Names the headless host picks opponents from.
    pub opponents: Vec<String>,
}

impl Default for FightSettings {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            lead_in_s: 2.0,
            note_count_range: [17, 24],

            perfect_window_s: 0.10,
            good_window_s: 0.18,
            miss_grace_window_s: 0.22,
            distance_forgiveness: true,
            distance_tolerance_px: 48.0,
            approach_duration_s: 1.2,
            lane_travel_px: 480.0,
            buffer_window_s: 0.12,
            rehit_debounce_s: 0.06,

            combo_window_s: 1.2,
            base_increment: 0.08,
            combo_bonus: 0.035,
            decay_rate: 0.08,

            target_score: 1200,
            score_perfect: 100,
            score_good: 60,
            damage_perfect: 10.0,
            damage_good: 6.0,
            max_hp: 100.0,
            combo_milestone_step: 5,
            min_accuracy_to_win: 0.7,
            timeout_beats: 2.0,

            seed: None,
            opponents: vec![
                "Cellmate".to_string(),
                "Yard Boss".to_string(),
                "Kitchen Guy".to_string(),
            ],
        }
    }
}

impl FightSettings {
    /// Loads settings from `path`.
    ///
    /// A missing file is created with defaults; an unreadable or invalid
    /// one is reported and replaced by defaults in memory only.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            let settings = Self::default();
            if let Err(e) = save_toml(path, &settings) {
                log::warn!("SETTINGS: Could not write defaults to {:?}: {}", path, e);
            } else {
                log::info!("SETTINGS: Created default settings at {:?}", path);
            }
            return settings;
        }

        match load_toml::<Self>(path) {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    log::warn!("SETTINGS: Rejected {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Parses settings from a TOML string and validates them.
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let settings: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.bpm.is_finite() && self.bpm > 0.0) {
            return Err(format!("bpm must be positive, got {}", self.bpm));
        }
        if !(self.perfect_window_s > 0.0 && self.perfect_window_s <= self.good_window_s) {
            return Err(format!(
                "perfect window ({}) must be positive and within good window ({})",
                self.perfect_window_s, self.good_window_s
            ));
        }
        for (name, value) in self.non_negative_fields() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{name} must be finite and >= 0, got {value}"));
            }
        }
        if self.note_count_range[0] > self.note_count_range[1] {
            return Err(format!(
                "note count range {:?} is inverted",
                self.note_count_range
            ));
        }
        if !(self.max_hp.is_finite() && self.max_hp > 0.0) {
            return Err(format!("max hp must be positive, got {}", self.max_hp));
        }
        if !(self.approach_duration_s.is_finite()
            && self.approach_duration_s > 0.0
            && self.lane_travel_px.is_finite()
            && self.lane_travel_px > 0.0)
        {
            return Err("approach duration and lane travel must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_accuracy_to_win) {
            return Err(format!(
                "min accuracy must be within [0, 1], got {}",
                self.min_accuracy_to_win
            ));
        }
        Ok(())
    }

    /// Tunables that break the fight timing when NaN, infinite or negative.
    fn non_negative_fields(&self) -> [(&'static str, f64); 12] {
        [
            ("lead_in_s", self.lead_in_s),
            ("miss_grace_window_s", self.miss_grace_window_s),
            ("distance_tolerance_px", self.distance_tolerance_px),
            ("buffer_window_s", self.buffer_window_s),
            ("rehit_debounce_s", self.rehit_debounce_s),
            ("combo_window_s", self.combo_window_s),
            ("base_increment", self.base_increment),
            ("combo_bonus", self.combo_bonus),
            ("decay_rate", self.decay_rate),
            ("damage_perfect", self.damage_perfect),
            ("damage_good", self.damage_good),
            ("timeout_beats", self.timeout_beats),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(FightSettings::default().validate(), Ok(()));
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let settings = FightSettings::from_toml_str(
            r#"
bpm = 140.0
note_count_range = [10, 12]
seed = 42
"#,
        )
        .unwrap();

        assert_eq!(settings.bpm, 140.0);
        assert_eq!(settings.note_count_range, [10, 12]);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.good_window_s, 0.18);
        assert_eq!(settings.target_score, 1200);
    }

    #[test]
    fn rejects_inverted_windows() {
        let err = FightSettings::from_toml_str("perfect_window_s = 0.3\ngood_window_s = 0.2")
            .unwrap_err();
        assert!(err.contains("perfect window"));
    }

    #[test]
    fn rejects_non_positive_bpm() {
        assert!(FightSettings::from_toml_str("bpm = 0.0").is_err());
    }

    #[test]
    fn rejects_nan_infinite_and_negative_timing() {
        for field in [
            "miss_grace_window_s",
            "timeout_beats",
            "buffer_window_s",
            "rehit_debounce_s",
            "decay_rate",
            "distance_tolerance_px",
        ] {
            for value in ["nan", "inf", "-0.5"] {
                let err = FightSettings::from_toml_str(&format!("{field} = {value}"))
                    .expect_err(&format!("{field} = {value} should be rejected"));
                assert!(err.contains(field), "{err}");
            }
        }
    }

    #[test]
    fn rejects_nan_hp_and_lane() {
        assert!(FightSettings::from_toml_str("max_hp = nan").is_err());
        assert!(FightSettings::from_toml_str("max_hp = inf").is_err());
        assert!(FightSettings::from_toml_str("lane_travel_px = nan").is_err());
    }

    #[test]
    fn rejected_file_loads_defaults() {
        let dir = std::env::temp_dir().join(format!("brawlbeat-settings-{}", std::process::id()));
        let path = dir.join("broken.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "miss_grace_window_s = nan\ntimeout_beats = nan\n").unwrap();

        assert_eq!(FightSettings::load(&path), FightSettings::default());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_inverted_count_range() {
        assert!(FightSettings::from_toml_str("note_count_range = [24, 17]").is_err());
    }

    #[test]
    fn serializes_back_to_toml() {
        let settings = FightSettings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed = FightSettings::from_toml_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
