//! Maps note timing onto the approach lane in screen pixels.
//!
//! Notes travel `lane_travel_px` towards the receptor during
//! `approach_duration_s`; this is what the distance forgiveness of the
//! judge is measured against.

#[derive(Clone, Debug)]
pub struct PixelSystem {
    pub approach_duration_s: f64,
    pub lane_travel_px: f64,
}

impl PixelSystem {
    pub fn new(approach_duration_s: f64, lane_travel_px: f64) -> Self {
        Self {
            approach_duration_s,
            lane_travel_px,
        }
    }

    /// Scroll speed of a note in pixels per second.
    pub fn px_per_second(&self) -> f64 {
        if self.approach_duration_s > 0.0 {
            self.lane_travel_px / self.approach_duration_s
        } else {
            0.0
        }
    }

    /// Signed position relative to the receptor: positive while the note is
    /// still approaching, negative once it has scrolled past.
    pub fn offset_px(&self, offset_s: f64) -> f64 {
        -offset_s * self.px_per_second()
    }

    pub fn distance_from_receptor(&self, offset_s: f64) -> f64 {
        self.offset_px(offset_s).abs()
    }

    /// Whether a note with this offset has entered the lane.
    pub fn has_entered(&self, offset_s: f64) -> bool {
        offset_s >= -self.approach_duration_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_offsets_to_pixels() {
        let pixels = PixelSystem::new(1.2, 480.0);
        assert!((pixels.px_per_second() - 400.0).abs() < 1e-9);
        assert!((pixels.offset_px(-0.5) - 200.0).abs() < 1e-9);
        assert!((pixels.offset_px(0.1) + 40.0).abs() < 1e-9);
        assert!((pixels.distance_from_receptor(0.1) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn entry_point_is_one_approach_before_due() {
        let pixels = PixelSystem::new(1.2, 480.0);
        assert!(!pixels.has_entered(-1.3));
        assert!(pixels.has_entered(-1.2));
        assert!(pixels.has_entered(0.0));
    }

    #[test]
    fn zero_approach_never_scrolls() {
        let pixels = PixelSystem::new(0.0, 480.0);
        assert_eq!(pixels.px_per_second(), 0.0);
    }
}
