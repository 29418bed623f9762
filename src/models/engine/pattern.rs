//! Randomized note pattern generation for a single fight.

use super::note::{Direction, Note};
use rand::Rng;

/// Fallback tempo when a caller hands us an unusable bpm.
pub const DEFAULT_BPM: f64 = 120.0;

/// Seconds between two consecutive beats.
pub fn beat_interval(bpm: f64) -> f64 {
    60.0 / sanitize_bpm(bpm)
}

fn sanitize_bpm(bpm: f64) -> f64 {
    if bpm.is_finite() && bpm > 0.0 {
        bpm
    } else {
        log::warn!("PATTERN: Invalid bpm {bpm}, using {DEFAULT_BPM}");
        DEFAULT_BPM
    }
}

/// Builds one note per beat after `lead_in_s`, with a note count drawn from
/// the inclusive `count_range` and each direction drawn independently.
pub fn generate<R: Rng + ?Sized>(
    bpm: f64,
    lead_in_s: f64,
    count_range: [usize; 2],
    rng: &mut R,
) -> Vec<Note> {
    let interval = beat_interval(bpm);
    let lead_in = lead_in_s.max(0.0);
    let (lo, hi) = (
        count_range[0].min(count_range[1]),
        count_range[0].max(count_range[1]),
    );
    let count = rng.random_range(lo..=hi);

    (0..count)
        .map(|i| {
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            Note::new(direction, lead_in + i as f64 * interval)
        })
        .collect()
}

/// Due time of the last note, or the lead-in for an empty pattern.
pub fn last_note_time(notes: &[Note], lead_in_s: f64) -> f64 {
    notes
        .iter()
        .map(|n| n.scheduled_time)
        .reduce(f64::max)
        .unwrap_or(lead_in_s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn schedules_one_note_per_beat() {
        let mut rng = StdRng::seed_from_u64(1);
        let notes = generate(120.0, 2.0, [17, 24], &mut rng);

        assert!((17..=24).contains(&notes.len()));
        for (i, note) in notes.iter().enumerate() {
            let expected = 2.0 + i as f64 * 0.5;
            assert!((note.scheduled_time - expected).abs() < 1e-9);
            assert!(!note.judged);
            assert!(!note.spawned);
        }
    }

    #[test]
    fn same_seed_same_pattern() {
        let a = generate(140.0, 2.0, [17, 24], &mut StdRng::seed_from_u64(99));
        let b = generate(140.0, 2.0, [17, 24], &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn fixed_count_range() {
        let notes = generate(100.0, 1.0, [5, 5], &mut StdRng::seed_from_u64(3));
        assert_eq!(notes.len(), 5);

        let swapped = generate(100.0, 1.0, [8, 6], &mut StdRng::seed_from_u64(3));
        assert!((6..=8).contains(&swapped.len()));
    }

    #[test]
    fn every_direction_shows_up_eventually() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = HashSet::new();
        for _ in 0..20 {
            for note in generate(120.0, 2.0, [17, 24], &mut rng) {
                seen.insert(note.direction);
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn bad_bpm_falls_back_to_default() {
        assert!((beat_interval(0.0) - 0.5).abs() < 1e-12);
        assert!((beat_interval(f64::NAN) - 0.5).abs() < 1e-12);
        assert!((beat_interval(60.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn last_note_time_of_empty_pattern_is_lead_in() {
        assert_eq!(last_note_time(&[], 2.0), 2.0);
        let notes = vec![Note::new(Direction::Up, 2.0), Note::new(Direction::Left, 3.5)];
        assert_eq!(last_note_time(&notes, 2.0), 3.5);
    }
}
