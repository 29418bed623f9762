//! Directional notes and their runtime judgement state.

use std::fmt;
use std::str::FromStr;

/// One of the four arrow lanes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Direction {
    Left,
    Up,
    Down,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Down,
        Direction::Right,
    ];

    /// Direction of lane `lane`, counted left to right.
    pub fn from_lane(lane: usize) -> Option<Self> {
        Self::ALL.get(lane).copied()
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Left => "←",
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Right => "→",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Right => "right",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Direction::Left),
            "up" | "arrowup" => Ok(Direction::Up),
            "down" | "arrowdown" => Ok(Direction::Down),
            "right" | "arrowright" => Ok(Direction::Right),
            other => Err(format!("Unknown direction: {other}")),
        }
    }
}

/// A single timed note of a fight pattern.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Note {
    pub direction: Direction,
    /// Seconds after fight start at which the note reaches the receptor.
    pub scheduled_time: f64,
    /// Terminal once set: a judged note is never evaluated again.
    pub judged: bool,
    /// Meaningful only when `judged`.
    pub hit: bool,
    /// Whether the note has entered its approach (spawn event sent).
    pub spawned: bool,
}

impl Note {
    pub fn new(direction: Direction, scheduled_time: f64) -> Self {
        Self {
            direction,
            scheduled_time,
            judged: false,
            hit: false,
            spawned: false,
        }
    }

    /// Signed offset of `elapsed` from the due time; positive means late.
    pub fn offset(&self, elapsed: f64) -> f64 {
        elapsed - self.scheduled_time
    }

    /// Marks the note judged. Returns false if it already was.
    pub fn judge(&mut self, hit: bool) -> bool {
        if self.judged {
            return false;
        }
        self.judged = true;
        self.hit = hit;
        true
    }

    pub fn is_pending(&self) -> bool {
        !self.judged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_direction_names() {
        assert_eq!("Up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("ArrowLeft".parse::<Direction>(), Ok(Direction::Left));
        assert!("diagonal".parse::<Direction>().is_err());
    }

    #[test]
    fn from_lane_counts_left_to_right() {
        assert_eq!(Direction::from_lane(0), Some(Direction::Left));
        assert_eq!(Direction::from_lane(3), Some(Direction::Right));
        assert_eq!(Direction::from_lane(4), None);
    }

    #[test]
    fn judgement_is_terminal() {
        let mut note = Note::new(Direction::Down, 2.0);
        assert!(note.judge(true));
        assert!(!note.judge(false));
        assert!(note.hit);
        assert!(note.judged);
    }
}
