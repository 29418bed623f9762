//! Hit statistics and judgement types.
//!
//! This module defines the judgement system used for fight scoring,
//! including accuracy calculation and combo milestone tracking.

/// Judgement a note can receive, from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Judgement {
    /// Inside the perfect window.
    Perfect,
    /// Inside the good window (or the distance forgiveness band).
    Good,
    /// Never hit before the grace window closed.
    Miss,
}

impl Judgement {
    pub fn label(self) -> &'static str {
        match self {
            Judgement::Perfect => "PERFECT",
            Judgement::Good => "GOOD",
            Judgement::Miss => "MISS",
        }
    }
}

/// Accumulated hit statistics for one fight.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HitStats {
    pub perfect: u32,
    pub good: u32,
    pub miss: u32,
}

impl HitStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, judgement: Judgement) {
        match judgement {
            Judgement::Perfect => self.perfect += 1,
            Judgement::Good => self.good += 1,
            Judgement::Miss => self.miss += 1,
        }
    }

    /// Notes that were hit, regardless of quality.
    pub fn hits(&self) -> u32 {
        self.perfect + self.good
    }

    pub fn misses(&self) -> u32 {
        self.miss
    }

    pub fn judged(&self) -> u32 {
        self.hits() + self.miss
    }

    /// Ratio of hits over judged notes.
    ///
    /// Returns `None` when nothing has been judged yet; the caller decides
    /// what an undefined accuracy means.
    pub fn accuracy(&self) -> Option<f64> {
        let judged = self.judged();
        if judged == 0 {
            return None;
        }
        Some(self.hits() as f64 / judged as f64)
    }
}

/// Which combo counter crossed a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ComboSource {
    /// Consecutive pushes inside the anger combo window.
    Anger,
    /// Consecutive note hits during a fight.
    Fight,
}

/// Fires once per milestone (every `step` combo) until cleared.
#[derive(Clone, Debug, Default)]
pub struct ComboMilestones {
    step: u32,
    last_reached: u32,
}

impl ComboMilestones {
    pub fn new(step: u32) -> Self {
        Self {
            step,
            last_reached: 0,
        }
    }

    /// Returns the milestone if `combo` just reached a new one.
    pub fn observe(&mut self, combo: u32) -> Option<u32> {
        if self.step == 0 || combo == 0 || combo % self.step != 0 {
            return None;
        }
        if combo <= self.last_reached {
            return None;
        }
        self.last_reached = combo;
        Some(combo)
    }

    pub fn clear(&mut self) {
        self.last_reached = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_undefined_without_judgements() {
        assert_eq!(HitStats::new().accuracy(), None);
    }

    #[test]
    fn accuracy_counts_good_as_hit() {
        let mut stats = HitStats::new();
        stats.record(Judgement::Perfect);
        stats.record(Judgement::Good);
        stats.record(Judgement::Good);
        stats.record(Judgement::Miss);
        assert_eq!(stats.hits(), 3);
        assert_eq!(stats.accuracy(), Some(0.75));
    }

    #[test]
    fn milestone_fires_once_until_cleared() {
        let mut milestones = ComboMilestones::new(5);
        assert_eq!(milestones.observe(4), None);
        assert_eq!(milestones.observe(5), Some(5));
        assert_eq!(milestones.observe(5), None);
        assert_eq!(milestones.observe(10), Some(10));

        milestones.clear();
        assert_eq!(milestones.observe(5), Some(5));
    }

    #[test]
    fn zero_step_disables_milestones() {
        let mut milestones = ComboMilestones::new(0);
        assert_eq!(milestones.observe(5), None);
    }
}
