//! Headless stand-in for the game scene.

use crate::shared::OpponentRef;
use crate::state::traits::FightHost;
use rand::Rng;
use rand::rngs::StdRng;

const FALLBACK_OPPONENT: &str = "Stranger";

/// Scene host for the console runner: logs lock changes and draws
/// opponents from a fixed roster.
pub struct ConsoleHost {
    roster: Vec<String>,
    rng: StdRng,
    movement_locked: bool,
    camera_locked: bool,
    engaged: Option<OpponentRef>,
}

impl ConsoleHost {
    pub fn new(roster: Vec<String>, rng: StdRng) -> Self {
        Self {
            roster,
            rng,
            movement_locked: false,
            camera_locked: false,
            engaged: None,
        }
    }

    pub fn movement_locked(&self) -> bool {
        self.movement_locked
    }

    pub fn camera_locked(&self) -> bool {
        self.camera_locked
    }

    /// Opponent currently pulled out of its routine, if any.
    pub fn engaged(&self) -> Option<&OpponentRef> {
        self.engaged.as_ref()
    }
}

impl FightHost for ConsoleHost {
    fn lock_player_movement(&mut self, locked: bool) {
        if self.movement_locked != locked {
            log::info!("HOST: Player movement {}", lock_label(locked));
        }
        self.movement_locked = locked;
    }

    fn lock_player_camera(&mut self, locked: bool) {
        if self.camera_locked != locked {
            log::info!("HOST: Player camera {}", lock_label(locked));
        }
        self.camera_locked = locked;
    }

    fn select_opponent(&mut self) -> OpponentRef {
        let opponent = if self.roster.is_empty() {
            OpponentRef {
                id: 0,
                name: FALLBACK_OPPONENT.to_string(),
            }
        } else {
            let index = self.rng.random_range(0..self.roster.len());
            OpponentRef {
                id: index as u32 + 1,
                name: self.roster[index].clone(),
            }
        };
        log::info!("HOST: {} steps up", opponent);
        self.engaged = Some(opponent.clone());
        opponent
    }

    fn restore_opponent(&mut self, opponent: OpponentRef) {
        log::info!("HOST: {} goes back to their routine", opponent);
        if self.engaged.as_ref() == Some(&opponent) {
            self.engaged = None;
        }
    }
}

fn lock_label(locked: bool) -> &'static str {
    if locked { "locked" } else { "released" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn picks_from_roster_and_releases() {
        let roster = vec!["Cellmate".to_string(), "Yard Boss".to_string()];
        let mut host = ConsoleHost::new(roster.clone(), StdRng::seed_from_u64(1));

        let opponent = host.select_opponent();
        assert!(roster.contains(&opponent.name));
        assert_eq!(roster[opponent.id as usize - 1], opponent.name);
        assert_eq!(host.engaged(), Some(&opponent));

        host.restore_opponent(opponent);
        assert!(host.engaged().is_none());
    }

    #[test]
    fn empty_roster_falls_back() {
        let mut host = ConsoleHost::new(Vec::new(), StdRng::seed_from_u64(1));
        assert_eq!(host.select_opponent().name, FALLBACK_OPPONENT);
    }

    #[test]
    fn tracks_locks() {
        let mut host = ConsoleHost::new(Vec::new(), StdRng::seed_from_u64(1));
        host.lock_player_movement(true);
        host.lock_player_camera(true);
        assert!(host.movement_locked() && host.camera_locked());
        host.lock_player_movement(false);
        assert!(!host.movement_locked());
        assert!(host.camera_locked());
    }
}
