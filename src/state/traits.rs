//! Traits at the seam between the fight core and its host.
//!
//! The core never touches the scene directly: it calls a small
//! collaborator interface and emits typed events.

use crate::shared::{EventSink, OpponentRef};

/// Services the host scene provides to the fight core.
///
/// All calls are synchronous and made from the logic thread.
pub trait FightHost {
    fn lock_player_movement(&mut self, locked: bool);
    fn lock_player_camera(&mut self, locked: bool);
    /// Picks the NPC the player is about to fight.
    fn select_opponent(&mut self) -> OpponentRef;
    /// Gives the opponent back to its normal behaviour.
    fn restore_opponent(&mut self, opponent: OpponentRef);
}

/// Context passed to engine entry points with the host-side resources.
pub struct FightContext<'a> {
    pub host: &'a mut dyn FightHost,
    pub events: &'a mut dyn EventSink,
}

impl<'a> FightContext<'a> {
    pub fn new(host: &'a mut dyn FightHost, events: &'a mut dyn EventSink) -> Self {
        Self { host, events }
    }
}

/// Trait for creating presentation-ready snapshots.
///
/// Snapshots are immutable captures of state sent to the presentation
/// thread. They decouple fight logic from drawing.
pub trait Snapshot {
    /// The snapshot type produced.
    type Output;

    /// Creates an immutable snapshot for presentation.
    fn create_snapshot(&self) -> Self::Output;
}
