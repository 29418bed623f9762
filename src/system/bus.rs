//! Shared channel infrastructure between system threads.
//!
//! The `SystemBus` is the single hand-off point between the input thread,
//! the logic thread that owns the fight engine, and the presentation side.
//! Only the logic thread ever mutates fight state; everything else talks
//! to it through these channels.

use crate::input::events::GameAction;
use crate::shared::{FightEvent, FightSnapshot};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// System-level events broadcast to all threads.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Host scene is tearing down; any running fight is aborted.
    AbortFight,
    /// Application shutdown requested.
    Quit,
}

/// Aggregates the cross-thread communication channels.
#[derive(Clone)]
pub struct SystemBus {
    /// Input → Logic: resolved gameplay actions.
    pub action_tx: Sender<GameAction>,
    pub action_rx: Receiver<GameAction>,

    /// Logic → Presentation: fire-and-forget fight events.
    pub event_tx: Sender<FightEvent>,
    pub event_rx: Receiver<FightEvent>,

    /// Logic → Presentation: latest fight snapshot.
    pub render_tx: Sender<FightSnapshot>,
    pub render_rx: Receiver<FightSnapshot>,

    /// Any → Logic: system events.
    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,
}

impl SystemBus {
    /// Creates a new system bus with all channels initialized.
    pub fn new() -> Self {
        let (action_tx, action_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        // Bounded snapshot channel: max 2 frames queued to limit latency
        let (render_tx, render_rx) = bounded(2);

        let (sys_tx, sys_rx) = unbounded();

        Self {
            action_tx,
            action_rx,
            event_tx,
            event_rx,
            render_tx,
            render_rx,
            sys_tx,
            sys_rx,
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
