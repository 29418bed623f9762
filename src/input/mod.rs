//! Input thread bootstrapping and high-level event routing.

pub mod events;
pub mod manager;

use crate::input::events::GameAction;
use crate::input::manager::InputManager;
use crate::system::bus::{SystemBus, SystemEvent};
use std::io::{BufRead, BufReader, Read};
use std::thread;

/// Spawns the input thread reading whitespace-separated tokens from `source`.
///
/// Each token is resolved through the bindings; gameplay actions go to the
/// logic thread, abort/quit go out as system events. End of input counts
/// as a quit request.
pub fn start_thread<R>(bus: SystemBus, manager: InputManager, source: R)
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("Input Thread".to_string())
        .spawn(move || {
            log::info!("INPUT: Thread started");

            // Blocking loop: wait for a line, handle it, repeat.
            let reader = BufReader::new(source);
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::error!("INPUT: Failed to read input: {}", e);
                        break;
                    }
                };

                for token in line.split_whitespace() {
                    let Some(action) = manager.process(token) else {
                        log::debug!("INPUT: Ignoring unbound token {:?}", token);
                        continue;
                    };
                    if !route(&bus, action) {
                        log::info!("INPUT: Thread stopped");
                        return;
                    }
                }
            }

            let _ = bus.sys_tx.send(SystemEvent::Quit);
            log::info!("INPUT: Thread stopped");
        })
        .expect("Failed to spawn Input thread");
}

/// Returns false once the input thread should stop.
fn route(bus: &SystemBus, action: GameAction) -> bool {
    let sent = match action {
        GameAction::Quit => {
            let _ = bus.sys_tx.send(SystemEvent::Quit);
            return false;
        }
        GameAction::AbortFight => bus.sys_tx.send(SystemEvent::AbortFight).is_ok(),
        other => bus.action_tx.send(other).is_ok(),
    };
    if !sent {
        log::error!("INPUT: Failed to send action (Logic thread died?)");
    }
    sent
}
