//! Logic thread: owns the fight engine and drives it at a fixed tick rate.
//!
//! Actions from the input thread and system events are drained before
//! every batch of updates; events and snapshots flow out over the bus.

pub mod host;

use crate::input::events::GameAction;
use crate::models::settings::FightSettings;
use crate::shared::FightEvent;
use crate::state::traits::{FightContext, Snapshot};
use crate::state::FightEngine;
use crate::system::bus::{SystemBus, SystemEvent};
use crate::system::clock::Clock;
use crossbeam_channel::Sender;
use host::ConsoleHost;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Target ticks per second for the logic thread.
const TPS: u64 = 200;

/// Spawns the logic thread. It returns once a quit request arrives.
pub fn start_thread(bus: SystemBus, settings: FightSettings) -> JoinHandle<()> {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || {
            log::info!("LOGIC: Thread started");

            let host_rng = match settings.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
                None => StdRng::from_os_rng(),
            };
            let mut host = ConsoleHost::new(settings.opponents.clone(), host_rng);
            let mut events = bus.event_tx.clone();
            let mut engine = FightEngine::new(settings);

            let mut accumulator = Duration::new(0, 0);
            let mut last_time = Instant::now();
            let target_dt = Duration::from_secs_f64(1.0 / TPS as f64);

            loop {
                // 1. Process input actions
                while let Ok(action) = bus.action_rx.try_recv() {
                    handle_action(&mut engine, action, &mut host, &mut events);
                }

                // 2. Handle system events
                while let Ok(sys_evt) = bus.sys_rx.try_recv() {
                    let mut ctx = FightContext::new(&mut host, &mut events);
                    match sys_evt {
                        SystemEvent::Quit => {
                            log::info!("LOGIC: Quit received...");
                            engine.force_end(&mut ctx);
                            return;
                        }
                        SystemEvent::AbortFight => engine.force_end(&mut ctx),
                    }
                }

                // 3. Fixed-timestep update loop
                let current_time = Instant::now();
                accumulator += current_time - last_time;
                last_time = current_time;

                let mut loops = 0;
                while accumulator >= target_dt && loops < 10 {
                    let mut ctx = FightContext::new(&mut host, &mut events);
                    engine.on_tick(target_dt.as_secs_f64(), &mut ctx);
                    accumulator -= target_dt;
                    loops += 1;
                }

                // 4. Publish a snapshot only if we updated
                if loops > 0 {
                    let _ = bus.render_tx.try_send(engine.create_snapshot());
                } else {
                    thread::sleep(Duration::from_millis(1));
                }
            }
        })
        .expect("Failed to spawn Logic thread")
}

/// Routes one gameplay action into the engine.
pub fn handle_action<C: Clock>(
    engine: &mut FightEngine<C>,
    action: GameAction,
    host: &mut ConsoleHost,
    events: &mut Sender<FightEvent>,
) {
    let mut ctx = FightContext::new(host, events);
    match action {
        GameAction::Push { source_id } => engine.on_push(source_id, &mut ctx),
        GameAction::Arrow(direction) => engine.on_directional_key_down(direction, &mut ctx),
        GameAction::AbortFight => engine.force_end(&mut ctx),
        GameAction::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FightPhase;
    use crate::system::clock::ManualClock;
    use crossbeam_channel::unbounded;

    #[test]
    fn actions_drive_the_engine() {
        let settings = FightSettings {
            base_increment: 1.0,
            ..FightSettings::default()
        };
        let clock = ManualClock::new(0.0);
        let mut engine = FightEngine::with_clock(settings, clock.clone(), StdRng::seed_from_u64(3));
        let mut host = ConsoleHost::new(vec!["Cellmate".to_string()], StdRng::seed_from_u64(4));
        let (mut tx, rx) = unbounded();

        handle_action(&mut engine, GameAction::Push { source_id: 9 }, &mut host, &mut tx);
        assert_eq!(engine.phase(), FightPhase::Active);
        assert!(host.movement_locked());
        assert_eq!(host.engaged().map(|o| o.name.as_str()), Some("Cellmate"));

        clock.set(2.0);
        let first = engine.session().map(|s| s.notes[0].direction);
        handle_action(&mut engine, GameAction::Arrow(first.unwrap()), &mut host, &mut tx);
        assert_eq!(engine.session().map(|s| s.hits()), Some(1));

        handle_action(&mut engine, GameAction::AbortFight, &mut host, &mut tx);
        assert_eq!(engine.phase(), FightPhase::Idle);
        assert!(!host.movement_locked());

        let received: Vec<FightEvent> = rx.try_iter().collect();
        assert!(matches!(received[0], FightEvent::AngerChanged { .. }));
        assert!(received.iter().any(|e| matches!(e, FightEvent::FightStarted { .. })));
        assert!(received.iter().any(|e| matches!(e, FightEvent::FightEnded { .. })));
    }
}
