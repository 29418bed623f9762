//! Console runner: stdin keys in, logged fight events out.

use brawlbeat::input;
use brawlbeat::logic;
use brawlbeat::models::settings::{FightSettings, SETTINGS_FILE};
use brawlbeat::shared::{FightEvent, FightSnapshot};
use brawlbeat::system::bus::SystemBus;
use crossbeam_channel::RecvTimeoutError;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How often the latest snapshot is written to the debug log.
const STATUS_INTERVAL: Duration = Duration::from_secs(1);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("MAIN: Booting brawlbeat...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
    let settings = FightSettings::load(&settings_path);

    let bus = SystemBus::new();

    let input_manager = input::manager::InputManager::new();
    input::start_thread(bus.clone(), input_manager, std::io::stdin());
    let logic_handle = logic::start_thread(bus.clone(), settings);

    log::info!("MAIN: Keys: p = push, a/w/s/d = arrows, x = abort, q = quit");

    let mut latest: Option<FightSnapshot> = None;
    let mut last_status = Instant::now();

    loop {
        match bus.event_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(event) => report(&event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        while let Ok(snapshot) = bus.render_rx.try_recv() {
            latest = Some(snapshot);
        }
        if last_status.elapsed() >= STATUS_INTERVAL {
            if let Some(snapshot) = latest.as_ref() {
                log::debug!("STATUS: {}", snapshot.status_line());
            }
            last_status = Instant::now();
        }

        if logic_handle.is_finished() {
            while let Ok(event) = bus.event_rx.try_recv() {
                report(&event);
            }
            break;
        }
    }

    if logic_handle.join().is_err() {
        log::error!("MAIN: Logic thread panicked");
    }
    log::info!("MAIN: Bye");
}

fn report(event: &FightEvent) {
    match event {
        FightEvent::AngerChanged { value } => {
            log::info!("EVENT: Anger {:.0}%", value * 100.0)
        }
        FightEvent::FightStarted { opponent } => log::info!("EVENT: Fight vs {}!", opponent),
        FightEvent::NoteSpawned { index, note } => {
            log::info!(
                "EVENT: Note #{} {} due at {:.2}s",
                index,
                note.direction.arrow(),
                note.scheduled_time
            )
        }
        FightEvent::NoteHit {
            index,
            judgement,
            offset_s,
            ..
        } => log::info!(
            "EVENT: Note #{} {} ({:+.0} ms)",
            index,
            judgement.label(),
            offset_s * 1000.0
        ),
        FightEvent::NoteMissed { index, note } => {
            log::info!("EVENT: Note #{} {} MISS", index, note.direction.arrow())
        }
        FightEvent::ComboMilestoneReached { source, count } => {
            log::info!("EVENT: {:?} combo x{}", source, count)
        }
        FightEvent::EnemyDamaged { amount, new_hp } => {
            log::info!("EVENT: Hit for {:.0}, enemy at {:.0}", amount, new_hp)
        }
        FightEvent::FightEnded { result } => log::info!(
            "EVENT: {:?} vs {} ({:?}) score {} max combo {} accuracy {}",
            result.outcome,
            result.opponent,
            result.reason,
            result.score,
            result.max_combo,
            result
                .accuracy()
                .map(|a| format!("{:.0}%", a * 100.0))
                .unwrap_or_else(|| "--".to_string())
        ),
    }
}
