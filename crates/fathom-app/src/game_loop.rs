//! Frame loop: runs the simulation engine at 60 Hz on its own thread.
//!
//! The engine is created inside the thread so it has a single owner.
//! Messages arrive via `mpsc`; snapshots are stored in shared state for
//! polling. `run_headless` drives the same engine synchronously with a
//! fixed frame delta for scripted runs.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;

use fathom_core::commands::OperatorCommand;
use fathom_core::constants::REFERENCE_FRAME_RATE_HZ;
use fathom_core::enums::SessionPhase;
use fathom_core::state::SessionSnapshot;
use fathom_core::types::ControlInput;
use fathom_sim::engine::{SimConfig, SimulationEngine};

use crate::autopilot;
use crate::state::FrameLoopCommand;

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration =
    Duration::from_nanos(1_000_000_000 / REFERENCE_FRAME_RATE_HZ as u64);

/// Spawn the frame loop thread.
///
/// Returns the command sender and the thread handle; the thread exits on
/// `Shutdown` or when every sender is dropped.
pub fn spawn_frame_loop(
    config: SimConfig,
    autopilot_enabled: bool,
    latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
) -> anyhow::Result<(mpsc::Sender<FrameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<FrameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("fathom-frame-loop".into())
        .spawn(move || {
            run_frame_loop(config, autopilot_enabled, cmd_rx, &latest_snapshot);
        })
        .context("failed to spawn frame loop thread")?;

    Ok((cmd_tx, handle))
}

/// The frame loop. Runs until Shutdown or channel disconnect.
fn run_frame_loop(
    config: SimConfig,
    mut autopilot_enabled: bool,
    cmd_rx: mpsc::Receiver<FrameLoopCommand>,
    latest_snapshot: &Mutex<Option<SessionSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut manual_input = ControlInput::default();
    let mut snapshot = engine.tick(&manual_input, 0.0);
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    loop {
        // 1. Drain all pending messages
        loop {
            match cmd_rx.try_recv() {
                Ok(FrameLoopCommand::Operator(cmd)) => engine.queue_command(cmd),
                Ok(FrameLoopCommand::Control(input)) => manual_input = input,
                Ok(FrameLoopCommand::SetAutopilot(enabled)) => autopilot_enabled = enabled,
                Ok(FrameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one frame with the wall-clock delta
        let now = Instant::now();
        let frame_dt = (now - last_frame).as_secs_f64();
        last_frame = now;
        let input = if autopilot_enabled {
            autopilot::steer(&snapshot)
        } else {
            manual_input
        };
        snapshot = engine.tick(&input, frame_dt);
        log_events(&snapshot);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}

/// Run a scenario synchronously for `seconds` of simulated time, or until
/// the mission ends. Steers with the autopilot unless `manual` holds a fixed
/// control input. Returns the final snapshot.
pub fn run_headless(
    config: SimConfig,
    seconds: f64,
    manual: Option<ControlInput>,
) -> SessionSnapshot {
    let frame_dt = 1.0 / REFERENCE_FRAME_RATE_HZ;
    let frames = (seconds.max(0.0) * REFERENCE_FRAME_RATE_HZ).ceil() as u64;

    let mut engine = SimulationEngine::new(config);
    engine.queue_command(OperatorCommand::StartMission);
    let mut snapshot = engine.tick(&ControlInput::default(), 0.0);
    log_events(&snapshot);

    for _ in 0..frames {
        if snapshot.mission.is_terminal() || snapshot.phase != SessionPhase::Active {
            break;
        }
        let input = manual.unwrap_or_else(|| autopilot::steer(&snapshot));
        snapshot = engine.tick(&input, frame_dt);
        log_events(&snapshot);
    }
    snapshot
}

fn log_events(snapshot: &SessionSnapshot) {
    for event in &snapshot.events {
        tracing::info!(time = event.time_secs, level = ?event.level, "{}", event.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fathom_core::enums::{MissionState, ScenarioId};
    use fathom_core::types::CommandVector;
    use fathom_sim::scenario;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<FrameLoopCommand>();

        tx.send(FrameLoopCommand::Operator(OperatorCommand::StartMission))
            .unwrap();
        tx.send(FrameLoopCommand::SetAutopilot(false)).unwrap();
        tx.send(FrameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            FrameLoopCommand::Operator(OperatorCommand::StartMission)
        ));
        assert!(matches!(commands[1], FrameLoopCommand::SetAutopilot(false)));
        assert!(matches!(commands[2], FrameLoopCommand::Shutdown));
    }

    #[test]
    fn test_frame_loop_starts_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) =
            spawn_frame_loop(SimConfig::default(), true, Arc::clone(&latest)).unwrap();
        tx.send(FrameLoopCommand::Operator(OperatorCommand::StartMission))
            .unwrap();

        std::thread::sleep(Duration::from_millis(200));
        tx.send(FrameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let snapshot = latest.lock().unwrap().clone().expect("at least one frame");
        assert_eq!(snapshot.phase, SessionPhase::Active);
        assert!(snapshot.time.tick > 0);
    }

    #[test]
    fn test_frame_loop_manual_control_overrides_autopilot() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) =
            spawn_frame_loop(SimConfig::default(), true, Arc::clone(&latest)).unwrap();
        tx.send(FrameLoopCommand::SetAutopilot(false)).unwrap();
        tx.send(FrameLoopCommand::Control(ControlInput::new(
            CommandVector::surge(-1.0),
            0.0,
        )))
        .unwrap();
        tx.send(FrameLoopCommand::Operator(OperatorCommand::StartMission))
            .unwrap();

        std::thread::sleep(Duration::from_millis(300));
        tx.send(FrameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        // Reversing at yaw 0 moves toward +Z; the autopilot would head for the first waypoint at -Z.
        let snapshot = latest.lock().unwrap().clone().expect("at least one frame");
        assert!(
            snapshot.vehicle.state.velocity.z > 0.0,
            "velocity {:?}",
            snapshot.vehicle.state.velocity
        );
    }

    #[test]
    fn test_headless_manual_input_is_held() {
        let config = SimConfig {
            scenario: scenario::build(ScenarioId::Orientation),
            ..Default::default()
        };
        let reverse = ControlInput::new(CommandVector::surge(-1.0), 0.0);
        let snapshot = run_headless(config, 3.0, Some(reverse));
        assert!(snapshot.vehicle.state.position.z > 0.5);
        assert_eq!(snapshot.score, 10, "only the automatic systems check scores");
    }

    #[test]
    fn test_headless_orientation_makes_progress() {
        let config = SimConfig {
            scenario: scenario::build(ScenarioId::Orientation),
            ..Default::default()
        };
        let snapshot = run_headless(config, 60.0, None);
        assert!(snapshot.vehicle.state.is_finite());
        assert!(
            snapshot.score > 10,
            "autopilot should reach at least one waypoint, score {}",
            snapshot.score
        );
    }

    #[test]
    fn test_headless_stops_at_terminal_state() {
        let mut definition = scenario::build(ScenarioId::Orientation);
        definition.objectives.truncate(1);
        let config = SimConfig {
            scenario: definition,
            ..Default::default()
        };
        let snapshot = run_headless(config, 10.0, None);
        assert_eq!(snapshot.mission, MissionState::Completed);
        assert_eq!(snapshot.time.tick, 1, "automatic objective completes on the first frame");
    }
}
