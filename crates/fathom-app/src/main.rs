//! FATHOM command-line host.
//!
//! Runs a training scenario under the scripted autopilot, or with a held
//! manual command, and prints the final session snapshot as JSON.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fathom_app::game_loop;
use fathom_app::state::{AppState, FrameLoopCommand};
use fathom_core::commands::OperatorCommand;
use fathom_core::enums::ScenarioId;
use fathom_core::types::{CommandVector, ControlInput};
use fathom_sim::engine::SimConfig;
use fathom_sim::scenario;

/// Underwater vehicle training simulator
#[derive(Parser)]
#[command(name = "fathom")]
#[command(about = "Run a FATHOM training scenario headless and print the final state")]
#[command(version)]
struct Cli {
    /// Built-in scenario to run
    #[arg(short, long, value_enum, default_value_t = ScenarioArg::Orientation)]
    scenario: ScenarioArg,

    /// Load the scenario from a JSON file instead
    #[arg(long)]
    scenario_file: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value = "120")]
    seconds: f64,

    /// RNG seed for procedural content
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Speed multiplier (0.25 to 20)
    #[arg(long, default_value = "1.0")]
    speed: f64,

    /// Run on the frame loop thread in wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Hold a fixed surge command (-1 to 1) instead of using the autopilot
    #[arg(long, allow_hyphen_values = true)]
    surge: Option<f64>,

    /// Hold a fixed yaw command (-1 to 1) instead of using the autopilot
    #[arg(long, allow_hyphen_values = true)]
    yaw: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScenarioArg {
    Orientation,
    ObstacleCourse,
    PipelineInspection,
    DebrisField,
}

impl From<ScenarioArg> for ScenarioId {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Orientation => ScenarioId::Orientation,
            ScenarioArg::ObstacleCourse => ScenarioId::ObstacleCourse,
            ScenarioArg::PipelineInspection => ScenarioId::PipelineInspection,
            ScenarioArg::DebrisField => ScenarioId::DebrisField,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let definition = match &cli.scenario_file {
        Some(path) => scenario::load_scenario_file(path)?,
        None => scenario::build(cli.scenario.into()),
    };
    info!(scenario = %definition.name, seed = cli.seed, "loaded scenario");

    let config = SimConfig {
        seed: cli.seed,
        speed_multiplier: cli.speed,
        scenario: definition,
    };

    let manual = (cli.surge.is_some() || cli.yaw.is_some()).then(|| {
        let command = CommandVector::new(cli.surge.unwrap_or(0.0), 0.0, 0.0, cli.yaw.unwrap_or(0.0));
        ControlInput::new(command, 0.0)
    });

    let snapshot = if cli.realtime {
        run_realtime(config, cli.seconds, manual)?
    } else {
        game_loop::run_headless(config, cli.seconds, manual)
    };

    info!(
        mission = ?snapshot.mission,
        score = snapshot.score,
        damage = snapshot.hull.damage,
        elapsed = snapshot.time.elapsed_secs,
        "session finished"
    );
    let json = serde_json::to_string_pretty(&snapshot).context("failed to serialize snapshot")?;
    println!("{json}");
    Ok(())
}

/// Run on the frame loop thread for `seconds` of wall-clock time.
fn run_realtime(
    config: SimConfig,
    seconds: f64,
    manual: Option<ControlInput>,
) -> Result<fathom_core::state::SessionSnapshot> {
    let state = AppState::new();
    let (tx, handle) = game_loop::spawn_frame_loop(config, true, state.latest_snapshot.clone())?;
    if let Ok(mut slot) = state.command_tx.lock() {
        *slot = Some(tx);
    }

    if let Some(input) = manual {
        state.send(FrameLoopCommand::SetAutopilot(false));
        state.send(FrameLoopCommand::Control(input));
    }
    state.send(FrameLoopCommand::Operator(OperatorCommand::StartMission));
    std::thread::sleep(Duration::from_secs_f64(seconds.max(0.0)));
    state.send(FrameLoopCommand::Shutdown);
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("frame loop thread panicked"))?;

    state
        .snapshot()
        .context("frame loop produced no snapshot")
}
