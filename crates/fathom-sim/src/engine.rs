//! Simulation engine: the per-frame core of FATHOM.
//!
//! `SimulationEngine` owns the hecs world of objectives, the session context
//! and the environment, processes operator commands, runs all systems and
//! produces `SessionSnapshot`s. Headless, so it can be tested deterministically.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fathom_core::commands::OperatorCommand;
use fathom_core::constants::{MAX_FRAME_DT, MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER};
use fathom_core::enums::{EventLevel, MissionState, ScenarioId, SessionPhase};
use fathom_core::events::SessionEvent;
use fathom_core::state::SessionSnapshot;
use fathom_core::types::{ControlInput, SimTime, VehicleState};
use fathom_geometry::{SceneGeometry, TriangleMesh};

use crate::context::{Environment, SimulationContext};
use crate::mission::DamageState;
use crate::scenario::{self, ScenarioDefinition};
use crate::systems;
use crate::systems::collision::CollisionReport;
use crate::world_setup;

/// Configuration for starting a new session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    /// Initial speed multiplier (1.0 = normal).
    pub speed_multiplier: f64,
    pub scenario: ScenarioDefinition,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            speed_multiplier: 1.0,
            scenario: scenario::build(ScenarioId::default()),
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    ctx: SimulationContext,
    env: Environment,
    phase: SessionPhase,
    scenario: ScenarioDefinition,
    seed: u64,
    registered_geometry: SceneGeometry,
    command_queue: VecDeque<OperatorCommand>,
    last_collision: CollisionReport,
    geometry_notice_logged: bool,
}

impl SimulationEngine {
    /// Create an engine in the briefing phase with the scenario laid out.
    pub fn new(config: SimConfig) -> Self {
        let speed_multiplier = clamp_speed_multiplier(config.speed_multiplier);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let registered_geometry = SceneGeometry::default();
        let env = world_setup::build_environment(&config.scenario, &registered_geometry, &mut rng);
        let mut world = World::new();
        world_setup::spawn_objectives(&mut world, &config.scenario);

        Self {
            world,
            ctx: SimulationContext::new(world_setup::spawn_vehicle(&config.scenario), speed_multiplier),
            env,
            phase: SessionPhase::default(),
            scenario: config.scenario,
            seed: config.seed,
            registered_geometry,
            command_queue: VecDeque::new(),
            last_collision: CollisionReport::default(),
            geometry_notice_logged: false,
        }
    }

    /// Queue an operator command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: OperatorCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = OperatorCommand>) {
        self.command_queue.extend(commands);
    }

    /// Register collidable meshes loaded by the host. Kept across restarts.
    pub fn register_geometry(&mut self, geometry: SceneGeometry) {
        tracing::debug!(
            meshes = geometry.mesh_count(),
            triangles = geometry.triangle_count(),
            "registering scene geometry"
        );
        self.env.geometry.extend(geometry.clone());
        self.registered_geometry.extend(geometry);
    }

    /// Register a single collidable mesh.
    pub fn register_mesh(&mut self, mesh: TriangleMesh) {
        self.register_geometry(SceneGeometry::new(vec![mesh]));
    }

    /// Advance the session by one frame and return the resulting snapshot.
    ///
    /// `frame_dt` is the wall-clock frame delta in seconds; it is clamped to
    /// `MAX_FRAME_DT`. Nothing advances outside the active phase.
    pub fn tick(&mut self, input: &ControlInput, frame_dt: f64) -> SessionSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Active {
            let dt = if frame_dt.is_finite() {
                frame_dt.clamp(0.0, MAX_FRAME_DT)
            } else {
                0.0
            };
            self.run_systems(input, dt);
        }

        let events = self.ctx.events.drain_pending();
        systems::snapshot::build_snapshot(
            &self.world,
            &self.ctx,
            self.phase,
            &self.scenario.name,
            &self.last_collision,
            events,
        )
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mission(&self) -> MissionState {
        self.ctx.mission
    }

    pub fn time(&self) -> SimTime {
        self.ctx.time
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.ctx.vehicle
    }

    pub fn damage(&self) -> &DamageState {
        &self.ctx.damage
    }

    pub fn score(&self) -> u32 {
        self.ctx.score
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.ctx.speed_multiplier
    }

    pub fn scenario(&self) -> &ScenarioDefinition {
        &self.scenario
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Recent events, oldest first.
    pub fn event_log(&self) -> impl Iterator<Item = &SessionEvent> {
        self.ctx.events.log()
    }

    /// Overwrite the vehicle state (for tests placing the vehicle directly).
    #[cfg(test)]
    pub fn vehicle_mut(&mut self) -> &mut VehicleState {
        &mut self.ctx.vehicle
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single operator command. Commands invalid for the current
    /// phase are ignored.
    fn handle_command(&mut self, command: OperatorCommand) {
        match command {
            OperatorCommand::StartMission => {
                if self.phase == SessionPhase::Briefing {
                    self.phase = SessionPhase::Active;
                    tracing::info!(scenario = %self.scenario.name, seed = self.seed, "mission started");
                    let message = format!("Mission started: {}", self.scenario.name);
                    self.ctx.emit(EventLevel::Info, message);
                }
            }
            OperatorCommand::RestartMission => {
                if self.phase != SessionPhase::Briefing {
                    self.reset_session();
                    self.phase = SessionPhase::Active;
                    tracing::info!(scenario = %self.scenario.name, "mission restarted");
                    let message = format!("Mission restarted: {}", self.scenario.name);
                    self.ctx.emit(EventLevel::Info, message);
                }
            }
            OperatorCommand::Pause => {
                if self.phase == SessionPhase::Active {
                    self.phase = SessionPhase::Paused;
                    self.ctx.emit(EventLevel::Info, "Simulation paused");
                }
            }
            OperatorCommand::Resume => {
                if self.phase == SessionPhase::Paused {
                    self.phase = SessionPhase::Active;
                    self.ctx.emit(EventLevel::Info, "Simulation resumed");
                }
            }
            OperatorCommand::SetSpeedMultiplier { value } => {
                if value.is_finite() {
                    self.ctx.speed_multiplier = clamp_speed_multiplier(value);
                    let message = format!("Speed multiplier x{:.2}", self.ctx.speed_multiplier);
                    self.ctx.emit(EventLevel::Info, message);
                }
            }
        }
    }

    /// Rebuild the world, vehicle and environment from the scenario with the
    /// original seed. Registered geometry and the speed multiplier persist.
    fn reset_session(&mut self) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.env = world_setup::build_environment(&self.scenario, &self.registered_geometry, &mut rng);
        self.world.clear();
        world_setup::spawn_objectives(&mut self.world, &self.scenario);
        self.ctx = SimulationContext::new(
            world_setup::spawn_vehicle(&self.scenario),
            self.ctx.speed_multiplier,
        );
        self.last_collision = CollisionReport::default();
    }

    /// Run all systems in order.
    fn run_systems(&mut self, input: &ControlInput, dt: f64) {
        let input = ControlInput::new(input.command, input.camera_pitch);
        if !self.ctx.vehicle.is_finite() {
            self.restore_vehicle(world_setup::spawn_vehicle(&self.scenario));
        }
        let before = self.ctx.vehicle;
        self.ctx.time.advance(dt);

        if self.env.geometry.is_empty() && !self.geometry_notice_logged {
            tracing::debug!("no collidable geometry registered; probing disabled");
            self.geometry_notice_logged = true;
        }

        // 1. Motion integration
        systems::motion::run(&mut self.ctx, &self.env, &input, dt);
        // 2. Collision detection and response (damage applied inline)
        self.last_collision = systems::collision::run(&mut self.ctx, &self.env);
        // 3. Numerical guard
        if !self.ctx.vehicle.is_finite() {
            self.restore_vehicle(before);
        }
        // 4. Objectives
        systems::objectives::run(&mut self.world, &mut self.ctx);
        // 5. Completion check
        systems::objectives::check_completion(&self.world, &mut self.ctx);
    }

    /// Replace a non-finite vehicle state with `fallback`.
    fn restore_vehicle(&mut self, fallback: VehicleState) {
        tracing::warn!(
            tick = self.ctx.time.tick,
            state = ?self.ctx.vehicle,
            "non-finite vehicle state; restoring"
        );
        self.ctx.vehicle = fallback;
        self.ctx.emit(
            EventLevel::Warning,
            "Numerical fault detected; vehicle state restored",
        );
    }
}

fn clamp_speed_multiplier(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER)
    } else {
        1.0
    }
}
