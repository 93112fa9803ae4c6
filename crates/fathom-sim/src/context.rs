//! Per-session mutable context and the static environment it runs in.
//!
//! Systems receive these by reference instead of reaching into the engine.

use std::collections::VecDeque;

use fathom_core::constants::MAX_EVENT_LOG;
use fathom_core::enums::{EventLevel, MissionState};
use fathom_core::events::SessionEvent;
use fathom_core::types::{SimTime, VehicleState};
use fathom_dynamics::IntegratorParams;
use fathom_geometry::{Obstacle, PathCorridor, SceneGeometry};

use crate::mission::DamageState;

/// Static scene the vehicle moves through. Built once per session.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Collidable meshes for ray probing.
    pub geometry: SceneGeometry,
    /// Curated obstacles for discrete-shape tests, in scan order.
    pub obstacles: Vec<Obstacle>,
    /// Corridor the vehicle must stay inside, if the scenario has one.
    pub corridor: Option<PathCorridor>,
    /// Current and world bounds for the integrator.
    pub params: IntegratorParams,
    /// Water depth at the site (m).
    pub seabed_depth: f64,
    /// Visibility distance (m); read by render collaborators only.
    pub visibility: f64,
}

/// Everything that changes during a session.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub vehicle: VehicleState,
    pub damage: DamageState,
    pub mission: MissionState,
    /// Sum of points from completed objectives.
    pub score: u32,
    pub time: SimTime,
    pub speed_multiplier: f64,
    pub events: EventFeed,
    /// Set while the vehicle is inside the seabed warning band.
    pub depth_warning_active: bool,
}

impl SimulationContext {
    pub fn new(vehicle: VehicleState, speed_multiplier: f64) -> Self {
        Self {
            vehicle,
            damage: DamageState::default(),
            mission: MissionState::Running,
            score: 0,
            time: SimTime::default(),
            speed_multiplier,
            events: EventFeed::default(),
            depth_warning_active: false,
        }
    }

    /// Record an event stamped with the current simulated time.
    pub fn emit(&mut self, level: EventLevel, message: impl Into<String>) {
        let time_secs = self.time.elapsed_secs;
        self.events.push(SessionEvent::new(level, message, time_secs));
    }
}

/// Event feed: events raised since the last snapshot plus a bounded history.
#[derive(Debug, Clone, Default)]
pub struct EventFeed {
    pending: Vec<SessionEvent>,
    log: VecDeque<SessionEvent>,
}

impl EventFeed {
    pub fn push(&mut self, event: SessionEvent) {
        if self.log.len() == MAX_EVENT_LOG {
            self.log.pop_front();
        }
        self.log.push_back(event.clone());
        self.pending.push(event);
    }

    /// Take the events raised since the previous call.
    pub fn drain_pending(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Most recent events, oldest first.
    pub fn log(&self) -> impl Iterator<Item = &SessionEvent> {
        self.log.iter()
    }

    pub fn log_len(&self) -> usize {
        self.log.len()
    }
}
