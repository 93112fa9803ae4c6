//! Damage accounting and the mission outcome state machine.
//!
//! Stored in the `SimulationContext`, not as ECS entities.

use std::collections::HashMap;

use fathom_core::constants::{DAMAGE_COOLDOWN_SECS, MAX_DAMAGE};
use fathom_core::enums::MissionState;

/// What inflicted a collision, for per-source cooldowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionSource {
    /// Index into the environment's obstacle list.
    Obstacle(usize),
    /// Leaving the path corridor.
    Corridor,
}

/// Accumulated hull damage. Never decreases within a session.
#[derive(Debug, Clone)]
pub struct DamageState {
    damage: f64,
    last_impact: HashMap<CollisionSource, f64>,
    cooldown: f64,
}

impl Default for DamageState {
    fn default() -> Self {
        Self::new(DAMAGE_COOLDOWN_SECS)
    }
}

impl DamageState {
    pub fn new(cooldown: f64) -> Self {
        Self {
            damage: 0.0,
            last_impact: HashMap::new(),
            cooldown,
        }
    }

    pub fn damage(&self) -> f64 {
        self.damage
    }

    pub fn is_destroyed(&self) -> bool {
        self.damage >= MAX_DAMAGE
    }

    /// Whether `source` may inflict damage at time `now`.
    pub fn cooldown_ready(&self, source: CollisionSource, now: f64) -> bool {
        self.last_impact
            .get(&source)
            .map_or(true, |last| now - last >= self.cooldown)
    }

    /// Apply `amount` from `source` unless it is still cooling down.
    /// Returns the damage actually added; `None` if gated or not positive.
    pub fn apply_impact(&mut self, source: CollisionSource, amount: f64, now: f64) -> Option<f64> {
        if !(amount.is_finite() && amount > 0.0) || !self.cooldown_ready(source, now) {
            return None;
        }
        self.last_impact.insert(source, now);
        Some(self.apply(amount))
    }

    /// Add damage unconditionally, clamped to `[0, MAX_DAMAGE]`.
    /// Returns the damage actually added.
    pub fn apply(&mut self, amount: f64) -> f64 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.damage;
        self.damage = (self.damage + amount).min(MAX_DAMAGE);
        self.damage - before
    }
}

/// Running → Failed once damage reaches the maximum. Returns true on transition.
pub fn evaluate_failure(mission: &mut MissionState, damage: &DamageState) -> bool {
    if *mission == MissionState::Running && damage.is_destroyed() {
        *mission = MissionState::Failed;
        return true;
    }
    false
}

/// Running → Completed once every objective is done. Returns true on transition.
pub fn evaluate_completion(mission: &mut MissionState, all_objectives_complete: bool) -> bool {
    if *mission == MissionState::Running && all_objectives_complete {
        *mission = MissionState::Completed;
        return true;
    }
    false
}
