//! Collision detection: ray probing, discrete shapes, corridor containment.
//!
//! Each detector returns an optional `CollisionResponse`; `run` resolves them
//! in order against the vehicle and forwards damage to the damage system.

pub mod corridor;
pub mod probe;
pub mod response;
pub mod shapes;

use fathom_core::constants::{CORRIDOR_DAMAGE_PER_METER, IMPACT_DAMAGE_BASE, IMPACT_DAMAGE_PER_MPS};

use crate::context::{Environment, SimulationContext};
use crate::mission::CollisionSource;
use crate::systems::damage;

pub use response::{resolve, CollisionResponse};

/// What the collision pass did this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionReport {
    /// Length of the probe correction applied (m).
    pub probe_correction: f64,
    /// Obstacle index touched, if any.
    pub obstacle_contact: Option<usize>,
    /// `None` when the environment has no corridor.
    pub inside_corridor: Option<bool>,
}

/// Damage for an obstacle strike at `impact_speed` m/s.
pub fn impact_damage(impact_speed: f64) -> f64 {
    IMPACT_DAMAGE_BASE + impact_speed * IMPACT_DAMAGE_PER_MPS
}

pub fn run(ctx: &mut SimulationContext, env: &Environment) -> CollisionReport {
    let mut report = CollisionReport::default();

    // (a) Proximity probing. Repulsion only, no damage.
    if let Some(contact) = probe::detect(&ctx.vehicle, &env.geometry) {
        report.probe_correction = contact.response.push_vector.length();
        resolve(&mut ctx.vehicle, &contact.response);
    }

    // (b) Discrete shapes, first overlap only.
    if let Some(contact) = shapes::detect(&ctx.vehicle, &env.obstacles) {
        report.obstacle_contact = Some(contact.index);
        resolve(&mut ctx.vehicle, &contact.response);

        let kind = env
            .obstacles
            .get(contact.index)
            .map_or("obstacle", |o| o.kind_name());
        tracing::debug!(
            obstacle = contact.index,
            kind,
            impact_speed = contact.impact_speed,
            "obstacle contact"
        );
        damage::apply(
            ctx,
            CollisionSource::Obstacle(contact.index),
            impact_damage(contact.impact_speed),
            &format!("struck {kind}"),
        );
    }

    // (c) Corridor containment.
    if let Some(path) = &env.corridor {
        match corridor::detect(&ctx.vehicle, path) {
            Some(exit) => {
                report.inside_corridor = Some(false);
                resolve(&mut ctx.vehicle, &exit.response);
                tracing::debug!(overshoot = exit.overshoot, "corridor exit");
                damage::apply(
                    ctx,
                    CollisionSource::Corridor,
                    exit.overshoot * CORRIDOR_DAMAGE_PER_METER,
                    "left the corridor",
                );
            }
            None => report.inside_corridor = Some(true),
        }
    }

    report
}
