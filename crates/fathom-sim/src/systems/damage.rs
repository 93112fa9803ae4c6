//! Damage system: cooldown-gated damage, hull warnings and failure.

use fathom_core::constants::{DAMAGE_WARNING_THRESHOLDS, MAX_DAMAGE};
use fathom_core::enums::EventLevel;

use crate::context::SimulationContext;
use crate::mission::{self, CollisionSource};

/// Apply collision damage from `source`. Returns the damage actually added.
///
/// No-op once the mission has ended, or while `source` is cooling down.
pub fn apply(ctx: &mut SimulationContext, source: CollisionSource, amount: f64, reason: &str) -> f64 {
    if ctx.mission.is_terminal() {
        return 0.0;
    }

    let now = ctx.time.elapsed_secs;
    let before = ctx.damage.damage();
    let Some(added) = ctx.damage.apply_impact(source, amount, now) else {
        return 0.0;
    };
    let after = ctx.damage.damage();

    ctx.emit(
        EventLevel::Warning,
        format!("Impact: {reason} (+{added:.1} damage)"),
    );

    for threshold in DAMAGE_WARNING_THRESHOLDS {
        if before < threshold && after >= threshold && after < MAX_DAMAGE {
            ctx.emit(
                EventLevel::Warning,
                format!("Hull integrity below {:.0}%", MAX_DAMAGE - threshold),
            );
        }
    }

    if mission::evaluate_failure(&mut ctx.mission, &ctx.damage) {
        tracing::info!(time = now, "mission failed: hull destroyed");
        ctx.emit(EventLevel::Danger, "Hull breached. Mission failed");
    }

    added
}
