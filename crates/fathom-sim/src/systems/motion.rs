//! Motion system: integrates the vehicle and raises depth warnings.

use fathom_core::constants::DEPTH_WARNING_MARGIN;
use fathom_core::enums::EventLevel;
use fathom_core::types::ControlInput;
use fathom_dynamics::integrator;

use crate::context::{Environment, SimulationContext};

pub fn run(ctx: &mut SimulationContext, env: &Environment, input: &ControlInput, dt: f64) {
    let report = integrator::step(
        &mut ctx.vehicle,
        input,
        dt,
        ctx.speed_multiplier,
        &env.params,
    );
    if report.hit_floor {
        tracing::trace!(y = ctx.vehicle.position.y, "vehicle resting on seabed limit");
    }
    update_depth_warning(ctx, env);
}

/// One warning per approach: fires on entering the band above the seabed
/// limit and re-arms once the vehicle climbs back out of twice the band.
fn update_depth_warning(ctx: &mut SimulationContext, env: &Environment) {
    let height_above_floor = ctx.vehicle.position.y - env.params.bounds.floor_y;
    if !ctx.depth_warning_active && height_above_floor < DEPTH_WARNING_MARGIN {
        ctx.depth_warning_active = true;
        let depth = ctx.vehicle.depth();
        ctx.emit(
            EventLevel::Warning,
            format!("Approaching seabed ({depth:.1} m)"),
        );
    } else if ctx.depth_warning_active && height_above_floor > 2.0 * DEPTH_WARNING_MARGIN {
        ctx.depth_warning_active = false;
    }
}
