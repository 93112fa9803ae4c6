#[cfg(test)]
mod tests {
    use glam::DVec3;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use fathom_core::constants::*;
    use fathom_core::types::*;

    use crate::integrator::*;

    fn open_water() -> IntegratorParams {
        IntegratorParams {
            current: Current::default(),
            bounds: WorldBounds::for_seabed(1_000.0, 1.0e6),
        }
    }

    fn vehicle_at_depth(depth: f64) -> VehicleState {
        VehicleState::spawn(DVec3::new(0.0, -depth, 0.0), 0.0)
    }

    fn idle() -> ControlInput {
        ControlInput::default()
    }

    // ---- Drag ----

    #[test]
    fn test_zero_command_decays_to_exact_zero() {
        for &dt in &[0.001, 1.0 / 60.0, 0.05, 0.1] {
            let mut state = vehicle_at_depth(50.0);
            state.velocity = DVec3::new(1.2, -0.4, 0.9);
            let mut previous = state.speed();

            let mut steps = 0;
            while state.speed() > 0.0 {
                step(&mut state, &idle(), dt, 1.0, &open_water());
                let speed = state.speed();
                assert!(
                    speed < previous,
                    "speed must strictly decrease at dt={dt}: {previous} -> {speed}"
                );
                previous = speed;
                steps += 1;
                assert!(steps < 10_000, "velocity never settled at dt={dt}");
            }
            assert_eq!(state.velocity, DVec3::ZERO);
        }
    }

    #[test]
    fn test_drag_is_frame_rate_independent() {
        let mut results = Vec::new();
        for &hz in &[30.0, 60.0, 120.0] {
            let mut state = vehicle_at_depth(50.0);
            state.velocity = DVec3::new(1.5, 0.0, 0.0);
            state.angular_velocity_yaw = 1.0;
            let dt = 1.0 / hz;
            for _ in 0..(hz as usize) {
                step(&mut state, &idle(), dt, 1.0, &open_water());
            }
            results.push((state.velocity.x, state.angular_velocity_yaw));
        }
        let (v_ref, w_ref) = results[1];
        let expected_v = 1.5 * LINEAR_DRAG_BASE.powf(REFERENCE_FRAME_RATE_HZ);
        assert!((v_ref - expected_v).abs() < 1e-9);
        for (v, w) in results {
            assert!((v - v_ref).abs() < 1e-9, "velocity after 1s differs: {v} vs {v_ref}");
            assert!((w - w_ref).abs() < 1e-9, "yaw rate after 1s differs: {w} vs {w_ref}");
        }
    }

    #[test]
    fn test_drag_retention_matches_reference_frame() {
        let one_frame = 1.0 / REFERENCE_FRAME_RATE_HZ;
        assert!((drag_retention(LINEAR_DRAG_BASE, one_frame) - LINEAR_DRAG_BASE).abs() < 1e-12);
        assert_eq!(drag_retention(LINEAR_DRAG_BASE, 0.0), 1.0);
    }

    // ---- Limits ----

    #[test]
    fn test_speed_limits_hold_for_random_commands() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for &multiplier in &[MIN_SPEED_MULTIPLIER, 1.0, 3.0, MAX_SPEED_MULTIPLIER] {
            let mut state = vehicle_at_depth(500.0);
            let params = IntegratorParams {
                current: Current { x: 0.8, y: -0.6 },
                bounds: WorldBounds::for_seabed(1_000.0, 1.0e6),
            };
            for _ in 0..2_000 {
                let command = CommandVector::new(
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0),
                );
                let input = ControlInput::new(command, rng.gen_range(-1.0..=1.0));
                let dt = rng.gen_range(0.0..=0.2);
                step(&mut state, &input, dt, multiplier, &params);

                assert!(
                    state.speed() <= max_speed(multiplier) + 1e-9,
                    "speed {} exceeds {}",
                    state.speed(),
                    max_speed(multiplier)
                );
                assert!(
                    state.angular_velocity_yaw.abs() <= max_angular_speed(multiplier) + 1e-12,
                    "yaw rate {} exceeds {}",
                    state.angular_velocity_yaw,
                    max_angular_speed(multiplier)
                );
                assert!(state.is_finite());
            }
        }
    }

    #[test]
    fn test_sustained_surge_reaches_max_speed() {
        let mut state = vehicle_at_depth(50.0);
        for _ in 0..600 {
            step(&mut state, &ControlInput::new(CommandVector::surge(1.0), 0.0), 1.0 / 60.0, 1.0, &open_water());
        }
        assert!((state.speed() - max_speed(1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut long = vehicle_at_depth(50.0);
        let mut capped = vehicle_at_depth(50.0);
        let input = ControlInput::new(CommandVector::surge(1.0), 0.0);
        step(&mut long, &input, 5.0, 1.0, &open_water());
        step(&mut capped, &input, MAX_FRAME_DT, 1.0, &open_water());
        assert_eq!(long, capped);

        let before = vehicle_at_depth(50.0);
        let mut state = before;
        step(&mut state, &input, f64::NAN, 1.0, &open_water());
        assert_eq!(state, before, "non-finite dt must not move the vehicle");
    }

    // ---- Directions ----

    #[test]
    fn test_surge_moves_along_heading() {
        let mut state = vehicle_at_depth(50.0);
        let input = ControlInput::new(CommandVector::surge(1.0), 0.0);
        step(&mut state, &input, 0.1, 1.0, &open_water());
        assert!(state.velocity.z < 0.0, "yaw 0 faces -Z");
        assert!(state.velocity.x.abs() < 1e-12);
        assert!(state.velocity.y.abs() < 1e-12);

        let mut turned = VehicleState::spawn(DVec3::new(0.0, -50.0, 0.0), std::f64::consts::FRAC_PI_2);
        step(&mut turned, &input, 0.1, 1.0, &open_water());
        assert!(turned.velocity.x < 0.0, "quarter turn CCW faces -X");
        assert!(turned.velocity.z.abs() < 1e-12);
    }

    #[test]
    fn test_camera_pitch_tilts_surge() {
        let mut state = vehicle_at_depth(50.0);
        let input = ControlInput::new(CommandVector::surge(1.0), 0.5);
        step(&mut state, &input, 0.1, 1.0, &open_water());
        assert!(state.velocity.y > 0.0, "looking up with forward thrust climbs");

        // Pitch has no effect on sway.
        let mut sway = vehicle_at_depth(50.0);
        let input = ControlInput::new(CommandVector::new(0.0, 1.0, 0.0, 0.0), 0.5);
        step(&mut sway, &input, 0.1, 1.0, &open_water());
        assert!(sway.velocity.x > 0.0);
        assert!(sway.velocity.y.abs() < 1e-12);
    }

    #[test]
    fn test_axes_are_independent() {
        let mut state = vehicle_at_depth(50.0);
        let input = ControlInput::new(CommandVector::heave(-1.0), 0.0);
        step(&mut state, &input, 0.1, 1.0, &open_water());
        assert!(state.velocity.y < 0.0);
        assert_eq!(state.velocity.x, 0.0);
        assert_eq!(state.velocity.z, 0.0);
    }

    #[test]
    fn test_yaw_command_turns_counter_clockwise() {
        let mut state = vehicle_at_depth(50.0);
        let input = ControlInput::new(CommandVector::yaw(1.0), 0.0);
        for _ in 0..10 {
            step(&mut state, &input, 0.05, 1.0, &open_water());
        }
        assert!(state.angular_velocity_yaw > 0.0);
        assert!(state.yaw > 0.0);
        assert_eq!(state.velocity, DVec3::ZERO, "yaw alone must not translate");
    }

    #[test]
    fn test_added_mass_slows_acceleration() {
        let input = ControlInput::new(CommandVector::surge(1.0), 0.0);
        let mut light = vehicle_at_depth(50.0);
        let mut heavy = vehicle_at_depth(50.0);
        heavy.added_mass = 200.0;
        step(&mut light, &input, 0.05, 1.0, &open_water());
        step(&mut heavy, &input, 0.05, 1.0, &open_water());
        assert!(heavy.speed() < light.speed());
        assert!((acceleration(2.0, 130.0) - 2.0 * acceleration(1.0, 130.0)).abs() < 1e-12);
    }

    #[test]
    fn test_current_drifts_idle_vehicle() {
        let mut state = vehicle_at_depth(50.0);
        let params = IntegratorParams {
            current: Current { x: 1.0, y: 0.5 },
            bounds: WorldBounds::for_seabed(1_000.0, 1.0e6),
        };
        for _ in 0..60 {
            step(&mut state, &idle(), 1.0 / 60.0, 1.0, &params);
        }
        assert!(state.velocity.x > 0.0);
        assert!(state.velocity.z > 0.0);
        assert!(state.velocity.x > state.velocity.z);
        assert!(state.position.x > 0.0);
    }

    // ---- Boundaries ----

    #[test]
    fn test_ceiling_clamp_is_idempotent() {
        let params = open_water();
        let mut state = VehicleState::spawn(DVec3::new(0.0, SURFACE_CEILING_Y - 0.01, 0.0), 0.0);
        let up = ControlInput::new(CommandVector::heave(1.0), 0.0);

        let report = step(&mut state, &up, 0.1, 1.0, &params);
        assert!(report.hit_ceiling);
        assert_eq!(state.position.y, SURFACE_CEILING_Y);
        assert_eq!(state.velocity.y, 0.0);

        let report = step(&mut state, &up, 0.1, 1.0, &params);
        assert!(report.hit_ceiling);
        assert_eq!(state.position.y, SURFACE_CEILING_Y);
        assert_eq!(state.velocity.y, 0.0);
    }

    #[test]
    fn test_floor_clamp_is_idempotent() {
        let params = IntegratorParams {
            current: Current::default(),
            bounds: WorldBounds::for_seabed(30.0, 1.0e6),
        };
        let floor = params.bounds.floor_y;
        let mut state = VehicleState::spawn(DVec3::new(0.0, floor + 0.01, 0.0), 0.0);
        let down = ControlInput::new(CommandVector::heave(-1.0), 0.0);

        for _ in 0..3 {
            let report = step(&mut state, &down, 0.1, 1.0, &params);
            assert!(report.hit_floor);
            assert_eq!(state.position.y, floor);
            assert_eq!(state.velocity.y, 0.0);
        }

        // Climbing away from the floor is not blocked.
        let up = ControlInput::new(CommandVector::heave(1.0), 0.0);
        let report = step(&mut state, &up, 0.1, 1.0, &params);
        assert!(!report.hit_floor);
        assert!(state.position.y > floor);
    }

    #[test]
    fn test_horizontal_bounds_clamp() {
        let params = IntegratorParams {
            current: Current::default(),
            bounds: WorldBounds::for_seabed(100.0, 10.0),
        };
        let mut state = VehicleState::spawn(DVec3::new(9.99, -20.0, 0.0), -std::f64::consts::FRAC_PI_2);
        state.velocity = DVec3::new(2.0, 0.0, 0.0);
        let report = step(&mut state, &idle(), 0.1, 1.0, &params);
        assert!(report.hit_horizontal);
        assert_eq!(state.position.x, 10.0);
        assert_eq!(state.velocity.x, 0.0);
    }

    #[test]
    fn test_wrap_angle() {
        use std::f64::consts::PI;
        assert_eq!(wrap_angle(0.25), 0.25);
        assert_eq!(wrap_angle(PI), PI);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!(wrap_angle(-PI) > 0.0);
    }
}
