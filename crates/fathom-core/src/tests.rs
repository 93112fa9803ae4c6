#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::commands::OperatorCommand;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::SessionEvent;
    use crate::state::SessionSnapshot;
    use crate::types::*;

    #[test]
    fn test_command_vector_clamps_axes() {
        let cmd = CommandVector::new(2.0, -3.0, 0.5, f64::NAN);
        assert_eq!(cmd.surge, 1.0);
        assert_eq!(cmd.sway, -1.0);
        assert_eq!(cmd.heave, 0.5);
        assert_eq!(cmd.yaw, 0.0, "NaN axis should be neutralized");
    }

    #[test]
    fn test_control_input_clamps_pitch() {
        let input = ControlInput::new(CommandVector::default(), 1.5);
        assert_eq!(input.camera_pitch, MAX_CAMERA_PITCH);
        let input = ControlInput::new(CommandVector::default(), f64::INFINITY);
        assert_eq!(input.camera_pitch, 0.0);
    }

    #[test]
    fn test_effective_mass_combines_added_mass() {
        let state = VehicleState::default();
        assert_eq!(
            state.effective_mass(),
            DEFAULT_VEHICLE_MASS + DEFAULT_ADDED_MASS
        );
    }

    #[test]
    fn test_heading_degrees() {
        let mut state = VehicleState::default();
        assert!(state.heading_degrees().abs() < 1e-9);
        // Counter-clockwise quarter turn faces -X, which is west (270 degrees).
        state.yaw = std::f64::consts::FRAC_PI_2;
        assert!((state.heading_degrees() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_or_none_guards_zero() {
        assert!(normalize_or_none(DVec3::ZERO).is_none());
        assert!(normalize_or_none(DVec3::new(1e-12, 0.0, 0.0)).is_none());
        assert!(normalize_or_none(DVec3::new(f64::NAN, 1.0, 0.0)).is_none());
        let n = normalize_or_none(DVec3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_world_bounds_for_seabed() {
        let bounds = WorldBounds::for_seabed(40.0, 200.0);
        assert_eq!(bounds.ceiling_y, SURFACE_CEILING_Y);
        assert_eq!(bounds.floor_y, -40.0 + SEABED_MARGIN);
        assert_eq!(bounds.half_extent, 200.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(0.05);
        time.advance(0.05);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_secs - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_mission_state_terminal() {
        assert!(!MissionState::Running.is_terminal());
        assert!(MissionState::Failed.is_terminal());
        assert!(MissionState::Completed.is_terminal());
    }

    #[test]
    fn test_operator_command_tagged_json() {
        let cmd = OperatorCommand::SetSpeedMultiplier { value: 2.5 };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"SetSpeedMultiplier\""));
        let back: OperatorCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_snapshot_serializes_with_events() {
        let snapshot = SessionSnapshot {
            events: vec![SessionEvent::new(EventLevel::Warning, "Hull breach", 1.0)],
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.events.len(), 1);
        assert_eq!(back.events[0].level, EventLevel::Warning);
        assert_eq!(back.mission, MissionState::Running);
    }
}
