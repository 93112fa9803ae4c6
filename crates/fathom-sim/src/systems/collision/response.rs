//! Collision response shared by every detector.

use glam::DVec3;

use fathom_core::types::VehicleState;

/// Correction a detector asks for. Applied by `resolve`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResponse {
    /// Displacement added to the vehicle position.
    pub push_vector: DVec3,
    /// Unit normal pointing away from the contact, if velocity along it
    /// should be cancelled.
    pub velocity_cancel_normal: Option<DVec3>,
    /// Fraction of the inbound normal velocity removed, 0..=1.
    pub cancel_factor: f64,
    /// Multiplier applied to the whole velocity afterwards.
    pub velocity_damping: f64,
}

impl CollisionResponse {
    pub fn push(push_vector: DVec3) -> Self {
        Self {
            push_vector,
            velocity_cancel_normal: None,
            cancel_factor: 0.0,
            velocity_damping: 1.0,
        }
    }

    pub fn with_cancel(mut self, normal: DVec3, factor: f64) -> Self {
        self.velocity_cancel_normal = Some(normal);
        self.cancel_factor = factor;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.velocity_damping = damping;
        self
    }
}

/// Apply a response: push, cancel inbound velocity along the normal, damp.
///
/// Velocity is only cancelled when it points into the contact, so a
/// vehicle already moving away is never pulled back.
pub fn resolve(vehicle: &mut VehicleState, response: &CollisionResponse) {
    vehicle.position += response.push_vector;

    if let Some(normal) = response.velocity_cancel_normal {
        let along = vehicle.velocity.dot(normal);
        if along < 0.0 {
            vehicle.velocity -= normal * along * response.cancel_factor;
        }
    }

    vehicle.velocity *= response.velocity_damping;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_cancels_only_inbound_velocity() {
        let mut vehicle = VehicleState::spawn(DVec3::ZERO, 0.0);
        vehicle.velocity = DVec3::new(0.0, 0.0, -2.0);
        let response = CollisionResponse::push(DVec3::new(0.0, 0.0, 0.1)).with_cancel(DVec3::Z, 0.8);

        resolve(&mut vehicle, &response);
        assert!((vehicle.position.z - 0.1).abs() < 1e-12);
        assert!((vehicle.velocity.z + 0.4).abs() < 1e-12, "80% of inbound speed removed");

        let mut leaving = VehicleState::spawn(DVec3::ZERO, 0.0);
        leaving.velocity = DVec3::new(1.0, 0.0, 2.0);
        resolve(&mut leaving, &response);
        assert_eq!(leaving.velocity, DVec3::new(1.0, 0.0, 2.0), "outbound velocity untouched");
    }

    #[test]
    fn test_resolve_keeps_tangential_velocity() {
        let mut vehicle = VehicleState::spawn(DVec3::ZERO, 0.0);
        vehicle.velocity = DVec3::new(1.5, 0.0, -1.0);
        resolve(
            &mut vehicle,
            &CollisionResponse::push(DVec3::ZERO).with_cancel(DVec3::Z, 1.0),
        );
        assert_eq!(vehicle.velocity, DVec3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn test_resolve_damping_scales_everything() {
        let mut vehicle = VehicleState::spawn(DVec3::ZERO, 0.0);
        vehicle.velocity = DVec3::new(1.0, -1.0, 2.0);
        resolve(&mut vehicle, &CollisionResponse::push(DVec3::ZERO).with_damping(0.2));
        assert!((vehicle.velocity - DVec3::new(0.2, -0.2, 0.4)).length() < 1e-12);
    }
}
