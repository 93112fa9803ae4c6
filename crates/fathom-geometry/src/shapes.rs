//! Discrete obstacle shapes and vehicle overlap tests.
//!
//! The vehicle is treated as a sphere of the given radius. Each test
//! returns the anchor point the vehicle should be pushed away from.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box, also used as a compound-wall block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBox {
    pub center: DVec3,
    pub half_extents: DVec3,
}

impl AxisBox {
    pub fn new(center: DVec3, half_extents: DVec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    pub fn min(&self) -> DVec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> DVec3 {
        self.center + self.half_extents
    }

    /// Closest point on or inside the box to `p`.
    pub fn closest_point(&self, p: DVec3) -> DVec3 {
        p.clamp(self.min(), self.max())
    }

    /// Strict point-in-box test after growing the box by `margin`.
    pub fn contains_expanded(&self, p: DVec3, margin: f64) -> bool {
        let d = (p - self.center).abs();
        let limit = self.half_extents + DVec3::splat(margin);
        d.cmplt(limit).all()
    }
}

/// Static obstacle placed by the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum Obstacle {
    Sphere {
        center: DVec3,
        radius: f64,
    },
    Box {
        center: DVec3,
        half_extents: DVec3,
    },
    /// Vertical cylinder; `center` sits at mid-height.
    Cylinder {
        center: DVec3,
        radius: f64,
        height: f64,
    },
    /// Wall with rectangular openings, stored as the solid blocks around them.
    CompoundWall {
        sub_boxes: Vec<AxisBox>,
    },
}

/// Result of a positive overlap test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Point on (or inside) the obstacle the vehicle is pushed away from.
    pub anchor: DVec3,
    /// Index of the compound-wall block that was hit.
    pub sub_box: Option<usize>,
}

impl Obstacle {
    /// Representative centre, used for fallbacks and display.
    pub fn center(&self) -> DVec3 {
        match self {
            Obstacle::Sphere { center, .. }
            | Obstacle::Box { center, .. }
            | Obstacle::Cylinder { center, .. } => *center,
            Obstacle::CompoundWall { sub_boxes } => {
                if sub_boxes.is_empty() {
                    DVec3::ZERO
                } else {
                    sub_boxes.iter().map(|b| b.center).sum::<DVec3>() / sub_boxes.len() as f64
                }
            }
        }
    }

    /// Test a vehicle sphere at `position` against this obstacle.
    pub fn overlap(&self, position: DVec3, vehicle_radius: f64) -> Option<Overlap> {
        match self {
            Obstacle::Sphere { center, radius } => {
                let reach = radius + vehicle_radius;
                (position.distance_squared(*center) < reach * reach).then_some(Overlap {
                    anchor: *center,
                    sub_box: None,
                })
            }
            Obstacle::Box {
                center,
                half_extents,
            } => {
                let block = AxisBox::new(*center, *half_extents);
                let closest = block.closest_point(position);
                if position.distance_squared(closest) >= vehicle_radius * vehicle_radius {
                    return None;
                }
                // Vehicle centre inside the box: push away from the box centre.
                let anchor = if closest == position { *center } else { closest };
                Some(Overlap {
                    anchor,
                    sub_box: None,
                })
            }
            Obstacle::Cylinder {
                center,
                radius,
                height,
            } => {
                let dx = position.x - center.x;
                let dz = position.z - center.z;
                let reach = radius + vehicle_radius;
                let half_band = height * 0.5 + vehicle_radius;
                let dy = position.y - center.y;
                if dx * dx + dz * dz >= reach * reach || dy.abs() >= half_band {
                    return None;
                }
                // Axis point at the vehicle's height, so the push is radial.
                let axis_y = position.y.clamp(center.y - height * 0.5, center.y + height * 0.5);
                Some(Overlap {
                    anchor: DVec3::new(center.x, axis_y, center.z),
                    sub_box: None,
                })
            }
            Obstacle::CompoundWall { sub_boxes } => sub_boxes
                .iter()
                .position(|b| b.contains_expanded(position, vehicle_radius))
                .map(|i| Overlap {
                    anchor: sub_boxes[i].center,
                    sub_box: Some(i),
                }),
        }
    }

    /// Whether every dimension is positive and finite.
    pub fn is_well_formed(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let positive_vec = |v: DVec3| v.is_finite() && v.min_element() > 0.0;
        match self {
            Obstacle::Sphere { center, radius } => center.is_finite() && positive(*radius),
            Obstacle::Box {
                center,
                half_extents,
            } => center.is_finite() && positive_vec(*half_extents),
            Obstacle::Cylinder {
                center,
                radius,
                height,
            } => center.is_finite() && positive(*radius) && positive(*height),
            Obstacle::CompoundWall { sub_boxes } => {
                !sub_boxes.is_empty()
                    && sub_boxes
                        .iter()
                        .all(|b| b.center.is_finite() && positive_vec(b.half_extents))
            }
        }
    }

    /// Short lowercase name for event messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Obstacle::Sphere { .. } => "sphere",
            Obstacle::Box { .. } => "box",
            Obstacle::Cylinder { .. } => "cylinder",
            Obstacle::CompoundWall { .. } => "wall",
        }
    }
}

/// Build a vertical wall in the XY plane at `z` with rectangular openings.
///
/// `openings` are `(offset_x, offset_y, half_width, half_height)` relative to
/// the wall centre, and must lie inside the wall without overlapping each
/// other horizontally. The wall is
/// split into full-height columns between openings plus lintel and sill
/// blocks above and below each opening.
pub fn wall_with_openings(
    center: DVec3,
    half_width: f64,
    half_height: f64,
    half_thickness: f64,
    openings: &[(f64, f64, f64, f64)],
) -> Obstacle {
    let mut sorted: Vec<_> = openings.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let bottom = center.y - half_height;
    let top = center.y + half_height;
    let mut blocks = Vec::new();
    let mut cursor = center.x - half_width;

    let mut push_block = |x0: f64, x1: f64, y0: f64, y1: f64| {
        if x1 - x0 > 1e-9 && y1 - y0 > 1e-9 {
            blocks.push(AxisBox::new(
                DVec3::new((x0 + x1) * 0.5, (y0 + y1) * 0.5, center.z),
                DVec3::new((x1 - x0) * 0.5, (y1 - y0) * 0.5, half_thickness),
            ));
        }
    };

    for &(ox, oy, ohw, ohh) in &sorted {
        let (x0, x1) = (center.x + ox - ohw, center.x + ox + ohw);
        let (y0, y1) = (center.y + oy - ohh, center.y + oy + ohh);
        push_block(cursor, x0, bottom, top);
        push_block(x0, x1, bottom, y0);
        push_block(x0, x1, y1, top);
        cursor = x1;
    }
    push_block(cursor, center.x + half_width, bottom, top);

    Obstacle::CompoundWall { sub_boxes: blocks }
}
