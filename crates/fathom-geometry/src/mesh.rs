//! Triangle meshes and ray casting.
//!
//! Rays are culled per mesh with a slab test against the mesh bounds,
//! then tested against each triangle (Möller–Trumbore, double-sided).

use glam::DVec3;

/// Determinant threshold below which a ray is treated as parallel to a triangle.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    /// Slab test: does the segment `origin + dir * t`, `t ∈ [0, max_t]`, touch the box?
    pub fn intersects_ray(&self, origin: DVec3, dir: DVec3, max_t: f64) -> bool {
        let inv = DVec3::new(
            if dir.x.abs() > 1e-12 { 1.0 / dir.x } else { 1.0e12 },
            if dir.y.abs() > 1e-12 { 1.0 / dir.y } else { 1.0e12 },
            if dir.z.abs() > 1e-12 { 1.0 / dir.z } else { 1.0e12 },
        );
        let t1 = (self.min - origin) * inv;
        let t2 = (self.max - origin) * inv;
        let t_enter = t1.min(t2).max_element();
        let t_exit = t1.max(t2).min_element();
        t_enter <= t_exit && t_exit >= 0.0 && t_enter <= max_t
    }
}

/// A single triangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: DVec3,
    pub b: DVec3,
    pub c: DVec3,
}

impl Triangle {
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self { a, b, c }
    }

    /// Distance along a unit-length `dir` to the hit point, if the ray hits
    /// within `max_distance`. Hits from either side count.
    pub fn ray_distance(&self, origin: DVec3, dir: DVec3, max_distance: f64) -> Option<f64> {
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;
        let p = dir.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = origin - self.a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = dir.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t >= 0.0 && t <= max_distance).then_some(t)
    }
}

/// Static collidable mesh with cached bounds.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    bounds: Option<Aabb>,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let bounds = Aabb::from_points(triangles.iter().flat_map(|t| [t.a, t.b, t.c]));
        Self { triangles, bounds }
    }

    /// Closed axis-aligned box (12 triangles).
    pub fn from_box(center: DVec3, half_extents: DVec3) -> Self {
        let h = half_extents;
        let corner = |sx: f64, sy: f64, sz: f64| center + DVec3::new(sx * h.x, sy * h.y, sz * h.z);
        let v = [
            corner(-1.0, -1.0, -1.0),
            corner(1.0, -1.0, -1.0),
            corner(1.0, 1.0, -1.0),
            corner(-1.0, 1.0, -1.0),
            corner(-1.0, -1.0, 1.0),
            corner(1.0, -1.0, 1.0),
            corner(1.0, 1.0, 1.0),
            corner(-1.0, 1.0, 1.0),
        ];
        // Two triangles per face.
        let faces: [[usize; 4]; 6] = [
            [0, 1, 2, 3], // -z
            [5, 4, 7, 6], // +z
            [4, 0, 3, 7], // -x
            [1, 5, 6, 2], // +x
            [3, 2, 6, 7], // +y
            [4, 5, 1, 0], // -y
        ];
        let triangles = faces
            .iter()
            .flat_map(|f| {
                [
                    Triangle::new(v[f[0]], v[f[1]], v[f[2]]),
                    Triangle::new(v[f[0]], v[f[2]], v[f[3]]),
                ]
            })
            .collect();
        Self::new(triangles)
    }

    /// Flat square at height `y` spanning `[-half_extent, half_extent]` in X and Z.
    pub fn horizontal_plane(y: f64, half_extent: f64) -> Self {
        let e = half_extent;
        let a = DVec3::new(-e, y, -e);
        let b = DVec3::new(e, y, -e);
        let c = DVec3::new(e, y, e);
        let d = DVec3::new(-e, y, e);
        Self::new(vec![Triangle::new(a, b, c), Triangle::new(a, c, d)])
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Nearest hit distance along unit `dir`, up to `max_distance`.
    pub fn ray_cast(&self, origin: DVec3, dir: DVec3, max_distance: f64) -> Option<f64> {
        let bounds = self.bounds?;
        if !bounds.intersects_ray(origin, dir, max_distance) {
            return None;
        }
        self.triangles
            .iter()
            .filter_map(|t| t.ray_distance(origin, dir, max_distance))
            .min_by(f64::total_cmp)
    }
}

/// Every collidable mesh registered after scene load.
#[derive(Debug, Clone, Default)]
pub struct SceneGeometry {
    meshes: Vec<TriangleMesh>,
}

impl SceneGeometry {
    pub fn new(meshes: Vec<TriangleMesh>) -> Self {
        Self { meshes }
    }

    pub fn add_mesh(&mut self, mesh: TriangleMesh) {
        self.meshes.push(mesh);
    }

    /// Merge another scene's meshes into this one.
    pub fn extend(&mut self, other: SceneGeometry) {
        self.meshes.extend(other.meshes);
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.iter().all(|m| m.triangles.is_empty())
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.triangles.len()).sum()
    }

    /// Nearest hit distance across all meshes.
    pub fn ray_cast(&self, origin: DVec3, dir: DVec3, max_distance: f64) -> Option<f64> {
        self.meshes
            .iter()
            .filter_map(|m| m.ray_cast(origin, dir, max_distance))
            .min_by(f64::total_cmp)
    }
}
