//! Collision geometry for FATHOM.
//!
//! Triangle meshes with ray casting, discrete obstacle shapes with
//! overlap tests, and sampled path corridors. Pure data and functions;
//! no knowledge of sessions, damage or time.

pub use fathom_core as core;

pub mod corridor;
pub mod mesh;
pub mod shapes;

pub use corridor::{catmull_rom, NearestSample, PathCorridor};
pub use mesh::{Aabb, SceneGeometry, Triangle, TriangleMesh};
pub use shapes::{AxisBox, Obstacle, Overlap};
