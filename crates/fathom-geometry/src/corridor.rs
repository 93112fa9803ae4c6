//! Path corridors: a tube of fixed radius around a sampled spline.

use glam::DVec3;

/// Upper bound on spline samples generated per checkpoint span.
pub const MAX_SAMPLES_PER_SEGMENT: usize = 256;

/// Point on a uniform Catmull-Rom segment between `p1` and `p2`, `t ∈ [0, 1]`.
pub fn catmull_rom(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3, t: f64) -> DVec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

/// Nearest sampled path point to a query position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestSample {
    pub index: usize,
    pub point: DVec3,
    pub distance: f64,
}

/// Immutable tube the vehicle must stay inside.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCorridor {
    samples: Vec<DVec3>,
    radius: f64,
}

impl PathCorridor {
    /// Corridor over already-sampled points.
    pub fn from_samples(samples: Vec<DVec3>, radius: f64) -> Self {
        Self { samples, radius }
    }

    /// Smooth the checkpoints with a Catmull-Rom spline passing through
    /// each of them, sampling `samples_per_segment` points per span.
    /// End tangents are formed by repeating the first and last checkpoint.
    pub fn from_checkpoints(checkpoints: &[DVec3], radius: f64, samples_per_segment: usize) -> Self {
        let n = checkpoints.len();
        if n < 2 {
            return Self::from_samples(checkpoints.to_vec(), radius);
        }

        let per_segment = samples_per_segment.clamp(1, MAX_SAMPLES_PER_SEGMENT);
        let mut samples = Vec::with_capacity((n - 1).saturating_mul(per_segment).saturating_add(1));
        for i in 0..n - 1 {
            let p0 = checkpoints[i.saturating_sub(1)];
            let p1 = checkpoints[i];
            let p2 = checkpoints[i + 1];
            let p3 = checkpoints[(i + 2).min(n - 1)];
            for s in 0..per_segment {
                let t = s as f64 / per_segment as f64;
                samples.push(catmull_rom(p0, p1, p2, p3, t));
            }
        }
        samples.push(checkpoints[n - 1]);

        Self::from_samples(samples, radius)
    }

    pub fn samples(&self) -> &[DVec3] {
        &self.samples
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Linear scan for the closest sample. `None` when there are no samples.
    pub fn nearest_sample(&self, position: DVec3) -> Option<NearestSample> {
        self.samples
            .iter()
            .enumerate()
            .map(|(index, point)| (index, *point, position.distance_squared(*point)))
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(index, point, d2)| NearestSample {
                index,
                point,
                distance: d2.sqrt(),
            })
    }

    /// Largest distance between consecutive samples (m).
    pub fn max_sample_gap(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .fold(0.0, f64::max)
    }
}
