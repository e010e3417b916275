use crate::model::{evaluate, Sample};
use crate::params::Parameters;
use serde::{Deserialize, Serialize};

/// Slack added to `q_max / step` so the endpoint survives floating-point
/// division error.
const ENDPOINT_EPSILON: f64 = 1e-9;

/// Upper bound on the number of points in any sampling or scan grid.
pub const MAX_GRID_POINTS: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingDomain {
    pub q_max: f64,
    pub step: f64,
    /// Fractional digits kept on stored Q values.
    pub q_precision: u32,
}

impl Default for SamplingDomain {
    fn default() -> Self {
        Self {
            q_max: 10.0,
            step: 0.1,
            q_precision: 3,
        }
    }
}

impl SamplingDomain {
    /// Number of grid points in `[0, q_max]`, endpoint included when the step
    /// divides it. Zero for a degenerate domain, at most [`MAX_GRID_POINTS`].
    pub fn point_count(&self) -> usize {
        grid_point_count(self.q_max, self.step)
    }
}

pub(crate) fn grid_point_count(q_max: f64, step: f64) -> usize {
    if !q_max.is_finite() || !step.is_finite() || step <= 0.0 || q_max < 0.0 {
        return 0;
    }
    let intervals = (q_max / step + ENDPOINT_EPSILON).floor();
    if intervals >= (MAX_GRID_POINTS - 1) as f64 {
        return MAX_GRID_POINTS;
    }
    intervals as usize + 1
}

pub fn round_to(x: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (x * scale).round() / scale
}

/// Samples ordered by strictly increasing Q.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn q_values(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.q).collect()
    }

    pub fn q_max(&self) -> Option<f64> {
        self.samples.last().map(|sample| sample.q)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Evaluates the model on the grid `0, step, 2*step, ...` up to `q_max`.
///
/// Stored Q values are rounded to `domain.q_precision` digits; the curves are
/// evaluated at the unrounded grid point.
pub fn sample(params: &Parameters, domain: &SamplingDomain) -> Series {
    let count = domain.point_count();
    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        let q = i as f64 * domain.step;
        let mut point = evaluate(q, params);
        point.q = round_to(q, domain.q_precision);
        samples.push(point);
    }
    tracing::trace!(points = samples.len(), q_max = domain.q_max, "sampled series");
    Series { samples }
}
