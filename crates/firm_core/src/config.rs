use crate::markers::MarkerSettings;
use crate::sampling::{SamplingDomain, MAX_GRID_POINTS};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Sampling grid and marker search settings. Missing fields take the
/// defaults (Qmax = 10, display step 0.1, scan step 0.01, 30 bisection
/// iterations, 1e-3 dedup tolerance, profit-limit gap 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub domain: SamplingDomain,
    pub markers: MarkerSettings,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).context("Failed to parse engine configuration.")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let domain = &self.domain;
        if !domain.q_max.is_finite() || domain.q_max <= 0.0 {
            bail!("q_max must be finite and positive, got {}.", domain.q_max);
        }
        if !domain.step.is_finite() || domain.step <= 0.0 {
            bail!("step must be finite and positive, got {}.", domain.step);
        }
        if domain.q_precision > 15 {
            bail!("q_precision must be at most 15, got {}.", domain.q_precision);
        }

        let markers = &self.markers;
        if !markers.scan_step.is_finite() || markers.scan_step <= 0.0 {
            bail!(
                "scan_step must be finite and positive, got {}.",
                markers.scan_step
            );
        }
        for (name, step) in [("step", domain.step), ("scan_step", markers.scan_step)] {
            let points = domain.q_max / step;
            if points >= MAX_GRID_POINTS as f64 {
                bail!(
                    "q_max / {} must stay below {} grid points, got {}.",
                    name,
                    MAX_GRID_POINTS,
                    points
                );
            }
        }
        if markers.bisection_iterations == 0 {
            bail!("bisection_iterations must be greater than zero.");
        }
        if !markers.dedup_tolerance.is_finite() || markers.dedup_tolerance < 0.0 {
            bail!(
                "dedup_tolerance must be finite and non-negative, got {}.",
                markers.dedup_tolerance
            );
        }
        if !markers.min_profit_limit_gap.is_finite() || markers.min_profit_limit_gap < 0.0 {
            bail!(
                "min_profit_limit_gap must be finite and non-negative, got {}.",
                markers.min_profit_limit_gap
            );
        }
        Ok(())
    }
}
