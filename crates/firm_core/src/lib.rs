//! The `firm_core` crate is the computational engine behind the firm model
//! visualization: a firm with fixed cost `FC`, cubic total cost
//! `FC + aQ - bQ^2 + cQ^3` and a price-taking revenue `pQ`.
//!
//! Key components:
//! - **Model**: closed-form revenue, cost and profit curves (`evaluate`).
//! - **Sampling**: the display series over `[0, Qmax]` (`sample`).
//! - **Markers**: profit maximum, break-even and profit limit (`find_markers`).
//! - **Engine**: recompute-on-change with an equality-gated cache.
//! - **Chart/Format**: chart domains, reference lines and KPI strings for the
//!   presentation layer.

pub mod chart;
pub mod config;
pub mod engine;
pub mod format;
pub mod markers;
pub mod model;
pub mod params;
pub mod sampling;
pub mod traits;

pub use config::EngineConfig;
pub use engine::{ModelEngine, ModelSnapshot};
pub use markers::{find_markers, Markers};
pub use model::{evaluate, Sample};
pub use params::{ParameterKind, Parameters};
pub use sampling::{sample, SamplingDomain, Series};
