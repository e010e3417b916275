use crate::config::EngineConfig;
use crate::markers::{find_markers, Markers};
use crate::params::Parameters;
use crate::sampling::{sample, Series};
use serde::Serialize;

/// Series and markers computed together from one set of parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSnapshot {
    pub params: Parameters,
    pub series: Series,
    pub markers: Markers,
}

impl ModelSnapshot {
    pub fn compute(params: Parameters, config: &EngineConfig) -> Self {
        let span = tracing::debug_span!(
            "firm.recompute",
            fc = params.fc,
            a = params.a,
            b = params.b,
            c = params.c,
            p = params.p
        );
        let _guard = span.enter();

        let series = sample(&params, &config.domain);
        let markers = find_markers(&params, &series, &config.markers);
        tracing::debug!(points = series.len(), "recomputed model");
        Self {
            params,
            series,
            markers,
        }
    }
}

/// Recomputes the model only when the parameters differ from the last call.
#[derive(Debug, Clone, Default)]
pub struct ModelEngine {
    config: EngineConfig,
    cached: Option<ModelSnapshot>,
}

impl ModelEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cached: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn compute(&mut self, params: Parameters) -> &ModelSnapshot {
        match self.cached.take() {
            Some(snapshot) if snapshot.params.same_bits(&params) => {
                tracing::trace!("parameters unchanged, reusing snapshot");
                self.cached.insert(snapshot)
            }
            _ => self
                .cached
                .insert(ModelSnapshot::compute(params, &self.config)),
        }
    }

    pub fn last(&self) -> Option<&ModelSnapshot> {
        self.cached.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
