//! WASM wrapper owning the slider state and the cached engine.

use crate::payload::build_payload;
use firm_core::chart::{curve_values, ChartError, Curve};
use firm_core::params::{parameter_descriptors as core_descriptors, ParameterError};
use firm_core::{EngineConfig, ModelEngine, ParameterKind, Parameters};
use js_sys::Float64Array;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmFirmModel {
    engine: ModelEngine,
    params: Parameters,
}

pub(crate) fn apply_parameter(
    params: &mut Parameters,
    name: &str,
    value: f64,
) -> Result<f64, ParameterError> {
    let kind: ParameterKind = name.parse()?;
    let snapped = kind.snap(value)?;
    params.set(kind, snapped);
    Ok(snapped)
}

fn serialization_error(err: serde_wasm_bindgen::Error) -> JsValue {
    JsValue::from_str(&format!("Serialization error: {}", err))
}

#[wasm_bindgen]
impl WasmFirmModel {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmFirmModel, JsValue> {
        console_error_panic_hook::set_once();
        // Already set when a second model is constructed.
        #[cfg(target_arch = "wasm32")]
        tracing_wasm::try_set_as_global_default().ok();

        let config = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            let config: EngineConfig = from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
            config
                .validate()
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
            config
        };

        Ok(WasmFirmModel {
            engine: ModelEngine::new(config),
            params: Parameters::default(),
        })
    }

    pub fn set_parameters(&mut self, fc: f64, a: f64, b: f64, c: f64, p: f64) {
        self.params = Parameters::new(fc, a, b, c, p);
    }

    /// Sets one parameter from a slider and returns the value actually stored.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<f64, JsValue> {
        apply_parameter(&mut self.params, name, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn parameters(&self) -> Result<JsValue, JsValue> {
        to_value(&self.params).map_err(serialization_error)
    }

    pub fn reset(&mut self) {
        self.params = Parameters::default();
    }

    pub fn compute(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self.engine.compute(self.params);
        to_value(&build_payload(snapshot)).map_err(serialization_error)
    }

    pub fn q_values(&mut self) -> Float64Array {
        let snapshot = self.engine.compute(self.params);
        Float64Array::from(snapshot.series.q_values().as_slice())
    }

    pub fn curve_values(&mut self, name: &str) -> Result<Float64Array, JsValue> {
        let curve: Curve = name
            .parse()
            .map_err(|e: ChartError| JsValue::from_str(&e.to_string()))?;
        let snapshot = self.engine.compute(self.params);
        Ok(Float64Array::from(curve_values(&snapshot.series, curve).as_slice()))
    }
}

#[wasm_bindgen]
pub fn parameter_descriptors() -> Result<JsValue, JsValue> {
    to_value(&core_descriptors()).map_err(serialization_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_parameter_snaps_and_stores() {
        let mut params = Parameters::default();
        let stored = apply_parameter(&mut params, "b", 1.237).expect("known parameter");
        assert_eq!(stored, 1.24);
        assert_eq!(params.b, 1.24);

        let stored = apply_parameter(&mut params, "FC", 42.0).expect("known parameter");
        assert_eq!(stored, 20.0);
        assert_eq!(params.fc, 20.0);
    }

    #[test]
    fn apply_parameter_rejects_unknown_names() {
        let mut params = Parameters::default();
        let err = apply_parameter(&mut params, "d", 1.0).unwrap_err();
        assert_eq!(err, ParameterError::UnknownParameter("d".to_string()));
        assert_eq!(params, Parameters::default());

        assert!(apply_parameter(&mut params, "p", f64::INFINITY).is_err());
        assert_eq!(params.p, 5.0);
    }
}
