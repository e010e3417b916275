//! WASM bindings for the firm model engine.
//!
//! `WasmFirmModel` holds the current slider values and recomputes through the
//! core engine's cache; `payload` shapes a snapshot for the charts.
//!
//! The first model constructed installs `tracing-wasm` as the global
//! subscriber, so engine spans and events appear in the browser console.

mod model;
mod payload;

pub use model::{parameter_descriptors, WasmFirmModel};
