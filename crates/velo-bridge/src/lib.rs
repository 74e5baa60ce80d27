//! JSON message bridge between a UI host and the configurator session.
//!
//! Native hosts call [`dispatch`] with typed messages or [`process_json`] with
//! raw JSON. On `wasm32` the same entry points are exported to a web worker
//! through `wasm-bindgen`.

pub mod dispatch;
pub mod engine_state;
pub mod messages;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use dispatch::{dispatch, process_json};
pub use engine_state::{BridgeError, EngineState};
pub use messages::{EngineToUi, UiToEngine};
