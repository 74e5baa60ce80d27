//! WASM entry points for the web worker.
//!
//! Only compiled for `wasm32`. JavaScript calls [`init`] once, then sends
//! JSON messages through [`process_message`].

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::dispatch::{encode, process_json};
use crate::engine_state::EngineState;
use crate::messages::EngineToUi;

// Single-threaded in the web worker.
thread_local! {
    static ENGINE_STATE: RefCell<Option<EngineState>> = RefCell::new(None);
}

/// Initialize the session. `config_json` is an `EngineConfig` as JSON, or an
/// empty string for the defaults. Returns an error string on failure and an
/// empty string on success.
#[wasm_bindgen]
pub fn init(config_json: &str) -> String {
    console_error_panic_hook::set_once();

    match EngineState::from_config_json(config_json) {
        Ok(state) => {
            ENGINE_STATE.with(|cell| *cell.borrow_mut() = Some(state));
            web_sys::console::log_1(&"velo engine initialized".into());
            String::new()
        }
        Err(e) => e.to_string(),
    }
}

/// Process a JSON `UiToEngine` message and return a JSON `EngineToUi`
/// response.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    ENGINE_STATE.with(|cell| match cell.borrow_mut().as_mut() {
        Some(state) => process_json(state, json_input),
        None => encode(&EngineToUi::Error {
            message: "Engine not initialized. Call init() first.".to_string(),
        }),
    })
}

/// Whether the next cycle has anything to do. Frame loops poll this before
/// sending `DrainAndResolve`.
#[wasm_bindgen]
pub fn has_pending_work() -> bool {
    ENGINE_STATE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|state| state.configurator.has_pending_work())
            .unwrap_or(false)
    })
}
