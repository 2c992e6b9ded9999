//! Browser bindings for a Rootwords session.
//!
//! The page owns the DOM: it forwards pointer events in ring coordinates,
//! fetches the word list from `get_dictionary_url()` once and hands the text
//! to `session_load_dictionary`, then draws from `get_snapshot_json()` after
//! each `session_tick()`.

pub mod runner;

pub use runner::SessionRunner;

use std::cell::RefCell;

use rootwords::InputEvent;
use wasm_bindgen::prelude::*;

use crate::runner::{config_from_json, select_node_event};

thread_local! {
    static RUNNER: RefCell<Option<SessionRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut SessionRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Session not initialized. Call session_init() first.");
        f(runner)
    })
}

/// Start a session. `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn session_init(config_json: &str, letters: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SessionRunner::new(config_from_json(config_json), letters);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("rootwords: initialized");
}

#[wasm_bindgen]
pub fn session_tick() {
    with_runner(|r| r.tick());
}

/// The `letters` attribute changed: restart the session on the new ring.
#[wasm_bindgen]
pub fn session_set_letters(letters: &str) {
    with_runner(|r| r.reconfigure(letters));
}

/// Returns the number of words loaded (0 if the list was already loaded).
#[wasm_bindgen]
pub fn session_load_dictionary(text: &str) -> u32 {
    with_runner(|r| r.load_dictionary(text))
}

// ---- Input ----

#[wasm_bindgen]
pub fn session_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn session_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn session_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn session_commit() {
    with_runner(|r| r.push_input(InputEvent::ActivateCommit));
}

#[wasm_bindgen]
pub fn session_cancel() {
    with_runner(|r| r.push_input(InputEvent::CancelGesture));
}

#[wasm_bindgen]
pub fn session_select_node(node: u32) {
    with_runner(|r| r.push_input(select_node_event(node)));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_snapshot_json() -> String {
    with_runner(|r| r.snapshot_json())
}

#[wasm_bindgen]
pub fn get_score() -> f64 {
    with_runner(|r| r.score())
}

#[wasm_bindgen]
pub fn get_current_node() -> u32 {
    with_runner(|r| r.current_node())
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len())
}

#[wasm_bindgen]
pub fn get_dictionary_url() -> String {
    with_runner(|r| r.dictionary_url().to_string())
}

#[wasm_bindgen]
pub fn get_dictionary_ready() -> bool {
    with_runner(|r| r.dictionary_ready())
}

#[wasm_bindgen]
pub fn get_used_words() -> js_sys::Array {
    with_runner(|r| r.used_words().into_iter().map(JsValue::from).collect())
}

/// Dictionary words spellable from the ring letters, at least `min_len` long.
#[wasm_bindgen]
pub fn get_hint_words(min_len: u32) -> js_sys::Array {
    with_runner(|r| {
        r.hint_words(min_len as usize)
            .into_iter()
            .map(JsValue::from)
            .collect()
    })
}
