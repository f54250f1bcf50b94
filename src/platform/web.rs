//! Browser bridge (wasm32 only)
//!
//! wasm-bindgen cannot export generic structs, so `WebGame` wraps a
//! `Runner<LocalStore>`. The JS frontend calls `on_tick` from
//! requestAnimationFrame, forwards taps, and pulls JSON snapshots and events
//! to draw the scene and play sounds.

use wasm_bindgen::prelude::*;

use crate::persistence::{KeyValueStore, LocalStore, MemoryStore, StorageError};
use crate::runner::Runner;
use crate::settings::Settings;

/// LocalStorage when available, memory otherwise (private browsing)
enum BrowserStore {
    Local(LocalStore),
    Memory(MemoryStore),
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            BrowserStore::Local(store) => store.get(key),
            BrowserStore::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            BrowserStore::Local(store) => store.set(key, value),
            BrowserStore::Memory(store) => store.set(key, value),
        }
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Chroma Dash starting...");
}

/// Palette as a JSON array of `{ name, rgb }`, indexed by color index
#[wasm_bindgen]
pub fn palette_json() -> String {
    serde_json::to_string(&crate::PALETTE).unwrap_or_default()
}

#[wasm_bindgen]
pub struct WebGame {
    runner: Runner<BrowserStore>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let store = match LocalStore::open() {
            Ok(store) => BrowserStore::Local(store),
            Err(e) => {
                log::warn!("{} - best score will not survive reloads", e);
                BrowserStore::Memory(MemoryStore::new())
            }
        };
        let seed = js_sys::Date::now() as u64;
        WebGame {
            runner: Runner::new(Settings::load(), store, seed),
        }
    }

    /// Frame callback; `dt` in seconds
    pub fn on_tick(&mut self, dt: f32) {
        self.runner.on_tick(dt);
    }

    pub fn on_spawn_timer(&mut self) {
        self.runner.on_spawn_timer();
    }

    pub fn on_activate(&mut self) {
        self.runner.on_activate();
    }

    pub fn start(&mut self) {
        self.runner.start();
    }

    pub fn cycle_color(&mut self) {
        self.runner.cycle_color();
    }

    pub fn restart(&mut self) {
        self.runner.restart();
    }

    /// "idle", "running" or "game_over"
    pub fn phase(&self) -> String {
        self.runner.phase().as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.runner.score()
    }

    pub fn best_score(&self) -> u32 {
        self.runner.best_score()
    }

    pub fn is_new_record(&self) -> bool {
        self.runner.is_new_record()
    }

    pub fn muted(&self) -> bool {
        self.runner.settings().muted
    }

    /// Player snapshot as JSON
    pub fn player_json(&self) -> String {
        serde_json::to_string(self.runner.player()).unwrap_or_default()
    }

    /// Live obstacles as a JSON array
    pub fn obstacles_json(&self) -> String {
        serde_json::to_string(self.runner.obstacles()).unwrap_or_default()
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.runner.drain_events()).unwrap_or_default()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
