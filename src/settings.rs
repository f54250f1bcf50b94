//! Game settings and tuning
//!
//! Defaults are the constants in `crate::consts`. Settings are read from a JSON
//! file on native and from LocalStorage in the browser.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::StorageError;

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Runner speed along +x once started (units/s)
    pub run_speed: f32,
    /// Obstacle speed along -x (units/s)
    pub obstacle_speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Spawn distance ahead of the runner
    pub spawn_offset: f32,
    /// Eviction distance behind the runner
    pub despawn_distance: f32,
    /// Runner center at session start
    pub player_start: Vec2,
    pub player_size: Vec2,
    pub obstacle_size: Vec2,
    /// Spawn from the internal accumulator. Disable when the host drives
    /// spawning through its own timer.
    pub auto_spawn: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            run_speed: RUN_SPEED,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            spawn_offset: SPAWN_OFFSET,
            despawn_distance: DESPAWN_DISTANCE,
            player_start: Vec2::new(PLAYER_X, PLAYER_Y),
            player_size: Vec2::splat(PLAYER_SIZE),
            obstacle_size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            auto_spawn: true,
        }
    }
}

impl Tuning {
    /// Replace unusable values (NaN, zero or negative) with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn positive(value: f32, fallback: f32) -> f32 {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                log::warn!("Ignoring tuning value {}, using {}", value, fallback);
                fallback
            }
        }

        fn positive_size(size: Vec2, fallback: Vec2) -> Vec2 {
            Vec2::new(positive(size.x, fallback.x), positive(size.y, fallback.y))
        }

        self.run_speed = positive(self.run_speed, defaults.run_speed);
        self.obstacle_speed = positive(self.obstacle_speed, defaults.obstacle_speed);
        self.spawn_interval = positive(self.spawn_interval, defaults.spawn_interval);
        self.spawn_offset = positive(self.spawn_offset, defaults.spawn_offset);
        self.despawn_distance = positive(self.despawn_distance, defaults.despawn_distance);
        self.player_size = positive_size(self.player_size, defaults.player_size);
        self.obstacle_size = positive_size(self.obstacle_size, defaults.obstacle_size);
        if !self.player_start.is_finite() {
            self.player_start = defaults.player_start;
        }
        self
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    /// Suppress sound cues
    pub muted: bool,
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "chroma_dash_settings";

    /// Parse settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.sanitized();
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        let parsed = std::fs::read_to_string(path)
            .map_err(StorageError::from)
            .and_then(|json| Self::from_json(&json));

        match parsed {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        use crate::persistence::{KeyValueStore, LocalStore};

        let json = LocalStore::open().and_then(|store| store.get(Self::STORAGE_KEY));
        match json {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Stored settings unreadable: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("LocalStorage unavailable: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        use crate::persistence::{KeyValueStore, LocalStore};

        let saved = serde_json::to_string(self)
            .map_err(StorageError::from)
            .and_then(|json| LocalStore::open()?.set(Self::STORAGE_KEY, &json));
        match saved {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}
