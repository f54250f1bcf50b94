//! Durable key-value storage
//!
//! Only the best score is persisted. Stores:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `FileStore`: JSON object file in the user config dir (native)
//! - `LocalStore`: browser LocalStorage (wasm32)

mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod local;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "chroma_dash_best_score";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt value for {key}: {value:?}")]
    Corrupt { key: String, value: String },
}

/// Minimal durable key-value interface
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

fn read_best_score<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<u32>, StorageError> {
    let Some(raw) = store.get(BEST_SCORE_KEY)? else {
        return Ok(None);
    };
    serde_json::from_str::<u32>(&raw)
        .map(Some)
        .map_err(|_| StorageError::Corrupt {
            key: BEST_SCORE_KEY.to_string(),
            value: raw,
        })
}

/// Read the best score. Missing or unreadable records count as 0.
pub fn load_best_score<S: KeyValueStore + ?Sized>(store: &S) -> u32 {
    match read_best_score(store) {
        Ok(Some(best)) => {
            log::info!("Loaded best score {}", best);
            best
        }
        Ok(None) => {
            log::info!("No best score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Best score unreadable, starting fresh: {}", e);
            0
        }
    }
}

/// Write the best score
pub fn save_best_score<S: KeyValueStore + ?Sized>(
    store: &mut S,
    best: u32,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(&best)?;
    store.set(BEST_SCORE_KEY, &json)?;
    log::info!("Best score saved ({})", best);
    Ok(())
}
