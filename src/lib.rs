//! Chroma Dash - a one-button color-matching runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, game phase)
//! - `highscores`: Session score and the persisted best score
//! - `persistence`: Durable key-value storage for the best score
//! - `settings`: Data-driven tuning and preferences
//! - `platform`: Stepper, presentation sink and browser bridge
//! - `runner`: Host-facing game loop wiring all of the above

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;

pub use highscores::ScoreTracker;
pub use runner::Runner;
pub use settings::{Settings, Tuning};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the stepper accepts (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport dimensions (portrait phone)
    pub const VIEW_WIDTH: f32 = 360.0;
    pub const VIEW_HEIGHT: f32 = 640.0;

    /// Player defaults - the runner stays on a single lane
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_Y: f32 = 320.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 120.0;

    /// Runner speed along +x (units/s)
    pub const RUN_SPEED: f32 = 200.0;
    /// Obstacle speed along -x (units/s, world frame)
    pub const OBSTACLE_SPEED: f32 = 200.0;

    /// Seconds between obstacle spawns
    pub const SPAWN_INTERVAL: f32 = 0.9;
    /// Obstacles appear this far ahead of the player
    pub const SPAWN_OFFSET: f32 = 400.0;
    /// Obstacles further than this behind the player are evicted
    pub const DESPAWN_DISTANCE: f32 = 200.0;
}

/// Number of colors shared by the runner and obstacles
pub const PALETTE_SIZE: u8 = 3;

/// A named palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteColor {
    pub name: &'static str,
    /// 0xRRGGBB
    pub rgb: u32,
}

/// Fixed ordered palette
pub const PALETTE: [PaletteColor; PALETTE_SIZE as usize] = [
    PaletteColor {
        name: "red",
        rgb: 0xff4757,
    },
    PaletteColor {
        name: "blue",
        rgb: 0x1e90ff,
    },
    PaletteColor {
        name: "green",
        rgb: 0x2ed573,
    },
];

/// Index into [`PALETTE`], always in `[0, PALETTE_SIZE)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColorIndex(u8);

impl ColorIndex {
    /// First palette entry; every session starts here
    pub const FIRST: ColorIndex = ColorIndex(0);

    pub fn new(index: u8) -> Option<Self> {
        (index < PALETTE_SIZE).then_some(Self(index))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Next color, wrapping back to the first
    #[inline]
    pub fn next(self) -> Self {
        Self((self.0 + 1) % PALETTE_SIZE)
    }

    /// Uniform draw over the palette
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(0..PALETTE_SIZE))
    }

    pub fn color(self) -> PaletteColor {
        PALETTE[self.0 as usize]
    }
}

impl TryFrom<u8> for ColorIndex {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or_else(|| format!("color index {} out of range", index))
    }
}

impl From<ColorIndex> for u8 {
    fn from(index: ColorIndex) -> u8 {
        index.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_color_index_bounds() {
        assert!(ColorIndex::new(0).is_some());
        assert!(ColorIndex::new(PALETTE_SIZE - 1).is_some());
        assert!(ColorIndex::new(PALETTE_SIZE).is_none());
    }

    #[test]
    fn test_color_index_wraps() {
        let last = ColorIndex::new(PALETTE_SIZE - 1).unwrap();
        assert_eq!(last.next(), ColorIndex::FIRST);
    }

    #[test]
    fn test_random_color_covers_palette() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; PALETTE_SIZE as usize];
        for _ in 0..200 {
            seen[ColorIndex::random(&mut rng).get() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_color_index_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<ColorIndex>("2").is_ok());
        assert!(serde_json::from_str::<ColorIndex>("3").is_err());
    }
}
