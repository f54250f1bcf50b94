//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio, storage or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionOutcome, Contact, find_contacts, resolve_collisions};
pub use spawner::{Spawner, spawn_obstacle};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player};
pub use tick::{
    TickInput, activate, advance_motion, cleanup_obstacles, cycle_color, restart, start, tick,
};
