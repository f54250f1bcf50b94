//! Game state and core simulation types
//!
//! One `GameState` is one session: the runner, the live obstacles, the score
//! and the phase. Nothing outside `sim` mutates it directly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Aabb;
use super::spawner::Spawner;
use crate::highscores::ScoreTracker;
use crate::settings::Tuning;
use crate::ColorIndex;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Waiting for the start action; nothing moves
    Idle,
    /// Motion, spawning and collisions active
    Running,
    /// Session ended on a color mismatch; waiting for restart
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// The runner
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub color: ColorIndex,
    /// Horizontal velocity (0 until the session starts)
    pub vel_x: f32,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            color: ColorIndex::FIRST,
            vel_x: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// A colored gate scrolling toward the runner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub color: ColorIndex,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Observable transitions, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Started,
    ColorChanged { color: ColorIndex },
    ObstacleSpawned { id: u32, color: ColorIndex },
    /// Matching obstacle consumed
    ObstaclePassed { id: u32, score: u32 },
    /// Obstacle evicted behind the runner
    ObstacleDespawned { id: u32 },
    GameOver {
        /// Obstacle that ended the run
        obstacle_id: u32,
        score: u32,
        best_score: u32,
        new_record: bool,
    },
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) tuning: Tuning,
    pub(crate) phase: GamePhase,
    pub(crate) player: Player,
    /// Live obstacles, in spawn order
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) scores: ScoreTracker,
    pub(crate) spawner: Spawner,
    /// Simulation tick counter (Running ticks only)
    pub time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New session at `Idle` with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default(), 0)
    }

    /// New session at `Idle`
    pub fn with_tuning(seed: u64, tuning: Tuning, best_score: u32) -> Self {
        let player = Player::new(tuning.player_start, tuning.player_size);
        let spawner = Spawner::new(tuning.spawn_interval);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Idle,
            player,
            obstacles: Vec::new(),
            scores: ScoreTracker::new(best_score),
            spawner,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// The runner's active color
    pub fn current_color(&self) -> ColorIndex {
        self.player.color
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best()
    }

    pub fn is_new_record(&self) -> bool {
        self.scores.is_new_record()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    pub(crate) fn scores_mut(&mut self) -> &mut ScoreTracker {
        &mut self.scores
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let state = GameState::new(1);
        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.score(), 0);
        assert_eq!(state.best_score(), 0);
        assert!(!state.is_new_record());
        assert_eq!(state.current_color(), ColorIndex::FIRST);
        assert!(state.obstacles().is_empty());
        assert_eq!(state.player().pos, Vec2::new(PLAYER_X, PLAYER_Y));
        assert_eq!(state.player().vel_x, 0.0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_string(&GameEvent::ObstaclePassed { id: 4, score: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"obstacle_passed","id":4,"score":2}"#);
    }
}
