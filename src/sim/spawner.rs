//! Obstacle spawning
//!
//! Spawning runs on its own cadence, independent of the motion tick, modeled
//! as an accumulator advanced by the simulation dt.

use super::state::{GameEvent, GamePhase, GameState, Obstacle};
use crate::ColorIndex;

/// Fixed-interval spawn clock
#[derive(Debug, Clone)]
pub struct Spawner {
    interval: f32,
    elapsed: f32,
}

impl Spawner {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Time accumulated toward the next spawn
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the clock; returns how many spawns came due
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        due
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Spawn one obstacle ahead of the runner on its lane.
///
/// Returns the new obstacle's id, or `None` outside `Running`.
pub fn spawn_obstacle(state: &mut GameState) -> Option<u32> {
    if state.phase != GamePhase::Running {
        return None;
    }

    let color = ColorIndex::random(&mut state.rng);
    let id = state.next_entity_id();
    let pos = state.player.pos + glam::Vec2::new(state.tuning.spawn_offset, 0.0);
    state.obstacles.push(Obstacle {
        id,
        pos,
        size: state.tuning.obstacle_size,
        color,
    });
    state.events.push(GameEvent::ObstacleSpawned { id, color });
    log::debug!("Spawned obstacle {} ({}) at x={}", id, color.color().name, pos.x);
    Some(id)
}

/// Run the spawn clock for one tick
pub(crate) fn tick_spawner(state: &mut GameState, dt: f32) {
    if !state.tuning.auto_spawn {
        return;
    }
    let due = state.spawner.advance(dt);
    for _ in 0..due {
        spawn_obstacle(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(3);
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_spawner_fires_on_interval() {
        let mut spawner = Spawner::new(0.9);
        assert_eq!(spawner.advance(0.5), 0);
        assert_eq!(spawner.advance(0.5), 1);
        assert!((spawner.elapsed() - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_spawner_catches_up_on_long_step() {
        let mut spawner = Spawner::new(0.9);
        assert_eq!(spawner.advance(2.0), 2);
    }

    #[test]
    fn test_spawn_ahead_of_player() {
        let mut state = running_state();
        let id = spawn_obstacle(&mut state).unwrap();
        let obstacle = &state.obstacles()[0];
        assert_eq!(obstacle.id, id);
        assert_eq!(obstacle.pos.x, PLAYER_X + SPAWN_OFFSET);
        assert_eq!(obstacle.pos.y, PLAYER_Y);
        assert_eq!(obstacle.size.x, OBSTACLE_WIDTH);
        assert_eq!(obstacle.size.y, OBSTACLE_HEIGHT);
        assert_eq!(
            state.events(),
            &[GameEvent::ObstacleSpawned {
                id,
                color: obstacle.color
            }]
        );
    }

    #[test]
    fn test_no_spawn_outside_running() {
        let mut state = GameState::new(3);
        assert_eq!(spawn_obstacle(&mut state), None);
        state.phase = GamePhase::GameOver;
        assert_eq!(spawn_obstacle(&mut state), None);
        assert!(state.obstacles().is_empty());
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_same_seed_same_colors() {
        let mut a = running_state();
        let mut b = running_state();
        for _ in 0..20 {
            spawn_obstacle(&mut a);
            spawn_obstacle(&mut b);
        }
        let colors_a: Vec<_> = a.obstacles().iter().map(|o| o.color).collect();
        let colors_b: Vec<_> = b.obstacles().iter().map(|o| o.color).collect();
        assert_eq!(colors_a, colors_b);
    }

    #[test]
    fn test_auto_spawn_disabled() {
        let mut state = running_state();
        state.tuning.auto_spawn = false;
        tick_spawner(&mut state, 5.0);
        assert!(state.obstacles().is_empty());
    }
}
