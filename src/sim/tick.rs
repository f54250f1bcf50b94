//! Fixed timestep simulation tick and player actions
//!
//! Per Running tick: motion, spawn clock, collision resolution, cleanup.
//! Collisions always see post-motion positions.

use rand::RngCore;

use super::collision::resolve_collisions;
use super::spawner::tick_spawner;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start the session (start control)
    pub start: bool,
    /// Cycle the runner's color (tap)
    pub cycle_color: bool,
    /// Begin a fresh session after game over (play again control)
    pub restart: bool,
    /// Single overloaded tap: start, cycle or restart depending on phase
    pub activate: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Idle -> Running. No-op in any other phase.
pub fn start(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Idle {
        return false;
    }
    state.phase = GamePhase::Running;
    state.player.vel_x = state.tuning.run_speed;
    state.spawner.reset();
    state.events.push(GameEvent::Started);
    log::info!("Session started (seed {})", state.seed);
    true
}

/// Advance the runner's color. No-op unless Running.
pub fn cycle_color(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }
    let color = state.player.color.next();
    state.player.color = color;
    state.events.push(GameEvent::ColorChanged { color });
    true
}

/// GameOver -> fresh session at Idle. No-op in any other phase.
///
/// Everything is rebuilt except the best score, undrained events and a
/// not-yet-persisted record. The next seed comes from the current generator
/// so multi-session runs stay reproducible.
pub fn restart(state: &mut GameState) -> bool {
    if state.phase != GamePhase::GameOver {
        return false;
    }
    let seed = state.rng.next_u64();
    let best = state.scores.best();
    let scores = state.scores.next_session();
    let mut events = std::mem::take(&mut state.events);
    let tuning = state.tuning.clone();
    *state = GameState::with_tuning(seed, tuning, best);
    state.scores = scores;
    events.push(GameEvent::Restarted);
    state.events = events;
    log::info!("Session restarted (seed {}, best {})", seed, best);
    true
}

/// One tap: start from Idle, cycle while Running, restart after GameOver
pub fn activate(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Idle => start(state),
        GamePhase::Running => cycle_color(state),
        GamePhase::GameOver => restart(state),
    }
}

/// Move the runner forward and every obstacle backward. Running only.
pub fn advance_motion(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.player.pos.x += state.player.vel_x * dt;
    let step = state.tuning.obstacle_speed * dt;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= step;
    }
}

/// Evict obstacles too far behind the runner. Running only.
pub fn cleanup_obstacles(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    let limit = state.player.pos.x - state.tuning.despawn_distance;
    let events = &mut state.events;
    state.obstacles.retain(|o| {
        let keep = o.pos.x >= limit;
        if !keep {
            events.push(GameEvent::ObstacleDespawned { id: o.id });
        }
        keep
    });
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    if input.restart {
        restart(state);
    }
    if input.start {
        start(state);
    }
    if input.cycle_color {
        cycle_color(state);
    }
    if input.activate {
        activate(state);
    }

    // A zero dt only applies actions
    if state.phase != GamePhase::Running || dt <= 0.0 {
        return;
    }

    state.time_ticks += 1;
    advance_motion(state, dt);
    tick_spawner(state, dt);
    resolve_collisions(state);
    cleanup_obstacles(state);
}

/// Demo driver: starts the run and matches the next obstacle's color
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Idle => input.start = true,
        GamePhase::Running => {
            let player = state.player.bounds();
            let next = state
                .obstacles
                .iter()
                .filter(|o| o.bounds().max.x > player.min.x)
                .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
            if let Some(obstacle) = next {
                if obstacle.color != state.player.color {
                    input.cycle_color = true;
                }
            }
        }
        GamePhase::GameOver => {}
    }
}
