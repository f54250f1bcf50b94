//! Collision detection and the color-match rule
//!
//! Runner and obstacles are axis-aligned rectangles. An overlap with a
//! same-colored obstacle consumes it for a point; any overlap with a
//! different color ends the session.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState, Obstacle, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// One runner/obstacle overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Colors agree; the obstacle is consumed
    Match { id: u32 },
    /// Colors differ; the session ends
    Mismatch { id: u32 },
}

/// What collision resolution did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// No overlaps
    Clear,
    /// Matching obstacles consumed (count)
    Passed(u32),
    /// Mismatch; session over
    Crashed { obstacle_id: u32 },
}

/// All current overlaps, in obstacle order
pub fn find_contacts(player: &Player, obstacles: &[Obstacle]) -> Vec<Contact> {
    let bounds = player.bounds();
    obstacles
        .iter()
        .filter(|o| bounds.overlaps(&o.bounds()))
        .map(|o| {
            if o.color == player.color {
                Contact::Match { id: o.id }
            } else {
                Contact::Mismatch { id: o.id }
            }
        })
        .collect()
}

/// Apply the match rule to every overlap. No-op outside `Running`.
///
/// A single mismatch ends the session even when matching obstacles overlap
/// in the same tick; those are then left untouched.
pub fn resolve_collisions(state: &mut GameState) -> CollisionOutcome {
    if state.phase != GamePhase::Running {
        return CollisionOutcome::Clear;
    }

    let contacts = find_contacts(&state.player, &state.obstacles);
    if contacts.is_empty() {
        return CollisionOutcome::Clear;
    }

    if let Some(obstacle_id) = contacts.iter().find_map(|c| match c {
        Contact::Mismatch { id } => Some(*id),
        Contact::Match { .. } => None,
    }) {
        end_session(state, obstacle_id);
        return CollisionOutcome::Crashed { obstacle_id };
    }

    let mut passed = 0;
    for contact in contacts {
        if let Contact::Match { id } = contact {
            let before = state.obstacles.len();
            state.obstacles.retain(|o| o.id != id);
            if state.obstacles.len() < before {
                let score = state.scores.record_pass();
                state.events.push(GameEvent::ObstaclePassed { id, score });
                log::debug!("Passed obstacle {} (score {})", id, score);
                passed += 1;
            }
        }
    }
    CollisionOutcome::Passed(passed)
}

/// Running -> GameOver: freeze motion and settle the record
fn end_session(state: &mut GameState, obstacle_id: u32) {
    state.phase = GamePhase::GameOver;
    state.player.vel_x = 0.0;

    let new_record = state.scores.finalize();
    let score = state.scores.score();
    let best_score = state.scores.best();
    state.events.push(GameEvent::GameOver {
        obstacle_id,
        score,
        best_score,
        new_record,
    });

    if new_record {
        log::info!("Game over: score {} - new record!", score);
    } else {
        log::info!("Game over: score {} (best {})", score, best_score);
    }
}
