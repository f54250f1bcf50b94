//! Platform abstraction layer
//!
//! Handles the boundary between the simulation and its host:
//! - Time/ticks (fixed timestep stepper)
//! - Presentation sink (events, sound cues)
//! - Browser bridge (wasm32)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::sim::GameEvent;

/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of simulation steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time; returns the number of fixed steps to run
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            steps += 1;
        }
        // Drop whatever the substep cap left behind
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.dt);
        }
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Sounds the core asks the audio sink to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Start,
    Pass,
    GameOver,
    NewRecord,
}

impl SoundCue {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundCue::Start),
            GameEvent::ObstaclePassed { .. } => Some(SoundCue::Pass),
            GameEvent::GameOver {
                new_record: true, ..
            } => Some(SoundCue::NewRecord),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            _ => None,
        }
    }
}

/// Presentation sink: rendering, HUD and audio live behind this
pub trait Presenter {
    /// React to a state transition (HUD, sprites, overlays)
    fn on_event(&mut self, event: &GameEvent);

    /// Play a sound cue
    fn play(&mut self, _cue: SoundCue) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_one_step_exact() {
        let mut ts = FixedTimestep::new(0.01);
        assert_eq!(ts.accumulate(0.01), 1);
    }

    #[test]
    fn test_accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn test_caps_substeps() {
        // Long frames are clamped to MAX_FRAME_DT first
        let mut ts = FixedTimestep::new(1.0 / 64.0);
        assert_eq!(ts.accumulate(10.0), 6);

        let mut ts = FixedTimestep::new(1.0 / 128.0);
        assert_eq!(ts.accumulate(10.0), MAX_SUBSTEPS);
    }

    #[test]
    fn test_ignores_bad_deltas() {
        let mut ts = FixedTimestep::new(SIM_DT);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        // Nothing was banked
        assert_eq!(ts.accumulate(SIM_DT), 1);
    }

    #[test]
    fn test_sound_cues() {
        assert_eq!(SoundCue::for_event(&GameEvent::Started), Some(SoundCue::Start));
        assert_eq!(
            SoundCue::for_event(&GameEvent::GameOver {
                obstacle_id: 1,
                score: 3,
                best_score: 3,
                new_record: true
            }),
            Some(SoundCue::NewRecord)
        );
        assert_eq!(
            SoundCue::for_event(&GameEvent::GameOver {
                obstacle_id: 1,
                score: 0,
                best_score: 3,
                new_record: false
            }),
            Some(SoundCue::GameOver)
        );
        assert_eq!(SoundCue::for_event(&GameEvent::Restarted), None);
    }
}
