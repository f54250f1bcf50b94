//! Host-facing game loop
//!
//! `Runner` is what a frontend talks to: it feeds frame time through the
//! fixed-timestep stepper, forwards user actions, exposes read-only views of
//! the session and keeps the best score in durable storage.

use crate::consts::SIM_DT;
use crate::persistence::{KeyValueStore, load_best_score, save_best_score};
use crate::platform::{FixedTimestep, Presenter, SoundCue};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState, Obstacle, Player, TickInput};

pub struct Runner<S: KeyValueStore> {
    state: GameState,
    stepper: FixedTimestep,
    settings: Settings,
    store: S,
    /// Events already taken off the state, waiting for the host
    pending: Vec<GameEvent>,
}

impl<S: KeyValueStore> Runner<S> {
    /// New runner at `Idle`, best score read from `store`
    pub fn new(settings: Settings, store: S, seed: u64) -> Self {
        let settings = Settings {
            tuning: settings.tuning.sanitized(),
            ..settings
        };
        let best = load_best_score(&store);
        let state = GameState::with_tuning(seed, settings.tuning.clone(), best);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state,
            stepper: FixedTimestep::new(SIM_DT),
            settings,
            store,
            pending: Vec::new(),
        }
    }

    /// Advance by one frame's worth of wall time
    pub fn on_tick(&mut self, frame_dt: f32) {
        let steps = self.stepper.accumulate(frame_dt);
        let input = TickInput::default();
        for _ in 0..steps {
            sim::tick(&mut self.state, &input, self.stepper.dt());
        }
        self.settle();
    }

    /// Host-driven spawn timer. Only spawns while Running, and only when
    /// `auto_spawn` is off so the internal clock is not doubled up.
    pub fn on_spawn_timer(&mut self) {
        if self.state.tuning().auto_spawn {
            log::debug!("Spawn timer ignored: spawning is driven by the tick");
            return;
        }
        sim::spawn_obstacle(&mut self.state);
        self.settle();
    }

    /// Single tap: start, cycle color or restart depending on phase
    pub fn on_activate(&mut self) {
        sim::activate(&mut self.state);
        self.settle();
    }

    pub fn start(&mut self) {
        sim::start(&mut self.state);
        self.settle();
    }

    pub fn cycle_color(&mut self) {
        sim::cycle_color(&mut self.state);
        self.settle();
    }

    pub fn restart(&mut self) {
        sim::restart(&mut self.state);
        self.settle();
    }

    /// Apply the one-shot actions of `input` right away (no time passes)
    pub fn apply(&mut self, input: &TickInput) {
        sim::tick(&mut self.state, input, 0.0);
        self.settle();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        self.state.player()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.state.obstacles()
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn is_new_record(&self) -> bool {
        self.state.is_new_record()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Forward pending events and their sound cues to `presenter`
    pub fn present<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        let muted = self.settings.muted;
        for event in self.drain_events() {
            presenter.on_event(&event);
            if muted {
                continue;
            }
            if let Some(cue) = SoundCue::for_event(&event) {
                presenter.play(cue);
            }
        }
    }

    /// Post-mutation bookkeeping: collect events, persist a new record,
    /// refresh the best score when a new session begins.
    fn settle(&mut self) {
        let events = self.state.drain_events();

        if events.contains(&GameEvent::Restarted) {
            self.stepper.reset();
            let stored = load_best_score(&self.store);
            self.state.scores_mut().merge_stored_best(stored);
        }

        if let Some(best) = self.state.scores_mut().take_unsaved() {
            if let Err(e) = save_best_score(&mut self.store, best) {
                log::warn!("Best score not saved: {}", e);
            }
        }

        self.pending.extend(events);
    }
}
