//! Chroma Dash entry point
//!
//! The browser build is driven from JS through `platform::web`. Natively this
//! binary runs the simulation headless in attract mode and logs each session.
//!
//! Environment:
//! - `CHROMA_DASH_SETTINGS`: path to a settings JSON file
//! - `CHROMA_DASH_SECONDS`: simulated seconds to run (default 60)
//! - `RUST_LOG`: log filter (env_logger)

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use chroma_dash::consts::SIM_DT;
    use chroma_dash::persistence::FileStore;
    use chroma_dash::platform::{Presenter, SoundCue};
    use chroma_dash::sim::{GameEvent, GamePhase, TickInput};
    use chroma_dash::{Runner, Settings};

    const DEFAULT_SECONDS: f32 = 60.0;

    /// Logs what a real frontend would draw and play
    #[derive(Default)]
    struct LogPresenter {
        sessions: u32,
        passes: u32,
    }

    impl Presenter for LogPresenter {
        fn on_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Started => self.sessions += 1,
                GameEvent::ObstaclePassed { .. } => self.passes += 1,
                GameEvent::GameOver {
                    score,
                    best_score,
                    new_record,
                    ..
                } => log::info!(
                    "Session {} over: score {}, best {}{}",
                    self.sessions,
                    score,
                    best_score,
                    if *new_record { " (new record)" } else { "" }
                ),
                _ => {}
            }
        }

        fn play(&mut self, cue: SoundCue) {
            log::debug!("Sound: {:?}", cue);
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Chroma Dash (native, headless) starting...");

        let settings = match std::env::var("CHROMA_DASH_SETTINGS") {
            Ok(path) => Settings::load_from(std::path::Path::new(&path)),
            Err(_) => Settings::default(),
        };
        let seconds = std::env::var("CHROMA_DASH_SECONDS")
            .ok()
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(DEFAULT_SECONDS);

        let store = FileStore::in_config_dir();
        log::info!("Best score stored in {}", store.path().display());

        let seed = rand::random::<u64>();
        let mut runner = Runner::new(settings, store, seed);
        let mut presenter = LogPresenter::default();
        let demo = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let frames = (seconds / SIM_DT).ceil() as u64;
        for _ in 0..frames {
            if runner.phase() == GamePhase::GameOver {
                runner.restart();
            }
            runner.apply(&demo);
            runner.on_tick(SIM_DT);
            runner.present(&mut presenter);
        }

        log::info!(
            "Ran {:.0}s: {} session(s), {} obstacle(s) passed, score {}, best {}",
            seconds,
            presenter.sessions,
            presenter.passes,
            runner.score(),
            runner.best_score()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
