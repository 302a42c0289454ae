//! Application shell: owns the simulation state, throttles the tick
//! cadence, pumps assets and input, and fires the render trigger.
//!
//! The shell is deliberately host-agnostic. A windowed host would forward
//! device events into the [`InputState`] and draw from the render hook; the
//! bundled demo does the same thing with a scripted input pump. Either
//! way the simulation only ever sees one input sample, one advance, and
//! one render call per tick.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::assets::{AssetSlot, load_async};
use crate::benchmarks::{BenchmarkConfig, Profiler};
use crate::config::TuningConfig;
use crate::game::keys::InputState;
use crate::game::score::{HIGH_SCORE_CAPACITY, HIGH_SCORE_KEY, HighScoreTable, ScoreStore};
use crate::game::{SimulationState, TickReport};
use crate::maze::{self, Level};

/// Callback fired once per tick with the committed world state.
pub type RenderHook = Box<dyn FnMut(&SimulationState, &TickReport)>;

/// The tick driver.
///
/// Construction kicks off the level load in the background; the loop runs
/// ticks no faster than the configured interval and tolerates assets that
/// have not arrived yet.
pub struct App {
    pub state: SimulationState,
    pub input: InputState,
    profiler: Profiler,
    level_slot: Option<AssetSlot<Level>>,
    score_store: Box<dyn ScoreStore>,
    render_hook: RenderHook,
    last_tick: Instant,
}

impl App {
    /// Builds the shell and starts loading the default level.
    pub fn new(config: TuningConfig, score_store: Box<dyn ScoreStore>, render_hook: RenderHook) -> Self {
        let high_scores =
            HighScoreTable::load_or_default(score_store.as_ref(), HIGH_SCORE_KEY, HIGH_SCORE_CAPACITY);
        let state = SimulationState::new(config, high_scores);
        Self {
            state,
            input: InputState::new(),
            profiler: Profiler::new(BenchmarkConfig::default()),
            level_slot: Some(load_async(maze::default_level)),
            score_store,
            render_hook,
            last_tick: Instant::now(),
        }
    }

    /// Same as [`App::new`] but with a level supplied directly, skipping
    /// the background load.
    pub fn with_level(
        config: TuningConfig,
        score_store: Box<dyn ScoreStore>,
        render_hook: RenderHook,
        level: Level,
    ) -> Self {
        let mut app = Self::new(config, score_store, render_hook);
        app.level_slot = None;
        let enemy_spawn = level.enemy_spawn;
        app.state.install_level(level);
        app.state.install_enemy(enemy_spawn);
        app
    }

    /// Installs freshly arrived assets, if any.
    fn pump_assets(&mut self) {
        let Some(slot) = self.level_slot.as_mut() else {
            return;
        };
        if slot.poll().is_none() {
            return;
        }
        if let Some(level) = self.level_slot.take().and_then(AssetSlot::into_inner) {
            let enemy_spawn = level.enemy_spawn;
            self.state.install_level(level);
            // The enemy rig arrives with the level here; a host with a
            // slower rig load would leave the enemy unset and pursuit
            // skipped until it lands.
            self.state.install_enemy(enemy_spawn);
        }
    }

    /// Runs exactly one tick: assets, edges, advance, render.
    pub fn tick_once(&mut self) -> TickReport {
        self.profiler.start_section("tick");

        self.profiler.start_section("asset_pump");
        self.pump_assets();
        self.profiler.end_section("asset_pump");

        if self.input.take_begin() {
            self.state.begin();
        }
        if self.input.take_palette_cycle() {
            let mut rng = rand::thread_rng();
            self.state.cycle_palette(&mut rng);
            debug!("light palette now {:?}", self.state.light.color);
        }

        self.profiler.start_section("advance");
        let report = self.state.advance(self.input.direction_flags());
        self.profiler.end_section("advance");

        if report.caught {
            // A run just ended; flush the table while it is fresh and drop
            // any held movement so the next run starts from rest.
            self.state
                .high_scores
                .persist(self.score_store.as_ref(), HIGH_SCORE_KEY);
            self.input.clear();
        }

        self.profiler.start_section("render");
        (self.render_hook)(&self.state, &report);
        self.profiler.end_section("render");

        self.profiler.end_section("tick");
        report
    }

    /// Sleeps out the remainder of the tick interval.
    ///
    /// The cadence is "no faster than": a tick that overruns its slot is
    /// followed immediately by the next one, with no catch-up bursts.
    fn throttle(&mut self) {
        let interval = Duration::from_millis(self.state.config.tick_interval_ms());
        let elapsed = self.last_tick.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
        self.last_tick = Instant::now();
    }

    /// Drives the loop until the input pump asks to stop.
    ///
    /// `pump_input` is called once per iteration, before the input flags
    /// are sampled, with a monotone iteration counter; returning false
    /// ends the loop. The counter keeps climbing even while the session
    /// idles on the title screen, so a bounded pump always terminates.
    pub fn run<F>(&mut self, mut pump_input: F)
    where
        F: FnMut(u64, &mut InputState) -> bool,
    {
        info!("tick loop starting");
        self.last_tick = Instant::now();
        let mut iteration: u64 = 0;
        loop {
            if !pump_input(iteration, &mut self.input) {
                break;
            }
            self.tick_once();
            self.throttle();
            iteration += 1;
        }
        self.shutdown();
    }

    /// Final flush on the way out.
    fn shutdown(&mut self) {
        info!(
            "tick loop stopped after {} ticks, best score {:?}",
            self.state.tick,
            self.state.high_scores.best()
        );
        self.state
            .high_scores
            .persist(self.score_store.as_ref(), HIGH_SCORE_KEY);

        if !cfg!(test) && self.profiler.writes_to_file() {
            match crate::benchmarks::save_results() {
                Ok(path) => info!("profile written to {}", path.display()),
                Err(err) => info!("profile not written: {err}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CurrentScreen;
    use crate::game::keys::GameKey;
    use crate::game::score::ScoreStoreError;

    struct NullStore;

    impl ScoreStore for NullStore {
        fn load(&self, _key: &str) -> Result<Vec<u32>, ScoreStoreError> {
            Ok(Vec::new())
        }
        fn save(&self, _key: &str, _scores: &[u32]) -> Result<(), ScoreStoreError> {
            Ok(())
        }
    }

    fn test_app() -> App {
        let mut config = TuningConfig::default();
        config.set_tick_interval_ms(16);
        App::with_level(
            config,
            Box::new(NullStore),
            Box::new(|_, _| {}),
            maze::default_level(),
        )
    }

    /// The begin edge moves the session from title to game.
    #[test]
    fn begin_edge_starts_the_run() {
        let mut app = test_app();
        assert_eq!(app.state.screen, CurrentScreen::Title);

        app.input.press_key(GameKey::Begin);
        app.tick_once();
        assert_eq!(app.state.screen, CurrentScreen::Game);
    }

    /// The render hook fires once per tick, begun or not.
    #[test]
    fn render_hook_fires_every_tick() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicU32, Ordering};

        let calls = Arc::new(AtomicU32::new(0));
        let hook_calls = Arc::clone(&calls);
        let mut app = App::with_level(
            TuningConfig::default(),
            Box::new(NullStore),
            Box::new(move |_, _| {
                hook_calls.fetch_add(1, Ordering::Relaxed);
            }),
            maze::default_level(),
        );

        for _ in 0..4 {
            app.tick_once();
        }
        assert_eq!(calls.load(Ordering::Relaxed), 4);
    }

    /// Ticks before the background level arrives are harmless.
    #[test]
    fn pending_level_is_tolerated() {
        let mut config = TuningConfig::default();
        config.set_tick_interval_ms(16);
        let mut app = App::new(config, Box::new(NullStore), Box::new(|_, _| {}));

        app.input.press_key(GameKey::Begin);
        app.tick_once();
        // Whether or not the loader has finished by now, the tick went
        // through and the session is live.
        assert_eq!(app.state.screen, CurrentScreen::Game);
    }

    /// The scripted run loop stops when the pump says so.
    #[test]
    fn run_loop_honors_the_pump() {
        let mut app = test_app();
        app.run(|tick, input| {
            if tick == 0 {
                input.press_key(GameKey::Begin);
                input.press_key(GameKey::MoveForward);
            }
            tick < 5
        });
        assert!(app.state.tick >= 5);
    }
}
