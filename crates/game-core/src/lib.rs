//! Game engine entry point.
//!
//! One round: an intro countdown, then fish cross the pond while the player
//! taps to throw the hook up, then "TIME UP!" and the summary screen. The
//! simulation runs on a fixed logical timestep fed by the render loop.

mod app;
mod draw;
mod input;

use audio::{AudioManager, Sound};
use bracket_lib::prelude::{
    main_loop, BError, BTerm, BTermBuilder, RandomNumberGenerator,
};
use common::GameResult;
use ecology::Sea;
use fishing::{FishingRod, RodEvent, STUCK_DURATION};
use hud::{calc_score, CountdownBanner, MissBanner, RoundState};
use timing::Countdown;

pub use app::HooklineApp;
pub use input::GameConfig;

const SCREEN_WIDTH: i32 = 80;
const SCREEN_HEIGHT: i32 = 25;
/// Length of one simulation frame.
const FRAME_MS: f32 = 1000.0 / hud::FRAMES_PER_SECOND;
/// Longest wall-clock slice folded into the simulation per render frame.
const MAX_FRAME_MS: f32 = 250.0;
/// How long "TIME UP!" lingers before the summary screen takes over.
const TIME_UP_LINGER: f32 = 2000.0;
const CONFIG_PATH: &str = "hookline.toml";
const BOARD_PATH: &str = "hookline_scores.json";

/// Where a round currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GamePhase {
    /// Intro banner running; input and spawning are off.
    Countdown,
    Playing,
    /// Time is up; everything is inert until the summary screen.
    Finished,
}

/// One play-through of the pond.
pub struct PondGame {
    sea: Sea,
    rod: FishingRod,
    round: RoundState,
    banner: CountdownBanner,
    miss: MissBanner,
    audio: AudioManager,
    rng: RandomNumberGenerator,
    config: GameConfig,
    phase: GamePhase,
    linger: Countdown,
    summary_due: bool,
    accumulator: f32,
}

impl PondGame {
    /// Creates a round from the given configuration.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        Self::with_rng(config, RandomNumberGenerator::new())
    }

    /// Creates a round with a seeded spawn sequence.
    pub fn seeded(config: GameConfig, seed: u64) -> GameResult<Self> {
        Self::with_rng(config, RandomNumberGenerator::seeded(seed))
    }

    fn with_rng(config: GameConfig, rng: RandomNumberGenerator) -> GameResult<Self> {
        let table = {
            #[cfg(target_arch = "wasm32")]
            {
                data::load_species_embedded()?
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/species.json");
                data::load_species(path)?
            }
        };
        Ok(Self {
            sea: Sea::new(table),
            rod: FishingRod::new(),
            round: RoundState::new(config.time_limit),
            banner: CountdownBanner::new(),
            miss: MissBanner::hidden(),
            audio: AudioManager::new(config.volume),
            rng,
            config,
            phase: GamePhase::Countdown,
            linger: Countdown::idle(),
            summary_due: false,
            accumulator: 0.0,
        })
    }

    /// Final (or current) score of this round.
    pub fn final_score(&self) -> i32 {
        self.round.score()
    }

    /// Whether the round is over.
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    /// Whether the "TIME UP!" banner has lingered long enough.
    pub(crate) fn summary_due(&self) -> bool {
        self.summary_due
    }

    /// A tap throws the hook up, once per cycle. Ignored outside active
    /// play and while a cycle is running.
    pub fn on_tap(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.rod.catch_up() {
            self.audio.play(Sound::Splash).ok();
        }
    }

    /// Advances the round by one simulation frame. Returns the final score
    /// exactly once, on the frame the round ends.
    fn step(&mut self) -> Option<i32> {
        match self.phase {
            GamePhase::Countdown => {
                if self.banner.advance(FRAME_MS) {
                    self.phase = GamePhase::Playing;
                    self.sea.start_spawning();
                }
                None
            }
            GamePhase::Playing => {
                if let Some(RodEvent::CatchWindowClosed) = self.rod.advance(FRAME_MS) {
                    self.resolve_catch();
                }
                // collision before the clock: a fish hooked on the final
                // eligible frame still counts
                self.sea.check_hook_collision(&self.rod);
                self.sea.advance(FRAME_MS, &mut self.rng);
                self.sea.follow_captured(&self.rod);
                self.miss.advance(FRAME_MS);
                self.round.update_time();
                if self.round.is_time_up() {
                    self.finish_round();
                    return Some(self.round.score());
                }
                None
            }
            GamePhase::Finished => {
                if self.linger.advance(FRAME_MS) {
                    self.summary_due = true;
                }
                None
            }
        }
    }

    /// The catching window just closed: score the haul, pick the branch,
    /// reel, and clear the hook.
    fn resolve_catch(&mut self) {
        let pattern = self
            .rod
            .pattern_for(self.sea.captured_fish().iter().map(|f| f.spec()));
        let gained = calc_score(self.sea.captured_fish().iter().map(|f| f.spec()));
        self.round.add_score(gained);
        match self.rod.fish(pattern) {
            Some(RodEvent::Stuck) => {
                self.miss = MissBanner::new(STUCK_DURATION);
                self.audio.play(Sound::Miss).ok();
            }
            _ => {
                if !self.sea.captured_fish().is_empty() {
                    self.audio.play(Sound::Catch).ok();
                }
            }
        }
        self.sea.release_captured();
    }

    fn finish_round(&mut self) {
        self.phase = GamePhase::Finished;
        self.sea.stop_spawning();
        self.linger = Countdown::new(TIME_UP_LINGER);
        self.audio.play(Sound::TimeUp).ok();
    }

    /// Routes pointer and key input for one render frame.
    fn handle_input(&mut self, ctx: &mut BTerm) {
        if ctx.left_click {
            self.on_tap();
        }
        if let Some(key) = ctx.key {
            if key == self.config.tap {
                self.on_tap();
            } else if key == self.config.quit {
                ctx.quit();
            }
        }
    }

    /// Render-loop entry: input, fixed-timestep simulation, draw.
    pub fn tick(&mut self, ctx: &mut BTerm) {
        self.handle_input(ctx);
        self.accumulator += ctx.frame_time_ms.min(MAX_FRAME_MS);
        while self.accumulator >= FRAME_MS {
            self.accumulator -= FRAME_MS;
            self.step();
        }
        self.draw(ctx);
    }
}

/// Runs the game loop using `bracket-lib`.
pub fn run() -> BError {
    let config = GameConfig::load(CONFIG_PATH)?;
    let context = BTermBuilder::simple(SCREEN_WIDTH, SCREEN_HEIGHT)?
        .with_title("Hookline")
        .build()?;
    let app = HooklineApp::new(config);
    main_loop(context, app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::FishSpec;
    use ecology::{Fish, SwimPattern, SwimmingStyle};

    fn game(time_limit: i32) -> PondGame {
        let config = GameConfig {
            time_limit,
            ..Default::default()
        };
        PondGame::seeded(config, 0).expect("game")
    }

    fn run_to_playing(game: &mut PondGame) {
        for _ in 0..200 {
            game.step();
            if game.phase == GamePhase::Playing {
                return;
            }
        }
        panic!("countdown never finished");
    }

    /// Steps whole milliseconds' worth of frames.
    fn step_ms(game: &mut PondGame, ms: f32) {
        let frames = (ms / FRAME_MS).ceil() as usize;
        for _ in 0..frames {
            game.step();
        }
    }

    fn slow_crosser(name: &str, score: i32) -> Fish {
        Fish::new(
            FishSpec {
                name: name.into(),
                score,
                weight: 1,
            },
            SwimmingStyle {
                pattern: SwimPattern::LeftToRight,
                // roughly one cell per second: stays near the hook column
                // for several seconds once it gets there
                depth: 8.0,
                swim_time: 90000.0,
            },
        )
    }

    #[test]
    fn round_starts_after_the_countdown() {
        let mut game = game(30);
        assert_eq!(game.phase, GamePhase::Countdown);
        assert!(!game.sea.is_spawning());
        run_to_playing(&mut game);
        assert!(game.sea.is_spawning());
    }

    #[test]
    fn taps_before_the_round_are_ignored() {
        let mut game = game(30);
        game.on_tap();
        assert!(!game.rod.is_fishing());
        run_to_playing(&mut game);
        game.on_tap();
        assert!(game.rod.is_fishing());
    }

    #[test]
    fn tapping_twice_runs_one_cycle() {
        let mut game = game(30);
        run_to_playing(&mut game);
        game.on_tap();
        game.on_tap();
        assert!(game.rod.is_fishing());
        // exactly one window close happens; afterwards the rod reels down
        step_ms(&mut game, fishing::FISHING_DURATION + fishing::FISHING_WAIT_DURATION + 100.0);
        assert!(!game.rod.is_catching());
    }

    #[test]
    fn empty_round_ends_once_at_the_limit() {
        let mut game = game(2);
        run_to_playing(&mut game);
        game.sea.stop_spawning();
        let total_frames = (2.0 * hud::FRAMES_PER_SECOND) as usize;
        let mut signals = Vec::new();
        for frame in 1..=total_frames {
            if let Some(score) = game.step() {
                signals.push((frame, score));
            }
        }
        assert_eq!(signals, vec![(total_frames, 0)]);
        assert!(game.is_finished());
        assert!(!game.sea.is_spawning());
        for _ in 0..300 {
            assert_eq!(game.step(), None);
        }
        game.on_tap();
        assert!(!game.rod.is_fishing());
    }

    #[test]
    fn summary_comes_after_the_time_up_banner() {
        let mut game = game(1);
        run_to_playing(&mut game);
        step_ms(&mut game, 1000.0);
        assert!(game.is_finished());
        assert!(!game.summary_due());
        step_ms(&mut game, TIME_UP_LINGER + 100.0);
        assert!(game.summary_due());
    }

    #[test]
    fn hooked_fish_scores_and_is_released() {
        let mut game = game(60);
        run_to_playing(&mut game);
        game.sea.stop_spawning();
        game.sea.add_fish(slow_crosser("sardine", 1));
        // let the fish swim under the hook column
        step_ms(&mut game, 16000.0);
        game.on_tap();
        step_ms(&mut game, fishing::FISHING_DURATION + fishing::FISHING_WAIT_DURATION + 100.0);
        assert_eq!(game.final_score(), 1);
        assert!(game.sea.captured_fish().is_empty());
        assert!(game.rod.is_fishing());
        // reel down and accept the next tap
        step_ms(&mut game, fishing::FISHING_DURATION + 100.0);
        assert!(!game.rod.is_fishing());
    }

    #[test]
    fn hazard_catch_scores_zero_and_jams_the_rod() {
        let mut game = game(60);
        run_to_playing(&mut game);
        game.sea.stop_spawning();
        game.sea.add_fish(slow_crosser("jellyfish", 0));
        step_ms(&mut game, 16000.0);
        game.on_tap();
        step_ms(&mut game, fishing::FISHING_DURATION + fishing::FISHING_WAIT_DURATION + 100.0);
        assert_eq!(game.final_score(), 0);
        assert!(game.sea.captured_fish().is_empty());
        assert!(game.miss.is_visible());
        // still jammed well into the stuck hold
        step_ms(&mut game, fishing::STUCK_DURATION / 2.0);
        assert!(game.rod.is_fishing());
        game.on_tap();
        assert!(game.rod.is_fishing());
        step_ms(&mut game, fishing::STUCK_DURATION / 2.0 + fishing::FISHING_DURATION + 200.0);
        assert!(!game.rod.is_fishing());
    }

    #[test]
    fn mixed_haul_with_hazard_scores_zero() {
        let mut game = game(60);
        run_to_playing(&mut game);
        game.sea.stop_spawning();
        game.sea.add_fish(slow_crosser("sardine", 1));
        game.sea.add_fish(slow_crosser("jellyfish", 0));
        step_ms(&mut game, 16000.0);
        game.on_tap();
        step_ms(&mut game, fishing::FISHING_DURATION + fishing::FISHING_WAIT_DURATION + 100.0);
        assert_eq!(game.final_score(), 0);
        assert!(game.miss.is_visible());
    }
}
