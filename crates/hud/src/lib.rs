//! Score and countdown bookkeeping plus the banners drawn over the pond.

use bracket_lib::prelude::{BTerm, BLACK, RED, RGB, WHITE, YELLOW};
use common::GameResult;
use data::FishSpec;
use timing::{Countdown, CueSheet};

/// Highest displayable score.
pub const SCORE_MAX: i32 = 99999;
/// Shortest allowed round, in seconds.
pub const TIME_LIMIT_MIN: i32 = 1;
/// Default round length, in seconds.
pub const TIME_LIMIT: i32 = 30;
/// Fixed logical frame rate of the simulation.
pub const FRAMES_PER_SECOND: f32 = 30.0;

const SCORE_LABEL_FORMAT: &str = "SCORE:";
const TIME_LABEL_FORMAT: &str = "TIME:";
const BANNER_ROW: i32 = 12;

/// Mutable state of one round: the score and the countdown. Owned by the
/// orchestrator and handed to collaborators by reference.
#[derive(Clone, Debug)]
pub struct RoundState {
    score: i32,
    time_limit: i32,
    frames: u32,
}

impl RoundState {
    /// Creates round state with score zero and the given time limit,
    /// clamped to [`TIME_LIMIT_MIN`].
    pub fn new(time_limit_secs: i32) -> Self {
        Self {
            score: 0,
            time_limit: time_limit_secs.max(TIME_LIMIT_MIN),
            frames: 0,
        }
    }

    /// Current score.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Stores `score` clamped to `[0, SCORE_MAX]`.
    pub fn set_score(&mut self, score: i32) {
        self.score = score.clamp(0, SCORE_MAX);
    }

    /// Adds to the score, clamped as in [`RoundState::set_score`].
    pub fn add_score(&mut self, score: i32) {
        self.set_score(self.score + score);
    }

    /// Resets the countdown baseline. The clamped value is what both the
    /// countdown and the display use.
    pub fn set_time_limit(&mut self, secs: i32) {
        self.time_limit = secs.max(TIME_LIMIT_MIN);
        self.frames = 0;
    }

    /// Configured round length in seconds.
    pub fn time_limit(&self) -> i32 {
        self.time_limit
    }

    /// Advances the countdown by one frame.
    pub fn update_time(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    /// Exact seconds remaining.
    pub fn remaining(&self) -> f32 {
        self.time_limit as f32 - self.frames as f32 / FRAMES_PER_SECOND
    }

    /// Whole seconds remaining for display, never negative.
    pub fn now_time(&self) -> i32 {
        (self.remaining().floor() as i32).max(0)
    }

    /// Authoritative end-of-round test.
    pub fn is_time_up(&self) -> bool {
        self.remaining() <= 0.0
    }
}

/// Total score for one haul. Any hazard in the haul voids the whole haul;
/// otherwise scores simply add up.
pub fn calc_score<'a>(captured: impl IntoIterator<Item = &'a FishSpec>) -> i32 {
    let mut total = 0;
    for spec in captured {
        if spec.is_hazard() {
            return 0;
        }
        total += spec.score;
    }
    total
}

#[derive(Clone, Copy, Debug)]
enum CountdownCue {
    Two,
    One,
    Start,
    Done,
}

/// The 3-2-1-Start! banner shown before the round begins.
pub struct CountdownBanner {
    sheet: CueSheet<CountdownCue>,
    text: Option<&'static str>,
}

impl CountdownBanner {
    /// Starts the banner at "3".
    pub fn new() -> Self {
        Self {
            sheet: CueSheet::new(vec![
                (1000.0, CountdownCue::Two),
                (1000.0, CountdownCue::One),
                (1000.0, CountdownCue::Start),
                (1000.0, CountdownCue::Done),
            ]),
            text: Some("3"),
        }
    }

    /// Text to display this frame, if any.
    pub fn text(&self) -> Option<&'static str> {
        self.text
    }

    /// Advances the banner; returns `true` exactly once, when the
    /// countdown finishes and the round should begin.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        match self.sheet.advance(dt_ms) {
            Some(CountdownCue::Two) => self.text = Some("2"),
            Some(CountdownCue::One) => self.text = Some("1"),
            Some(CountdownCue::Start) => self.text = Some("Start!"),
            Some(CountdownCue::Done) => {
                self.text = None;
                return true;
            }
            None => {}
        }
        false
    }
}

impl Default for CountdownBanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient "miss!" label shown while the rod is jammed.
pub struct MissBanner {
    timer: Countdown,
}

impl MissBanner {
    /// Shows the label for `duration_ms`.
    pub fn new(duration_ms: f32) -> Self {
        Self {
            timer: Countdown::new(duration_ms),
        }
    }

    /// Hidden banner.
    pub fn hidden() -> Self {
        Self {
            timer: Countdown::idle(),
        }
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.timer.advance(dt_ms);
    }

    pub fn is_visible(&self) -> bool {
        self.timer.is_running()
    }
}

/// Draws the score and time labels along the top row.
pub fn draw_status(ctx: &mut BTerm, round: &RoundState) -> GameResult<()> {
    ctx.print(40, 0, format!("{}{}", TIME_LABEL_FORMAT, round.now_time()));
    ctx.print(62, 0, format!("{}{}", SCORE_LABEL_FORMAT, round.score()));
    Ok(())
}

/// Draws the pre-round countdown banner, centered.
pub fn draw_countdown(ctx: &mut BTerm, banner: &CountdownBanner) -> GameResult<()> {
    if let Some(text) = banner.text() {
        ctx.print_color_centered(BANNER_ROW, RGB::named(YELLOW), RGB::named(BLACK), text);
    }
    Ok(())
}

/// Draws the "miss!" label next to the angler while visible.
pub fn draw_miss(ctx: &mut BTerm, banner: &MissBanner, x: i32, y: i32) -> GameResult<()> {
    if banner.is_visible() {
        ctx.print_color(x, y, RGB::named(RED), RGB::named(BLACK), "miss!");
    }
    Ok(())
}

/// Draws the end-of-round banner.
pub fn draw_time_up(ctx: &mut BTerm) -> GameResult<()> {
    ctx.print_color_centered(BANNER_ROW, RGB::named(WHITE), RGB::named(BLACK), "TIME UP!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, score: i32) -> FishSpec {
        FishSpec {
            name: name.into(),
            score,
            weight: 1,
        }
    }

    #[test]
    fn score_round_trips_within_range() {
        let mut round = RoundState::new(TIME_LIMIT);
        for value in [0, 1, 4242, SCORE_MAX] {
            round.set_score(value);
            assert_eq!(round.score(), value);
        }
    }

    #[test]
    fn score_clamps_at_both_ends() {
        let mut round = RoundState::new(TIME_LIMIT);
        round.set_score(SCORE_MAX + 1);
        assert_eq!(round.score(), SCORE_MAX);
        round.set_score(-5);
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn add_score_accumulates() {
        let mut round = RoundState::new(TIME_LIMIT);
        round.add_score(2);
        round.add_score(3);
        assert_eq!(round.score(), 5);
        round.add_score(SCORE_MAX);
        assert_eq!(round.score(), SCORE_MAX);
    }

    #[test]
    fn calc_score_sums_clean_hauls() {
        let haul = [spec("sardine", 1), spec("sardine", 1)];
        assert_eq!(calc_score(haul.iter()), 2);
        let empty: [FishSpec; 0] = [];
        assert_eq!(calc_score(empty.iter()), 0);
    }

    #[test]
    fn calc_score_voids_hauls_with_a_hazard() {
        let haul = [spec("sardine", 1), spec("jellyfish", 0)];
        assert_eq!(calc_score(haul.iter()), 0);
        let haul = [spec("jellyfish", 0), spec("mackerel", 2)];
        assert_eq!(calc_score(haul.iter()), 0);
    }

    #[test]
    fn time_limit_clamps_to_minimum() {
        assert_eq!(RoundState::new(0).time_limit(), TIME_LIMIT_MIN);
        assert_eq!(RoundState::new(-7).time_limit(), TIME_LIMIT_MIN);
        let mut round = RoundState::new(TIME_LIMIT);
        round.set_time_limit(0);
        assert_eq!(round.time_limit(), TIME_LIMIT_MIN);
        // the display reflects the clamped value as well
        assert_eq!(round.now_time(), TIME_LIMIT_MIN);
    }

    #[test]
    fn now_time_floors_the_remainder() {
        let mut round = RoundState::new(2);
        for _ in 0..30 {
            round.update_time();
        }
        assert_eq!(round.now_time(), 1);
        for _ in 0..29 {
            round.update_time();
        }
        // 0.03s left: displays zero but the round is not over yet
        assert_eq!(round.now_time(), 0);
        assert!(!round.is_time_up());
    }

    #[test]
    fn round_ends_after_exactly_limit_times_fps_frames() {
        let mut round = RoundState::new(2);
        for _ in 0..59 {
            round.update_time();
            assert!(!round.is_time_up());
        }
        round.update_time();
        assert!(round.is_time_up());
        assert_eq!(round.now_time(), 0);
    }

    #[test]
    fn display_never_goes_negative() {
        let mut round = RoundState::new(1);
        for _ in 0..120 {
            round.update_time();
        }
        assert_eq!(round.now_time(), 0);
    }

    #[test]
    fn countdown_banner_runs_three_two_one_start() {
        let mut banner = CountdownBanner::new();
        assert_eq!(banner.text(), Some("3"));
        assert!(!banner.advance(1000.0));
        assert_eq!(banner.text(), Some("2"));
        assert!(!banner.advance(1000.0));
        assert_eq!(banner.text(), Some("1"));
        assert!(!banner.advance(1000.0));
        assert_eq!(banner.text(), Some("Start!"));
        assert!(banner.advance(1000.0));
        assert_eq!(banner.text(), None);
        assert!(!banner.advance(1000.0));
    }

    #[test]
    fn miss_banner_expires() {
        let mut banner = MissBanner::new(2000.0);
        assert!(banner.is_visible());
        banner.advance(1999.0);
        assert!(banner.is_visible());
        banner.advance(1.0);
        assert!(!banner.is_visible());
        assert!(!MissBanner::hidden().is_visible());
    }
}
