//! Fish lifecycle and the pond they swim in.

use bracket_lib::prelude::RandomNumberGenerator;
use common::{Point, Rect};
use data::{FishSpec, SpeciesTable};
use fishing::FishingRod;
use timing::{lerp, Interval};

/// Pond width in screen cells; fish enter and leave just outside it.
pub const POND_WIDTH: f32 = 80.0;
/// Waterline row.
pub const WATER_SURFACE_Y: f32 = 7.0;
/// Number of discrete swimming depths below the waterline.
pub const DEPTH_BANDS: i32 = 5;
/// Vertical distance between depth bands.
pub const BAND_SPACING: f32 = 2.0;
/// Fish bounding-box height.
pub const FISH_HEIGHT: f32 = 1.0;

/// Milliseconds between fish spawns.
pub const FISH_INTERVAL: f32 = 2000.0;
/// Bounds for the random crossing time, in milliseconds.
pub const SWIM_TIME_MIN: f32 = 5000.0;
pub const SWIM_TIME_MAX: f32 = 10000.0;

/// Which edge a fish enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwimPattern {
    LeftToRight,
    RightToLeft,
}

/// Direction, depth and crossing time of one fish.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwimmingStyle {
    pub pattern: SwimPattern,
    pub depth: f32,
    pub swim_time: f32,
}

/// A single swimming (or hauled-up) fish.
#[derive(Clone, Debug)]
pub struct Fish {
    spec: FishSpec,
    style: SwimmingStyle,
    pos: Point,
    start_x: f32,
    elapsed: f32,
    captured: bool,
}

impl Fish {
    /// Creates a fish just outside its entry edge at the style's depth.
    pub fn new(spec: FishSpec, style: SwimmingStyle) -> Self {
        let width = spec.name.chars().count() as f32;
        let start_x = match style.pattern {
            SwimPattern::LeftToRight => -width,
            SwimPattern::RightToLeft => POND_WIDTH,
        };
        Self {
            spec,
            style,
            pos: Point::new(start_x, style.depth),
            start_x,
            elapsed: 0.0,
            captured: false,
        }
    }

    /// Species parameters for this fish.
    pub fn spec(&self) -> &FishSpec {
        &self.spec
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Score value when caught.
    pub fn score(&self) -> i32 {
        self.spec.score
    }

    /// Whether the fish has been hauled onto the hook.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Current position (top-left of the bounding box).
    pub fn position(&self) -> Point {
        self.pos
    }

    /// Rendered width in cells.
    pub fn width(&self) -> f32 {
        self.spec.name.chars().count() as f32
    }

    /// Current bounding rectangle, for collision tests.
    pub fn area(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width(), FISH_HEIGHT)
    }

    /// Advances the crossing by `dt_ms`; returns `true` once the far edge
    /// is reached. Captured fish no longer swim, so a capture on the exact
    /// completion frame always wins over the completion.
    pub fn advance_swim(&mut self, dt_ms: f32) -> bool {
        if self.captured {
            return false;
        }
        let end_x = match self.style.pattern {
            SwimPattern::LeftToRight => POND_WIDTH,
            SwimPattern::RightToLeft => -self.width(),
        };
        self.elapsed += dt_ms;
        let t = self.elapsed / self.style.swim_time;
        self.pos.x = lerp(self.start_x, end_x, t);
        self.elapsed >= self.style.swim_time
    }

    /// Marks the fish captured and cancels the swim. Idempotent.
    pub fn stop(&mut self) {
        self.captured = true;
    }

    /// Keeps a captured fish on the hook: its vertical position never stays
    /// below the hook's. Called once per frame by the game loop.
    pub fn follow_hook(&mut self, rod: &FishingRod) {
        if !self.captured {
            return;
        }
        self.pos.y = self.pos.y.min(rod.hook_area().y);
    }
}

/// The pond: spawns fish, runs the hook collision scan and owns both the
/// swimming and the hauled-up populations.
pub struct Sea {
    swimming: Vec<Fish>,
    captured: Vec<Fish>,
    spawn_timer: Interval,
    table: SpeciesTable,
}

impl Sea {
    /// Creates an empty pond spawning from `table`.
    pub fn new(table: SpeciesTable) -> Self {
        Self {
            swimming: Vec::new(),
            captured: Vec::new(),
            spawn_timer: Interval::new(FISH_INTERVAL),
            table,
        }
    }

    /// Fish currently crossing the pond.
    pub fn swimming_fish(&self) -> &[Fish] {
        &self.swimming
    }

    /// Fish hauled up during the current cycle, in capture order.
    pub fn captured_fish(&self) -> &[Fish] {
        &self.captured
    }

    /// Adds a fish to the swimming population.
    pub fn add_fish(&mut self, fish: Fish) {
        self.swimming.push(fish);
    }

    /// Begins periodic spawning.
    pub fn start_spawning(&mut self) {
        self.spawn_timer.start();
    }

    /// Stops periodic spawning. Safe to call when not running.
    pub fn stop_spawning(&mut self) {
        self.spawn_timer.stop();
    }

    /// Whether the spawn timer is running.
    pub fn is_spawning(&self) -> bool {
        self.spawn_timer.is_running()
    }

    /// Advances spawning and swimming by `dt_ms`. Fish that reach the far
    /// edge uncaptured are destroyed here.
    pub fn advance(&mut self, dt_ms: f32, rng: &mut RandomNumberGenerator) {
        for _ in 0..self.spawn_timer.advance(dt_ms) {
            let fish = self.spawn_random(rng);
            self.swimming.push(fish);
        }
        self.swimming.retain_mut(|fish| !fish.advance_swim(dt_ms));
    }

    /// Captures every swimming fish overlapping the hook, but only while
    /// the rod is inside its catching window. Keeping the resting hook
    /// inert is the core fairness rule.
    pub fn check_hook_collision(&mut self, rod: &FishingRod) {
        if self.swimming.is_empty() || !rod.is_catching() {
            return;
        }
        let hook = rod.hook_area();
        let mut i = 0;
        while i < self.swimming.len() {
            if !self.swimming[i].is_captured() && self.swimming[i].area().intersects(&hook) {
                let mut fish = self.swimming.remove(i);
                fish.stop();
                self.captured.push(fish);
            } else {
                i += 1;
            }
        }
    }

    /// Per-frame position update for hauled-up fish.
    pub fn follow_captured(&mut self, rod: &FishingRod) {
        for fish in &mut self.captured {
            fish.follow_hook(rod);
        }
    }

    /// Destroys all captured fish once a cycle has been scored.
    pub fn release_captured(&mut self) {
        self.captured.clear();
    }

    fn spawn_random(&mut self, rng: &mut RandomNumberGenerator) -> Fish {
        let spec = self.table.pick(rng.range(0.0, 1.0)).clone();
        let pattern = if rng.range(0, 2) == 0 {
            SwimPattern::LeftToRight
        } else {
            SwimPattern::RightToLeft
        };
        let band = rng.range(0, DEPTH_BANDS);
        let depth = WATER_SURFACE_Y + 1.0 + band as f32 * BAND_SPACING;
        let swim_time = rng.range(SWIM_TIME_MIN, SWIM_TIME_MAX);
        Fish::new(
            spec,
            SwimmingStyle {
                pattern,
                depth,
                swim_time,
            },
        )
    }
}
