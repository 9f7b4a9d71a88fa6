//! Fishing rod state machine.
//!
//! One tap runs one cycle: the hook rises from its resting depth to just
//! above the waterline (the catching window), holds briefly, then the caller
//! scores the haul and the hook is lowered back down. Hauling up a hazard
//! species jams the rod for a while before it lowers.

use common::Rect;
use data::FishSpec;
use timing::{lerp, Countdown};

/// Horizontal hook position in screen cells.
pub const HOOK_X: f32 = 12.0;
/// Hook bounding box edge length.
pub const HOOK_SIZE: f32 = 1.0;
/// Resting hook depth.
pub const HOOK_REST_Y: f32 = 12.5;
/// Raised hook height, above the waterline.
pub const HOOK_UP_Y: f32 = HOOK_REST_Y / 4.0;
/// Rod tip row the line hangs from.
pub const STRING_TOP_Y: f32 = 2.0;

/// Duration of the raise and of the lower animation, in milliseconds.
pub const FISHING_DURATION: f32 = 1000.0;
/// Hold time at the top of the raise, still part of the catching window.
pub const FISHING_WAIT_DURATION: f32 = 300.0;
/// How long a hazard catch jams the rod.
pub const STUCK_DURATION: f32 = 2000.0;

/// How a finished catching window resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FishingPattern {
    /// Plain reel-down.
    Default,
    /// A hazard was hauled up; jam before reeling down.
    Stuck,
}

/// Events reported while the rod advances through a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RodEvent {
    /// The catching window just closed; score the haul and pick a pattern.
    CatchWindowClosed,
    /// The stuck branch was entered.
    Stuck,
    /// The hook is back at rest and a new tap is accepted.
    CycleFinished,
}

#[derive(Clone, Debug)]
enum RodPhase {
    Idle,
    Raising(Countdown),
    Holding(Countdown),
    /// Window closed, waiting for the caller to choose a pattern.
    Landed,
    Stuck(Countdown),
    Lowering(Countdown),
}

/// The player's rod and hook.
#[derive(Clone, Debug)]
pub struct FishingRod {
    phase: RodPhase,
    hook_y: f32,
    is_catching: bool,
    is_fishing: bool,
}

impl FishingRod {
    /// Creates an idle rod with the hook at resting depth.
    pub fn new() -> Self {
        Self {
            phase: RodPhase::Idle,
            hook_y: HOOK_REST_Y,
            is_catching: false,
            is_fishing: false,
        }
    }

    /// Whether the hook is inside the catching window (collision-eligible).
    pub fn is_catching(&self) -> bool {
        self.is_catching
    }

    /// Whether a cycle is in progress. New taps are ignored while true.
    pub fn is_fishing(&self) -> bool {
        self.is_fishing
    }

    /// Current hook bounding box.
    pub fn hook_area(&self) -> Rect {
        Rect::new(HOOK_X, self.hook_y, HOOK_SIZE, HOOK_SIZE)
    }

    /// Line length from the rod tip down to the hook, for drawing.
    pub fn string_len(&self) -> f32 {
        (self.hook_y - STRING_TOP_Y).max(0.0)
    }

    /// Starts a catch cycle. Returns `false` (and does nothing) while a
    /// cycle is already active.
    pub fn catch_up(&mut self) -> bool {
        if self.is_fishing || self.is_catching {
            return false;
        }
        self.is_catching = true;
        self.is_fishing = true;
        self.phase = RodPhase::Raising(Countdown::new(FISHING_DURATION));
        true
    }

    /// Scans the haul in capture order; the first hazard species jams the
    /// rod. Pure function of the list.
    pub fn pattern_for<'a>(
        &self,
        captured: impl IntoIterator<Item = &'a FishSpec>,
    ) -> FishingPattern {
        for spec in captured {
            if spec.is_hazard() {
                return FishingPattern::Stuck;
            }
        }
        FishingPattern::Default
    }

    /// Runs the chosen branch after the catching window closed. A no-op in
    /// any other phase.
    pub fn fish(&mut self, pattern: FishingPattern) -> Option<RodEvent> {
        if !matches!(self.phase, RodPhase::Landed) {
            return None;
        }
        match pattern {
            FishingPattern::Default => {
                self.phase = RodPhase::Lowering(Countdown::new(FISHING_DURATION));
                None
            }
            FishingPattern::Stuck => {
                self.phase = RodPhase::Stuck(Countdown::new(STUCK_DURATION));
                Some(RodEvent::Stuck)
            }
        }
    }

    /// Advances the cycle by `dt_ms`, moving the hook and reporting at most
    /// one event.
    pub fn advance(&mut self, dt_ms: f32) -> Option<RodEvent> {
        match &mut self.phase {
            RodPhase::Idle | RodPhase::Landed => None,
            RodPhase::Raising(cd) => {
                if cd.advance(dt_ms) {
                    self.hook_y = HOOK_UP_Y;
                    self.phase = RodPhase::Holding(Countdown::new(FISHING_WAIT_DURATION));
                } else {
                    let t = 1.0 - cd.remaining() / FISHING_DURATION;
                    self.hook_y = lerp(HOOK_REST_Y, HOOK_UP_Y, t);
                }
                None
            }
            RodPhase::Holding(cd) => {
                if cd.advance(dt_ms) {
                    self.is_catching = false;
                    self.phase = RodPhase::Landed;
                    return Some(RodEvent::CatchWindowClosed);
                }
                None
            }
            RodPhase::Stuck(cd) => {
                // hook and line stay motionless while jammed
                if cd.advance(dt_ms) {
                    self.phase = RodPhase::Lowering(Countdown::new(FISHING_DURATION));
                }
                None
            }
            RodPhase::Lowering(cd) => {
                if cd.advance(dt_ms) {
                    self.hook_y = HOOK_REST_Y;
                    self.is_fishing = false;
                    self.phase = RodPhase::Idle;
                    return Some(RodEvent::CycleFinished);
                }
                let t = 1.0 - cd.remaining() / FISHING_DURATION;
                self.hook_y = lerp(HOOK_UP_Y, HOOK_REST_Y, t);
                None
            }
        }
    }
}

impl Default for FishingRod {
    fn default() -> Self {
        Self::new()
    }
}
