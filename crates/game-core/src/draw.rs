use super::*;
use bracket_lib::prelude::{to_cp437, BLACK, CYAN, GRAY, GREEN, RGB, WHITE, YELLOW};
use ecology::Fish;

// scene layout
const ISLAND_RIGHT: i32 = 15;
const ISLAND_Y: i32 = 6;
const GRASS_RIGHT: i32 = 11;
const GRASS_Y: i32 = 5;
const BEAR_X: i32 = 3;
const BEAR_Y: i32 = 4;
const ROD_TIP_X: i32 = 13;

impl PondGame {
    pub(super) fn draw(&self, ctx: &mut BTerm) {
        ctx.cls();
        self.draw_scene(ctx);
        self.draw_rod(ctx);
        self.draw_fish(ctx);
        hud::draw_status(ctx, &self.round).ok();
        if self.phase == GamePhase::Countdown {
            hud::draw_countdown(ctx, &self.banner).ok();
        }
        hud::draw_miss(ctx, &self.miss, BEAR_X + 4, BEAR_Y).ok();
        if self.phase == GamePhase::Finished {
            hud::draw_time_up(ctx).ok();
        }
    }

    /// Waterline, island, grass and the bear on the shore.
    fn draw_scene(&self, ctx: &mut BTerm) {
        let surface = ecology::WATER_SURFACE_Y as i32;
        for x in 0..SCREEN_WIDTH {
            ctx.set(x, surface, RGB::named(CYAN), RGB::named(BLACK), to_cp437('~'));
        }
        for x in 0..=ISLAND_RIGHT {
            ctx.set(x, ISLAND_Y, RGB::named(YELLOW), RGB::named(BLACK), to_cp437('#'));
        }
        for x in 0..=GRASS_RIGHT {
            ctx.set(x, GRASS_Y, RGB::named(GREEN), RGB::named(BLACK), to_cp437('"'));
        }
        ctx.set(
            BEAR_X,
            BEAR_Y,
            RGB::named(WHITE),
            RGB::named(BLACK),
            to_cp437('B'),
        );
    }

    /// Rod pole, hanging line and the hook at its current height.
    fn draw_rod(&self, ctx: &mut BTerm) {
        ctx.set(
            ROD_TIP_X - 2,
            BEAR_Y - 1,
            RGB::named(GRAY),
            RGB::named(BLACK),
            to_cp437('/'),
        );
        ctx.set(
            ROD_TIP_X - 1,
            BEAR_Y - 2,
            RGB::named(GRAY),
            RGB::named(BLACK),
            to_cp437('/'),
        );
        let hook = self.rod.hook_area();
        let hook_y = hook.y.round() as i32;
        let top = fishing::STRING_TOP_Y as i32;
        let string_len = self.rod.string_len().round() as i32;
        for y in top..top + string_len {
            ctx.set(
                ROD_TIP_X,
                y,
                RGB::named(GRAY),
                RGB::named(BLACK),
                to_cp437('|'),
            );
        }
        if (0..SCREEN_HEIGHT).contains(&hook_y) {
            ctx.set(
                hook.x.round() as i32,
                hook_y,
                RGB::named(WHITE),
                RGB::named(BLACK),
                to_cp437('J'),
            );
        }
    }

    /// Every fish, swimming or hanging off the hook, drawn as its name.
    fn draw_fish(&self, ctx: &mut BTerm) {
        for fish in self.sea.swimming_fish() {
            draw_fish_label(ctx, fish, RGB::named(WHITE));
        }
        for fish in self.sea.captured_fish() {
            draw_fish_label(ctx, fish, RGB::named(YELLOW));
        }
    }
}

fn draw_fish_label(ctx: &mut BTerm, fish: &Fish, color: RGB) {
    let y = fish.position().y.round() as i32;
    if !(0..SCREEN_HEIGHT).contains(&y) {
        return;
    }
    let base = fish.position().x.round() as i32;
    for (i, glyph) in fish.name().chars().enumerate() {
        let x = base + i as i32;
        if (0..SCREEN_WIDTH).contains(&x) {
            ctx.set(x, y, color, RGB::named(BLACK), to_cp437(glyph));
        }
    }
}
