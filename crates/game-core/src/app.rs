use super::{GameConfig, PondGame, BOARD_PATH};
use bracket_lib::prelude::{BTerm, GameState};
use scores::ScoreBoard;

pub enum AppState {
    Menu,
    Running(Box<PondGame>),
    Summary {
        score: i32,
        rank: usize,
        board: ScoreBoard,
    },
}

/// Outer shell: menu, one round, ranking summary.
pub struct HooklineApp {
    state: AppState,
    config: GameConfig,
}

impl HooklineApp {
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: AppState::Menu,
            config,
        }
    }

    fn start_round(&mut self) {
        match PondGame::new(self.config.clone()) {
            Ok(game) => self.state = AppState::Running(Box::new(game)),
            Err(e) => eprintln!("Failed to start a round: {}", e),
        }
    }

    fn update_state(&mut self, ctx: &mut BTerm) -> bool {
        let key = ctx.key;
        match &mut self.state {
            AppState::Menu => {
                if key == Some(self.config.quit) {
                    return true;
                }
                if ctx.left_click || key == Some(self.config.tap) || key == Some(self.config.restart)
                {
                    self.start_round();
                }
                false
            }
            AppState::Running(game) => {
                game.tick(ctx);
                if game.summary_due() {
                    let score = game.final_score();
                    let mut board = ScoreBoard::load(BOARD_PATH).unwrap_or_default();
                    let rank = board.submit(score);
                    board.save(BOARD_PATH).ok();
                    self.state = AppState::Summary { score, rank, board };
                }
                false
            }
            AppState::Summary { .. } => {
                if key == Some(self.config.quit) {
                    return true;
                }
                if key == Some(self.config.restart) {
                    self.state = AppState::Menu;
                }
                false
            }
        }
    }
}

impl GameState for HooklineApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        let quit = self.update_state(ctx);
        if quit {
            ctx.quit();
            return;
        }
        match &self.state {
            AppState::Menu => {
                ctx.cls();
                ctx.print_centered(8, "Hookline");
                ctx.print_centered(11, "Tap Space (or click) to raise the hook.");
                ctx.print_centered(12, "Fish score points; jellyfish jam the rod.");
                ctx.print_centered(15, "Space: Start  Q: Quit");
            }
            AppState::Running(_) => {
                // game.tick already rendered
            }
            AppState::Summary { score, rank, board } => {
                ctx.cls();
                ctx.print_centered(6, "Round Complete!");
                ctx.print_centered(8, format!("Final score: {}  (rank #{})", score, rank));
                ctx.print_centered(10, "Best catches:");
                for (i, entry) in board.entries().iter().enumerate() {
                    ctx.print_centered(11 + i as i32, format!("{:2}. {}", i + 1, entry));
                }
                ctx.print_centered(22, "Enter: Menu  Q: Quit");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_lib::prelude::{VirtualKeyCode, RGB};

    fn dummy_ctx(key: Option<VirtualKeyCode>) -> BTerm {
        BTerm {
            width_pixels: 0,
            height_pixels: 0,
            original_height_pixels: 0,
            original_width_pixels: 0,
            fps: 0.0,
            frame_time_ms: 0.0,
            active_console: 0,
            key,
            mouse_pos: (0, 0),
            left_click: false,
            shift: false,
            control: false,
            alt: false,
            web_button: None,
            quitting: false,
            post_scanlines: false,
            post_screenburn: false,
            screen_burn_color: RGB::from_f32(0.0, 0.0, 0.0),
            mouse_visible: true,
        }
    }

    #[test]
    fn tap_from_menu_starts_a_round() {
        let mut app = HooklineApp::new(GameConfig::default());
        let mut ctx = dummy_ctx(Some(VirtualKeyCode::Space));
        app.update_state(&mut ctx);
        assert!(matches!(app.state, AppState::Running(_)));
    }

    #[test]
    fn menu_quit_requests_exit() {
        let mut app = HooklineApp::new(GameConfig::default());
        let mut ctx = dummy_ctx(Some(VirtualKeyCode::Q));
        assert!(app.update_state(&mut ctx));
    }

    #[test]
    fn summary_restart_goes_to_menu() {
        let mut app = HooklineApp::new(GameConfig::default());
        app.state = AppState::Summary {
            score: 10,
            rank: 1,
            board: ScoreBoard::default(),
        };
        let mut ctx = dummy_ctx(Some(VirtualKeyCode::Return));
        app.update_state(&mut ctx);
        assert!(matches!(app.state, AppState::Menu));
    }

    #[test]
    fn other_keys_leave_the_menu_alone() {
        let mut app = HooklineApp::new(GameConfig::default());
        let mut ctx = dummy_ctx(Some(VirtualKeyCode::K));
        assert!(!app.update_state(&mut ctx));
        assert!(matches!(app.state, AppState::Menu));
    }
}
