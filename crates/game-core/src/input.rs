use bracket_lib::prelude::VirtualKeyCode;
use common::GameResult;

/// Key bindings and session settings.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub tap: VirtualKeyCode,
    pub restart: VirtualKeyCode,
    pub quit: VirtualKeyCode,
    /// Round length in seconds; clamped to a minimum of one on use.
    pub time_limit: i32,
    pub volume: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            tap: Space,
            restart: Return,
            quit: Q,
            time_limit: hud::TIME_LIMIT,
            volume: 5,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let mut cfg = Self::default();
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(cfg),
            Err(e) => return Err(e.into()),
        };
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, val) = match line.split_once('=') {
                Some(v) => v,
                None => continue,
            };
            let val = val.trim().trim_matches('"');
            match key.trim() {
                "tap" => {
                    if let Some(kc) = parse_key(val) {
                        cfg.tap = kc;
                    }
                }
                "restart" => {
                    if let Some(kc) = parse_key(val) {
                        cfg.restart = kc;
                    }
                }
                "quit" => {
                    if let Some(kc) = parse_key(val) {
                        cfg.quit = kc;
                    }
                }
                "time_limit" => {
                    if let Ok(secs) = val.parse() {
                        cfg.time_limit = secs;
                    }
                }
                "volume" => {
                    if let Ok(vol) = val.parse() {
                        cfg.volume = vol;
                    }
                }
                _ => {}
            }
        }
        Ok(cfg)
    }
}

fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    match name.to_ascii_lowercase().as_str() {
        "space" => Some(Space),
        "return" => Some(Return),
        "tab" => Some(Tab),
        "c" => Some(C),
        "f" => Some(F),
        "j" => Some(J),
        "k" => Some(K),
        "q" => Some(Q),
        "r" => Some(R),
        "x" => Some(X),
        "z" => Some(Z),
        _ => None,
    }
}
