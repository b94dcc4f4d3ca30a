// Library interface for code-buster
// The engine (palette, code, feedback, game_state) has no terminal dependencies;
// cli and tui are front ends built on top of it.

pub mod cli;
pub mod code;
pub mod config;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod palette;
pub mod tui;

// Re-export commonly used items for easier testing
pub use code::{Code, generate_code};
pub use config::{CODE_LENGTH, ConfigError, GameConfig, MAX_ATTEMPTS};
pub use feedback::{Feedback, Peg, evaluate};
pub use game_state::{GameInterface, GameStatus, GuessRecord, Session, UserAction, game_loop};
pub use palette::{Palette, Symbol};
