// Library surface for headless/integration tests and reuse.
// main.rs only wires the terminal, CLI and config around it.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod countdown;
pub mod game;
pub mod logging;
pub mod runtime;
pub mod ui;
pub mod word_bank;

pub use app::{App, AppState, Control};
pub use game::{Category, Difficulty, GameController, GameError, Submission, TimerSettings};
pub use word_bank::WordBank;
