pub mod calc_app;
pub mod calculator;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod render;
pub mod snake;
pub mod store;
pub mod term;

pub use error::{AppError, Result};
