pub mod game;
pub mod picker;
pub mod render;
pub mod api;
pub mod session;
pub mod error;
pub mod config;

pub use error::{GameError, Result};
pub use config::{Config, SystemLimits};
