//! luckywheel - A terminal lucky wheel with procedural sound.
//!
//! This library provides the spin engine, the synthesized sound effects and
//! the terminal front end for the luckywheel app.

pub mod app;
pub mod audio;
pub mod config;
pub mod session;
pub mod ui;
pub mod wheel;

// Re-export commonly used types
pub use app::App;
pub use audio::{export_sound_effects, AudioEngine};
pub use config::{load_options, CliOptions, ConfigError};
pub use session::WheelSession;
pub use wheel::{OptionList, SpinScheduler, SpinState, WheelOption};
