//! Lane Catch - a reflex game of catching balls at the end of curved lanes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, balls, add-ball timer, session)
//! - `driver`: Frame clock and update/render loop
//! - `renderer`: Render trait, HUD text and the canvas 2D renderer
//! - `settings`: Key bindings and timer tuning

pub mod driver;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameClock, Game};
pub use error::ConfigError;
pub use settings::{ControlScheme, KeyBindings, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Lane traversal times (ms)
    pub const ENTRY_DURATION_MS: f32 = 3000.0;
    pub const BRANCH_A_DURATION_MS: f32 = 3000.0;
    pub const BRANCH_B_DURATION_MS: f32 = 5000.0; // Longer, wavier lane

    /// Add-ball window: opens every interval, must be answered within the countdown
    pub const SPAWN_INTERVAL_MS: f32 = 30_000.0;
    pub const SPAWN_COUNTDOWN_MS: f32 = 10_000.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_COLOR: &str = "red";

    /// Key that toggles demo mode in the browser
    pub const DEMO_TOGGLE_KEY: &str = "i";
    /// Key that cycles the control scheme on the start screen
    pub const SCHEME_TOGGLE_KEY: &str = "c";
}
