// Core business logic module

pub mod config;
pub mod display;
pub mod input;
pub mod sampling;

// Re-export commonly used items
pub use config::Config;
pub use display::{DisplayMode, DisplayState, UpdateScheduler};
pub use input::InputController;
pub use sampling::{SamplingEngine, SensorSnapshot};
