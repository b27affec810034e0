// Platform-specific code module

pub mod gamesense;
pub mod keyboard;
pub mod lhm;
pub mod system;

// Re-exports for cleaner imports
pub use gamesense::GameSenseClient;
pub use keyboard::KeyboardListener;
pub use lhm::LhmSensorReader;
pub use system::{SysinfoDiskProbe, SysinfoMemoryProbe};
