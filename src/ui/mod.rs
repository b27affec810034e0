// UI and formatting module

pub mod status;

// Re-export commonly used items for cleaner imports
pub use status::{print_banner, print_display_toggled, print_mode_switched, StatusLine};
