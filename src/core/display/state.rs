use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Hardware,
    Disk,
}

impl DisplayMode {
    fn to_u8(self) -> u8 {
        match self {
            DisplayMode::Hardware => 0,
            DisplayMode::Disk => 1,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => DisplayMode::Disk,
            _ => DisplayMode::Hardware,
        }
    }

    pub fn other(self) -> Self {
        match self {
            DisplayMode::Hardware => DisplayMode::Disk,
            DisplayMode::Disk => DisplayMode::Hardware,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Hardware => write!(f, "hardware"),
            DisplayMode::Disk => write!(f, "disk"),
        }
    }
}

/// Display on/off flag and current mode.
///
/// Written from input callbacks, read by the scheduler loop; both fields are atomics so
/// neither side ever blocks the other.
#[derive(Debug)]
pub struct DisplayState {
    active: AtomicBool,
    mode: AtomicU8,
}

impl DisplayState {
    pub fn new(active: bool, mode: DisplayMode) -> Self {
        Self {
            active: AtomicBool::new(active),
            mode: AtomicU8::new(mode.to_u8()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    /// Flip the active flag, returning the new value
    pub fn toggle_active(&self) -> bool {
        !self.active.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn mode(&self) -> DisplayMode {
        DisplayMode::from_u8(self.mode.load(Ordering::SeqCst))
    }

    /// Switch between hardware and disk mode, returning the new mode
    pub fn switch_mode(&self) -> DisplayMode {
        DisplayMode::from_u8(self.mode.fetch_xor(1, Ordering::SeqCst)).other()
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(true, DisplayMode::Hardware)
    }
}
