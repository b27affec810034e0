//! Display side: frame formatting, the sink abstraction and the dual-cadence scheduler.

mod disk;
mod frame;
mod scheduler;
mod sink;
mod state;

pub use disk::{DiskProbe, DiskUsage};
pub use frame::{Frame, FRAME_LINES};
pub use scheduler::{TickOutcome, UpdateScheduler};
pub use sink::DisplaySink;
pub use state::{DisplayMode, DisplayState};
