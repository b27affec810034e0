//! Foreground display loop.
//!
//! Each tick decides, from the display state and the time since the last frame of the current
//! mode, whether to push a new frame. Hardware and disk mode keep separate timestamps, so
//! switching modes back and forth never resets either cadence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::config::ScheduleConfig;
use crate::core::sampling::{SensorSnapshot, SharedSnapshot};

use super::disk::{DiskProbe, DiskUsage};
use super::frame::{Frame, FRAME_LINES};
use super::sink::DisplaySink;
use super::state::{DisplayMode, DisplayState};

/// Granularity at which the run loop checks for shutdown while waiting for the next tick
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Display is off, nothing sent
    Inactive,
    /// Display was switched on: handler re-bound and confirmation shown
    Activated { delivered: bool },
    /// Display was switched off: handler removed
    Deactivated,
    /// Current mode is not due yet
    Waiting(DisplayMode),
    Hardware {
        snapshot: SensorSnapshot,
        delivered: bool,
    },
    Disk {
        usage: Option<DiskUsage>,
        delivered: bool,
    },
}

pub struct UpdateScheduler {
    config: ScheduleConfig,
    event_id: String,
    state: Arc<DisplayState>,
    snapshot: SharedSnapshot,
    disk_probe: Box<dyn DiskProbe>,
    sink: Arc<dyn DisplaySink>,
    /// Whether the sink currently has our handler bound
    bound: bool,
    last_hardware_update: Option<Instant>,
    last_disk_update: Option<Instant>,
    /// Regular frames are held back until this instant after an activation
    resume_at: Option<Instant>,
}

impl UpdateScheduler {
    /// The sink is assumed to be bound already when `state` starts out active
    pub fn new(
        config: ScheduleConfig,
        event_id: impl Into<String>,
        state: Arc<DisplayState>,
        snapshot: SharedSnapshot,
        disk_probe: Box<dyn DiskProbe>,
        sink: Arc<dyn DisplaySink>,
    ) -> Self {
        let bound = state.is_active();

        Self {
            config,
            event_id: event_id.into(),
            state,
            snapshot,
            disk_probe,
            sink,
            bound,
            last_hardware_update: None,
            last_disk_update: None,
            resume_at: None,
        }
    }

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let active = self.state.is_active();

        if active != self.bound {
            self.bound = active;
            return if active {
                self.activate(now)
            } else {
                self.deactivate()
            };
        }

        if !active {
            return TickOutcome::Inactive;
        }

        let mode = self.state.mode();

        if let Some(resume_at) = self.resume_at {
            if now < resume_at {
                return TickOutcome::Waiting(mode);
            }
            self.resume_at = None;
        }

        match mode {
            DisplayMode::Hardware => {
                if !is_due(self.last_hardware_update, self.config.hardware_interval(), now) {
                    return TickOutcome::Waiting(mode);
                }
                self.last_hardware_update = Some(now);
                self.send_hardware()
            }
            DisplayMode::Disk => {
                if !is_due(self.last_disk_update, self.config.disk_interval(), now) {
                    return TickOutcome::Waiting(mode);
                }
                self.last_disk_update = Some(now);
                self.send_disk()
            }
        }
    }

    /// Tick until `running` is cleared, reporting every outcome to `observer`
    pub fn run(&mut self, running: &AtomicBool, mut observer: impl FnMut(&TickOutcome)) {
        let tick = self.config.tick();

        while running.load(Ordering::SeqCst) {
            let started = Instant::now();
            let outcome = self.tick(started);
            observer(&outcome);

            while running.load(Ordering::SeqCst) {
                let elapsed = started.elapsed();
                if elapsed >= tick {
                    break;
                }
                std::thread::sleep((tick - elapsed).min(SHUTDOWN_POLL));
            }
        }
    }

    fn send_hardware(&mut self) -> TickOutcome {
        let snapshot = self.snapshot.load();
        let frame = Frame::hardware(&snapshot);
        let delivered = self.send(&frame, Some(self.config.frame_duration_ms));

        TickOutcome::Hardware {
            snapshot,
            delivered,
        }
    }

    fn send_disk(&mut self) -> TickOutcome {
        let usage = match self.disk_probe.disk_usage(&self.config.disk_volume) {
            Ok(usage) => usage,
            Err(e) => {
                log::warn!("Disk query for {} failed: {}", self.config.disk_volume, e);
                return TickOutcome::Disk {
                    usage: None,
                    delivered: false,
                };
            }
        };

        let frame = Frame::disk(&self.config.disk_label, &usage);
        let delivered = self.send(&frame, Some(self.config.frame_duration_ms));

        TickOutcome::Disk {
            usage: Some(usage),
            delivered,
        }
    }

    fn activate(&mut self, now: Instant) -> TickOutcome {
        log::debug!("Display activated");

        if let Err(e) = self.sink.bind(&self.event_id, FRAME_LINES) {
            log::warn!("Failed to re-bind display event: {}", e);
            return TickOutcome::Activated { delivered: false };
        }

        let delivered = self.send(&Frame::activation(), None);
        self.resume_at = Some(now + self.config.activation_hold());

        TickOutcome::Activated { delivered }
    }

    fn deactivate(&mut self) -> TickOutcome {
        log::debug!("Display deactivated");
        self.resume_at = None;

        if let Err(e) = self.sink.unbind(&self.event_id) {
            log::warn!("Failed to unbind display event: {}", e);
        }

        TickOutcome::Deactivated
    }

    fn send(&self, frame: &Frame, duration_ms: Option<u64>) -> bool {
        match self.sink.send_frame(&self.event_id, frame, duration_ms) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Frame dropped: {}", e);
                false
            }
        }
    }
}

fn is_due(last: Option<Instant>, interval: Duration, now: Instant) -> bool {
    last.map_or(true, |last| now.saturating_duration_since(last) >= interval)
}
