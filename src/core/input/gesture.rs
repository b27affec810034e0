//! Gesture state machines, driven by explicit instants so tests never wait in real time.

use std::time::{Duration, Instant};

/// Longest gap between auto-repeat presses of a key that is still held down. A press after a
/// longer silence is a new keystroke, even if no release was reported in between.
pub const REPEAT_GAP: Duration = Duration::from_millis(500);

/// Low-level key events produced by an input backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    TogglePressed,
    HoldPressed,
    HoldReleased,
    QuitRequested,
}

/// What a completed gesture asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ToggleDisplay,
    SwitchMode,
    Quit,
}

/// Cancelable one-shot deadline
#[derive(Debug, Clone, Default)]
pub struct DeferredTimer {
    deadline: Option<Instant>,
}

impl DeferredTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer. Returns false (and keeps the original deadline) if already armed.
    pub fn arm(&mut self, now: Instant, delay: Duration) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = Some(now + delay);
        true
    }

    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True exactly once when the deadline has been reached; disarms the timer
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldPhase {
    Idle,
    PressedPending,
}

/// Hold-to-confirm gesture: fires once the key has been held for `hold`.
#[derive(Debug, Clone)]
pub struct HoldGesture {
    hold: Duration,
    timer: DeferredTimer,
    /// Set after firing; auto-repeat presses are ignored until the key goes up
    awaiting_release: bool,
    /// Last instant the key was known to be down
    last_seen_down: Option<Instant>,
}

impl HoldGesture {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            timer: DeferredTimer::new(),
            awaiting_release: false,
            last_seen_down: None,
        }
    }

    pub fn phase(&self) -> HoldPhase {
        if self.timer.is_armed() {
            HoldPhase::PressedPending
        } else {
            HoldPhase::Idle
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Returns true when this press armed the timer.
    ///
    /// Backends without release reporting never send a release, so a press arriving more than
    /// [`REPEAT_GAP`] after the key was last seen down also ends the post-fire lockout.
    pub fn press(&mut self, now: Instant) -> bool {
        let repeat = self
            .last_seen_down
            .is_some_and(|last| now.saturating_duration_since(last) <= REPEAT_GAP);
        self.last_seen_down = Some(now);

        if self.awaiting_release && repeat {
            return false;
        }
        self.awaiting_release = false;
        self.timer.arm(now, self.hold)
    }

    /// Returns true if the hold completed at or before `now`; otherwise the timer is canceled
    pub fn release(&mut self, now: Instant) -> bool {
        self.awaiting_release = false;
        self.last_seen_down = None;
        if self.timer.fire(now) {
            return true;
        }
        self.timer.cancel();
        false
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.fire(now) {
            self.awaiting_release = true;
            self.last_seen_down = Some(now);
            return true;
        }
        false
    }

    pub fn cancel(&mut self) -> bool {
        self.awaiting_release = false;
        self.last_seen_down = None;
        self.timer.cancel()
    }
}

/// Maps backend events onto control actions
#[derive(Debug, Clone)]
pub struct GestureMachine {
    hold: HoldGesture,
}

impl GestureMachine {
    pub fn new(hold_duration: Duration) -> Self {
        Self {
            hold: HoldGesture::new(hold_duration),
        }
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Option<ControlAction> {
        match event {
            InputEvent::TogglePressed => Some(ControlAction::ToggleDisplay),
            InputEvent::QuitRequested => Some(ControlAction::Quit),
            InputEvent::HoldPressed => {
                if self.hold.press(now) {
                    log::debug!("Mode switch armed, keep holding for {:?}", self.hold.hold);
                }
                None
            }
            InputEvent::HoldReleased => {
                let pending = self.hold.phase() == HoldPhase::PressedPending;
                if self.hold.release(now) {
                    Some(ControlAction::SwitchMode)
                } else {
                    if pending {
                        log::debug!("Mode switch canceled, key released early");
                    }
                    None
                }
            }
        }
    }

    /// Fire the hold gesture if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<ControlAction> {
        self.hold.poll(now).then_some(ControlAction::SwitchMode)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.hold.deadline()
    }

    pub fn hold_phase(&self) -> HoldPhase {
        self.hold.phase()
    }

    /// Drop any armed hold without firing it
    pub fn cancel_pending(&mut self) {
        self.hold.cancel();
    }
}
