//! Terminal keyboard backend.
//!
//! Reads key events through crossterm in raw mode and forwards the ones we care about to the
//! input controller: Ctrl+F9 toggles the display, holding F10 switches mode, Ctrl+C or `q`
//! quits. Hold gestures need key release events, which Windows consoles always report and
//! other terminals only report with the keyboard enhancement protocol.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;

use crate::core::input::InputEvent;
use crate::error::{MonitorError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct KeyboardListener {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
    enhanced: bool,
}

impl KeyboardListener {
    /// Put the terminal in raw mode and start forwarding key events.
    ///
    /// Fails when stdin is not a terminal; callers fall back to an inert controller.
    pub fn start(events: Sender<InputEvent>) -> Result<Self> {
        if !io::stdin().is_tty() {
            return Err(MonitorError::input("stdin is not a terminal"));
        }

        enable_raw_mode()
            .map_err(|e| MonitorError::input(format!("Failed to enable raw mode: {}", e)))?;

        let enhanced = push_release_reporting();

        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("keyboard-input".to_string())
            .spawn(move || read_loop(events, thread_stop))
            .map_err(|e| {
                restore_terminal(enhanced);
                MonitorError::input(format!("Failed to spawn keyboard thread: {}", e))
            })?;

        Ok(Self {
            stop,
            thread: Some(thread),
            enhanced,
        })
    }

    pub fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };

        self.stop.store(true, Ordering::SeqCst);
        if thread.join().is_err() {
            log::error!("Keyboard thread panicked");
        }

        restore_terminal(self.enhanced);
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_loop(events: Sender<InputEvent>, stop: Arc<AtomicBool>) {
    while !stop.load(Ordering::SeqCst) {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                log::warn!("Keyboard poll failed, disabling hotkeys: {}", e);
                break;
            }
        }

        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                log::warn!("Keyboard read failed, disabling hotkeys: {}", e);
                break;
            }
        };

        if let Some(input) = map_key(&key) {
            if events.send(input).is_err() {
                break;
            }
        }
    }
}

/// Translate a key event into an input event, ignoring everything else
pub fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match (key.code, key.kind) {
        (KeyCode::F(9), KeyEventKind::Press) if ctrl => Some(InputEvent::TogglePressed),
        (KeyCode::F(10), KeyEventKind::Press | KeyEventKind::Repeat) => Some(InputEvent::HoldPressed),
        (KeyCode::F(10), KeyEventKind::Release) => Some(InputEvent::HoldReleased),
        (KeyCode::Char('c'), KeyEventKind::Press) if ctrl => Some(InputEvent::QuitRequested),
        (KeyCode::Char('q'), KeyEventKind::Press) => Some(InputEvent::QuitRequested),
        _ => None,
    }
}

#[cfg(windows)]
fn push_release_reporting() -> bool {
    // Windows consoles report releases natively
    false
}

#[cfg(not(windows))]
fn push_release_reporting() -> bool {
    use crossterm::event::{KeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
    use crossterm::execute;
    use crossterm::terminal::supports_keyboard_enhancement;

    if !matches!(supports_keyboard_enhancement(), Ok(true)) {
        log::warn!(
            "Terminal does not report key releases; F10 fires after the hold time even if released early"
        );
        return false;
    }

    execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok()
}

fn restore_terminal(enhanced: bool) {
    if enhanced {
        #[cfg(not(windows))]
        {
            use crossterm::event::PopKeyboardEnhancementFlags;
            let _ = crossterm::execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
    }

    if let Err(e) = disable_raw_mode() {
        log::warn!("Failed to restore terminal mode: {}", e);
    }
}
