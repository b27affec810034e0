use arctis_monitor::core::display::{DisplayMode, DisplayState};
use arctis_monitor::core::input::{
    ControlAction, GestureMachine, HoldPhase, InputController, InputEvent,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const HOLD: Duration = Duration::from_secs(3);

fn wait_until(condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    true
}

/// Controller wired to a display state the way the run command wires it
fn state_controller(hold: Duration) -> (InputController, Arc<DisplayState>, Arc<AtomicBool>) {
    let state = Arc::new(DisplayState::default());
    let running = Arc::new(AtomicBool::new(true));

    let handler_state = Arc::clone(&state);
    let handler_running = Arc::clone(&running);
    let controller = InputController::spawn(hold, move |action| match action {
        ControlAction::ToggleDisplay => {
            handler_state.toggle_active();
        }
        ControlAction::SwitchMode => {
            handler_state.switch_mode();
        }
        ControlAction::Quit => handler_running.store(false, Ordering::SeqCst),
    })
    .unwrap();

    (controller, state, running)
}

#[test]
fn test_release_just_before_hold_time_does_nothing() {
    let mut machine = GestureMachine::new(HOLD);
    let start = Instant::now();

    assert_eq!(machine.handle(InputEvent::HoldPressed, start), None);
    assert_eq!(machine.poll(start + Duration::from_millis(2900)), None);
    assert_eq!(
        machine.handle(InputEvent::HoldReleased, start + Duration::from_millis(2900)),
        None
    );

    assert_eq!(machine.hold_phase(), HoldPhase::Idle);
    assert_eq!(machine.poll(start + Duration::from_secs(10)), None);
}

#[test]
fn test_hold_for_full_time_switches_once() {
    let mut machine = GestureMachine::new(HOLD);
    let start = Instant::now();

    machine.handle(InputEvent::HoldPressed, start);
    assert_eq!(
        machine.poll(start + Duration::from_millis(3000)),
        Some(ControlAction::SwitchMode)
    );

    // Autorepeat while the key is still down
    machine.handle(InputEvent::HoldPressed, start + Duration::from_millis(3100));
    assert_eq!(machine.poll(start + Duration::from_secs(7)), None);
    assert_eq!(
        machine.handle(InputEvent::HoldReleased, start + Duration::from_secs(7)),
        None
    );
}

#[test]
fn test_toggle_flips_display_state() {
    let (mut controller, state, _running) = state_controller(HOLD);
    let events = controller.sender().unwrap();

    events.send(InputEvent::TogglePressed).unwrap();
    assert!(wait_until(|| !state.is_active()));

    events.send(InputEvent::TogglePressed).unwrap();
    assert!(wait_until(|| state.is_active()));

    controller.shutdown();
}

#[test]
fn test_hold_switches_mode_without_release() {
    let (mut controller, state, _running) = state_controller(Duration::from_millis(50));
    let events = controller.sender().unwrap();

    events.send(InputEvent::HoldPressed).unwrap();
    assert!(wait_until(|| state.mode() == DisplayMode::Disk));

    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(state.mode(), DisplayMode::Disk);

    controller.shutdown();
}

#[test]
fn test_quit_clears_running_flag() {
    let (mut controller, _state, running) = state_controller(HOLD);

    controller
        .sender()
        .unwrap()
        .send(InputEvent::QuitRequested)
        .unwrap();
    assert!(wait_until(|| !running.load(Ordering::SeqCst)));

    controller.shutdown();
}

#[test]
fn test_shutdown_drops_pending_switch() {
    let (mut controller, state, _running) = state_controller(Duration::from_millis(300));

    controller
        .sender()
        .unwrap()
        .send(InputEvent::HoldPressed)
        .unwrap();
    std::thread::sleep(Duration::from_millis(50));
    controller.shutdown();

    std::thread::sleep(Duration::from_millis(400));
    assert_eq!(state.mode(), DisplayMode::Hardware);
}
