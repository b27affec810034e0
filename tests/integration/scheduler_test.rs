use arctis_monitor::core::config::ScheduleConfig;
use arctis_monitor::core::display::{
    DiskUsage, DisplayMode, DisplaySink, DisplayState, TickOutcome, UpdateScheduler,
};
use arctis_monitor::core::sampling::{SensorSnapshot, SharedSnapshot};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::fakes::{Call, FixedDisk, RecordingSink, GB};

fn schedule() -> ScheduleConfig {
    ScheduleConfig {
        disk_label: "C:".to_string(),
        ..Default::default()
    }
}

fn half_full_disk() -> DiskUsage {
    DiskUsage {
        total_bytes: 500 * GB,
        used_bytes: 250 * GB,
        free_bytes: 250 * GB,
    }
}

fn scheduler(
    state: Arc<DisplayState>,
    snapshot: SharedSnapshot,
    disk: Option<DiskUsage>,
) -> (UpdateScheduler, Arc<RecordingSink>) {
    let sink = RecordingSink::new();
    let display: Arc<dyn DisplaySink> = sink.clone();
    let scheduler = UpdateScheduler::new(
        schedule(),
        "DISPLAY",
        state,
        snapshot,
        Box::new(FixedDisk(disk)),
        display,
    );
    (scheduler, sink)
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn test_inactive_display_sends_nothing() {
    let state = Arc::new(DisplayState::new(false, DisplayMode::Hardware));
    let (mut scheduler, sink) = scheduler(state, SharedSnapshot::new(), Some(half_full_disk()));

    let start = Instant::now();
    for i in 0..10 {
        let outcome = scheduler.tick(start + secs(i as f64));
        assert_eq!(outcome, TickOutcome::Inactive);
    }

    assert!(sink.calls().is_empty());
}

#[test]
fn test_hardware_frame_from_snapshot() {
    let snapshot = SharedSnapshot::new();
    snapshot.publish(SensorSnapshot {
        cpu_usage: 37.8,
        cpu_temp: Some(61.2),
        gpu_usage: 5.0,
        gpu_temp: None,
        ram_used_gb: 9.46,
        ram_total_gb: 32.0,
        ..Default::default()
    });
    let state = Arc::new(DisplayState::default());
    let (mut scheduler, sink) = scheduler(state, snapshot, None);

    let outcome = scheduler.tick(Instant::now());
    assert!(matches!(outcome, TickOutcome::Hardware { delivered: true, .. }));

    assert_eq!(
        sink.calls(),
        vec![Call::Frame {
            lines: vec![
                "CPU ⇾ 37%🌡61°C".to_string(),
                "GPU ⇾  5%🌡 0°C".to_string(),
                "RAM ⇾ 9.5/32GB".to_string(),
            ],
            duration_ms: Some(800),
        }]
    );
}

#[test]
fn test_hardware_cadence() {
    let state = Arc::new(DisplayState::default());
    let (mut scheduler, sink) = scheduler(state, SharedSnapshot::new(), None);

    let start = Instant::now();
    for i in 0..6 {
        scheduler.tick(start + secs(i as f64));
    }

    // Frames at 0s, 2s and 4s
    assert_eq!(sink.frames().len(), 3);
}

#[test]
fn test_disk_frame_lines() {
    let state = Arc::new(DisplayState::new(true, DisplayMode::Disk));
    let (mut scheduler, sink) = scheduler(state, SharedSnapshot::new(), Some(half_full_disk()));

    let outcome = scheduler.tick(Instant::now());
    assert_eq!(
        outcome,
        TickOutcome::Disk {
            usage: Some(half_full_disk()),
            delivered: true,
        }
    );

    assert_eq!(
        sink.frames(),
        vec![vec![
            "DISK C: 50%".to_string(),
            "Used: 250GB".to_string(),
            "Free: 250GB".to_string(),
        ]]
    );
}

#[test]
fn test_disk_cadence() {
    let state = Arc::new(DisplayState::new(true, DisplayMode::Disk));
    let (mut scheduler, sink) = scheduler(state, SharedSnapshot::new(), Some(half_full_disk()));

    let start = Instant::now();
    for i in 0..=10 {
        scheduler.tick(start + secs(i as f64));
    }

    // Frames at 0s, 5s and 10s
    assert_eq!(sink.frames().len(), 3);
}

#[test]
fn test_failed_disk_query_sends_nothing() {
    let state = Arc::new(DisplayState::new(true, DisplayMode::Disk));
    let (mut scheduler, sink) = scheduler(state, SharedSnapshot::new(), None);

    let outcome = scheduler.tick(Instant::now());
    assert_eq!(
        outcome,
        TickOutcome::Disk {
            usage: None,
            delivered: false,
        }
    );
    assert!(sink.calls().is_empty());
}

#[test]
fn test_mode_switch_keeps_each_cadence() {
    let state = Arc::new(DisplayState::default());
    let (mut scheduler, sink) =
        scheduler(Arc::clone(&state), SharedSnapshot::new(), Some(half_full_disk()));

    let start = Instant::now();
    assert!(matches!(scheduler.tick(start), TickOutcome::Hardware { .. }));

    state.switch_mode();
    assert!(matches!(
        scheduler.tick(start + secs(1.0)),
        TickOutcome::Disk { .. }
    ));

    // Hardware's own timestamp still says 1.5s ago
    state.switch_mode();
    assert_eq!(
        scheduler.tick(start + secs(1.5)),
        TickOutcome::Waiting(DisplayMode::Hardware)
    );
    assert!(matches!(
        scheduler.tick(start + secs(2.0)),
        TickOutcome::Hardware { .. }
    ));

    // Disk was last sent at 1s, so 3s is too early
    state.switch_mode();
    assert_eq!(
        scheduler.tick(start + secs(3.0)),
        TickOutcome::Waiting(DisplayMode::Disk)
    );

    assert_eq!(sink.frames().len(), 3);
}

#[test]
fn test_deactivate_and_reactivate() {
    let state = Arc::new(DisplayState::default());
    let (mut scheduler, sink) = scheduler(Arc::clone(&state), SharedSnapshot::new(), None);

    let start = Instant::now();
    assert!(matches!(scheduler.tick(start), TickOutcome::Hardware { .. }));

    state.set_active(false);
    assert_eq!(scheduler.tick(start + secs(1.0)), TickOutcome::Deactivated);
    assert_eq!(scheduler.tick(start + secs(2.0)), TickOutcome::Inactive);

    state.set_active(true);
    assert_eq!(
        scheduler.tick(start + secs(3.0)),
        TickOutcome::Activated { delivered: true }
    );

    // Confirmation frame stays up for the activation hold
    assert_eq!(
        scheduler.tick(start + secs(4.0)),
        TickOutcome::Waiting(DisplayMode::Hardware)
    );
    assert!(matches!(
        scheduler.tick(start + secs(4.5)),
        TickOutcome::Hardware { .. }
    ));

    let calls = sink.calls();
    assert_eq!(calls[1], Call::Unbind);
    assert_eq!(calls[2], Call::Bind(3));
    assert_eq!(
        calls[3],
        Call::Frame {
            lines: vec![String::new(), "  ✅ MONITOR ON".to_string(), String::new()],
            duration_ms: None,
        }
    );
    assert_eq!(calls.len(), 5);
}

#[test]
fn test_toggle_twice_between_ticks_is_a_no_op() {
    let state = Arc::new(DisplayState::default());
    let (mut scheduler, sink) = scheduler(Arc::clone(&state), SharedSnapshot::new(), None);

    state.toggle_active();
    state.toggle_active();

    assert!(matches!(
        scheduler.tick(Instant::now()),
        TickOutcome::Hardware { .. }
    ));
    assert!(!sink.calls().contains(&Call::Unbind));
}

#[test]
fn test_sink_failures_are_not_fatal() {
    let state = Arc::new(DisplayState::default());
    let (mut scheduler, sink) = scheduler(state, SharedSnapshot::new(), None);
    sink.set_failing(true);

    let start = Instant::now();
    assert!(matches!(
        scheduler.tick(start),
        TickOutcome::Hardware { delivered: false, .. }
    ));

    sink.set_failing(false);
    assert!(matches!(
        scheduler.tick(start + secs(2.0)),
        TickOutcome::Hardware { delivered: true, .. }
    ));
    assert_eq!(sink.frames().len(), 2);
}

#[test]
fn test_run_stops_when_flag_is_cleared() {
    let state = Arc::new(DisplayState::default());
    let (mut scheduler, sink) = scheduler(state, SharedSnapshot::new(), None);
    let running = AtomicBool::new(true);

    let mut outcomes = Vec::new();
    scheduler.run(&running, |outcome| {
        outcomes.push(outcome.clone());
        running.store(false, std::sync::atomic::Ordering::SeqCst);
    });

    assert_eq!(outcomes.len(), 1);
    assert_eq!(sink.frames().len(), 1);
}
