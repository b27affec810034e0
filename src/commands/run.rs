use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::display::{DisplaySink, FRAME_LINES};
use crate::core::input::ControlAction;
use crate::core::{
    Config, DisplayMode, DisplayState, InputController, SamplingEngine, UpdateScheduler,
};
use crate::platform::{
    GameSenseClient, KeyboardListener, LhmSensorReader, SysinfoDiskProbe, SysinfoMemoryProbe,
};
use crate::ui::{print_banner, print_display_toggled, print_mode_switched, StatusLine};

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let config = Config::load()?;
    let address = matches.get_one::<String>("address").map(String::as_str);
    let input_enabled = config.input.enabled && !matches.get_flag("no-input");

    let base_url = config.resolve_base_url(address)?;
    let client = GameSenseClient::new(base_url, &config.gamesense)?;
    log::info!("Using GameSense at {}", client.base_url());
    let sink: Arc<dyn DisplaySink> = Arc::new(client);

    sink.register(&config.gamesense.app_id, &config.gamesense.display_name)
        .context("Failed to register with GameSense")?;
    sink.bind(&config.gamesense.event_id, FRAME_LINES)
        .context("Failed to bind the screen handler")?;

    let mut engine = SamplingEngine::new(
        Box::new(LhmSensorReader::new()),
        Box::new(SysinfoMemoryProbe::new()),
        &config.sampling,
    );
    engine.start().context("Failed to start sensor sampling")?;

    let state = Arc::new(DisplayState::new(true, DisplayMode::Hardware));
    let running = Arc::new(AtomicBool::new(true));

    let ctrlc_running = Arc::clone(&running);
    ctrlc::set_handler(move || {
        ctrlc_running.store(false, Ordering::SeqCst);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let (mut controller, mut keyboard) = if input_enabled {
        start_controls(&config, Arc::clone(&state), Arc::clone(&running))
    } else {
        (InputController::inert(), None)
    };

    print_banner(
        keyboard.is_some(),
        config.schedule.hardware_interval(),
        config.schedule.disk_interval(),
    );

    let mut scheduler = UpdateScheduler::new(
        config.schedule.clone(),
        config.gamesense.event_id.clone(),
        Arc::clone(&state),
        engine.shared_snapshot(),
        Box::new(SysinfoDiskProbe::new()),
        Arc::clone(&sink),
    );

    let mut status = StatusLine::new();
    scheduler.run(&running, |outcome| status.print(outcome));

    // Restore cooked mode before printing whole lines again
    if let Some(keyboard) = keyboard.as_mut() {
        keyboard.stop();
    }

    println!();
    println!("{}", "Stopping monitor...".yellow());

    controller.shutdown();
    engine.stop();

    if let Err(e) = sink.unregister(&config.gamesense.app_id) {
        log::warn!("Failed to unregister from GameSense: {}", e);
    }

    println!("{}", "✓ Monitor stopped".green());
    Ok(())
}

/// Start the gesture controller and the keyboard backend feeding it.
///
/// Either half failing leaves the monitor running without hotkeys.
fn start_controls(
    config: &Config,
    state: Arc<DisplayState>,
    running: Arc<AtomicBool>,
) -> (InputController, Option<KeyboardListener>) {
    let schedule = config.schedule.clone();

    let handler = move |action: ControlAction| match action {
        ControlAction::ToggleDisplay => {
            let active = state.toggle_active();
            print_display_toggled(active);
        }
        ControlAction::SwitchMode => {
            let mode = state.switch_mode();
            let every = match mode {
                DisplayMode::Hardware => schedule.hardware_interval(),
                DisplayMode::Disk => schedule.disk_interval(),
            };
            print_mode_switched(mode, every);
        }
        ControlAction::Quit => running.store(false, Ordering::SeqCst),
    };

    let controller = match InputController::spawn(config.input.hold_duration(), handler) {
        Ok(controller) => controller,
        Err(e) => {
            log::warn!("Keyboard controls disabled: {}", e);
            return (InputController::inert(), None);
        }
    };

    let Some(events) = controller.sender() else {
        return (controller, None);
    };

    match KeyboardListener::start(events) {
        Ok(keyboard) => (controller, Some(keyboard)),
        Err(e) => {
            log::warn!("Keyboard controls disabled: {}", e);
            (controller, None)
        }
    }
}
