use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use arctis_monitor::commands;

fn address_arg() -> Arg {
    Arg::new("address")
        .short('a')
        .long("address")
        .value_name("HOST:PORT")
        .help("GameSense address (default: read from SteelSeries GG coreProps.json)")
}

fn no_input_arg() -> Arg {
    Arg::new("no-input")
        .long("no-input")
        .help("Run without keyboard controls")
        .action(ArgAction::SetTrue)
}

fn build_cli() -> Command {
    Command::new("arctis-monitor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shows CPU, GPU, RAM and disk usage on the SteelSeries Arctis Nova Pro OLED")
        .long_about("Shows CPU, GPU, RAM and disk usage on the SteelSeries Arctis Nova Pro OLED\n\nRunning without a subcommand is the same as 'arctis-monitor run'.\n\nCONTROLS:\n    Ctrl+F9         Toggle the display on/off\n    F10 (hold 3s)   Switch between hardware and disk mode\n    q / Ctrl+C      Quit")
        .args_conflicts_with_subcommands(true)
        .arg(address_arg())
        .arg(no_input_arg())
        .subcommand(
            Command::new("run")
                .about("Stream hardware stats to the headset display (default)")
                .arg(address_arg())
                .arg(no_input_arg())
        )
        .subcommand(
            Command::new("probe")
                .about("Print sensor snapshots as JSON without touching the display")
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Number of snapshots to print")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("5")
                )
        )
        .subcommand(
            Command::new("cleanup")
                .about("Remove the monitor's registration from GameSense")
                .arg(address_arg())
        )
        .subcommand(
            Command::new("config")
                .about("Inspect or reset the configuration file")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("path").about("Print the configuration file path"))
                .subcommand(Command::new("reset").about("Overwrite the configuration with defaults"))
        )
}

fn main() -> Result<()> {
    arctis_monitor::init_logging();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run(sub_matches)?,
        Some(("probe", sub_matches)) => commands::probe(sub_matches)?,
        Some(("cleanup", sub_matches)) => commands::cleanup(sub_matches)?,
        Some(("config", sub_matches)) => commands::config::handle_config(sub_matches)?,
        _ => commands::run(&matches)?,
    }

    Ok(())
}
