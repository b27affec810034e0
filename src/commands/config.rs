use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::Config;

pub fn handle_config(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("path", _)) => path(),
        Some(("reset", _)) => reset(),
        _ => {
            println!("Use 'arctis-monitor config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    let data = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{}", data);
    Ok(())
}

fn path() -> Result<()> {
    let config_path = Config::get_config_path()?;
    println!("{}", config_path.display());

    if !config_path.exists() {
        println!("{}", "(not created yet, defaults are in use)".dimmed());
    }
    Ok(())
}

fn reset() -> Result<()> {
    let config_path = Config::get_config_path()?;
    Config::default().save_to(&config_path)?;

    println!("{}", "✓ Configuration reset to defaults".green());
    println!("  {}", config_path.display().to_string().dimmed());
    Ok(())
}
