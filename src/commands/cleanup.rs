use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::display::DisplaySink;
use crate::core::Config;
use crate::platform::GameSenseClient;

/// Remove our app registration from GameSense, e.g. after a crash left it behind
pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let config = Config::load()?;
    let address = matches.get_one::<String>("address").map(String::as_str);
    let base_url = config.resolve_base_url(address)?;

    let client = GameSenseClient::new(base_url, &config.gamesense)?;

    if let Err(e) = client.unbind(&config.gamesense.event_id) {
        log::warn!("Failed to remove event {}: {}", config.gamesense.event_id, e);
    }

    client
        .unregister(&config.gamesense.app_id)
        .with_context(|| format!("Failed to unregister {}", config.gamesense.app_id))?;

    println!(
        "{}",
        format!("✓ Removed {} from GameSense", config.gamesense.app_id).green()
    );
    Ok(())
}
