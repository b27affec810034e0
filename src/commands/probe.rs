use anyhow::{Context, Result};
use std::thread;

use crate::core::{Config, SamplingEngine};
use crate::platform::{LhmSensorReader, SysinfoMemoryProbe};

/// Run the sampler alone and print snapshots as JSON, one per line
pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let config = Config::load()?;
    let count = matches.get_one::<u32>("count").copied().unwrap_or(5);

    let mut engine = SamplingEngine::new(
        Box::new(LhmSensorReader::new()),
        Box::new(SysinfoMemoryProbe::new()),
        &config.sampling,
    );
    engine.start().context("Failed to start sensor sampling")?;

    let period = config.sampling.interval();
    for _ in 0..count {
        thread::sleep(period);
        let snapshot = engine.get_snapshot();
        println!(
            "{}",
            serde_json::to_string(&snapshot).context("Failed to serialize snapshot")?
        );
    }

    engine.stop();
    Ok(())
}
