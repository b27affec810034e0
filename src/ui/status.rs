// Console status line for the run loop

use colored::Colorize;
use std::io::{self, Write};
use std::time::Duration;

use crate::core::display::{DisplayMode, TickOutcome};
use crate::core::sampling::bytes_to_gb;

/// Width the status line is padded to so shorter lines overwrite longer ones
const LINE_WIDTH: usize = 72;

/// Single-line status indicator, rewritten in place on every frame
#[derive(Debug, Default)]
pub struct StatusLine {
    frames: u64,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text for an outcome, `None` when the previous line should stay
    pub fn render(&mut self, outcome: &TickOutcome) -> Option<String> {
        let line = match outcome {
            TickOutcome::Waiting(_) => return None,
            TickOutcome::Inactive | TickOutcome::Deactivated => {
                "🔴 [OFF] Monitor off - Ctrl+F9 to turn on".to_string()
            }
            TickOutcome::Activated { delivered } => {
                format!("✅ Monitor on{}", delivery_marker(*delivered))
            }
            TickOutcome::Hardware {
                snapshot,
                delivered,
            } => {
                self.frames += 1;
                format!(
                    "🟢 [HW-{}] CPU:{}% GPU:{}% RAM:{:.1}/{:.0}GB{}",
                    self.frames,
                    snapshot.cpu_usage as i64,
                    snapshot.gpu_usage as i64,
                    snapshot.ram_used_gb,
                    snapshot.ram_total_gb,
                    delivery_marker(*delivered)
                )
            }
            TickOutcome::Disk { usage, delivered } => {
                self.frames += 1;
                match usage {
                    Some(usage) => format!(
                        "💽 [DISK-{}] {}% used ({:.0}/{:.0}GB){}",
                        self.frames,
                        usage.usage_percent().round() as i64,
                        bytes_to_gb(usage.used_bytes),
                        bytes_to_gb(usage.total_bytes),
                        delivery_marker(*delivered)
                    ),
                    None => format!("💽 [DISK-{}] disk query failed", self.frames),
                }
            }
        };

        Some(line)
    }

    pub fn print(&mut self, outcome: &TickOutcome) {
        if let Some(line) = self.render(outcome) {
            print!("\r{:<width$}", line, width = LINE_WIDTH);
            io::stdout().flush().ok();
        }
    }
}

fn delivery_marker(delivered: bool) -> &'static str {
    if delivered {
        ""
    } else {
        " ⚠ display unreachable"
    }
}

pub fn print_banner(controls_available: bool, hardware_every: Duration, disk_every: Duration) {
    println!("{}", "🎮 ARCTIS MONITOR".bold());
    println!("{}", "=".repeat(30).dimmed());

    if controls_available {
        println!(
            "⌨️  {} = Toggle display | {} = Change mode | {} = Quit",
            "Ctrl+F9".cyan().bold(),
            "F10 (hold 3s)".cyan().bold(),
            "q / Ctrl+C".cyan().bold()
        );
    } else {
        println!(
            "{}",
            "⚠️  Keyboard controls unavailable, press Ctrl+C to stop".yellow()
        );
    }

    println!(
        "🔧 Hardware: every {}s | 💽 Disk: every {}s",
        hardware_every.as_secs_f32(),
        disk_every.as_secs_f32()
    );
}

pub fn print_display_toggled(active: bool) {
    let state = if active { "ON".green().bold() } else { "OFF".red().bold() };
    println!("\r\n📺 Display: {}", state);
}

pub fn print_mode_switched(mode: DisplayMode, every: Duration) {
    let icon = match mode {
        DisplayMode::Hardware => "🔧",
        DisplayMode::Disk => "💽",
    };
    println!(
        "\r\n{} Switched to {} mode (updates every {}s)",
        icon,
        mode.to_string().to_uppercase().cyan().bold(),
        every.as_secs_f32()
    );
}
