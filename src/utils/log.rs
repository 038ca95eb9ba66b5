// src/utils/log.rs

//! Console reporting for CLI commands.
//!
//! Headers, indented items and summaries printed with the same timestamped
//! prefix. Output honors the `log` facade's max level, so `--quiet`-style
//! filtering set up by the logger also silences the reporter.

use chrono::Local;
use log::LevelFilter;

/// Check if info-level output should be displayed
fn enabled() -> bool {
    log::max_level() >= LevelFilter::Info
}

/// Format a line with timestamp and level
fn format_line(message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] [INFO] {}", timestamp, message)
}

/// Print a header
pub fn header(title: &str) {
    if enabled() {
        let border = "═".repeat(60);
        println!("{}", format_line(&border));
        println!("{}", format_line(&format!("  {}", title)));
        println!("{}", format_line(&border));
    }
}

/// Print a success line (always shown)
pub fn success(message: &str) {
    println!("{}", format_line(&format!("✓ {}", message)));
}

/// Print a sub-item (indented)
pub fn sub_item(message: &str) {
    if enabled() {
        println!("{}", format_line(&format!("    {}", message)));
    }
}

/// Print a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    if enabled() {
        println!();
        println!("{}", format_line(&format!("[SUMMARY] {}", title)));
        for (key, value) in items {
            println!("{}", format_line(&format!("    {}: {}", key, value)));
        }
    }
}
