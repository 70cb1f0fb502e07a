//! `rfinstall check-deps`.
//!
//! Prints one row per required host tool and fails when any is missing.

use std::path::Path;

use rfinstall_runtime::{DependencyProbePort, ToolStatus, tool_report};

use crate::bootstrap::load_config;
use crate::error::CliError;

// ANSI color codes for better UX
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub fn execute(config_path: Option<&Path>, probe: &dyn DependencyProbePort) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let report = tool_report(probe, &config.required_tools);

    println!("{BOLD}{:<20} {:<10} {:<50}{RESET}", "TOOL", "STATUS", "PATH");
    println!("{}", "=".repeat(80));
    for status in &report {
        println!("{}", format_row(status));
    }
    println!();

    let missing: Vec<&str> = report
        .iter()
        .filter(|s| !s.is_available())
        .map(|s| s.name.as_str())
        .collect();

    if missing.is_empty() {
        println!(
            "{GREEN}✓ All required tools are installed!{RESET} ({}/{})",
            report.len(),
            report.len()
        );
        return Ok(());
    }

    println!("{RED}✗ Missing required tools: {}{RESET}", missing.join(", "));
    Err(CliError::Dependency(format!(
        "missing required tools: {}",
        missing.join(", ")
    )))
}

fn format_row(status: &ToolStatus) -> String {
    match &status.path {
        Some(path) => format!(
            "{:<20} {GREEN}{:<10}{RESET} {}",
            status.name,
            "found",
            path.display()
        ),
        None => format!("{:<20} {RED}{:<10}{RESET} {}", status.name, "missing", "-"),
    }
}
