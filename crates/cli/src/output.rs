//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Format a power figure in kW
pub fn format_power(kw: f64) -> String {
    if kw >= 1000.0 {
        format!("{:.2} MW", kw / 1000.0)
    } else {
        format!("{:.1} kW", kw)
    }
}

/// Format a cost in Moroccan dirhams
pub fn format_currency(amount: f64) -> String {
    format!("{:.2} MAD", amount)
}

/// Format an efficiency score out of 100
pub fn format_efficiency(score: f64) -> String {
    format!("{:.0}/100", score)
}

/// Format CO2 emissions in kg
pub fn format_co2(kg: f64) -> String {
    if kg >= 1000.0 {
        format!("{:.2} t", kg / 1000.0)
    } else {
        format!("{:.1} kg", kg)
    }
}

/// Color an alert severity label
pub fn color_severity(severity: &str) -> String {
    match severity.to_lowercase().as_str() {
        "critical" => severity.red().bold().to_string(),
        "high" => severity.red().to_string(),
        "medium" => severity.yellow().to_string(),
        "low" => severity.green().to_string(),
        _ => severity.to_string(),
    }
}

/// Color a recommendation priority label
pub fn color_priority(priority: &str) -> String {
    match priority {
        "Critique" => priority.red().bold().to_string(),
        "Élevée" => priority.red().to_string(),
        "Moyenne" => priority.yellow().to_string(),
        "Faible" => priority.green().to_string(),
        _ => priority.to_string(),
    }
}

/// Color a machine or alert status
pub fn color_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "running" | "resolved" => status.green().to_string(),
        "idle" | "acknowledged" => status.yellow().to_string(),
        "maintenance" | "new" => status.blue().to_string(),
        "offline" => status.red().to_string(),
        _ => status.to_string(),
    }
}

/// Format an RFC 3339 timestamp for display, or return it as-is
pub fn format_timestamp(ts: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        dt.format("%Y-%m-%d %H:%M").to_string()
    } else {
        ts.to_string()
    }
}
