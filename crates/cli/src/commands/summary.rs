//! Factory summary command

use anyhow::Result;
use colored::Colorize;

use crate::client::{ApiClient, Summary};
use crate::output::{format_co2, format_currency, format_efficiency, format_power, OutputFormat};

/// Show factory-wide summary metrics
pub async fn show_summary(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let result: Summary = client.get("api/v1/summary").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", "Factory Energy Summary".bold());
            println!("{}", "=".repeat(50));
            println!(
                "Total consumption:      {}",
                format_power(result.total_consumption)
            );
            println!(
                "Current consumption:    {}",
                format_power(result.current_consumption)
            );
            println!(
                "Daily cost:             {}",
                format_currency(result.daily_cost)
            );
            println!(
                "Average cost:           {}",
                format_currency(result.average_cost)
            );
            println!(
                "Efficiency:             {}",
                format_efficiency(result.efficiency)
            );
            println!(
                "CO2 footprint:          {}",
                format_co2(result.co2_footprint)
            );
            println!();

            println!("{}", "Forecast".bold());
            println!("{}", "-".repeat(50));
            println!(
                "Predicted efficiency:   {}",
                format_efficiency(result.predicted_efficiency)
            );

            let risk = format!("{:.0}%", result.anomaly_risk * 100.0);
            let risk = if result.anomaly_risk >= 0.5 {
                risk.red().bold().to_string()
            } else if result.anomaly_risk >= 0.2 {
                risk.yellow().to_string()
            } else {
                risk.green().to_string()
            };
            println!("Anomaly risk:           {}", risk);
        }
    }

    Ok(())
}
