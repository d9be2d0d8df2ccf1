//! Machine roster and per-machine detail commands

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::client::{ApiClient, MachineList, MachineMetrics};
use crate::output::{
    color_status, format_currency, format_efficiency, format_power, print_warning, OutputFormat,
};

/// Row for the machine roster table
#[derive(Tabled)]
struct MachineRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    machine_type: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Row for the hourly consumption table
#[derive(Tabled)]
struct HourlyRow {
    #[tabled(rename = "Hour")]
    hour: String,
    #[tabled(rename = "Consumption")]
    consumption: String,
}

/// List the machine roster
pub async fn list_machines(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let result: MachineList = client.get("api/v1/machines").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.machines)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if result.machines.is_empty() {
                print_warning("No machines found");
                return Ok(());
            }

            let rows: Vec<MachineRow> = result
                .machines
                .iter()
                .map(|m| MachineRow {
                    id: m.id.clone(),
                    name: m.name.clone(),
                    machine_type: m.machine_type.clone(),
                    status: color_status(&m.status),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!("\nTotal: {} machines", result.total);
        }
    }

    Ok(())
}

/// Show consumption and efficiency detail for one machine
pub async fn show_machine(client: &ApiClient, id: &str, format: OutputFormat) -> Result<()> {
    let path = format!("api/v1/machines/{}", id);
    let result: MachineMetrics = client.get(&path).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", format!("Machine {}", result.machine_id).bold());
            println!("{}", "=".repeat(50));
            println!(
                "Total consumption:      {}",
                format_power(result.total_consumption)
            );
            println!(
                "Total cost:             {}",
                format_currency(result.total_cost)
            );
            println!(
                "Average efficiency:     {}",
                format_efficiency(result.average_efficiency)
            );
            println!("Operating hours:        {}", result.operating_hours);
            println!();

            if !result.hourly_data.is_empty() {
                println!("{}", "Hourly Consumption".bold());
                println!("{}", "-".repeat(50));

                let rows: Vec<HourlyRow> = result
                    .hourly_data
                    .iter()
                    .map(|p| HourlyRow {
                        hour: p.hour.clone(),
                        consumption: format_power(p.consumption),
                    })
                    .collect();

                let table = tabled::Table::new(rows)
                    .with(tabled::settings::Style::rounded())
                    .to_string();
                println!("{}", table);
                println!();
            }

            println!("{}", "Efficiency Distribution".bold());
            println!("{}", "-".repeat(50));
            for band in &result.efficiency_distribution {
                println!("{:<8} {}", band.range, "█".repeat(band.count as usize));
            }
        }
    }

    Ok(())
}
