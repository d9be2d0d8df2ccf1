//! Cost distribution command

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::client::{ApiClient, CostBucket};
use crate::output::{format_currency, OutputFormat};

/// Row for the cost distribution table
#[derive(Tabled)]
struct CostRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Show the cost distribution across machine categories
pub async fn show_costs(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let result: Vec<CostBucket> = client.get("api/v1/cost-distribution").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", "Cost Distribution".bold());
            println!("{}", "=".repeat(50));

            let rows: Vec<CostRow> = result
                .iter()
                .map(|b| CostRow {
                    category: b.name.clone(),
                    cost: format_currency(b.value),
                    share: format!("{:.0}%", b.percentage),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            let total: f64 = result.iter().map(|b| b.value).sum();
            println!();
            println!(
                "{} {}",
                "Total categorized cost:".bold(),
                format_currency(total).green().bold()
            );
        }
    }

    Ok(())
}
