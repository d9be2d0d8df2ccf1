//! Alert listing command

use anyhow::Result;
use tabled::Tabled;

use crate::client::{with_query, AlertList, ApiClient};
use crate::output::{
    color_severity, color_status, format_timestamp, print_warning, OutputFormat,
};

/// Active alert filters collected from the command line.
#[derive(Debug, Default)]
pub struct AlertFilters {
    pub severity: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
}

/// Row for the alerts table
#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Title")]
    title: String,
}

/// List alerts, newest first
pub async fn list_alerts(
    client: &ApiClient,
    filters: AlertFilters,
    format: OutputFormat,
) -> Result<()> {
    let path = with_query(
        "api/v1/alerts",
        &[
            ("severity", filters.severity),
            ("status", filters.status),
            ("category", filters.category),
            ("location", filters.location),
            ("search", filters.search),
            ("start", filters.since),
            ("end", filters.until),
        ],
    );

    let result: AlertList = client.get(&path).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.alerts)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if result.alerts.is_empty() {
                print_warning("No alerts found");
                return Ok(());
            }

            let rows: Vec<AlertRow> = result
                .alerts
                .iter()
                .map(|a| AlertRow {
                    id: a.id.clone(),
                    time: a
                        .timestamp
                        .as_deref()
                        .map(format_timestamp)
                        .unwrap_or_default(),
                    severity: a
                        .severity
                        .as_deref()
                        .map(color_severity)
                        .unwrap_or_default(),
                    status: a.status.as_deref().map(color_status).unwrap_or_default(),
                    location: a.location.clone().unwrap_or_default(),
                    title: a.title.clone(),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!("\nTotal: {} alerts", result.total);
        }
    }

    Ok(())
}
