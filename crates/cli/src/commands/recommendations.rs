//! Recommendation listing command

use anyhow::Result;
use tabled::Tabled;

use crate::client::{with_query, ApiClient, RecommendationList};
use crate::output::{color_priority, format_currency, print_warning, OutputFormat};

/// Active recommendation filters collected from the command line.
#[derive(Debug, Default)]
pub struct RecommendationFilters {
    pub priority: Option<String>,
    pub difficulty: Option<String>,
    pub machine: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_savings: Option<f64>,
    pub max_payback: Option<f64>,
    pub quick: Option<String>,
    pub sort: String,
}

/// Row for the recommendations table
#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
    #[tabled(rename = "Savings/yr")]
    savings: String,
    #[tabled(rename = "Payback")]
    payback: String,
    #[tabled(rename = "Machine")]
    machine: String,
}

/// List recommendations with the server-side filter and sort applied
pub async fn list_recommendations(
    client: &ApiClient,
    filters: RecommendationFilters,
    format: OutputFormat,
) -> Result<()> {
    let path = with_query(
        "api/v1/recommendations",
        &[
            ("priority", filters.priority),
            ("difficulty", filters.difficulty),
            ("machine", filters.machine),
            ("category", filters.category),
            ("search", filters.search),
            ("min_savings", filters.min_savings.map(|v| v.to_string())),
            ("max_payback", filters.max_payback.map(|v| v.to_string())),
            ("quick", filters.quick),
            ("sort", Some(filters.sort)),
        ],
    );

    let result: RecommendationList = client.get(&path).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.recommendations)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if result.recommendations.is_empty() {
                print_warning("No recommendations found");
                return Ok(());
            }

            let rows: Vec<RecommendationRow> = result
                .recommendations
                .iter()
                .map(|r| RecommendationRow {
                    id: r.id.clone(),
                    title: r.title.clone(),
                    priority: r
                        .priority
                        .as_deref()
                        .map(color_priority)
                        .unwrap_or_default(),
                    difficulty: r.difficulty.clone().unwrap_or_default(),
                    savings: r
                        .potential_savings
                        .map(format_currency)
                        .unwrap_or_default(),
                    payback: r
                        .payback_period
                        .map(|m| format!("{:.0} mo", m))
                        .unwrap_or_default(),
                    machine: r.machine_id.clone().unwrap_or_default(),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!("\nTotal: {} recommendations", result.total);
        }
    }

    Ok(())
}
