//! Energy Dashboard CLI
//!
//! A command-line tool for querying the factory energy dashboard:
//! summary metrics, cost distribution, per-machine detail, alerts
//! and savings recommendations.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{alerts, costs, machines, recommendations, summary};

/// Energy Dashboard CLI
#[derive(Parser)]
#[command(name = "energyctl")]
#[command(author, version, about = "CLI for the Factory Energy Dashboard", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via ENERGY_API_URL env var)
    #[arg(long, env = "ENERGY_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show factory-wide summary metrics
    Summary,

    /// Show the cost distribution across machine categories
    Costs,

    /// Inspect monitored machines
    #[command(subcommand)]
    Machines(MachinesCommands),

    /// List alerts
    Alerts {
        /// Filter by severity (critical, high, medium, low)
        #[arg(long)]
        severity: Option<String>,

        /// Filter by status (new, acknowledged, resolved)
        #[arg(long)]
        status: Option<String>,

        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Filter by location
        #[arg(long)]
        location: Option<String>,

        /// Free-text search over title and description
        #[arg(long, short)]
        search: Option<String>,

        /// Only alerts at or after this RFC 3339 timestamp
        #[arg(long)]
        since: Option<String>,

        /// Only alerts at or before this RFC 3339 timestamp
        #[arg(long)]
        until: Option<String>,
    },

    /// List savings recommendations
    Recommendations {
        /// Filter by priority (Critique, Élevée, Moyenne, Faible)
        #[arg(long)]
        priority: Option<String>,

        /// Filter by difficulty (easy, medium, hard)
        #[arg(long)]
        difficulty: Option<String>,

        /// Filter by machine ID
        #[arg(long, short)]
        machine: Option<String>,

        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Free-text search over title and description
        #[arg(long, short)]
        search: Option<String>,

        /// Minimum potential savings in MAD per year
        #[arg(long)]
        min_savings: Option<f64>,

        /// Maximum payback period in months
        #[arg(long)]
        max_payback: Option<f64>,

        /// Quick filter (high-impact, quick-wins, low-cost)
        #[arg(long)]
        quick: Option<String>,

        /// Sort order (savings, payback, priority, newest)
        #[arg(long, default_value = "savings")]
        sort: String,
    },
}

#[derive(Subcommand)]
pub enum MachinesCommands {
    /// List the machine roster
    List,

    /// Show consumption and efficiency detail for one machine
    Show {
        /// Machine ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize client
    let client = client::ApiClient::new(&cli.api_url)?;

    // Execute command
    match cli.command {
        Commands::Summary => {
            summary::show_summary(&client, cli.format).await?;
        }
        Commands::Costs => {
            costs::show_costs(&client, cli.format).await?;
        }
        Commands::Machines(machines_cmd) => match machines_cmd {
            MachinesCommands::List => {
                machines::list_machines(&client, cli.format).await?;
            }
            MachinesCommands::Show { id } => {
                machines::show_machine(&client, &id, cli.format).await?;
            }
        },
        Commands::Alerts {
            severity,
            status,
            category,
            location,
            search,
            since,
            until,
        } => {
            let filters = alerts::AlertFilters {
                severity,
                status,
                category,
                location,
                search,
                since,
                until,
            };
            alerts::list_alerts(&client, filters, cli.format).await?;
        }
        Commands::Recommendations {
            priority,
            difficulty,
            machine,
            category,
            search,
            min_savings,
            max_payback,
            quick,
            sort,
        } => {
            let filters = recommendations::RecommendationFilters {
                priority,
                difficulty,
                machine,
                category,
                search,
                min_savings,
                max_payback,
                quick,
                sort,
            };
            recommendations::list_recommendations(&client, filters, cli.format).await?;
        }
    }

    Ok(())
}
