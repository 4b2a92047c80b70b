//! Sales Dashboard CLI
//!
//! Command-line interface for the sales dashboard:
//! - Print a report straight from a CSV file
//! - Query a running dashboard server
//! - Generate a configuration file

use clap::{Parser, Subcommand};
use sales_dashboard::config::{delimiter_byte, generate_default_config, DisplayConfig};
use sales_dashboard::data::CsvLoader;
use sales_dashboard::view::{format, render_page, DashboardView, LocationMapView, Page, PageView};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sales-dashboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sales KPIs, rankings and locations from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8082", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Currency prefix for formatted values
    #[arg(long, default_value = "R$", global = true)]
    pub currency: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the dashboard and location report for a CSV file, no server needed
    Report {
        /// Path to the CSV file
        path: PathBuf,
        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Show the KPI summary
    Kpis,

    /// Show the product ranking
    Products,

    /// Show revenue by payment method
    Payments,

    /// Show sales by location
    Locations,

    /// Show revenue per date
    Timeline,

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let json_output = cli.format == "json";

    match &cli.command {
        Commands::Report { path, delimiter } => {
            let delimiter = delimiter_byte(*delimiter)?;
            let table = CsvLoader::new().with_delimiter(delimiter).load(path)?;

            let display = DisplayConfig {
                currency_symbol: cli.currency.clone(),
                ..Default::default()
            };

            let dashboard = render_page(Page::SalesDashboard, &table, &display);
            let location = render_page(Page::SalesByLocation, &table, &display);

            if json_output {
                let report = serde_json::json!({
                    "dashboard": dashboard,
                    "location": location,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                if let PageView::Dashboard(view) = &dashboard {
                    print_dashboard(view);
                }
                if let PageView::Location(view) = &location {
                    println!();
                    print_locations(view);
                }
                if table.unparsed_dates > 0 {
                    println!();
                    println!(
                        "Note: {} records have an unparseable date and are not in the timeline",
                        table.unparsed_dates
                    );
                }
            }
        }

        Commands::Kpis => {
            let data = fetch(&client, &cli.api_url, "/api/v1/kpis").await?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let money = |key: &str| format::currency(&cli.currency, data[key].as_f64().unwrap_or(0.0));
                println!("{:<18} {}", "Total revenue", money("total_revenue"));
                println!("{:<18} {}", "Total cost", money("total_cost"));
                println!(
                    "{:<18} {}",
                    "Profit margin",
                    format::percent(data["profit_margin_pct"].as_f64().unwrap_or(0.0))
                );
                println!(
                    "{:<18} {}",
                    "Average rating",
                    data["average_rating"]
                        .as_f64()
                        .map(format::rating)
                        .unwrap_or_else(|| "n/a".to_string())
                );
                println!("{:<18} {}", "Average ticket", money("average_ticket"));
                println!(
                    "{:<18} {}",
                    "Units sold",
                    format::units(data["total_units"].as_i64().unwrap_or(0))
                );
                println!(
                    "{:<18} {}",
                    "Transactions",
                    format::units(data["record_count"].as_i64().unwrap_or(0))
                );
            }
        }

        Commands::Products => {
            let data = fetch(&client, &cli.api_url, "/api/v1/sales/by-product").await?;
            print_rows(&data, json_output, &["product", "units", "revenue"], &cli.currency);
        }

        Commands::Payments => {
            let data = fetch(&client, &cli.api_url, "/api/v1/sales/by-payment-method").await?;
            print_rows(
                &data,
                json_output,
                &["payment_method", "revenue", "units"],
                &cli.currency,
            );
        }

        Commands::Locations => {
            let data = fetch(&client, &cli.api_url, "/api/v1/sales/by-location").await?;
            print_rows(
                &data,
                json_output,
                &["location", "latitude", "longitude", "total_revenue", "sales"],
                &cli.currency,
            );
        }

        Commands::Timeline => {
            let data = fetch(&client, &cli.api_url, "/api/v1/sales/by-date").await?;
            print_rows(&data, json_output, &["date", "revenue"], &cli.currency);
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Sales Dashboard v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Dataset:    {}",
                        health["dataset"].as_str().unwrap_or("unknown")
                    );

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to the sales dashboard at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin sales-dashboard");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// GET a JSON endpoint, exiting with the server's message on failure
async fn fetch(
    client: &reqwest::Client,
    api_url: &str,
    path: &str,
) -> anyhow::Result<serde_json::Value> {
    let response = match client.get(format!("{}{}", api_url, path)).send().await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Cannot connect to the sales dashboard at {}", api_url);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        eprintln!("Request failed ({}): {}", status, text);
        std::process::exit(1);
    }

    Ok(response.json().await?)
}

fn print_dashboard(view: &DashboardView) {
    println!("{}", view.title);
    println!("{}", "=".repeat(view.title.chars().count()));
    for tile in &view.tiles {
        let unit = tile.unit.as_deref().map(|u| format!(" {}", u)).unwrap_or_default();
        println!("{:<16} {}{}", tile.title, tile.value, unit);
    }

    println!();
    println!("{}", view.product_ranking.title);
    println!("{:<24} {:>10}  {}", "Product", "Units", "Revenue");
    println!("{}", "-".repeat(52));
    for bar in &view.product_ranking.bars {
        println!(
            "{:<24} {:>10}  {}",
            bar.label,
            bar.display, bar.revenue
        );
    }

    println!();
    println!("{}", view.payment_share.title);
    println!("{:<24} {:>8}  {}", "Payment method", "Share", "Revenue");
    println!("{}", "-".repeat(52));
    for slice in &view.payment_share.slices {
        println!(
            "{:<24} {:>8}  {}",
            slice.label,
            format::percent(slice.share_pct),
            slice.display
        );
    }
}

fn print_locations(view: &LocationMapView) {
    println!("{}", view.title);
    if let Some(center) = view.center {
        println!(
            "Center: {:.4}, {:.4} (zoom {})",
            center.latitude, center.longitude, view.zoom
        );
    }
    println!("{:<24} {:>18}  {}", "Location", "Revenue", "Sales");
    println!("{}", "-".repeat(56));
    for point in &view.points {
        println!(
            "{:<24} {:>18}  {} units",
            point.tooltip.location, point.tooltip.revenue, point.tooltip.units
        );
    }
}

/// Print aggregation rows; revenue columns are formatted as currency
fn print_rows(data: &serde_json::Value, json_output: bool, columns: &[&str], currency: &str) {
    if json_output {
        match serde_json::to_string_pretty(data) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to encode response: {}", e),
        }
        return;
    }

    let rows = match data["rows"].as_array() {
        Some(r) if !r.is_empty() => r,
        _ => {
            println!("No data");
            return;
        }
    };

    for column in columns {
        print!("{:<20}", column);
    }
    println!();
    println!("{}", "-".repeat(20 * columns.len()));

    for row in rows {
        for column in columns {
            let value = &row[*column];
            let cell = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) if column.contains("revenue") => {
                    format::currency(currency, n.as_f64().unwrap_or(0.0))
                }
                serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => {
                    format::units(n.as_i64().unwrap_or(0))
                }
                serde_json::Value::Number(n) => format!("{:.4}", n.as_f64().unwrap_or(0.0)),
                _ => "-".to_string(),
            };
            print!("{:<20}", cell);
        }
        println!();
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
