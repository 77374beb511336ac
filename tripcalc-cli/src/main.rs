//! Trip Calculator CLI
//!
//! Command-line interface for the trip calculator API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use tripcalc_client::TripcalcClient;
use tripcalc_types::CurrencyCode;

#[derive(Parser)]
#[command(name = "tripcalc")]
#[command(author, version, about = "Trip calculator CLI client", long_about = None)]
struct Cli {
    /// Base URL of the trip calculator API
    #[arg(
        long,
        env = "TRIPCALC_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between currencies
    Exchange {
        /// Amount in the source currency
        amount: f64,
        /// Source currency (USD, EUR, JPY, CNY, GBP, KRW, CAD)
        #[arg(long)]
        from: String,
        /// Target currency
        #[arg(long, default_value = "KRW")]
        to: String,
    },
    /// Estimate import duty and VAT on an overseas order
    Customs {
        /// Product price in USD
        price: f64,
        /// Shipping cost in USD
        #[arg(long)]
        shipping: Option<f64>,
        /// Category (general, clothes, shoes, cosmetics, electronics, food)
        #[arg(long, default_value = "general")]
        category: String,
    },
    /// Compute a tip and split the bill
    Tip {
        /// Bill amount before tip
        meal: f64,
        /// Country code (USA, CAN, GBR, FRA, JPN, CHN)
        #[arg(long)]
        country: String,
        /// Tip percentage (defaults to the country's custom)
        #[arg(long)]
        percent: Option<f64>,
        /// Number of people splitting the bill
        #[arg(long, default_value = "1")]
        party: i64,
    },
    /// Show tipping customs for one country, or all of them
    TipInfo {
        /// Country code
        country: Option<String>,
    },
    /// List supported currencies
    Currencies,
    /// Show the current rate for a currency pair
    Rate {
        from: String,
        #[arg(default_value = "KRW")]
        to: String,
    },
    /// Calculation history
    History {
        #[command(subcommand)]
        action: Option<HistoryCommands>,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List recent calculations
    List,
    /// Clear the history
    Clear,
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse().map_err(|_| {
        let supported: Vec<_> = CurrencyCode::all().iter().map(|c| c.code()).collect();
        anyhow::anyhow!(
            "Unknown currency: {}. Supported: {}",
            s,
            supported.join(", ")
        )
    })
}

fn warn_if_fallback(is_fallback: bool) {
    if is_fallback {
        eprintln!("⚠ Live rates unavailable; using fallback snapshot rates");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = TripcalcClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Exchange { amount, from, to } => {
            let from = parse_currency(&from)?;
            let to = parse_currency(&to)?;
            let calc = client.exchange(amount, from, to).await?;
            warn_if_fallback(calc.is_fallback);
            println!("{}", serde_json::to_string_pretty(&calc)?);
        }

        Commands::Customs {
            price,
            shipping,
            category,
        } => {
            let calc = client.customs(price, shipping, &category).await?;
            warn_if_fallback(calc.is_fallback);
            println!("{}", serde_json::to_string_pretty(&calc)?);
        }

        Commands::Tip {
            meal,
            country,
            percent,
            party,
        } => {
            let calc = client.tip(meal, percent, party, &country).await?;
            println!("{}", serde_json::to_string_pretty(&calc)?);
        }

        Commands::TipInfo { country } => match country {
            Some(country) => {
                let culture = client.tip_culture(&country).await?;
                println!("{}", serde_json::to_string_pretty(&culture)?);
            }
            None => {
                let cultures = client.tip_cultures().await?;
                println!("{}", serde_json::to_string_pretty(&cultures)?);
            }
        },

        Commands::Currencies => {
            let currencies = client.currencies().await?;
            println!("{}", serde_json::to_string_pretty(&currencies)?);
        }

        Commands::Rate { from, to } => {
            let from = parse_currency(&from)?;
            let to = parse_currency(&to)?;
            let rate = client.rate(from, to).await?;
            warn_if_fallback(rate.is_fallback);
            println!("{}", serde_json::to_string_pretty(&rate)?);
        }

        Commands::History { action } => match action.unwrap_or(HistoryCommands::List) {
            HistoryCommands::List => {
                let entries = client.history().await?;
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            HistoryCommands::Clear => {
                client.clear_history().await?;
                println!("✓ History cleared");
            }
        },
    }

    Ok(())
}
