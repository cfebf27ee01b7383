mod export;
mod fetch;
mod filters;
mod harvest;
mod ledger;
mod parser;
mod text;

use std::time::Instant;

use clap::{Parser, Subcommand};

use crate::harvest::FilterStats;

#[derive(Parser)]
#[command(name = "amz_reviews", about = "Amazon product review scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest reviews across every filter and export to a spreadsheet
    Run,
    /// Print the fixed filter table
    Filters,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => {
            println!(
                "Harvesting {} across {} filters (cap {} per filter)...",
                filters::PRODUCT_URL,
                filters::FILTERS.len(),
                harvest::FILTER_CAP,
            );

            let mut source = fetch::ReviewClient::new()?;
            let mut ledger = ledger::ReviewLedger::new();
            let stats = harvest::harvest_all(&mut source, &mut ledger).await?;

            print_stats(&stats);

            let path = export::write_workbook(ledger.records())?;
            println!("\nWrote {} reviews to {}", ledger.len(), path.display());
            Ok(())
        }
        Commands::Filters => {
            println!("{:>2} | {:<18} | Query", "#", "Filter");
            println!("{}", "-".repeat(64));
            for (i, f) in filters::FILTERS.iter().enumerate() {
                println!("{:>2} | {:<18} | {}", i + 1, f.label, f.query);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn print_stats(stats: &[FilterStats]) {
    println!(
        "\n{:>2} | {:<18} | {:>5} | {:>8} | {:>7}",
        "#", "Filter", "Pages", "Accepted", "Skipped"
    );
    println!("{}", "-".repeat(56));

    let mut total_accepted = 0usize;
    let mut total_skips = parser::SkipCounts::default();
    for (i, s) in stats.iter().enumerate() {
        println!(
            "{:>2} | {:<18} | {:>5} | {:>8} | {:>7}",
            i + 1,
            s.label,
            s.pages,
            s.accepted,
            s.skips.total(),
        );
        total_accepted += s.accepted;
        total_skips += s.skips;
    }

    println!(
        "\nAccepted {} reviews. Skipped: {} foreign, {} duplicate, {} missing id, {} malformed.",
        total_accepted,
        total_skips.foreign,
        total_skips.duplicate,
        total_skips.missing_id,
        total_skips.malformed,
    );
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
