//! Command-line interface for tickermood
//!
//! # Usage
//!
//! ```bash
//! # Set up the oracle credential
//! export GEMINI_API_KEY="your-key"
//!
//! # Run a sentiment report
//! tickermood AAPL --limit 10 --export data
//! ```

use clap::Parser;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use mood_sentiment::{Reporter, SentimentConfig, SentimentError, SentimentPipeline, SentimentReport};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tickermood")]
#[command(about = "News sentiment report for a stock ticker", long_about = None)]
struct Args {
    /// Ticker symbol to analyze (e.g. AAPL)
    ticker: String,

    /// Maximum number of headlines to analyze
    #[arg(long)]
    limit: Option<usize>,

    /// Oracle model identifier
    #[arg(long)]
    model: Option<String>,

    /// Write the analyzed headlines to a CSV file under this directory
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
}

fn build_config(args: &Args) -> Result<SentimentConfig, SentimentError> {
    let mut builder = SentimentConfig::builder().with_env_api_key();

    if let Some(limit) = args.limit {
        builder = builder.max_headlines(limit);
    }
    if let Some(model) = &args.model {
        builder = builder.model(model.as_str());
    }
    if let Some(dir) = &args.export {
        builder = builder.data_dir(dir.clone());
    }

    builder.build()
}

fn print_report(report: &SentimentReport) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Sentiment", "Title", "Source", "Reasoning"]);

    for record in &report.headlines {
        let score = if record.scored {
            format!("{:+.2}", record.sentiment)
        } else {
            format!("{:+.2} (unscored)", record.sentiment)
        };
        table.add_row(vec![
            Cell::new(score),
            Cell::new(&record.headline.title),
            Cell::new(&record.headline.source),
            Cell::new(&record.reasoning),
        ]);
    }

    println!("{table}");
    println!("{}", Reporter::summary(report));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mood_utils::load_dotenv();
    mood_utils::init_tracing();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let pipeline = match SentimentPipeline::new(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            // Missing credential or bad config: fatal before any network call
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    info!(ticker = %args.ticker, "starting sentiment run");

    match pipeline.run(&args.ticker).await {
        Ok(report) => {
            print_report(&report);

            if args.export.is_some() {
                let reporter = Reporter::new(config.data_dir.clone());
                if let Some(path) = reporter.save_csv(&report)? {
                    println!("Saved CSV to {}", path.display());
                }
            }
            Ok(())
        }
        Err(e @ (SentimentError::NoData { .. } | SentimentError::InvalidTicker(_))) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => Err(anyhow::anyhow!("sentiment run failed for {}: {e}", args.ticker)),
    }
}
