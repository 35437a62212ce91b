mod config;
mod report;

use clap::{Parser, Subcommand};
use pincer_batch::{run_batch_parallel, BatchOptions};
use pincer_core::RawEvent;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "pincer")]
#[command(about = "Classify social-feed accounts by automation likelihood")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Classify {
        #[arg(help = "Path to a JSON array of raw events")]
        events: String,
        #[arg(short, long, help = "Write result records here instead of stdout")]
        output: Option<String>,
        #[arg(long, help = "Pretty-print the result JSON")]
        pretty: bool,
        #[arg(long, help = "Keep punctuation when tokenizing content")]
        keep_punctuation: bool,
    },
    Inspect {
        #[arg(help = "Path to a JSON array of raw events")]
        events: String,
        #[arg(help = "Account to report on")]
        account: String,
    },
    Run {
        #[arg(short = 'f', long, default_value = "pincer.toml", help = "Path to config file")]
        config: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pincer=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            events,
            output,
            pretty,
            keep_punctuation,
        } => run_classify(events, output, pretty, keep_punctuation).await,
        Commands::Inspect { events, account } => run_inspect(events, account).await,
        Commands::Run { config: config_path } => match config::PincerConfig::from_file(&config_path)
        {
            Ok(cfg) => run_config(cfg).await,
            Err(e) => Err(format!("failed to load config {}: {}", config_path, e).into()),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn load_events(path: &str) -> Result<Vec<RawEvent>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let events: Vec<RawEvent> = serde_json::from_str(&content)?;
    Ok(events)
}

async fn run_classify(
    events_path: String,
    output: Option<String>,
    pretty: bool,
    keep_punctuation: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let events = load_events(&events_path)?;
    info!(path = %events_path, events = events.len(), "events loaded");

    let opts = BatchOptions {
        strip_punctuation: !keep_punctuation,
    };
    let batch = run_batch_parallel(events, &opts).await?;

    let rendered = report::render_results(&batch.results, pretty)?;
    match &output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            println!("wrote {} records to {}", batch.results.len(), path);
        }
        None => println!("{}", rendered),
    }

    report::print_summary(&batch);
    Ok(())
}

async fn run_inspect(
    events_path: String,
    account: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let events = load_events(&events_path)?;
    let batch = run_batch_parallel(events, &BatchOptions::default()).await?;

    if let Some(failure) = batch.failures.iter().find(|f| f.account_id == account) {
        println!("account {} failed ingestion: {}", account, failure.error);
        return Ok(());
    }

    let Some(result) = batch.results.iter().find(|r| r.account_id == account) else {
        return Err(format!("account '{}' not present in {}", account, events_path).into());
    };

    println!("\n--- account {} ---", result.account_id);
    println!("events: {}", result.sample_count);
    println!("timing: {}", report::fmt_score(result.component_scores.timing));
    match result.component_scores.repetition {
        Some(rep) => println!(
            "repetition: {:.3} ({})",
            rep,
            pincer_classify::repetition_band(rep)
        ),
        None => println!("repetition: insufficient"),
    }
    println!(
        "variance: {}",
        report::fmt_score(result.component_scores.variance)
    );
    println!("activity: {:.3}", result.component_scores.activity);
    println!("category: {:?}", result.category);
    println!("confidence: {:?}", result.confidence_level);

    Ok(())
}

async fn run_config(cfg: config::PincerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let results_dir = PathBuf::from(&cfg.output.results_dir);
    std::fs::create_dir_all(&results_dir)?;

    let events = load_events(&cfg.input.events)?;
    info!(path = %cfg.input.events, events = events.len(), "events loaded");

    let opts = BatchOptions {
        strip_punctuation: cfg.extract.strip_punctuation,
    };
    let batch = run_batch_parallel(events, &opts).await?;

    let results_path = results_dir.join("results.json");
    std::fs::write(
        &results_path,
        report::render_results(&batch.results, cfg.output.pretty)?,
    )?;
    println!(
        "wrote {} records to {}",
        batch.results.len(),
        results_path.display()
    );

    if !batch.failures.is_empty() {
        let failures_path = results_dir.join("failures.json");
        std::fs::write(&failures_path, serde_json::to_string_pretty(&batch.failures)?)?;
        println!(
            "wrote {} failures to {}",
            batch.failures.len(),
            failures_path.display()
        );
    }

    report::print_summary(&batch);
    Ok(())
}
