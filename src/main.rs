use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;
use std::time::Duration;
use tracing::info;

use hirszemle::config::Config;
use hirszemle::db::models::RunRecord;
use hirszemle::db::{self, queries};
use hirszemle::output::terminal;
use hirszemle::pipeline;
use hirszemle::pipeline::analyze::RunSettings;
use hirszemle::sentiment::SentimentScorer;
use hirszemle::sources::fetch;
use hirszemle::status;
use hirszemle::text::Normalizer;
use hirszemle::topics::lda::{LdaBuilder, LdaParams};

/// Hirszemle: collect Hungarian news headlines and analyze what they're
/// about and how they feel.
///
/// Headlines are fetched from the configured sources, stored once per
/// (source, text) pair, and summarized per run into topics with frequency
/// and average sentiment.
#[derive(Parser)]
#[command(name = "hirszemle", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Fetch all enabled sources once and store the new headlines
    Ingest,

    /// Run one topic/sentiment analysis over the stored corpus
    Analyze,

    /// Poll sources on a fixed interval (the external scheduler loop)
    Watch {
        /// Also run an analysis after each ingestion batch
        #[arg(long)]
        analyze: bool,
    },

    /// Show the latest analysis run
    Report,

    /// List all recorded runs, newest first
    History,

    /// Show the most recently collected headlines
    Recent {
        /// How many headlines to show (default from config)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show system status (DB stats, headline counts, last run)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hirszemle=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing hirszemle database...");
            let config = Config::load()?;
            let conn = db::initialize(&config.db_path)?;
            let table_count = hirszemle::db::schema::table_count(&conn)?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: run `hirszemle ingest` to collect headlines.");
        }

        Commands::Ingest => {
            let config = Config::load()?;
            let conn = db::open(&config.db_path)?;
            let client = fetch::build_client()?;

            let outcomes =
                pipeline::ingest::run(&conn, &client, &config.enabled_sources()).await?;
            for outcome in &outcomes {
                println!(
                    "{}: {} headlines on page, {} new",
                    outcome.source, outcome.extracted, outcome.new_headlines
                );
            }
            println!(
                "Total headlines in store: {}",
                queries::total_count(&conn)?
            );
        }

        Commands::Analyze => {
            let config = Config::load()?;
            let conn = db::open(&config.db_path)?;
            run_analysis(&config, &conn)?;
        }

        Commands::Watch { analyze } => {
            let config = Config::load()?;
            let conn = db::open(&config.db_path)?;
            let client = fetch::build_client()?;

            info!(
                interval_secs = config.poll_interval_secs,
                analyze = analyze,
                "Watch loop started"
            );

            loop {
                pipeline::ingest::run(&conn, &client, &config.enabled_sources()).await?;
                if analyze {
                    run_analysis(&config, &conn)?;
                }
                terminal::display_recent(&queries::recent_headlines(
                    &conn,
                    config.recent_limit,
                )?);
                countdown(config.poll_interval_secs).await;
            }
        }

        Commands::Report => {
            let config = Config::load()?;
            let conn = db::open(&config.db_path)?;
            match queries::latest_run(&conn)? {
                Some(record) => terminal::display_run(&record),
                None => println!("No runs recorded yet. Run `hirszemle analyze` first."),
            }
        }

        Commands::History => {
            let config = Config::load()?;
            let conn = db::open(&config.db_path)?;
            terminal::display_history(&queries::all_runs(&conn)?);
        }

        Commands::Recent { limit } => {
            let config = Config::load()?;
            let conn = db::open(&config.db_path)?;
            let limit = limit.unwrap_or(config.recent_limit);
            terminal::display_recent(&queries::recent_headlines(&conn, limit)?);
        }

        Commands::Status => {
            let config = Config::load()?;
            if !status::database_exists(&config.db_path) {
                println!("Database: not initialized");
                println!("\nRun `hirszemle init` to set up the database.");
                return Ok(());
            }
            let conn = db::open(&config.db_path)?;
            status::show(&conn, &config.db_path)?;
        }
    }

    Ok(())
}

/// One full analysis run: corpus snapshot -> model -> aggregate -> record.
///
/// Recording failures after a successful analysis are reported as exactly
/// that — the analysis wasn't lost to a silent drop, the log write failed.
fn run_analysis(config: &Config, conn: &Connection) -> Result<()> {
    let headlines = queries::all_headlines(conn)?;
    let normalizer = Normalizer::hungarian();
    let scorer = SentimentScorer::new();
    let builder = LdaBuilder {
        params: LdaParams {
            num_topics: config.num_topics,
            iterations: config.lda_iterations,
            passes: config.lda_passes,
            seed: config.lda_seed,
        },
    };
    let settings = RunSettings {
        num_topics: config.num_topics,
        passes: config.lda_passes,
        iterations: config.lda_iterations,
        top_words: config.top_words,
    };

    let run = pipeline::analyze::run(&headlines, &normalizer, &scorer, &builder, &settings)?;
    let run_id = queries::record_run(conn, &run)
        .context("Analysis succeeded but recording the run failed")?;

    terminal::display_run(&RunRecord { id: run_id, run });
    Ok(())
}

/// Tick down the poll interval with a visible countdown bar.
async fn countdown(secs: u64) {
    let pb = ProgressBar::new(secs);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Next fetch in {eta} [{bar:30}]")
            .unwrap(),
    );
    for _ in 0..secs {
        tokio::time::sleep(Duration::from_secs(1)).await;
        pb.inc(1);
    }
    pb.finish_and_clear();
}
