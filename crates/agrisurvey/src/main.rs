// crates/agrisurvey/src/main.rs

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polars::io::parquet::write::{ParquetCompression, ParquetWriter};
use polars::prelude::{DataFrame, ParquetReader, SerReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use agrisurvey_core::config::{LoggingLevel, PipelineConfig};
use agrisurvey_core::observer::observer_for;
use agrisurvey_core::pipelines::{run_field_pipeline, run_weather_pipeline};
use agrisurvey_core::validation;
use agrisurvey_ingest::{connect, fetch_joined_records, CsvFetcher, DbPool};

#[derive(Parser, Debug)]
#[command(version, about = "Survey field-record and weather-log pipeline", long_about = None)]
struct Cli {
    /// Path to the pipeline configuration file.
    #[arg(long, default_value = "agrisurvey.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Correct and enrich the field survey records.
    Field {
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,
    },
    /// Extract weather measurements and aggregate per-station means.
    Weather {
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,
    },
    /// Run both pipelines.
    Run {
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,
    },
    /// Check invariants on a previously produced field table.
    Validate {
        /// Parquet file to check.
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = PipelineConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    init_tracing(config.logging_level);

    match cli.command {
        Command::Field { out_dir } => {
            let enriched = field_pipeline(&config).await?;
            publish(&out_dir, "enriched_field_records.parquet", enriched)?;
        }
        Command::Weather { out_dir } => {
            let output = weather_pipeline(&config).await?;
            publish(&out_dir, "weather_measurements.parquet", output.messages)?;
            publish(&out_dir, "station_measurement_means.parquet", output.means)?;
        }
        Command::Run { out_dir } => {
            let enriched = field_pipeline(&config).await?;
            publish(&out_dir, "enriched_field_records.parquet", enriched)?;

            let output = weather_pipeline(&config).await?;
            publish(&out_dir, "weather_measurements.parquet", output.messages)?;
            publish(&out_dir, "station_measurement_means.parquet", output.means)?;
        }
        Command::Validate { input } => {
            validate(&input)?;
        }
    }

    Ok(())
}

async fn field_pipeline(config: &PipelineConfig) -> Result<DataFrame> {
    let pool = connect_pool().await?;
    let records = fetch_joined_records(&pool)
        .await
        .context("field survey ingestion failed")?;

    let fetcher = CsvFetcher::new();
    let stations = fetcher
        .fetch_csv(&config.weather_mapping_source)
        .await
        .context("station mapping fetch failed")?;

    let observer = observer_for(config.logging_level);
    let enriched = run_field_pipeline(records, stations, config, observer.as_ref())
        .context("field correction pipeline failed")?;

    info!(rows = enriched.height(), "field records enriched");
    Ok(enriched)
}

async fn weather_pipeline(
    config: &PipelineConfig,
) -> Result<agrisurvey_core::pipelines::WeatherPipelineOutput> {
    let fetcher = CsvFetcher::new();
    let messages = fetcher
        .fetch_csv(&config.weather_message_source)
        .await
        .context("weather message fetch failed")?;

    let observer = observer_for(config.logging_level);
    let output = run_weather_pipeline(messages, config, observer.as_ref())
        .context("weather measurement pipeline failed")?;

    info!(
        stations = output.means.height(),
        "station measurement means computed"
    );
    Ok(output)
}

fn validate(input: &Path) -> Result<()> {
    let file =
        File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let df = ParquetReader::new(file)
        .finish()
        .with_context(|| format!("failed to read parquet from {}", input.display()))?;

    validation::validate_required_columns(&df)?;
    validation::validate_non_negative(&df, "Elevation")?;
    validation::validate_positive(&df, "Rainfall")?;

    println!("✅ {} rows passed validation.", df.height());
    Ok(())
}

async fn connect_pool() -> Result<DbPool> {
    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    Ok(connect(&database_url).await?)
}

fn publish(dir: &Path, name: &str, mut df: DataFrame) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(name);
    let file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Zstd(None))
        .finish(&mut df)
        .with_context(|| format!("failed to write parquet to {}", path.display()))?;

    println!("  -> wrote {} ({} rows)", path.display(), df.height());
    Ok(path)
}

fn init_tracing(level: LoggingLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
