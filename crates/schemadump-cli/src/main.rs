//! schemadump CLI - Generate source code from a live MySQL schema.

use clap::{Parser, Subcommand};
use schemadump::bootstrap::load_schema_file;
use schemadump::{
    Config, DumpError, Inspector, MysqlReader, OutputFormat, OutputTarget, Schema, SourceConfig,
    TypeResolver,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "schemadump")]
#[command(about = "Generate source code from a live MySQL schema")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MySQL connection URL (overrides source settings in the config file)
    #[arg(long)]
    dsn: Option<String>,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the schema and render code for its tables
    Generate {
        /// Tables to generate (default: all tables)
        tables: Vec<String>,

        /// Schema file executed before inspection
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Output: STDOUT, a file, or a pattern with %t for one file per table
        #[arg(long)]
        output: Option<String>,

        /// Output format: rust or json
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Template file rendered once per table (overrides --format)
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Print the inspected schema as JSON
    Inspect {
        /// Tables to inspect (default: all tables)
        tables: Vec<String>,
    },

    /// Test the database connection
    HealthCheck,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), DumpError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(DumpError::Config)?;

    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Generate {
            tables,
            schema,
            output,
            format,
            template,
        } => {
            // Apply overrides
            if !tables.is_empty() {
                config.inspect.tables = tables;
            }
            if let Some(path) = schema {
                config.schema_file = Some(path);
            }
            if let Some(path) = output {
                config.output.path = path;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if let Some(path) = template {
                config.output.template = Some(path);
            }
            config.validate()?;
            let renderer = config.output.renderer()?;

            let reader = MysqlReader::connect(&config.source).await?;
            if let Some(ref path) = config.schema_file {
                load_schema_file(&reader, path).await?;
            }

            let (schema, reader) = inspect(reader, &config).await?;
            reader.close().await;

            let target = OutputTarget::parse(&config.output.path);
            let written = schemadump::write_schema(&schema, &renderer, &target)?;
            for path in written {
                info!("Generated {}", path.display());
            }
        }

        Commands::Inspect { tables } => {
            if !tables.is_empty() {
                config.inspect.tables = tables;
            }
            config.validate()?;

            let reader = MysqlReader::connect(&config.source).await?;
            let (schema, reader) = inspect(reader, &config).await?;
            reader.close().await;

            println!("{}", schema.to_json()?);
        }

        Commands::HealthCheck => {
            config.validate()?;

            let started = Instant::now();
            let reader = MysqlReader::connect(&config.source).await?;
            reader.test_connection().await?;
            let latency_ms = started.elapsed().as_millis();
            reader.close().await;

            println!("Health Check Results:");
            println!("  Source (MySQL): OK ({}ms)", latency_ms);
            println!("    Server: {}", config.source.display_target());
            println!("    Database: {}", reader.database());
        }
    }

    Ok(())
}

/// Load the config file (if any) and apply global overrides.
fn load_config(cli: &Cli) -> Result<Config, DumpError> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load_partial(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None if cli.dsn.is_some() => Config::default(),
        None => {
            return Err(DumpError::Config(
                "either --config or --dsn is required".to_string(),
            ))
        }
    };

    if let Some(ref dsn) = cli.dsn {
        config.source = SourceConfig::from_url(dsn.clone());
    }

    Ok(config)
}

/// Run the inspector with the configured type map and index grouping.
///
/// The reader is handed back so the caller can close it.
async fn inspect(
    reader: MysqlReader,
    config: &Config,
) -> Result<(Schema, MysqlReader), DumpError> {
    let inspector = Inspector::new(reader)
        .with_resolver(TypeResolver::new(config.inspect.type_map()))
        .with_index_grouping(config.inspect.index_grouping);

    let schema = if config.inspect.tables.is_empty() {
        inspector.inspect_all().await?
    } else {
        inspector
            .inspect_tables(config.inspect.tables.as_slice())
            .await?
    };

    Ok((schema, inspector.into_source()))
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr; stdout carries generated output
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => {
            return Err(format!(
                "unknown log format '{}', expected 'text' or 'json'",
                other
            ))
        }
    }

    Ok(())
}
