use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vdialect_core::{Config, Expr, Granularity, IntervalUnit, LogicalType};
use vdialect_driver::{SqlDriver, VerticaDriver};

const DEFAULT_CONFIG: &str = "vdialect.toml";

/// vdialect - Vertica dialect adapter toolkit
#[derive(Parser)]
#[command(name = "vdialect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: vdialect.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a Vertica column type to its logical type
    ResolveType {
        /// Native type name, e.g. "Long Varchar"
        name: String,
    },

    /// Compile a temporal truncation or extraction
    Truncate {
        /// Granularity token, e.g. week or day-of-week
        granularity: Granularity,

        /// Dotted column identifier, or a string value with --literal
        expr: String,

        /// Treat EXPR as a string literal
        #[arg(short, long)]
        literal: bool,
    },

    /// Compile an offset from the current timestamp
    Offset {
        /// Interval unit, e.g. day or month
        unit: IntervalUnit,

        /// Whole number of units, may be negative
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Print the connection spec built from the config's [connection] table
    Connection,

    /// List connection properties
    Properties,

    /// Print the session timezone statement
    Timezone {
        /// Zone name (default: report_timezone from config)
        timezone: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.verbose)?;
    let driver = VerticaDriver::from_config(&config.catalog);

    match cli.command {
        Commands::ResolveType { name } => resolve_type_command(&driver, &name),
        Commands::Truncate {
            granularity,
            expr,
            literal,
        } => truncate_command(&driver, granularity, &expr, literal, cli.verbose),
        Commands::Offset { unit, amount } => offset_command(&driver, unit, amount),
        Commands::Connection => connection_command(&driver, &config),
        Commands::Properties => properties_command(&driver),
        Commands::Timezone { timezone } => timezone_command(&config, timezone),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    let config = if let Some(config_path) = path {
        Config::from_file(config_path)?
    } else if Path::new(DEFAULT_CONFIG).exists() {
        Config::from_file(Path::new(DEFAULT_CONFIG))?
    } else {
        if verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    tracing::debug!(
        project_root = %config.project_root.display(),
        report_timezone = ?config.report_timezone,
        include_views = config.catalog.include_views,
        "loaded configuration"
    );

    Ok(config)
}

fn resolve_type_command(driver: &VerticaDriver, name: &str) -> Result<()> {
    let logical = driver.resolve_type(name);
    let category = type_category(logical);
    println!(
        "{} -> {} {}",
        name.bold(),
        logical.to_string().green(),
        format!("({})", category).dimmed()
    );
    Ok(())
}

fn type_category(logical: LogicalType) -> &'static str {
    if logical.is_temporal() {
        "temporal"
    } else if logical.is_numeric() {
        "numeric"
    } else {
        "other"
    }
}

fn granularity_kind(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Default => "unchanged",
        g if g.is_extraction() => "integer extraction",
        _ => "timestamp truncation",
    }
}

fn truncate_command(
    driver: &VerticaDriver,
    granularity: Granularity,
    expr: &str,
    literal: bool,
    verbose: bool,
) -> Result<()> {
    let input = if literal {
        Expr::string(expr)
    } else {
        Expr::qualified(expr.split('.'))
    };

    tracing::debug!(%granularity, input = %input, "compiling temporal expression");
    let compiled = driver.truncate(granularity, input);

    if verbose {
        eprintln!(
            "{} {}",
            granularity.to_string().cyan(),
            granularity_kind(granularity).dimmed()
        );
    }

    println!("{}", compiled);
    Ok(())
}

fn offset_command(driver: &VerticaDriver, unit: IntervalUnit, amount: f64) -> Result<()> {
    let expr = driver.date_offset(unit, amount)?;
    println!("{}", expr);
    Ok(())
}

fn connection_command(driver: &VerticaDriver, config: &Config) -> Result<()> {
    if config.connection.is_empty() {
        eprintln!("{}", "No [connection] table in config, using defaults".yellow());
    }

    let spec = driver.connection_spec(&config.connection)?;
    eprintln!("{} {}", "URL:".cyan(), spec.url());
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}

fn properties_command(driver: &VerticaDriver) -> Result<()> {
    println!("{}", format!("{} connection properties", driver.display_name()).bold());
    for property in driver.connection_properties() {
        let marker = if property.required {
            "required".red()
        } else {
            "optional".dimmed()
        };
        print!("  {:<20} {:<45} {}", property.name.green(), property.display_name, marker);
        if let Some(default) = property.default {
            print!(" (default: {})", default);
        }
        if let Some(placeholder) = property.placeholder {
            print!(" (e.g. {})", placeholder.dimmed());
        }
        println!();
    }
    Ok(())
}

fn timezone_command(config: &Config, timezone: Option<String>) -> Result<()> {
    let timezone = timezone
        .or_else(|| config.report_timezone.clone())
        .ok_or_else(|| anyhow::anyhow!("No timezone given and no report_timezone in config"))?;

    println!("{}", VerticaDriver::set_timezone_statement(&timezone));
    Ok(())
}
