//! taskdash CLI - Task Reporting Pipeline
//!
//! Command-line interface for loading monthly task workbooks and printing
//! the aggregate views: month-wise summary, resource-wise analytics, and
//! cross-month comparison.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "taskdash")]
#[command(author, version, about = "Task reporting pipeline", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List months discovered in the working directory
    Months {
        /// Directory containing <Month>.xlsx workbooks
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Month-wise summary: metrics, completed types, top contributors
    Summary {
        /// Month to summarize (workbook base name)
        #[arg(value_name = "MONTH")]
        month: String,

        /// Directory containing <Month>.xlsx workbooks
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Restrict the breakdown and detail tables to one assignee
        #[arg(short, long)]
        assignee: Option<String>,
    },

    /// Resource-wise analytics across months (canonicalized names,
    /// date-keyed views)
    Resources {
        /// Directory containing <Month>.xlsx workbooks
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Restrict to one person (canonical name)
        #[arg(short, long)]
        person: Option<String>,

        /// Months to analyze (defaults to all discovered)
        #[arg(short, long, value_delimiter = ',')]
        months: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Month-wise progress comparison across selected months
    Compare {
        /// Months to compare
        #[arg(value_name = "MONTHS")]
        months: Vec<String>,

        /// Directory containing <Month>.xlsx workbooks
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Months { dir }) => commands::months(&dir),
        Some(Commands::Summary { month, dir, assignee }) => {
            commands::summary(&dir, &month, assignee.as_deref())
        }
        Some(Commands::Resources { dir, person, months, format }) => {
            commands::resources(&dir, person.as_deref(), &months, format)
        }
        Some(Commands::Compare { months, dir, format }) => {
            commands::compare(&dir, &months, format)
        }
        None => {
            println!("taskdash - Task Reporting Pipeline");
            println!("Run with --help for usage information");
            Ok(())
        }
    }
}
