// src/main.rs

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_backend::{BackendConfig, NotionBackend, NotionId, QueryOptions};
use std::fs;

/// Inspect and manage a Notion-backed project.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineInput {
    /// Project root page URL or ID
    #[arg(long)]
    root: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the root has Datasets, Experiments and Comparisons pages
    Validate,

    /// Resolve a child page title to its ID
    FindPage {
        title: String,
        /// Parent page (defaults to the root)
        #[arg(long)]
        parent: Option<String>,
        /// Print every match instead of requiring exactly one
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Resolve a child database title (case-insensitive) to its ID
    FindDatabase {
        title: String,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Create a child page and print its ID
    CreatePage {
        title: String,
        #[arg(long)]
        parent: Option<String>,
    },

    /// Print every record of a database as JSON
    Query {
        database: String,
        /// List archived records instead of live ones
        #[arg(long, default_value_t = false)]
        archived: bool,
    },
}

/// Sets up logging: console (stderr) at the requested level, plus a debug
/// log file in the temp directory.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_backend.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn parse_id(input: &str) -> anyhow::Result<NotionId> {
    NotionId::parse(input).with_context(|| format!("'{}' is not a Notion ID or URL", input))
}

/// Parent given on the command line, or the project root.
fn parent_or_root(backend: &NotionBackend, parent: Option<&str>) -> anyhow::Result<NotionId> {
    match parent {
        Some(parent) => parse_id(parent),
        None => Ok(backend.root_page_id().clone()),
    }
}

async fn run(backend: &NotionBackend, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Validate => {
            let root = backend.root_page_id().clone();
            if backend.validate_project_structure(&root).await {
                println!("✓ {} has a valid project structure", root);
            } else {
                anyhow::bail!("{} is not a valid project root", root);
            }
        }
        Command::FindPage { title, parent, all } => {
            let parent = parent_or_root(backend, parent.as_deref())?;
            if all {
                for id in backend.find_page_ids(&parent, &title).await? {
                    println!("{}", id);
                }
            } else {
                println!("{}", backend.find_page_id(&parent, &title).await?);
            }
        }
        Command::FindDatabase { title, parent, all } => {
            let parent = parent_or_root(backend, parent.as_deref())?;
            if all {
                for id in backend.find_database_ids(&parent, &title).await? {
                    println!("{}", id);
                }
            } else {
                println!("{}", backend.find_database_id(&parent, &title).await?);
            }
        }
        Command::CreatePage { title, parent } => {
            let parent = parent_or_root(backend, parent.as_deref())?;
            println!("{}", backend.create_new_page(&parent, &title).await?);
        }
        Command::Query { database, archived } => {
            let database = parse_id(&database)?;
            let records = backend
                .query_database(&database, QueryOptions::default().archived(archived))
                .await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = BackendConfig::from_env(&cli.root)?;
    let backend = NotionBackend::connect(&config)?;
    log::info!("Using {:?}", backend);

    run(&backend, cli.command).await
}
