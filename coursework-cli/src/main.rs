use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use coursework_core::LoadState;
use extractors::ProjectsCsvExtractor;
use shared_types::{Facet, ProjectData};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

mod commands;
mod config;
mod session;

use session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse the course project catalog", long_about = None)]
struct Args {
    /// Config file (defaults to the per-user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    log_file_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Catalog(CatalogCommand),
    /// Build the dataset from a project application export
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Commands that read the published dataset
#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List projects matching the saved filters
    List,
    /// Change the saved filters
    Filter {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        supervisor: Option<String>,
        #[arg(long = "course")]
        courses: Vec<String>,
        #[arg(long = "type")]
        types: Vec<String>,
        #[arg(long = "format")]
        formats: Vec<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Reset every filter before applying the others
        #[arg(long)]
        clear: bool,
    },
    /// Distinct values offered for a filter facet
    Facets { facet: Facet },
    Show { id: String },
    /// Add or remove a project from favorites
    Favorite { id: String },
    Favorites {
        #[arg(long)]
        clear: bool,
    },
    /// Search supervisors, tags and courses
    Suggest {
        query: String,
        /// Pick the numbered suggestion for the next `list`
        #[arg(long)]
        select: Option<usize>,
    },
    Stats,
}

fn init_tracing(log_file_path: Option<String>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("coursework.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_catalog(path: &std::path::Path) -> Result<ProjectData> {
    match LoadState::load(path) {
        LoadState::Ready(data) => Ok(data),
        LoadState::Failed(message) => anyhow::bail!(message),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file_path);

    let (config, config_path) =
        config::CatalogConfig::load(args.config.as_deref()).context("Failed to load config")?;
    tracing::debug!("Using config at {}", config_path.display());

    let dataset_path = config.dataset_path();

    match args.command {
        Command::Import { csv, output } => {
            let output = output.unwrap_or(dataset_path);
            let report = ProjectsCsvExtractor::new()
                .import_file(&csv, &output)
                .with_context(|| format!("Failed to import {}", csv.display()))?;
            println!(
                "Imported {} new projects ({} already present); dataset now holds {}",
                report.added, report.skipped, report.data.metadata.total_projects
            );
            Ok(())
        }
        Command::Catalog(command) => {
            let data = load_catalog(&dataset_path)?;
            let mut session = Session::open(&config.state_dir());
            run_catalog_command(command, &data, &mut session)
        }
    }
}

fn run_catalog_command(
    command: CatalogCommand,
    data: &ProjectData,
    session: &mut Session,
) -> Result<()> {
    let mut out = std::io::stdout().lock();
    let now = Utc::now();

    match command {
        CatalogCommand::List => commands::list(data, session, now, &mut out),
        CatalogCommand::Filter {
            query,
            supervisor,
            courses,
            types,
            formats,
            tags,
            clear,
        } => {
            let request = commands::FilterRequest {
                clear,
                query,
                supervisor,
                courses,
                types,
                formats,
                tags,
            };
            commands::filter(data, session, request, &mut out)
        }
        CatalogCommand::Facets { facet } => commands::facets(data, facet, &mut out),
        CatalogCommand::Show { id } => commands::show(data, session, &id, &mut out),
        CatalogCommand::Favorite { id } => commands::toggle_favorite(data, session, &id, &mut out),
        CatalogCommand::Favorites { clear } => commands::favorites(data, session, clear, &mut out),
        CatalogCommand::Suggest { query, select } => {
            commands::suggestions(data, session, &query, select, now, &mut out)
        }
        CatalogCommand::Stats => commands::stats(data, session, &mut out),
    }
}
