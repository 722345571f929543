//! bumpmine - mine package version bumps from git history
//!
//! Reads the full `git log` of a repository, pulls `package: old -> new`
//! facts out of commit subjects and records them in a SQLite store.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Logs: $XDG_STATE_HOME/bumpmine/bumpmine.log (~/.local/state/bumpmine/bumpmine.log)
//! - Config: $XDG_CONFIG_HOME/bumpmine/config.toml (~/.config/bumpmine/config.toml)
//!
//! The store defaults to `package_versions.db` next to the executable.

use anyhow::{Context, Result};
use bumpmine_core::ingest::{self, LogSource, Pipeline};
use bumpmine_core::{Config, Database, RunSummary, VersionBumpFact};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bumpmine")]
#[command(about = "Record package version bumps found in git commit messages")]
#[command(version)]
struct Args {
    /// Repository to read history from (overrides config)
    #[arg(short, long)]
    repo: Option<PathBuf>,

    /// SQLite store to write (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Read a captured `git log` output instead of running git
    #[arg(long, value_name = "FILE", conflicts_with = "repo")]
    from_log: Option<PathBuf>,

    /// Dry run - extract facts but don't write the store
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Verbose output (-v prints every extracted fact)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    // Ensure XDG environment variables are set before using core library
    Config::ensure_xdg_env();

    let config = Config::load().context("failed to load configuration")?;

    let _log_guard =
        bumpmine_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("bumpmine starting");

    let source = match &args.from_log {
        Some(path) => LogSource::Capture(path.clone()),
        None => LogSource::Repository(
            args.repo
                .clone()
                .unwrap_or_else(|| config.repository.path.clone()),
        ),
    };
    let pipeline = Pipeline::new(source);

    if args.dry_run {
        let (summary, facts) = pipeline.dry_run()?;
        if args.verbose > 0 {
            print_facts(&facts);
        }
        print_summary(&summary, args.format)?;
        tracing::info!("Dry run complete");
        return Ok(());
    }

    let db_path = args.db.clone().unwrap_or_else(|| config.store_path());

    // Extract before opening the store so a bad log never touches it.
    let extraction = pipeline.extract()?;
    if args.verbose > 0 {
        print_facts(&extraction.facts);
    }

    tracing::info!(path = %db_path.display(), "Opening database");
    let mut db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to create database schema")?;

    let summary = ingest::store(extraction, &mut db, &db_path)
        .context("failed to store version bump facts")?;

    print_summary(&summary, args.format)?;
    tracing::info!(
        inserted = summary.facts_inserted,
        skipped = summary.facts_skipped,
        "bumpmine finished"
    );

    Ok(())
}

fn print_facts(facts: &[VersionBumpFact]) {
    for fact in facts {
        println!(
            "  {} {}: {} -> {}",
            short_hash(&fact.commit_hash),
            fact.package,
            fact.previous_version,
            fact.new_version
        );
    }
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

fn print_summary(summary: &RunSummary, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", summary.to_json()?);
        return Ok(());
    }

    println!("Commits parsed:   {}", summary.commits_parsed);
    println!("Facts extracted:  {}", summary.facts_extracted);

    match &summary.store_path {
        Some(path) => {
            println!("Facts inserted:   {}", summary.facts_inserted);
            println!("Already stored:   {}", summary.facts_skipped);
            println!("Data has been written to {}", path.display());
        }
        None => println!("\nDry run - store not written"),
    }

    Ok(())
}

fn report_error(err: &anyhow::Error) {
    if let Some(core_err) = err.downcast_ref::<bumpmine_core::Error>() {
        if let Some(fragment) = core_err.fragment() {
            eprintln!("{}", core_err);
            eprintln!("Failing YAML part:");
            eprintln!("{}", fragment);
            return;
        }
    }

    eprintln!("Error: {:#}", err);
}
