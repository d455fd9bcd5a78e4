//! Command implementations
//!
//! Loads the dataset, starts a session, renders the first snapshot and
//! optionally keeps reading filter commands from stdin.

use super::args::{Args, default_export_dir};
use super::terminal::TerminalSink;
use crate::config::ExplorerConfig;
use crate::controller::{FilterEvent, ReactivityController, SessionHandle, Snapshot};
use crate::engine::OptionIndex;
use crate::error::WildlifeError;
use crate::models::{FilterField, Selection};
use crate::sinks::present;
use crate::store::{CsvSource, RecordStore};
use crate::views::ViewOutcome;

use anyhow::{Context, Result, anyhow, bail};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// One line of interactive input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Set(FilterField, Selection),
    Reset,
    Options(FilterField),
    /// One based page number
    Page(usize),
    Export(Option<PathBuf>),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "search" | "s" => Command::Search(rest.to_string()),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| anyhow!("usage: set <field> <value|All>"))?;
                Command::Set(parse_field(field)?, Selection::from_choice(value.trim()))
            }
            "reset" => Command::Reset,
            "options" => Command::Options(parse_field(rest)?),
            "page" | "p" => {
                let page: usize = rest.parse().context("usage: page <number>")?;
                if page == 0 {
                    bail!("pages start at 1");
                }
                Command::Page(page)
            }
            "export" => Command::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "" => bail!("empty command"),
            other => bail!("unknown command '{}' (try 'help')", other),
        };
        Ok(command)
    }
}

fn parse_field(name: &str) -> Result<FilterField> {
    FilterField::from_name(name.trim()).ok_or_else(|| {
        let names: Vec<&str> = FilterField::ALL.iter().map(|f| f.column_name()).collect();
        anyhow!("unknown field '{}' (expected one of: {})", name, names.join(", "))
    })
}

/// Run the explorer for parsed arguments
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;

    let config = args.to_config();
    config.validate()?;

    let store = Arc::new(load_store(&args, &config).await?);
    show_summary(&store);

    if let Some(name) = &args.options {
        let field = parse_field(name)?;
        show_options(&OptionIndex::build(store.records()), field);
        return Ok(());
    }

    let controller = ReactivityController::new(store, config);
    let mut session = SessionHandle::spawn(controller);

    for event in args.initial_events() {
        session.send(event).await?;
    }
    let snapshot = session.flush().await?;

    let mut sink = TerminalSink::new();
    present(&snapshot, &mut sink);

    if let Some(dir) = args.export_dir() {
        write_export(&snapshot, dir).await?;
    }

    if args.interactive {
        interactive(&mut session, &mut sink).await?;
    }

    session.shutdown().await?;
    Ok(())
}

/// Run until the explorer finishes or `shutdown` resolves.
///
/// A shutdown signal is reported as an interruption so the process exits
/// with a failure status.
pub async fn run_until<F>(args: Args, shutdown: F) -> Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        biased;
        signal = shutdown => {
            signal.context("Failed to listen for the shutdown signal")?;
            eprintln!("\nReceived CTRL+C, shutting down...");
            Err(WildlifeError::Interrupted {
                reason: "received Ctrl+C".to_string(),
            }
            .into())
        }
        result = run(args) => result,
    }
}

/// Set up structured logging
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wildlife_explorer={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

async fn load_store(args: &Args, config: &ExplorerConfig) -> Result<RecordStore> {
    let started = Instant::now();

    let spinner = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .context("Invalid progress template")?,
        );
        pb.set_message(format!("Loading {}", args.dataset_path.display()));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    };

    let result = RecordStore::load_async(
        CsvSource::new(&args.dataset_path),
        config.source.clone(),
    )
    .await;

    if let Some(pb) = &spinner {
        match &result {
            Ok(store) => pb.finish_with_message(format!(
                "Loaded {} records in {}",
                store.len(),
                HumanDuration(started.elapsed())
            )),
            Err(_) => pb.abandon_with_message("Load failed"),
        }
    }

    result.with_context(|| format!("Failed to load {}", args.dataset_path.display()))
}

fn show_summary(store: &RecordStore) {
    let summary = store.summary();
    println!(
        "{} {} ({} records)",
        "Dataset:".bright_green().bold(),
        summary.origin.display().to_string().bright_cyan(),
        summary.retained
    );
    if summary.dropped > 0 {
        println!(
            "  {}",
            format!(
                "{} of {} rows dropped for missing or invalid coordinates",
                summary.dropped, summary.source_rows
            )
            .yellow()
        );
    }
}

fn show_options(options: &OptionIndex, field: FilterField) {
    println!("{}", format!("{} options:", field).bright_green().bold());
    for label in options.labels(field) {
        println!("  {}", label);
    }
}

async fn write_export(snapshot: &Snapshot, dir: PathBuf) -> Result<()> {
    match &snapshot.views.export {
        ViewOutcome::Ready(export) => {
            let path = export.write_to(&dir).await?;
            println!(
                "{} {}",
                "Saved".bright_green().bold(),
                path.display().to_string().bright_cyan()
            );
            Ok(())
        }
        ViewOutcome::Degraded { reason } => bail!("Export unavailable: {}", reason),
    }
}

async fn interactive(session: &mut SessionHandle, sink: &mut TerminalSink) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_help();

    loop {
        print!("{} ", ">".bright_white().bold());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(error) => {
                println!("{} {:#}", "Error:".red().bold(), error);
                continue;
            }
        };

        let event = match command {
            Command::Quit => break,
            Command::Help => {
                print_help();
                continue;
            }
            Command::Options(field) => {
                show_options(&session.latest().options, field);
                continue;
            }
            Command::Page(page) => {
                sink.set_page(page - 1);
                present(&session.latest(), sink);
                continue;
            }
            Command::Export(dir) => {
                let dir = dir.unwrap_or_else(default_export_dir);
                if let Err(error) = write_export(&session.latest(), dir).await {
                    println!("{} {:#}", "Error:".red().bold(), error);
                }
                continue;
            }
            Command::Search(query) => FilterEvent::SetQuery(query),
            Command::Set(field, selection) => FilterEvent::Select(field, selection),
            Command::Reset => FilterEvent::Reset,
        };

        let before = session.latest().revision;
        let snapshot = session.update(event).await?;
        if snapshot.revision != before {
            sink.set_page(0);
            present(&snapshot, sink);
        } else {
            println!("{}", "No change".bright_black());
        }
    }

    Ok(())
}

fn print_help() {
    println!();
    println!("{}", "Commands:".bright_green().bold());
    println!("  search <text>             Filter by text (empty clears)");
    println!("  set <field> <value|All>   Restrict one field");
    println!("  reset                     Clear every filter");
    println!("  options <field>           List the choices of a field");
    println!("  page <n>                  Show a table page");
    println!("  export [dir]              Save the filtered records as CSV");
    println!("  help                      Show this message");
    println!("  quit                      Leave");
}
