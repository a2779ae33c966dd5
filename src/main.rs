use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use coldreads::app::CLEAR_PROGRESS_PROMPT;
use coldreads::config::analytics::{AnalyticsEvent, AnalyticsLog};
use coldreads::config::preferences::DarkMode;
use coldreads::config::progress::Progress;
use coldreads::share::{NoShareSheet, ShareOutcome, SystemClipboard};
use coldreads::time::{Clock, format_date, format_date_str};
use coldreads::timer::ReadingTimer;
use coldreads::validation::validate_email;
use coldreads::{Config, FileStore, Notifier, ToastKind, calculate_score};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "coldreads")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Storage file to use instead of the default data directory
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a quiz and show the grade
    Score { correct: u32, total: u32 },
    /// Check whether an email address is well formed
    Email { address: String },
    /// Inspect or change passage progress
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },
    /// Inspect or append to the analytics log
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },
    /// Show or change the dark-mode preference
    DarkMode {
        #[command(subcommand)]
        action: DarkModeAction,
    },
    /// Copy text to the system clipboard
    Copy { text: String },
    /// Share a link, copying it when no share sheet is available
    Share { url: String },
    /// Run a reading timer until Ctrl-C
    Timer,
    /// Format an ISO-8601 date for display
    Date { raw: String },
}

#[derive(Subcommand)]
enum ProgressAction {
    /// List every completed passage
    List,
    /// Show one passage
    Show { passage: String },
    /// Record a completed passage
    Record { passage: String, score: f64 },
    /// Remove all progress
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List passages scoring below a threshold
    Weak {
        #[arg(default_value_t = 70.0)]
        threshold: f64,
    },
}

#[derive(Subcommand)]
enum AnalyticsAction {
    /// List recorded events
    List {
        /// Only show events with this name
        #[arg(long)]
        event: Option<String>,
    },
    /// Record an event
    Track {
        name: String,
        /// Event data as a JSON object
        #[arg(long, default_value = "{}")]
        data: String,
        /// Page the event belongs to
        #[arg(long, default_value = "")]
        url: String,
    },
}

#[derive(Subcommand)]
enum DarkModeAction {
    Status,
    On,
    Off,
    Toggle,
}

impl Commands {
    /// Whether the command reads `config.json`
    fn uses_config(&self) -> bool {
        matches!(self, Commands::DarkMode { .. } | Commands::Share { .. })
    }
}

/// Prints notifications to the terminal
struct Console;

impl Notifier for Console {
    fn notify(&mut self, message: &str, kind: ToastKind, _duration: Duration) {
        match kind {
            ToastKind::Error => eprintln!("✗ {message}"),
            ToastKind::Success => println!("✓ {message}"),
            ToastKind::Info => println!("{message}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coldreads=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let Cli { store, command } = Cli::parse();
    // Pure commands never touch the config directory
    let config = if command.uses_config() { Config::load()? } else { Config::default() };

    match command {
        Commands::Score { correct, total } => {
            let score = calculate_score(correct, total)?;
            println!("{}% ({}/{}) grade {}", score.percentage, score.correct, score.total, score.grade);
        }
        Commands::Email { address } => {
            if validate_email(&address) {
                println!("valid");
            } else {
                bail!("'{}' is not a valid email address", address);
            }
        }
        Commands::Progress { action } => {
            let mut store = open_store(store)?;
            run_progress(action, &mut store)?;
        }
        Commands::Analytics { action } => {
            let mut store = open_store(store)?;
            run_analytics(action, &mut store)?;
        }
        Commands::DarkMode { action } => {
            let mut store = open_store(store)?;
            let current = DarkMode::load(&store, config.dark_mode_default)?;
            let next = match action {
                DarkModeAction::Status => None,
                DarkModeAction::On => Some(DarkMode(true)),
                DarkModeAction::Off => Some(DarkMode(false)),
                DarkModeAction::Toggle => Some(DarkMode(!current.is_enabled())),
            };
            match next {
                Some(mode) => {
                    mode.save(&mut store)?;
                    Console.info(mode.announcement());
                }
                None => println!("{}", if current.is_enabled() { "on" } else { "off" }),
            }
        }
        Commands::Copy { text } => {
            let mut clipboard = SystemClipboard::new()?;
            if !coldreads::share::copy_to_clipboard(&mut clipboard, &mut Console, &text).await {
                std::process::exit(1);
            }
        }
        Commands::Share { url } => {
            let mut clipboard = SystemClipboard::new()?;
            let data = config.share_data(&url);
            let outcome =
                coldreads::share::share_page(&mut NoShareSheet, &mut clipboard, &mut Console, &data).await;
            match outcome {
                ShareOutcome::Failed(reason) => bail!("Share failed: {}", reason),
                ShareOutcome::CopiedLink(false) => std::process::exit(1),
                _ => {}
            }
        }
        Commands::Timer => {
            let mut timer = ReadingTimer::start_ticking(Clock::System, |elapsed| {
                print!("\r{elapsed}");
                let _ = io::stdout().flush();
            });
            println!("Reading... press Ctrl-C to stop");
            tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C")?;
            timer.stop();
            println!("\nRead for {}", timer.display());
        }
        Commands::Date { raw } => {
            println!("{}", format_date_str(&raw)?);
        }
    }

    Ok(())
}

fn open_store(path: Option<PathBuf>) -> Result<FileStore> {
    let path = match path {
        Some(path) => path,
        None => Config::store_path()?,
    };
    Ok(FileStore::open(path)?)
}

fn run_progress(action: ProgressAction, store: &mut FileStore) -> Result<()> {
    let mut progress = Progress::load(store)?;

    match action {
        ProgressAction::List => {
            if progress.is_empty() {
                println!("No progress recorded yet");
                return Ok(());
            }
            for (id, entry) in &progress.passages {
                println!("{:<24} {:>5.1}%  {}", id, entry.score, format_date(entry.date));
            }
            if let Some(average) = progress.average_score() {
                println!("Average: {average:.1}%");
            }
        }
        ProgressAction::Show { passage } => match progress.get(&passage) {
            Some(entry) => println!("{}", serde_json::to_string_pretty(entry)?),
            None => bail!("No progress for passage '{}'", passage),
        },
        ProgressAction::Record { passage, score } => {
            progress.record(&passage, score, Clock::System.now());
            progress.save(store)?;
            Console.success(&format!("Progress saved! Score: {score}%"));
        }
        ProgressAction::Clear { yes } => {
            if !yes && !confirm(CLEAR_PROGRESS_PROMPT)? {
                return Ok(());
            }
            Progress::clear(store)?;
            Console.success("All progress cleared");
        }
        ProgressAction::Weak { threshold } => {
            for (id, score) in progress.weak_passages(threshold) {
                println!("{id:<24} {score:>5.1}%");
            }
        }
    }

    Ok(())
}

fn run_analytics(action: AnalyticsAction, store: &mut FileStore) -> Result<()> {
    let mut log = AnalyticsLog::load(store)?;

    match action {
        AnalyticsAction::List { event } => {
            let events: Vec<&AnalyticsEvent> = match &event {
                Some(name) => log.named(name).collect(),
                None => log.events.iter().collect(),
            };
            for event in events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
        AnalyticsAction::Track { name, data, url } => {
            let data = serde_json::from_str(&data).context("--data must be a JSON object")?;
            log.push(AnalyticsEvent { event: name, data, timestamp: Clock::System.now(), url });
            log.save(store)?;
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("coldreads").chain(args.iter().copied()))
            .expect("arguments should parse")
            .command
    }

    #[test]
    fn pure_commands_skip_config() {
        assert!(!command(&["score", "17", "20"]).uses_config());
        assert!(!command(&["email", "a@b.co"]).uses_config());
        assert!(!command(&["date", "2026-10-19T12:00:00Z"]).uses_config());
        assert!(!command(&["progress", "list"]).uses_config());
    }

    #[test]
    fn preference_and_share_commands_read_config() {
        assert!(command(&["dark-mode", "toggle"]).uses_config());
        assert!(command(&["share", "https://coldreads.example/"]).uses_config());
    }

    #[test]
    fn explicit_store_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = open_store(Some(path.clone())).unwrap();
        assert_eq!(store.path(), path.as_path());
    }
}
