use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

use patch_notifier::config::{ConfigError, Settings};
use patch_notifier::logging::{self, LogFormat, LogOptions};
use patch_notifier::page::fetcher::HttpPageFetcher;
use patch_notifier::page::html::HtmlLinkSource;
use patch_notifier::state::{JsonStateStore, StateStore};
use patch_notifier::watcher::{RunOutcome, WatchError, Watcher, fetch_candidates};

/// Exit code for invalid or missing configuration
const EXIT_CONFIG: u8 = 2;
/// Exit code for any failure while fetching, notifying or saving
const EXIT_FAILURE: u8 = 1;

#[derive(Parser)]
#[command(name = "patch-notifier")]
#[command(version, about = "Posts new update announcements from a web page to a webhook")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Detect without notifying or saving state
    #[arg(long, global = true)]
    dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, env = "LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Check the page once and notify on a new announcement (default)
    Check,
    /// Print every candidate on the page, highest version first
    Candidates,
    /// Print the stored state
    State,
    /// Delete the stored state so the next check notifies again
    Reset,
}

#[derive(Args)]
struct SettingsArgs {
    /// Page listing the update announcements
    #[arg(long, global = true, env = "PAGE_URL")]
    page_url: Option<String>,

    /// Incoming-webhook endpoint notifications are posted to
    #[arg(long, global = true, env = "WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Option<String>,

    /// Path of the state file
    #[arg(long, global = true, env = "STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Regex whose first capture group is the version
    #[arg(long, global = true, env = "VERSION_PATTERN")]
    pattern: Option<String>,

    /// First line of every notification
    #[arg(long, global = true, env = "NOTIFY_HEADER")]
    header: Option<String>,

    /// Timeout for each HTTP request in milliseconds
    #[arg(long, global = true, env = "FETCH_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// User agent sent with every request
    #[arg(long, global = true, env = "USER_AGENT")]
    user_agent: Option<String>,
}

impl From<SettingsArgs> for Settings {
    fn from(args: SettingsArgs) -> Self {
        Settings {
            page_url: args.page_url.unwrap_or_default(),
            webhook_url: args.webhook_url,
            state_file: args.state_file,
            version_pattern: args.pattern,
            header: args.header,
            timeout_ms: args.timeout_ms,
            user_agent: args.user_agent,
        }
    }
}

/// Why a run did not succeed
#[derive(Debug)]
enum Failure {
    Config(ConfigError),
    Watch(WatchError),
    Other(anyhow::Error),
}

impl From<ConfigError> for Failure {
    fn from(e: ConfigError) -> Self {
        Failure::Config(e)
    }
}

impl From<WatchError> for Failure {
    fn from(e: WatchError) -> Self {
        Failure::Watch(e)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(e: anyhow::Error) -> Self {
        Failure::Other(e)
    }
}

fn exit_code(result: &Result<(), Failure>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(Failure::Config(_)) => EXIT_CONFIG,
        Err(Failure::Watch(_) | Failure::Other(_)) => EXIT_FAILURE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_options = LogOptions {
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        file: cli.log_file.clone(),
    };
    let _guard = match logging::init(&log_options) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("patch-notifier: {e:#}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let result = run(cli);
    match &result {
        Ok(()) => {}
        Err(Failure::Config(e)) => error!("Configuration error: {}", e),
        Err(Failure::Watch(e)) => error!("{}", e),
        Err(Failure::Other(e)) => error!("{:#}", e),
    }
    ExitCode::from(exit_code(&result))
}

fn run(cli: Cli) -> Result<(), Failure> {
    let settings = Settings::from(cli.settings);

    match cli.command.unwrap_or(Command::Check) {
        Command::Check => {
            let config = settings.resolve()?;
            let watcher = Watcher::from_config(config)?.with_dry_run(cli.dry_run);
            let outcome = runtime()?.block_on(watcher.run_once())?;
            report(&outcome);
        }
        Command::Candidates => {
            let page = settings.resolve_page()?;
            let fetcher = HttpPageFetcher::new(&page.user_agent, page.timeout)
                .map_err(WatchError::from)?;
            let candidates = runtime()?
                .block_on(fetch_candidates(
                    &fetcher,
                    &HtmlLinkSource,
                    &page.extractor,
                    &page.url,
                ))
                .map_err(WatchError::from)?;
            for candidate in candidates {
                println!(
                    "{}\t{}\t{}",
                    candidate.version.as_deref().unwrap_or("-"),
                    candidate.url,
                    candidate.label
                );
            }
        }
        Command::State => {
            let store = JsonStateStore::new(settings.state_file_path());
            match store.load() {
                Some(state) => println!(
                    "{}",
                    serde_json::to_string_pretty(&state).map_err(anyhow::Error::from)?
                ),
                None => println!("No state stored at {}", store.path().display()),
            }
        }
        Command::Reset => {
            let store = JsonStateStore::new(settings.state_file_path());
            if store.clear().map_err(anyhow::Error::from)? {
                info!("Removed state file {}", store.path().display());
            } else {
                warn!("No state file at {}", store.path().display());
            }
        }
    }

    Ok(())
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

fn report(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::NoCandidate => info!("No candidate found; nothing to do"),
        RunOutcome::Unchanged(candidate) => info!("No new announcement ({})", candidate.url),
        RunOutcome::Notified(state) => info!(
            "Notified: {} (version {})",
            state.last_url,
            state.last_version.as_deref().unwrap_or("unknown")
        ),
        RunOutcome::WouldNotify(state) => info!("Dry run: would notify {}", state.last_url),
    }
}
