//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_state_adapter::JsonStateStore;
use crate::adapters::log_notifier::LogNotifier;
use crate::adapters::providers;
use crate::adapters::watch_file_adapter::load_watches;
use crate::domain::config_validation::validate_app_config;
use crate::domain::error::PricewatchError;
use crate::domain::run::{Orchestrator, RunOptions, RunReport, WatchOutcome};
use crate::domain::settings::{
    DEFAULT_STATE_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_WATCHES_PATH, GarminSettings, HttpSettings,
    Settings,
};
use crate::domain::state::StateFile;
use crate::domain::watch::{WatchConfig, display_value};
use crate::ports::config_port::ConfigPort;
use crate::ports::notifier_port::{NoopNotifier, NotifierPort};
use crate::ports::state_port::StatePort;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "pricewatch.ini";

#[derive(Parser, Debug)]
#[command(name = "pricewatch", version, about = "A CLI tool to track price drops")]
pub struct Cli {
    /// Path to the INI config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Verbose diagnostics on stderr, and response bodies for failed requests
    #[arg(long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run price checks
    Run {
        /// Run a specific watch by id
        #[arg(long)]
        id: Option<String>,
    },
    /// List all configured watches
    List,
    /// Remove saved state for watches no longer configured
    Prune {
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let adapter = match load_config(cli.config.as_deref()) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let settings = match build_settings(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match cli.command {
        Command::Run { id } => run_check(&settings, id, cli.debug),
        Command::List => run_list(&settings),
        Command::Prune { dry_run } => run_prune(&settings, dry_run),
    }
}

/// Loads the INI file. An explicit path must exist; the default one is optional.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, ExitCode> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    if !required && !path.exists() {
        tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_PATH);
        return Ok(FileConfigAdapter::empty());
    }

    FileConfigAdapter::from_file(&path).map_err(|e| {
        let err = PricewatchError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_settings(adapter: &dyn ConfigPort) -> Result<Settings, PricewatchError> {
    validate_app_config(adapter)?;

    let garmin_defaults = GarminSettings::default();
    Ok(Settings {
        watches_path: adapter
            .get_string("paths", "watches")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WATCHES_PATH)),
        state_path: adapter
            .get_string("paths", "state")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH)),
        http: HttpSettings {
            timeout_secs: adapter
                .get_u64("http", "timeout_secs")?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            user_agent: adapter.get_string("http", "user_agent"),
        },
        garmin: GarminSettings {
            template: adapter.get_string("provider.garmin", "template"),
            country: adapter
                .get_string("provider.garmin", "country")
                .unwrap_or(garmin_defaults.country),
            locale: adapter
                .get_string("provider.garmin", "locale")
                .unwrap_or(garmin_defaults.locale),
            customer_group: adapter
                .get_string("provider.garmin", "customer_group")
                .unwrap_or(garmin_defaults.customer_group),
        },
        log_events: adapter.get_bool("notify", "log_events")?.unwrap_or(false),
    })
}

fn runtime() -> Result<tokio::runtime::Runtime, ExitCode> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            eprintln!("error: failed to start runtime: {e}");
            ExitCode::from(1)
        })
}

fn load_watch_list(settings: &Settings) -> Result<Vec<WatchConfig>, ExitCode> {
    load_watches(&settings.watches_path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_check(settings: &Settings, id: Option<String>, debug: bool) -> ExitCode {
    let watches = match load_watch_list(settings) {
        Ok(w) => w,
        Err(code) => return code,
    };

    let registry = match providers::default_registry(settings) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let store = JsonStateStore::new(&settings.state_path);
    let notifier: Box<dyn NotifierPort> = if settings.log_events {
        Box::new(LogNotifier)
    } else {
        Box::new(NoopNotifier)
    };

    let rt = match runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    if id.is_none() {
        eprintln!("Running price checks...\n");
    }

    let orchestrator = Orchestrator::new(&registry, &store, notifier.as_ref());
    let options = RunOptions {
        only_id: id,
        now: None,
    };
    match rt.block_on(orchestrator.run(&watches, &options)) {
        Ok(report) => {
            print!("{}", format_report(&report, debug));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Renders a run. With `debug`, failed requests also show the response body.
pub fn format_report(report: &RunReport, debug: bool) -> String {
    let mut out = String::new();
    if let Some(id) = &report.unmatched_id {
        let _ = writeln!(out, "No watch found with id: {}", id);
        return out;
    }
    for outcome in &report.outcomes {
        out.push_str(&format_outcome(outcome, debug));
        out.push('\n');
    }
    out
}

pub fn format_outcome(outcome: &WatchOutcome, debug: bool) -> String {
    let mut out = String::new();
    match outcome {
        WatchOutcome::Checked {
            watch_id,
            provider,
            on_sale,
            snapshot,
            ..
        } => {
            let _ = writeln!(out, "{}", watch_id);
            let _ = writeln!(out, "   Provider: {}", provider);
            let _ = writeln!(out, "   On Sale: {}", if *on_sale { "YES" } else { "no" });
            if let Some(current) = snapshot.current_price {
                let price = match (*on_sale, snapshot.list_price) {
                    (true, Some(list)) => format!("{} ({})", current, list),
                    _ => current.to_string(),
                };
                let currency = snapshot.currency.as_deref().unwrap_or("");
                let line = format!("   Price: {} {}", price, currency);
                let _ = writeln!(out, "{}", line.trim_end());
            }
        }
        WatchOutcome::Failed {
            watch_id, error, ..
        } => {
            let _ = writeln!(out, "{}", watch_id);
            let _ = writeln!(out, "   Failed: {}", error);
            if let Some(body) = error.response_snippet().filter(|_| debug) {
                let _ = writeln!(out, "   Response: {}", body);
            }
        }
    }
    out
}

fn run_list(settings: &Settings) -> ExitCode {
    match load_watch_list(settings) {
        Ok(watches) => {
            print!("{}", format_watch_list(&watches));
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}

pub fn format_watch_list(watches: &[WatchConfig]) -> String {
    let mut out = String::new();
    if watches.is_empty() {
        out.push_str("No watches configured.\n");
        return out;
    }

    out.push_str("Watch List\n\n");
    for (index, watch) in watches.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, watch.id);
        let _ = writeln!(out, "   Provider: {}", watch.provider);
        for (key, value) in &watch.config {
            let _ = writeln!(out, "   {}: {}", key, display_value(value));
        }
        if let Some(rule) = &watch.rule {
            let _ = writeln!(out, "   Rule: {}", rule);
        }
        out.push('\n');
    }
    out
}

fn run_prune(settings: &Settings, dry_run: bool) -> ExitCode {
    let watches = match load_watch_list(settings) {
        Ok(w) => w,
        Err(code) => return code,
    };
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };
    let store = JsonStateStore::new(&settings.state_path);

    match rt.block_on(prune_state(&store, &watches, dry_run)) {
        Ok(removed) if removed.is_empty() => {
            eprintln!("No orphaned state records");
            ExitCode::SUCCESS
        }
        Ok(removed) => {
            for id in &removed {
                println!("{}", id);
            }
            if dry_run {
                eprintln!("{} orphaned state records (dry run, nothing removed)", removed.len());
            } else {
                eprintln!("Removed {} orphaned state records", removed.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Drops state records whose id is not in `watches`. Saves only when
/// something was removed and `dry_run` is false. Returns the orphaned ids.
pub async fn prune_state(
    store: &dyn StatePort,
    watches: &[WatchConfig],
    dry_run: bool,
) -> Result<Vec<String>, PricewatchError> {
    let mut state: StateFile = store.load().await?;
    let known = watches.iter().map(|w| w.id.as_str());

    if dry_run {
        return Ok(state.orphans(known));
    }

    let removed = state.prune(known);
    if !removed.is_empty() {
        store.save(&state).await?;
        tracing::info!(removed = removed.len(), "pruned orphaned state");
    }
    Ok(removed)
}
