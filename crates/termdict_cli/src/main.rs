//! Terminal front end for the term dictionary.
//!
//! # Responsibility
//! - Load the dictionary once, apply one subject/search filter, print cards.
//! - Keep all business logic in `termdict_core`; this binary only renders.

use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use termdict_core::{
    DictionarySession, DisplayState, FailurePolicy, LoaderConfig, LoggingConfig, SessionView,
    Subject, TermLoader,
};

const DATA_DIR_ENV: &str = "TERMDICT_DATA_DIR";

#[derive(Debug, Parser)]
#[command(name = "termdict", version, about = "Browse Physics, Mathematics and Biology terms")]
struct Cli {
    /// Directory holding physics.json, mathematics.json and biology.json.
    #[arg(long, env = DATA_DIR_ENV, default_value = "data")]
    data_dir: PathBuf,

    /// Restrict to one subject (label or key, e.g. `math`).
    #[arg(long)]
    subject: Option<Subject>,

    /// Case-insensitive text matched against terms and definitions.
    #[arg(long, default_value = "")]
    search: String,

    /// Per-source retrieval timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Keep subjects that loaded when others fail.
    #[arg(long)]
    best_effort: bool,

    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[arg(long, default_value_t = termdict_core::default_log_level().to_string())]
    log_level: String,

    /// Print displayed terms as JSON instead of cards.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let started = LoggingConfig::parse(&cli.log_level, &log_dir.to_string_lossy())
            .and_then(|config| termdict_core::start_logging(config.with_stderr_warnings()));
        if let Err(err) = started {
            eprintln!("termdict: {err}");
            return ExitCode::FAILURE;
        }
    }

    let policy = if cli.best_effort {
        FailurePolicy::BestEffort
    } else {
        FailurePolicy::AllOrNothing
    };
    let config = LoaderConfig::for_data_dir(&cli.data_dir)
        .with_source_timeout(Duration::from_millis(cli.timeout_ms))
        .with_failure_policy(policy);
    let loader = match TermLoader::with_default_fetcher(config) {
        Ok(loader) => loader,
        Err(err) => {
            eprintln!("termdict: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = DictionarySession::new();
    session.set_selected_subject(cli.subject);
    session.set_search_text(cli.search.clone());
    if let Err(err) = session.begin_loading() {
        eprintln!("termdict: {err}");
        return ExitCode::FAILURE;
    }
    let outcome = loader.load().await;
    if let Err(err) = session.finish_loading(outcome) {
        eprintln!("termdict: {err}");
        return ExitCode::FAILURE;
    }

    let view = session.view();
    info!(
        "event=cli_render module=cli status=ok state={} displayed={}",
        view.display_state().as_str(),
        view.displayed_terms.len()
    );
    if cli.json {
        render_json(&view)
    } else {
        render_cards(&view)
    }
}

fn render_json(view: &SessionView) -> ExitCode {
    if let Some(message) = &view.error {
        eprintln!("termdict: {message}");
        return ExitCode::FAILURE;
    }
    match serde_json::to_string_pretty(&view.displayed_terms) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("termdict: failed to encode terms: {err}");
            ExitCode::FAILURE
        }
    }
}

fn render_cards(view: &SessionView) -> ExitCode {
    for warning in &view.warnings {
        eprintln!("warning: {warning}");
    }

    match view.display_state() {
        DisplayState::Loading => {
            println!("Loading terms...");
            ExitCode::SUCCESS
        }
        DisplayState::Error(message) => {
            eprintln!("Error Loading Data");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        DisplayState::NoTermsAvailable => {
            println!("No terms available.");
            if let Some(notice) = &view.notice {
                println!("{notice}");
            }
            ExitCode::SUCCESS
        }
        DisplayState::NoMatches => {
            println!("No terms match your current search or filter.");
            println!("Try adjusting your search or filter criteria.");
            ExitCode::SUCCESS
        }
        DisplayState::Results(_) => {
            for term in &view.displayed_terms {
                println!("{} [{}]", term.term, term.subject);
                println!("    {}", term.definition);
            }
            ExitCode::SUCCESS
        }
    }
}
