//! `coach` command line front end.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::attempts::{parse_tags, Attempt, Completion, Difficulty};
use crate::config::{default_config_path, AppConfig};
use crate::error::{CoachError, ErrorKind};
use crate::models::LanguageModel;
use crate::notify::GmailTransport;
use crate::recommend::SelectedProblem;
use crate::workflow::{self, NotifyOutcome};

/// coach: picks your next practice problem and emails it to you
#[derive(Parser)]
#[command(name = "coach", version, about = "Study scheduling assistant for DSA practice")]
pub struct Cli {
    /// Config file path
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long = "log-json", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record an attempt and pick the next problem
    Record {
        /// Problem title
        #[arg(long)]
        title: String,

        /// Easy, Medium or Hard
        #[arg(long)]
        difficulty: Difficulty,

        /// Free text, e.g. "30 mins"
        #[arg(long, default_value = "")]
        time_taken: String,

        /// yes or no
        #[arg(long)]
        completed: Completion,

        /// Comma-separated topic tags
        #[arg(long, default_value = "")]
        tags: String,

        /// Attempt date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Also email the new problem
        #[arg(long)]
        notify: bool,
    },

    /// Email the currently selected problem
    Notify,

    /// Show the revision due today, if any
    Revision,

    /// List recorded attempts
    History {
        /// Only the most recent N attempts
        #[arg(long)]
        last: Option<usize>,
    },
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn print_selected(problem: &SelectedProblem) -> Result<(), CoachError> {
    println!("{}", serde_json::to_string_pretty(problem)?);
    Ok(())
}

fn print_notify(outcome: &NotifyOutcome) {
    if outcome.sent {
        println!("Email sent: {}", outcome.notification.subject);
    } else {
        println!("Email could not be sent: {}", outcome.notification.subject);
    }
}

async fn execute(command: Command, config: &AppConfig) -> Result<bool, CoachError> {
    match command {
        Command::Record { title, difficulty, time_taken, completed, tags, date, notify } => {
            let model = LanguageModel::from_config(config)?;
            let transport = if notify {
                config.require_recipient()?;
                Some(GmailTransport::from_config(config)?)
            } else {
                None
            };

            let today = today();
            let attempt = Attempt::new(title, difficulty, completed, date.unwrap_or(today))
                .with_time_taken(time_taken)
                .with_tags(parse_tags(&tags));

            let selected = workflow::record_attempt(config, &model, attempt, today).await?;
            print_selected(&selected)?;

            if let Some(transport) = transport {
                let outcome = workflow::notify_problem(config, &model, &transport, &selected, today).await?;
                print_notify(&outcome);
                return Ok(outcome.sent);
            }
            Ok(true)
        }
        Command::Notify => {
            config.require_recipient()?;
            let transport = GmailTransport::from_config(config)?;
            let model = LanguageModel::from_config(config)?;
            let outcome = workflow::notify_selected(config, &model, &transport, today()).await?;
            print_notify(&outcome);
            Ok(outcome.sent)
        }
        Command::Revision => {
            match workflow::due_revision(config, today()).await? {
                Some(due) => println!(
                    "Revision due: {} ({}) {}",
                    due.title,
                    due.difficulty,
                    due.link().unwrap_or("")
                ),
                None => println!("No revision due today"),
            }
            Ok(true)
        }
        Command::History { last } => {
            for attempt in workflow::history(config, last).await? {
                println!("{}", crate::recommend::prompt::summarize_attempt(&attempt));
            }
            Ok(true)
        }
    }
}

fn report(err: &CoachError) {
    tracing::error!(kind = err.kind.as_str(), error = %err, "Command failed");
    eprintln!("error: {}", err);
    if err.kind == ErrorKind::Parse {
        if let Some(ref raw) = err.raw_response {
            eprintln!("Raw response:\n{}", raw);
        }
    }
}

/// Parse arguments, set up logging and configuration, and run one command
/// on a single-threaded runtime.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();
    crate::logging::init_logging(cli.log_json);

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            report(&CoachError::from(e).with_context("startup"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(execute(cli.command, &config)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}
