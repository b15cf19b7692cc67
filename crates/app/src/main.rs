use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{DEFAULT_SAMPLE_SIZE, DEFAULT_TIME_LIMIT_SECS, QuizSettings, SelectionMode};
use services::{Clock, QuizService};
use storage::json::JsonQuestionStore;
use storage::repository::{QuestionStore, Storage};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use ui::{APP_TITLE, App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidDataDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidDataDir { raw } => write!(f, "invalid --data-dir value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_u32(raw: String, flag: &'static str) -> Result<u32, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

struct DesktopApp {
    quiz_service: Arc<QuizService>,
}

impl UiApp for DesktopApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }
}

struct Args {
    data_dir: PathBuf,
    sample_size: u32,
    time_limit_secs: u32,
    selection: SelectionMode,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--data-dir <path>] [--sample-size <n>] [--time-limit <secs>] [--in-order]");
    eprintln!("  cargo run -p app -- check [--data-dir <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data-dir data");
    eprintln!("  --sample-size {DEFAULT_SAMPLE_SIZE}");
    eprintln!("  --time-limit {DEFAULT_TIME_LIMIT_SECS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_DIR, QUIZ_SAMPLE_SIZE, QUIZ_TIME_LIMIT_SECS, QUIZ_IN_ORDER=1, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        let data_dir = std::env::var("QUIZ_DATA_DIR").map_or_else(|_| PathBuf::from("data"), PathBuf::from);
        let sample_size = match std::env::var("QUIZ_SAMPLE_SIZE") {
            Ok(raw) => parse_u32(raw, "QUIZ_SAMPLE_SIZE")?,
            Err(_) => DEFAULT_SAMPLE_SIZE,
        };
        let time_limit_secs = match std::env::var("QUIZ_TIME_LIMIT_SECS") {
            Ok(raw) => parse_u32(raw, "QUIZ_TIME_LIMIT_SECS")?,
            Err(_) => DEFAULT_TIME_LIMIT_SECS,
        };
        let selection = match std::env::var("QUIZ_IN_ORDER").as_deref() {
            Ok("1" | "true") => SelectionMode::InOrder,
            _ => SelectionMode::Shuffled,
        };

        Ok(Self {
            data_dir,
            sample_size,
            time_limit_secs,
            selection,
        })
    }

    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::from_env()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    let value = require_value(args, "--data-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataDir { raw: value });
                    }
                    parsed.data_dir = PathBuf::from(value);
                }
                "--sample-size" => {
                    parsed.sample_size = parse_u32(require_value(args, "--sample-size")?, "--sample-size")?;
                }
                "--time-limit" => {
                    parsed.time_limit_secs = parse_u32(require_value(args, "--time-limit")?, "--time-limit")?;
                }
                "--in-order" => parsed.selection = SelectionMode::InOrder,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

/// Load every topic file under the data dir and report what would reach a quiz.
async fn check_content(store: &JsonQuestionStore) -> Result<(), Box<dyn std::error::Error>> {
    let keys = store.topic_keys().await?;
    if keys.is_empty() {
        println!("no topics under {}", store.root().display());
        return Ok(());
    }

    let mut failed = 0usize;
    for key in &keys {
        match store.load_questions(key).await {
            Ok(pool) => println!("{key}: {} questions", pool.len()),
            Err(err) => {
                failed += 1;
                println!("{key}: {err}");
            }
        }
    }

    println!("{} topics checked, {failed} failed", keys.len());
    if failed > 0 {
        return Err(format!("{failed} topic file(s) failed to load").into());
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    match cmd {
        Command::Check => check_content(&JsonQuestionStore::new(parsed.data_dir)).await,
        Command::Ui => {
            let settings = QuizSettings::new(parsed.sample_size, parsed.time_limit_secs, parsed.selection)?;
            let storage = Storage::json_dir(&parsed.data_dir);
            tracing::info!(
                data_dir = %parsed.data_dir.display(),
                sample_size = settings.sample_size(),
                time_limit_secs = settings.time_limit_secs(),
                "starting quiz"
            );

            let quiz_service = Arc::new(
                QuizService::new(Clock::system(), storage.questions, storage.topics)
                    .with_settings(settings),
            );
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_service });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(APP_TITLE)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
