//! CLI for issue-tracelog.
//!
//! Links GitHub issues to the commits and pull requests that resolved them
//! and renders Gource logs from the result.

use clap::{Parser, Subcommand, ValueEnum};
use issue_tracelog::{
    load_token, resolve_repo, Command, GourceMode, RunSummary, Runner, RunnerConfig, RunnerError,
    Settings, DEFAULT_TOKEN_FILE,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// issue-tracelog - Recover issue traceability and visualize it with Gource.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML settings file.
    #[arg(long, env = "TRACELOG_CONFIG")]
    config: Option<PathBuf>,

    /// Repository owner.
    #[arg(long, env = "TRACELOG_OWNER")]
    owner: Option<String>,

    /// Repository name.
    #[arg(long, env = "TRACELOG_REPO")]
    repo: Option<String>,

    /// File holding the GitHub Personal Access Token.
    #[arg(long, env = "TRACELOG_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Directory for the JSON corpora and logs.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Scan the timelines of open issues too.
    #[arg(long)]
    link_open_issues: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Download all issues of the repository.
    Fetch,
    /// Link downloaded issues to commits and pull requests.
    Link,
    /// Print the Traceability Recovery Rate.
    Metrics,
    /// Write a Gource custom log.
    Gource {
        /// Which log to write.
        #[arg(long, value_enum, default_value_t = Mode::Simple)]
        mode: Mode,

        /// Native Gource log to merge with (merged mode).
        #[arg(long)]
        git_log: Option<PathBuf>,

        /// Output file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run every pass and write every log.
    All {
        /// Native Gource log to merge with.
        #[arg(long)]
        git_log: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Simple,
    Detailed,
    Merged,
}

impl From<Mode> for GourceMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Simple => GourceMode::Simple,
            Mode::Detailed => GourceMode::Detailed,
            Mode::Merged => GourceMode::Merged,
        }
    }
}

impl From<Cmd> for Command {
    fn from(cmd: Cmd) -> Self {
        match cmd {
            Cmd::Fetch => Command::Fetch,
            Cmd::Link => Command::Link,
            Cmd::Metrics => Command::Metrics,
            Cmd::Gource {
                mode,
                git_log,
                output,
            } => Command::Gource {
                mode: mode.into(),
                native_log: git_log,
                output,
            },
            Cmd::All { git_log } => Command::All {
                native_log: git_log,
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_missing_inputs() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Installs a compact subscriber filtered by `RUST_LOG`, defaulting to `info`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Resolves settings, loads the token when needed and runs the command.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let repo = resolve_repo(
        args.owner.as_deref().or(settings.owner.as_deref()),
        args.repo.as_deref().or(settings.repo.as_deref()),
    )?;
    let output_dir = args
        .output_dir
        .or(settings.output_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let command = Command::from(args.command);
    let mut config = RunnerConfig::new(repo, output_dir)
        .with_pacing(settings.pacing)
        .with_include_open(args.link_open_issues || settings.link_open_issues);

    if command.needs_network() {
        let token_file = args
            .token_file
            .or(settings.token_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE));
        config = config.with_token(load_token(&token_file)?);
    }

    Runner::new(config).run(&command).await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");

    if let Some(count) = summary.issues_fetched {
        println!("  Issues fetched: {count}");
    }

    if let Some(link) = &summary.link {
        println!("  Issues processed: {}", link.processed);
        println!("  With commits: {}", link.with_commits);
        println!("  With PRs: {}", link.with_prs);
        println!("  Not scanned (open): {}", link.not_scanned);
        println!("  Timeline failures: {}", link.timeline_failures);
    }

    if let Some(report) = &summary.traceability {
        println!();
        for line in report.to_string().lines() {
            println!("  {line}");
        }
        println!();
    }

    for (path, counts) in &summary.logs {
        println!("  {path}: {counts}");
    }

    for path in &summary.missing_inputs {
        println!("  Missing input: {path}");
    }
}
