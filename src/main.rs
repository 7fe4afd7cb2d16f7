use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use regex::Regex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tokens_check::config::{DEFAULT_BUILD_TOOL, DEFAULT_CASES, DEFAULT_DIFF_TOOL};
use tokens_check::{RunConfig, Summary, SystemRunner, TestRunner};

fn main() -> Result<()> {
    init_tracing();
    Cli::parse().run()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Build Jack test cases and diff their tokenizer output",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: CommandKind,
}

impl Cli {
    fn run(self) -> Result<()> {
        let summary = match self.command {
            CommandKind::Test(args) => run_tests(args)?,
            CommandKind::Check(args) => check_dir(args)?,
        };
        if !summary.all_passed() {
            bail!("{} of {} checks failed", summary.failures(), summary.total());
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum CommandKind {
    /// Build each case and compare its *.tokens.xml files
    Test(TestArgs),
    /// Compare the *.tokens.xml files already in a directory, without building
    Check(CheckArgs),
}

#[derive(Args)]
struct TestArgs {
    /// Case directories, relative to --root. Defaults to the built-in list.
    #[arg(value_name = "CASE")]
    cases: Vec<String>,
    /// Directory the cases live in; the build tool runs from here
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Program invoked as `<build-tool> run -- <case>`
    #[arg(long, default_value = DEFAULT_BUILD_TOOL)]
    build_tool: String,
    /// Program invoked as `<diff-tool> -q --strip-trailing-cr <expected> <actual>`
    #[arg(long, default_value = DEFAULT_DIFF_TOOL)]
    diff_tool: String,
    /// Only run cases whose name matches this regex
    #[arg(long, value_name = "REGEX")]
    filter: Option<Regex>,
}

#[derive(Args)]
struct CheckArgs {
    /// Directory holding the generated and expected files
    dir: PathBuf,
    /// Program invoked as `<diff-tool> -q --strip-trailing-cr <expected> <actual>`
    #[arg(long, default_value = DEFAULT_DIFF_TOOL)]
    diff_tool: String,
}

fn run_tests(args: TestArgs) -> Result<Summary> {
    let TestArgs {
        cases,
        root,
        build_tool,
        diff_tool,
        filter,
    } = args;

    let cases = if cases.is_empty() {
        DEFAULT_CASES.iter().map(|s| s.to_string()).collect()
    } else {
        cases
    };
    let mut config = RunConfig {
        root,
        cases,
        build_tool,
        diff_tool,
    };
    if let Some(filter) = filter {
        config.retain_matching(&filter);
    }

    let mut runner = TestRunner::new(config, SystemRunner);
    info!(root = %runner.config().root.display(), cases = ?runner.config().cases, "running");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = runner.run_all(&mut out).context("failed to write report")?;
    out.flush().context("failed to write report")?;
    Ok(summary)
}

fn check_dir(args: CheckArgs) -> Result<Summary> {
    let config = RunConfig {
        diff_tool: args.diff_tool,
        ..RunConfig::default()
    };
    let mut runner = TestRunner::new(config, SystemRunner);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = runner.check_directory(&args.dir, &mut out)?;
    out.flush().context("failed to write report")?;
    Ok(summary)
}
