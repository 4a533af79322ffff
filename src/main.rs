use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use cargo_tidy::commands;
use cargo_tidy::config::{CliOverrides, FmtConfig};
use cargo_tidy::logging;
use cargo_tidy::runner::SystemRunner;
use clap::{Args, Parser, Subcommand};
use tracing::error;

#[derive(Parser)]
#[command(name = "cargo")]
#[command(bin_name = "cargo")]
enum Cli {
    Tidy(TidyArgs),
}

#[derive(Parser)]
#[command(version, about = "Lint-fix, compiler-fix and format a Rust workspace in one go")]
struct TidyArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run clippy --fix, cargo fix and cargo fmt, stopping at the first failure
    Fmt(FmtArgs),
}

#[derive(Args)]
struct FmtArgs {
    /// Project root the tools run in
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Cargo executable to invoke
    #[arg(long, env = "CARGO")]
    cargo: Option<String>,
    /// Also enable clippy::pedantic
    #[arg(long, overrides_with = "no_pedantic")]
    pedantic: bool,
    /// Disable clippy::pedantic even if tidy.toml enables it
    #[arg(long, overrides_with = "pedantic")]
    no_pedantic: bool,
    /// Allow fixing a tree that is not under version control
    #[arg(long)]
    allow_no_vcs: bool,
    /// Print the commands without running them
    #[arg(long)]
    dry_run: bool,
    /// Print a JSON run report on stdout
    #[arg(long)]
    json: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl FmtArgs {
    fn overrides(&self) -> CliOverrides {
        let pedantic = match (self.pedantic, self.no_pedantic) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        };
        CliOverrides {
            pedantic,
            allow_no_vcs: self.allow_no_vcs.then_some(true),
            cargo: self.cargo.clone(),
            dry_run: self.dry_run,
            json: self.json,
        }
    }
}

fn main() -> ExitCode {
    let Cli::Tidy(args) = Cli::parse();

    match args.command {
        Command::Fmt(fmt) => {
            logging::init(fmt.verbose);
            match run_fmt(&fmt) {
                Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
                Err(e) => {
                    error!("{e:?}");
                    eprintln!("error: {e:#}");
                    ExitCode::from(1)
                }
            }
        }
    }
}

fn run_fmt(args: &FmtArgs) -> Result<i32> {
    let config = FmtConfig::resolve(args.root.clone(), args.overrides())
        .context("failed to load configuration")?;

    let report = commands::fmt::run(&config, &mut SystemRunner);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report).context("serialize run report")?);
    }

    Ok(report.exit_code())
}
