use std::io;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{print_config::PrintConfigArg, script::ScriptArg, simulate::SimulateArg};

mod print_config;
mod script;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run a headless game with random commands and report the result as JSON
    Simulate(#[clap(flatten)] SimulateArg),
    /// Run a command script against a session and print the final board
    Script(#[clap(flatten)] ScriptArg),
    /// Print the effective session configuration as JSON
    PrintConfig(#[clap(flatten)] PrintConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode.unwrap_or(Mode::Simulate(SimulateArg::default())) {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Script(arg) => script::run(&arg)?,
        Mode::PrintConfig(arg) => print_config::run(&arg)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
