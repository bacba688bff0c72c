use recap::cli::{Action, App};
use recap::config;
use recap::prompt::Prompter;
use recap::site::DocumentGenerator;

use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "recap", version, about)]
struct Args {
    /// Run one action instead of showing the menu.
    #[arg(value_enum)]
    action: Option<Action>,
}

fn run(args: Args) -> Result<()> {
    let cfg = config::load()?;
    let repo = recap::open_repository(&cfg)?;
    let docs = DocumentGenerator::from_config(&cfg);

    let stdin = io::stdin();
    let prompt = Prompter::new(stdin.lock(), io::stdout());
    App::new(&repo, &docs, prompt).run(args.action)
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
