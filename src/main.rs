//! molcmd - MOLGENIS data platform management CLI

use clap::Parser;

use molcmd::api::MolgenisClient;
use molcmd::cli::{Cli, Commands};
use molcmd::commands;
use molcmd::config::{self, Config};
use molcmd::errors::Error;
use molcmd::history;
use molcmd::output::Output;

fn main() {
    let cli = Cli::parse();
    let out = Output::new(cli.agent, cli.verbose);

    // If no command provided, show help
    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            eprintln!("Error: no command provided. Use --help for usage.");
            std::process::exit(1);
        }
    };

    if let Err(e) = dispatch(command, &out) {
        out.error(&e);
    }
}

fn dispatch(command: Commands, out: &Output) -> Result<(), Error> {
    config::load_env();
    let config = Config::from_env()?;
    let client = MolgenisClient::new(config)?;

    // The script runner records history per line instead.
    if !matches!(command, Commands::Run(_)) {
        let invocation = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
        history::write(&invocation)?;
    }

    commands::execute(command, &client, out)
}
