//! Command implementations

pub mod add;
pub mod give;
pub mod import;
pub mod make;
pub mod ping;
pub mod run;

use crate::api::MolgenisClient;
use crate::cli::Commands;
use crate::errors::Error;
use crate::output::Output;

/// Dispatch a parsed command. The script runner re-enters this same path
/// for every script line.
pub fn execute(command: Commands, client: &MolgenisClient, out: &Output) -> Result<(), Error> {
    match command {
        Commands::Give(cmd) => give::run(cmd, client, out),
        Commands::Add(cmd) => add::run(cmd, client, out),
        Commands::Make(cmd) => make::run(cmd, client, out),
        Commands::Import(cmd) => import::run(cmd, client, out),
        Commands::Ping => ping::run(client, out),
        Commands::Run(cmd) => run::run(cmd, client, out),
    }
}
