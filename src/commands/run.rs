//! Script execution
//!
//! Runs a file of command lines through the same dispatch path as
//! interactive invocation, in file order. No reordering, no parallelism,
//! no silent skips.

use std::fs;

use clap::Parser;

use crate::api::MolgenisClient;
use crate::cli::{Cli, Commands, RunCommand};
use crate::errors::Error;
use crate::history;
use crate::output::Output;

pub fn run(cmd: RunCommand, client: &MolgenisClient, out: &Output) -> Result<(), Error> {
    let content = fs::read_to_string(&cmd.script)
        .map_err(|e| Error::Script(format!("error reading script {}: {}", cmd.script, e)))?;

    let exit_on_error = !cmd.ignore_errors;

    for line in content.lines() {
        if line.split(' ').next() == Some("run") {
            return Err(nested_run(line));
        }

        let command = match parse_line(line) {
            Ok(command) => command,
            Err(e) => {
                if exit_on_error {
                    return Err(e);
                }
                out.log("error", &format!("{} (line: {})", e, line));
                continue;
            }
        };

        // Global flags before the command name would slip past the
        // first-token check; nested invocation aborts the whole script
        // regardless of --ignore-errors.
        if matches!(command, Commands::Run(_)) {
            return Err(nested_run(line));
        }

        history::write(line)?;
        if let Err(e) = super::execute(command, client, out) {
            if exit_on_error {
                return Err(e);
            }
            out.log("error", &format!("{} (line: {})", e, line));
        }
    }
    Ok(())
}

/// Parse one line with the interactive grammar.
fn parse_line(line: &str) -> Result<Commands, Error> {
    let args = std::iter::once("molcmd").chain(line.split(' '));
    let cli = Cli::try_parse_from(args)
        .map_err(|e| Error::Script(format!("invalid script line '{}': {}", line, e)))?;
    cli.command
        .ok_or_else(|| Error::Script(format!("invalid script line '{}'", line)))
}

fn nested_run(line: &str) -> Error {
    Error::Script(format!("can't use the run command in a script: {}", line))
}
