//! Append-only history of executed command lines

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::config;
use crate::errors::Error;

fn history_file() -> PathBuf {
    config::home_dir().join("history")
}

/// Append one executed command line. The log is write-only; nothing in
/// the tool reads it back.
pub fn write(line: &str) -> Result<(), Error> {
    let path = history_file();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}
