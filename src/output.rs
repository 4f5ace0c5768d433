//! Output handling
//!
//! - human mode: log lines on stderr, results pretty-printed on stdout
//! - agent mode: JSON Lines events on stdout

use serde::Serialize;
use serde_json::json;

use crate::errors::Error;

/// Event wrapper for agent mode
#[derive(Serialize)]
struct Event<T: Serialize> {
    #[serde(rename = "type")]
    event_type: String,
    payload: T,
}

fn emit<T: Serialize>(event_type: &str, payload: T) {
    let event = Event {
        event_type: event_type.to_string(),
        payload,
    };
    println!("{}", serde_json::to_string(&event).unwrap());
}

/// Output handler
pub struct Output {
    agent_mode: bool,
    verbose: bool,
}

impl Output {
    pub fn new(agent_mode: bool, verbose: bool) -> Self {
        Self {
            agent_mode,
            verbose,
        }
    }

    /// Log message (stderr for human, JSON Lines for agent)
    pub fn log(&self, level: &str, message: &str) {
        if self.agent_mode {
            emit("log", json!({"level": level, "message": message}));
        } else {
            eprintln!("[{}] {}", level.to_uppercase(), message);
        }
    }

    pub fn info(&self, message: &str) {
        self.log("info", message);
    }

    /// Debug message, only shown with --verbose
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.log("debug", message);
        }
    }

    /// Final result (always JSON to stdout)
    pub fn result<T: Serialize>(&self, data: T) {
        if self.agent_mode {
            emit("result", data);
        } else {
            println!("{}", serde_json::to_string_pretty(&data).unwrap());
        }
    }

    /// Terminal error output; exits with the error's class code.
    pub fn error(&self, err: &Error) -> ! {
        if self.agent_mode {
            emit("error", json!({"message": err.to_string()}));
        } else {
            eprintln!("Error: {}", err);
        }
        std::process::exit(err.exit_code())
    }
}
