//! Line-oriented presentation layer for the demo binary.
//!
//! Parses one command per input line and renders the list for display. The
//! store itself knows nothing about this module.

use crate::intent::Intent;
use crate::types::{TodoCollection, TodoId};
use std::num::ParseIntError;
use thiserror::Error;

/// Help text printed by the `help` command
pub const HELP: &str = "\
Commands:
  add <text>      add a todo
  toggle <id>     flip a todo between done and open
  remove <id>     delete a todo
  list            show all todos
  {\"type\": ...}   send a tagged intent as JSON
  metrics         show store metrics
  help            show this help
  quit            exit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dispatch a typed intent
    Dispatch(Intent),
    /// Dispatch a raw tagged intent
    Tagged(String),
    /// Print the list
    List,
    /// Print metrics
    Metrics,
    /// Print help
    Help,
    /// Exit
    Quit,
}

/// Errors from parsing an input line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Nothing to do
    #[error("Empty input")]
    Empty,

    /// `add` without text
    #[error("Nothing to add: the todo text is blank")]
    BlankText,

    /// `toggle`/`remove` with a bad id
    #[error("Invalid todo id {input:?}: {source}")]
    InvalidId {
        /// Text given as the id
        input: String,
        /// Parse failure
        #[source]
        source: ParseIntError,
    },

    /// Unrecognized command word
    #[error("Unknown command {0:?} (try `help`)")]
    Unknown(String),
}

impl Command {
    /// Parses one input line
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing why the line is not a command.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        if line.starts_with('{') {
            return Ok(Self::Tagged(line.to_string()));
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "add" => {
                if rest.is_empty() {
                    Err(CommandError::BlankText)
                } else {
                    Ok(Self::Dispatch(Intent::create(rest)))
                }
            },
            "toggle" => parse_id(rest).map(|id| Self::Dispatch(Intent::toggle(id))),
            "remove" => parse_id(rest).map(|id| Self::Dispatch(Intent::remove(id))),
            "list" => Ok(Self::List),
            "metrics" => Ok(Self::Metrics),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Whether running this command changes the list
    #[must_use]
    pub const fn mutates(&self) -> bool {
        matches!(self, Self::Dispatch(_) | Self::Tagged(_))
    }
}

fn parse_id(input: &str) -> Result<TodoId, CommandError> {
    input.parse().map_err(|source| CommandError::InvalidId {
        input: input.to_string(),
        source,
    })
}

/// Renders the list, one `[x] <id> <text>` line per todo
#[must_use]
pub fn render(todos: &TodoCollection) -> String {
    if todos.is_empty() {
        return "(no todos)".to_string();
    }

    let lines: String = todos
        .iter()
        .map(|todo| {
            let mark = if todo.is_done() { 'x' } else { ' ' };
            format!("[{mark}] {} {}\n", todo.id(), todo.text())
        })
        .collect();
    format!("{lines}{}/{} done", todos.completed_count(), todos.len())
}
