//! Command definitions
//!
//! Commands are read from a whitespace-separated token stream, so a command
//! may span several input lines.

use std::collections::VecDeque;
use std::io::{self, BufRead};

pub const ADD_USAGE: &str = "Usage: add <key> <value>";
pub const GET_USAGE: &str = "Usage: get <key>";

/// Commands accepted by the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a key-value pair
    Add { key: String, value: String },

    /// Look up a key
    Get { key: String },

    /// Input ended before the command's operands were read
    Incomplete { usage: &'static str },

    /// A token that doesn't start a command
    Unexpected(String),
}

impl Command {
    /// Read the next command, or `None` at end of input
    pub fn read<R: BufRead>(tokens: &mut Tokens<R>) -> io::Result<Option<Self>> {
        let Some(word) = tokens.next_token()? else {
            return Ok(None);
        };

        let command = match word.as_str() {
            "add" => match (tokens.next_token()?, tokens.next_token()?) {
                (Some(key), Some(value)) => Command::Add { key, value },
                _ => Command::Incomplete { usage: ADD_USAGE },
            },
            "get" => match tokens.next_token()? {
                Some(key) => Command::Get { key },
                None => Command::Incomplete { usage: GET_USAGE },
            },
            _ => Command::Unexpected(word),
        };

        Ok(Some(command))
    }
}

/// Splits buffered input into whitespace-separated words
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next word, reading more lines as needed
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            // Invalid UTF-8 becomes U+FFFD instead of ending the stream
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(str::to_string),
            );
        }
    }
}
