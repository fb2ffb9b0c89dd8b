//! REPL Module
//!
//! Line-oriented front end over the engine.
//!
//! ### Commands
//! - `add <key> <value>` → `Persisted <key> = <value>`
//! - `get <key>`         → the value, or `Value not found for key <key>`
//!
//! Anything else is echoed back as an unexpected token.

mod command;
mod session;

pub use command::{Command, Tokens, ADD_USAGE, GET_USAGE};
pub use session::Session;
