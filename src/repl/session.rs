//! REPL session
//!
//! Drives an engine from a command stream and writes human-readable replies.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::engine::Engine;
use crate::error::Result;

use super::command::{Command, Tokens};

/// An interactive session bound to one engine
pub struct Session {
    engine: Engine,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Process commands until end of input, then close the engine
    ///
    /// Engine failures are reported on `output` and the loop continues. I/O
    /// errors on `input`/`output` stop the loop early, but the engine is
    /// closed either way so acknowledged writes are flushed; the first error
    /// is returned.
    pub fn run<R: BufRead, W: Write>(mut self, input: R, mut output: W) -> Result<()> {
        let outcome = self.process(input, &mut output);
        if let Err(e) = &outcome {
            warn!(error = %e, "Session interrupted, closing engine");
        } else {
            info!("End of input, closing engine");
        }

        let closed = self.engine.close();
        outcome.and(closed)
    }

    fn process<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        writeln!(output, "Ready for commands")?;

        let mut tokens = Tokens::new(input);
        while let Some(command) = Command::read(&mut tokens)? {
            self.execute(command, output)?;
        }

        Ok(())
    }

    fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> Result<()> {
        match command {
            Command::Add { key, value } => match self.engine.add(key.as_bytes(), value.as_bytes()) {
                Ok(()) => writeln!(output, "Persisted {} = {}", key, value)?,
                Err(e) => {
                    warn!(%key, error = %e, "add failed");
                    writeln!(output, "Error: {}", e)?;
                }
            },
            Command::Get { key } => match self.engine.get(key.as_bytes()) {
                Ok(Some(value)) => writeln!(output, "{}", String::from_utf8_lossy(&value))?,
                Ok(None) => writeln!(output, "Value not found for key {}", key)?,
                Err(e) => {
                    warn!(%key, error = %e, "get failed");
                    writeln!(output, "Error: {}", e)?;
                }
            },
            Command::Incomplete { usage } => writeln!(output, "{}", usage)?,
            Command::Unexpected(token) => writeln!(output, "Unexpected token {:?}", token)?,
        }

        Ok(())
    }
}
