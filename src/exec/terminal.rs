// src/exec/terminal.rs

//! Where displayed text goes.
//!
//! The executor never writes to `std::io::stdout()` directly; it talks to a
//! [`Terminal`]. Production code uses [`StdTerminal`]; tests can swap in a
//! recording implementation to assert on exactly what was echoed.

use std::fmt::Debug;
use std::io::{self, Write};

/// One of the two output channels of a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Stdout,
    Stderr,
}

impl Channel {
    pub fn name(self) -> &'static str {
        match self {
            Channel::Stdout => "stdout",
            Channel::Stderr => "stderr",
        }
    }
}

/// Sink for echoed output.
///
/// `write` is called inline from the stream pumps and may block. A slow sink
/// holds up reading from the child, which then blocks on its own full pipe:
/// the child is paced by the terminal and no output is dropped.
pub trait Terminal: Send + Sync + Debug {
    fn write(&self, channel: Channel, text: &str) -> io::Result<()>;
}

/// Writes to this process's own stdout / stderr.
///
/// Each write is flushed so interleaving with the banner and the other
/// channel matches the child's order. The write blocks the calling worker
/// for as long as the terminal takes; only this run's pumps share that task.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdTerminal;

impl Terminal for StdTerminal {
    fn write(&self, channel: Channel, text: &str) -> io::Result<()> {
        match channel {
            Channel::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Channel::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(text.as_bytes())?;
                err.flush()
            }
        }
    }
}
