use std::io;
use std::sync::{Arc, Mutex};

use justrun::exec::{Channel, Terminal};

/// A terminal that records every write instead of printing it.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// executor and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryTerminal {
    writes: Arc<Mutex<Vec<(Channel, String)>>>,
}

impl MemoryTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write, in order.
    pub fn writes(&self) -> Vec<(Channel, String)> {
        self.writes.lock().unwrap().clone()
    }

    /// Everything written to one channel, concatenated.
    pub fn text(&self, channel: Channel) -> String {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(ch, _)| *ch == channel)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.lock().unwrap().is_empty()
    }
}

impl Terminal for MemoryTerminal {
    fn write(&self, channel: Channel, text: &str) -> io::Result<()> {
        self.writes.lock().unwrap().push((channel, text.to_string()));
        Ok(())
    }
}
