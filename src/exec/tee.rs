// src/exec/tee.rs

//! Routing of child output chunks to the capture buffer and/or the terminal.

use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::exec::color::Transform;
use crate::exec::decode::ChunkDecoder;
use crate::exec::options::Encoding;
use crate::exec::terminal::{Channel, Terminal};

const READ_BUF_SIZE: usize = 8 * 1024;

/// What happens to each chunk, derived from `capture` and `quiet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeeMode {
    /// capture, quiet: decode and accumulate.
    CaptureOnly,
    /// capture, not quiet: decode, echo colorized, accumulate raw text.
    CaptureAndEcho,
    /// not capture, not quiet: decode and echo colorized.
    EchoOnly,
    /// not capture, quiet: nothing at all.
    Discard,
}

impl TeeMode {
    pub fn from_flags(capture: bool, quiet: bool) -> Self {
        match (capture, quiet) {
            (true, true) => TeeMode::CaptureOnly,
            (true, false) => TeeMode::CaptureAndEcho,
            (false, false) => TeeMode::EchoOnly,
            (false, true) => TeeMode::Discard,
        }
    }

    pub fn captures(self) -> bool {
        matches!(self, TeeMode::CaptureOnly | TeeMode::CaptureAndEcho)
    }

    pub fn echoes(self) -> bool {
        matches!(self, TeeMode::CaptureAndEcho | TeeMode::EchoOnly)
    }

    /// Whether the child's output needs to be connected to a pipe at all.
    pub fn needs_pipe(self) -> bool {
        self != TeeMode::Discard
    }

    /// Initial accumulator value: empty when capturing, `None` otherwise.
    pub fn empty_capture(self) -> Option<String> {
        self.captures().then(String::new)
    }
}

/// Per-channel reducer: owns the decoder and the accumulator.
pub struct StreamTee {
    channel: Channel,
    mode: TeeMode,
    decoder: ChunkDecoder,
    colorize: Transform,
    terminal: Arc<dyn Terminal>,
    captured: Option<String>,
}

impl StreamTee {
    pub fn new(
        channel: Channel,
        mode: TeeMode,
        encoding: Encoding,
        colorize: Transform,
        terminal: Arc<dyn Terminal>,
    ) -> Self {
        Self {
            channel,
            mode,
            decoder: ChunkDecoder::new(encoding),
            colorize,
            terminal,
            captured: mode.empty_capture(),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn captured(&self) -> Option<&str> {
        self.captured.as_deref()
    }

    /// Process one raw chunk.
    pub fn feed(&mut self, chunk: &[u8]) {
        if self.mode == TeeMode::Discard {
            return;
        }
        let text = self.decoder.decode(chunk);
        self.route(&text);
    }

    /// Flush the decoder and return the final accumulator.
    pub fn finish(mut self) -> Option<String> {
        if self.mode != TeeMode::Discard {
            let tail = self.decoder.finish();
            self.route(&tail);
        }
        self.captured
    }

    fn route(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.mode.echoes() {
            let painted = (self.colorize)(text);
            if let Err(e) = self.terminal.write(self.channel, &painted) {
                warn!(channel = self.channel.name(), error = %e, "failed to echo child output");
            }
        }
        if let Some(acc) = self.captured.as_mut() {
            acc.push_str(text);
        }
    }
}

/// Read `reader` until end-of-file or until `stop` resolves, feeding every
/// chunk through `tee`.
///
/// A missing reader (output not piped) yields the tee's initial state. A
/// read error ends the stream early; what was read so far is kept. Pending
/// data always wins over `stop`, so nothing already readable is dropped.
pub async fn pump<R, F>(reader: Option<R>, mut tee: StreamTee, stop: F) -> Option<String>
where
    R: AsyncRead + Unpin,
    F: Future<Output = ()>,
{
    let Some(mut reader) = reader else {
        return tee.finish();
    };

    tokio::pin!(stop);
    let mut buf = vec![0u8; READ_BUF_SIZE];
    loop {
        tokio::select! {
            biased;
            read = reader.read(&mut buf) => match read {
                Ok(0) => {
                    debug!(channel = tee.channel().name(), "child output stream closed");
                    break;
                }
                Ok(n) => tee.feed(&buf[..n]),
                Err(e) => {
                    warn!(channel = tee.channel().name(), error = %e, "error reading child output");
                    break;
                }
            },
            () = &mut stop => {
                debug!(
                    channel = tee.channel().name(),
                    "child exited but its output stream is still open; no longer reading"
                );
                break;
            }
        }
    }
    tee.finish()
}
