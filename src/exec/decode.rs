// src/exec/decode.rs

//! Streaming byte-to-text decoding for output chunks.
//!
//! Pipe reads can split a multi-byte UTF-8 sequence across two chunks. The
//! decoder keeps the incomplete tail and prepends it to the next chunk, so
//! decoding chunk by chunk gives the same text as decoding the whole stream
//! at once.

use std::fmt::Write as _;

use crate::exec::options::Encoding;

#[derive(Debug, Clone)]
pub struct ChunkDecoder {
    encoding: Encoding,
    pending: Vec<u8>,
}

impl ChunkDecoder {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            pending: Vec::new(),
        }
    }

    /// Decode the next chunk of the stream.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        match self.encoding {
            Encoding::Utf8 => self.decode_utf8(chunk),
            Encoding::Latin1 => chunk.iter().map(|&b| char::from(b)).collect(),
            Encoding::Ascii => chunk.iter().map(|&b| char::from(b & 0x7f)).collect(),
            Encoding::Hex => {
                let mut out = String::with_capacity(chunk.len() * 2);
                for b in chunk {
                    let _ = write!(out, "{b:02x}");
                }
                out
            }
        }
    }

    /// Flush whatever is still buffered at end of stream.
    ///
    /// An incomplete UTF-8 sequence left over here decodes to U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let rest = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&rest).into_owned()
    }

    fn decode_utf8(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = &bytes[..];
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            // Incomplete sequence at the end; wait for more bytes.
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }
}
