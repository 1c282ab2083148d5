//! Streaming LZ78 compression engine.
//!
//! [`Compressor`] drives bytes from a [`Read`] source through the
//! dual-dictionary pair and emits variable-width codes into a
//! [`BitWriter`] over a [`Write`] sink.
//!
//! # Stream layout
//!
//! 1. `CODE_START` at 9 bits (the width of the smallest dictionary);
//! 2. the negotiated dictionary size at 21 bits (the width of the
//!    largest);
//! 3. data codes, each at the width tracking dictionary occupancy;
//! 4. `CODE_EOF`, then `CODE_STOP`, each at the prevailing width;
//! 5. zero padding to the next byte boundary.
//!
//! # Cooperative suspension
//!
//! [`run`](Compressor::run) returns [`Lz78Error::Again`] whenever the
//! source or sink would block.  All state — the dictionaries, the
//! partially written code, the bit stream's buffer — lives in the engine,
//! so re-invoking `run` resumes exactly where the previous call stopped.

use std::io::{self, Read, Write};

use crate::bitio::BitWriter;
use crate::config::{DICT_SIZE_DEFAULT, DICT_SIZE_MAX, DICT_SIZE_MIN};
use crate::dict::{CompressDual, Step};
use crate::engine::types::{bitlen, Lz78Error, CODE_EOF, CODE_START, CODE_STOP};

/// Where the per-byte state machine stands in the stream protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// `CODE_START` is pending; the size announce comes next.
    Announce,
    /// Steady state: consume bytes, emit phrase codes.
    Run,
    /// Input exhausted; `CODE_EOF` comes next.
    Eof,
    /// `CODE_EOF` emitted; `CODE_STOP` comes next.
    Stop,
    /// `CODE_STOP` emitted; finish on the next pass.
    Done,
}

/// Streaming LZ78 compressor.
pub struct Compressor<R: Read, W: Write> {
    input: R,
    output: BitWriter<W>,
    dict: CompressDual,
    stage: Stage,
    /// Code bits accepted by the dictionary layer but not yet handed to
    /// the bit stream, LSB-first.
    pending: u32,
    n_bits: u32,
    completed: bool,
}

impl<R: Read, W: Write> Compressor<R, W> {
    /// Creates a compressor over `input`/`output`.
    ///
    /// `d_size` is the requested dictionary size (0 selects
    /// [`DICT_SIZE_DEFAULT`]; out-of-range values are clamped).
    /// `capacity_bits` sizes the output bit buffer and must be a non-zero
    /// multiple of 8.
    pub fn new(
        input: R,
        output: W,
        d_size: u32,
        capacity_bits: usize,
    ) -> Result<Self, Lz78Error> {
        let d_size = if d_size == 0 { DICT_SIZE_DEFAULT } else { d_size };
        let output =
            BitWriter::new(output, capacity_bits).map_err(|_| Lz78Error::Initialization)?;
        Ok(Compressor {
            input,
            output,
            dict: CompressDual::new(d_size),
            stage: Stage::Announce,
            pending: CODE_START,
            n_bits: bitlen(DICT_SIZE_MIN),
            completed: false,
        })
    }

    /// `true` once the full stream, trailer included, has been written.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Dictionary size after clamping; the value announced in the header.
    pub fn dict_size(&self) -> u32 {
        self.dict.size()
    }

    /// Runs the engine until the stream completes or an I/O side blocks.
    ///
    /// Returns `Ok(())` on clean completion (the bit stream is padded,
    /// flushed, and closed), [`Lz78Error::Again`] if the caller should
    /// retry after a readiness signal, or a terminal error.  After a
    /// terminal error the instance must be dropped.
    pub fn run(&mut self) -> Result<(), Lz78Error> {
        if self.completed {
            return self.close_output();
        }

        loop {
            if self.n_bits > 0 {
                let bytes = self.pending.to_le_bytes();
                let n = self
                    .output
                    .write(&bytes, self.n_bits as usize, 0)
                    .map_err(|_| Lz78Error::Write)? as u32;
                self.pending = if n >= 32 { 0 } else { self.pending >> n };
                self.n_bits -= n;
                if self.n_bits > 0 {
                    return Err(Lz78Error::Again);
                }
            }

            let byte = self.read_byte()?;
            self.step(byte);

            if self.completed {
                return self.close_output();
            }
        }
    }

    /// Reads one input byte; `None` at end of input.
    fn read_byte(&mut self) -> Result<Option<u8>, Lz78Error> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    return Err(Lz78Error::Again)
                }
                Err(_) => return Err(Lz78Error::Read),
            }
        }
    }

    /// Advances the protocol state machine by one input symbol.
    ///
    /// Called with the pending-bit buffer empty; leaves at most one code
    /// in it.
    fn step(&mut self, byte: Option<u8>) {
        match self.stage {
            Stage::Announce => {
                self.pending = self.dict.size();
                self.n_bits = bitlen(DICT_SIZE_MAX);
                self.stage = Stage::Run;
                // The first symbol is always absorbed by an empty
                // dictionary, so it cannot clobber the announce word.
            }
            Stage::Eof => {
                self.pending = CODE_EOF;
                self.n_bits = bitlen(self.dict.next_code());
                self.stage = Stage::Stop;
                return;
            }
            Stage::Stop => {
                self.pending = CODE_STOP;
                self.n_bits = bitlen(self.dict.next_code());
                self.stage = Stage::Done;
                return;
            }
            Stage::Done => {
                self.completed = true;
                return;
            }
            Stage::Run => {}
        }

        let label = match byte {
            Some(b) => b as u16,
            None => {
                // Flush the in-progress phrase by feeding the EOF
                // pseudo-label through the dictionary like any byte.
                self.stage = Stage::Eof;
                CODE_EOF as u16
            }
        };

        match self.dict.update(label) {
            Step::Absorbed => {}
            Step::Emit { code, next_code } => {
                self.pending = code;
                self.n_bits = bitlen(next_code - 1);
            }
        }
    }

    /// Pads, flushes, and closes the bit stream.
    fn close_output(&mut self) -> Result<(), Lz78Error> {
        match self.output.close() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Err(Lz78Error::Again),
            Err(_) => Err(Lz78Error::Write),
        }
    }

    /// Consumes the engine, returning the input and output streams.
    ///
    /// Unless [`run`](Self::run) returned `Ok(())`, unflushed output bits
    /// are discarded.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output.into_inner())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn compress_all(data: &[u8], d_size: u32) -> Vec<u8> {
        let mut out = Vec::new();
        let mut eng = Compressor::new(data, &mut out, d_size, 4096).unwrap();
        eng.run().unwrap();
        drop(eng);
        out
    }

    #[test]
    fn empty_input_produces_header_and_trailer_only() {
        // START(9) + size(21) + EOF(9) + STOP(9) = 48 bits = 6 bytes.
        let out = compress_all(b"", 4096);
        assert_eq!(out.len(), 6);
        assert_eq!(out, vec![0x02, 0x01, 0x20, 0x00, 0xC0, 0x81]);
    }

    #[test]
    fn clamps_dictionary_size() {
        let eng = Compressor::new(&b""[..], Vec::new(), 1, 4096).unwrap();
        assert_eq!(eng.dict_size(), DICT_SIZE_MIN + 1);
        let eng = Compressor::new(&b""[..], Vec::new(), 0, 4096).unwrap();
        assert_eq!(eng.dict_size(), DICT_SIZE_DEFAULT);
        let eng = Compressor::new(&b""[..], Vec::new(), u32::MAX, 4096).unwrap();
        assert_eq!(eng.dict_size(), DICT_SIZE_MAX);
    }

    #[test]
    fn rejects_bad_buffer_capacity() {
        assert!(matches!(
            Compressor::new(&b""[..], Vec::new(), 0, 13),
            Err(Lz78Error::Initialization)
        ));
    }

    #[test]
    fn compressible_input_shrinks() {
        let data = b"abcabcabcabcabc".repeat(70_000); // ~1 MiB
        let out = compress_all(&data, 4096);
        assert!(out.len() < data.len(), "{} !< {}", out.len(), data.len());
    }

    #[test]
    fn run_after_completion_is_idempotent() {
        let mut out = Vec::new();
        let mut eng = Compressor::new(&b"hello"[..], &mut out, 0, 4096).unwrap();
        eng.run().unwrap();
        assert!(eng.is_completed());
        eng.run().unwrap();
        drop(eng);
        assert!(!out.is_empty());
    }
}
