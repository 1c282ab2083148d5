//! Streaming LZ78 decompression engine.
//!
//! [`Decompressor`] reads variable-width codes from a [`BitReader`] over
//! a [`Read`] source, reconstructs the byte stream through the
//! dual-dictionary pair, and delivers it to a [`Write`] sink.
//!
//! The dictionary size is not known until the stream header has been
//! decoded, so the dictionaries are created on receipt of the size
//! announce; until then the engine reads at the protocol's fixed header
//! widths (9 bits for `CODE_START`, 21 for the size word).
//!
//! # Cooperative suspension
//!
//! [`run`](Decompressor::run) returns [`Lz78Error::Again`] when either
//! stream would block.  Partially read code bits, undelivered decoded
//! bytes, and all dictionary state stay in the engine, so re-invocation
//! resumes exactly.

use std::io::{self, Read, Write};

use crate::bitio::BitReader;
use crate::config::{DICT_SIZE_MAX, DICT_SIZE_MIN};
use crate::dict::DecompressDual;
use crate::engine::types::{bitlen, Lz78Error, CODE_EOF, CODE_SIZE, CODE_START, CODE_STOP};

/// Protocol position, carrying the dictionaries once they exist.
enum Stage {
    /// Expecting `CODE_START` (or `CODE_SIZE`) at the fixed header width.
    Start,
    /// Expecting the dictionary size word.
    Size,
    /// Steady state: data codes at the occupancy-tracking width.
    Stream(DecompressDual),
}

/// Streaming LZ78 decompressor.
pub struct Decompressor<R: Read, W: Write> {
    input: BitReader<R>,
    output: W,
    stage: Stage,
    /// Code bits accumulated so far, LSB-first; a code is consumed only
    /// once all `width()` bits have arrived.
    bitbuf: u32,
    n_bits: u32,
    completed: bool,
}

impl<R: Read, W: Write> Decompressor<R, W> {
    /// Creates a decompressor over `input`/`output`.  `capacity_bits`
    /// sizes the input bit buffer and must be a non-zero multiple of 8.
    pub fn new(input: R, output: W, capacity_bits: usize) -> Result<Self, Lz78Error> {
        let input =
            BitReader::new(input, capacity_bits).map_err(|_| Lz78Error::Initialization)?;
        Ok(Decompressor {
            input,
            output,
            stage: Stage::Start,
            bitbuf: 0,
            n_bits: 0,
            completed: false,
        })
    }

    /// `true` once `CODE_EOF` has been decoded and all output delivered.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Width of the next code, derived from the same dictionary state the
    /// compressor had when it emitted it.
    fn width(&self) -> u32 {
        match &self.stage {
            Stage::Start => bitlen(DICT_SIZE_MIN),
            Stage::Size => bitlen(DICT_SIZE_MAX),
            Stage::Stream(dict) => bitlen(dict.next_code()),
        }
    }

    /// Runs the engine until the stream completes or an I/O side blocks.
    ///
    /// Returns `Ok(())` on clean completion, [`Lz78Error::Again`] if the
    /// caller should retry after a readiness signal, or a terminal error.
    /// After a terminal error the instance must be dropped.
    pub fn run(&mut self) -> Result<(), Lz78Error> {
        if self.completed {
            return self.finish();
        }

        loop {
            self.flush_pending()?;

            let width = self.width();
            if self.n_bits < width {
                let mut bytes = self.bitbuf.to_le_bytes();
                let start = self.n_bits as usize;
                let got = self
                    .input
                    .read(
                        &mut bytes[start / 8..],
                        (width as usize) - start,
                        (start % 8) as u8,
                    )
                    .map_err(|_| Lz78Error::Read)? as u32;
                self.bitbuf = u32::from_le_bytes(bytes);
                self.n_bits += got;
                if self.n_bits < width {
                    // A short read at true end-of-input means the stream
                    // was cut off mid-code.
                    return if self.input.at_eof() {
                        Err(Lz78Error::Decompress)
                    } else {
                        Err(Lz78Error::Again)
                    };
                }
            }

            let code = self.bitbuf;
            self.bitbuf = 0;
            self.n_bits = 0;
            self.step(code)?;

            if self.completed {
                return self.finish();
            }
        }
    }

    /// Delivers decoded bytes still sitting in the dictionary scratch.
    fn flush_pending(&mut self) -> Result<(), Lz78Error> {
        let dict = match &mut self.stage {
            Stage::Stream(dict) => dict,
            _ => return Ok(()),
        };
        while !dict.pending().is_empty() {
            match self.output.write(dict.pending()) {
                Ok(0) => return Err(Lz78Error::Write),
                Ok(n) => dict.consume(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    return Err(Lz78Error::Again)
                }
                Err(_) => return Err(Lz78Error::Write),
            }
        }
        Ok(())
    }

    /// Consumes one fully-assembled code.
    fn step(&mut self, code: u32) -> Result<(), Lz78Error> {
        match &mut self.stage {
            Stage::Start => {
                if code == CODE_START || code == CODE_SIZE {
                    self.stage = Stage::Size;
                    Ok(())
                } else {
                    Err(Lz78Error::Decompress)
                }
            }
            Stage::Size => {
                if code <= DICT_SIZE_MIN || code > DICT_SIZE_MAX {
                    return Err(Lz78Error::Decompress);
                }
                self.stage = Stage::Stream(DecompressDual::new(code));
                Ok(())
            }
            Stage::Stream(dict) => {
                if code == CODE_EOF {
                    self.completed = true;
                    return Ok(());
                }
                if matches!(code, CODE_SIZE | CODE_START | CODE_STOP)
                    || code >= dict.next_code()
                {
                    return Err(Lz78Error::Decompress);
                }
                dict.update(code);
                Ok(())
            }
        }
    }

    /// Final output flush once the stream has completed.
    fn finish(&mut self) -> Result<(), Lz78Error> {
        match self.output.flush() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Err(Lz78Error::Again),
            Err(_) => Err(Lz78Error::Write),
        }
    }

    /// Consumes the engine, returning the input and output streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input.into_inner(), self.output)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compress::Compressor;

    fn roundtrip(data: &[u8], d_size: u32) -> Vec<u8> {
        let mut packed = Vec::new();
        let mut enc = Compressor::new(data, &mut packed, d_size, 4096).unwrap();
        enc.run().unwrap();
        drop(enc);

        let mut out = Vec::new();
        let mut dec = Decompressor::new(&packed[..], &mut out, 4096).unwrap();
        dec.run().unwrap();
        assert!(dec.is_completed());
        drop(dec);
        out
    }

    #[test]
    fn empty_roundtrip() {
        assert_eq!(roundtrip(b"", 0), b"");
    }

    #[test]
    fn short_ascii_roundtrip() {
        assert_eq!(roundtrip(b"ABABABABAB", 0), b"ABABABABAB");
        assert_eq!(roundtrip(b"AAAAAAAA", 261), b"AAAAAAAA");
    }

    #[test]
    fn rejects_stream_without_header() {
        // A literal code where CODE_START belongs.
        let bogus = [0x41u8, 0x00, 0x00, 0x00, 0x00, 0x00];
        let mut out = Vec::new();
        let mut dec = Decompressor::new(&bogus[..], &mut out, 4096).unwrap();
        assert_eq!(dec.run(), Err(Lz78Error::Decompress));
    }

    #[test]
    fn rejects_truncated_stream() {
        let mut packed = Vec::new();
        let mut enc = Compressor::new(&b"truncate me please"[..], &mut packed, 0, 4096).unwrap();
        enc.run().unwrap();
        drop(enc);
        // Cut deep into the data codes, well before the EOF sentinel.
        packed.truncate(10);

        let mut out = Vec::new();
        let mut dec = Decompressor::new(&packed[..], &mut out, 4096).unwrap();
        assert_eq!(dec.run(), Err(Lz78Error::Decompress));
    }

    #[test]
    fn rejects_bad_size_announce() {
        // START at 9 bits followed by a 21-bit size of 100 (< minimum).
        let mut bits = Vec::new();
        let mut push = |value: u32, width: u32| {
            for k in 0..width {
                bits.push((value >> k) & 1 != 0);
            }
        };
        push(CODE_START, 9);
        push(100, 21);
        let mut bytes = vec![0u8; (bits.len() + 7) / 8];
        for (pos, bit) in bits.iter().enumerate() {
            if *bit {
                bytes[pos / 8] |= 1 << (pos % 8);
            }
        }
        let mut out = Vec::new();
        let mut dec = Decompressor::new(&bytes[..], &mut out, 4096).unwrap();
        assert_eq!(dec.run(), Err(Lz78Error::Decompress));
    }
}
