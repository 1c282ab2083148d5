//! Bit-granular buffered I/O over byte streams.
//!
//! [`BitReader`] and [`BitWriter`] move runs of bits between caller buffers
//! and an underlying [`Read`] / [`Write`] stream, buffering whole bytes
//! internally.  Bit order is LSB-first within each byte: bit `k` of the
//! stream lives in byte `k / 8` at bit position `k % 8`.
//!
//! # Window model
//!
//! Both halves maintain a window `[w_start, w_start + w_len)` measured in
//! bits over the internal byte buffer.  The reader's window is the span of
//! buffered bits not yet handed to the caller; refills happen only when the
//! window empties, so the reader never wraps.  The writer's window is the
//! span of bits accepted but not yet flushed; partial flushes advance
//! `w_start` (always by whole bytes), so writer positions wrap modulo the
//! buffer capacity.
//!
//! # Would-block semantics
//!
//! A transfer that hits [`io::ErrorKind::WouldBlock`] on the underlying
//! stream stops where it is, updates the window to reflect the bits that
//! actually moved, and reports the partial count.  Neither half loops
//! waiting for readiness; the caller owns the retry policy.
//! [`io::ErrorKind::Interrupted`] is retried internally.  Any other error
//! is returned as-is and the transfer count for the call is lost.
//!
//! # Fast path
//!
//! When the caller-side bit cursor and the window edge are both on a byte
//! boundary and the request covers the whole window (reader) or fills the
//! remaining free space (writer), whole bytes are block-copied instead of
//! being moved bit by bit.

use std::io::{self, Read, Write};

/// Largest accepted buffer capacity, in bits.  Mirrors the index-type
/// guard of the window arithmetic: `capacity / 8` must not overflow when
/// converted back to a byte count.
const CAPACITY_BITS_MAX: usize = usize::MAX / 8;

/// Validates the shared `(dst/src, n_bits, ofs)` argument triple.
fn check_span(len_bytes: usize, n_bits: usize, ofs: u8) -> io::Result<()> {
    if ofs > 7 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "bit offset must be in 0..=7",
        ));
    }
    let avail = len_bytes
        .checked_mul(8)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "bit span overflow"))?;
    if (ofs as usize) + n_bits > avail {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "bit span exceeds buffer length",
        ));
    }
    Ok(())
}

/// Validates and normalises a requested capacity in bits.
fn check_capacity(capacity_bits: usize) -> io::Result<usize> {
    if capacity_bits == 0 || capacity_bits % 8 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "buffer capacity must be a non-zero multiple of 8 bits",
        ));
    }
    Ok(capacity_bits.min(CAPACITY_BITS_MAX))
}

#[inline]
fn get_bit(buf: &[u8], pos: usize) -> bool {
    buf[pos / 8] & (1 << (pos % 8)) != 0
}

#[inline]
fn put_bit(buf: &mut [u8], pos: usize, bit: bool) {
    let mask = 1u8 << (pos % 8);
    if bit {
        buf[pos / 8] |= mask;
    } else {
        buf[pos / 8] &= !mask;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BitReader
// ─────────────────────────────────────────────────────────────────────────────

/// Buffered bit-granular reader over a byte stream.
pub struct BitReader<R: Read> {
    inner: R,
    buf: Vec<u8>,
    /// Window start in bits.  Always `0` right after a refill.
    w_start: usize,
    /// Window length in bits.  Multiple of 8 whenever `w_start` is.
    w_len: usize,
    at_eof: bool,
}

impl<R: Read> BitReader<R> {
    /// Creates a reader with an internal buffer of `capacity_bits` bits.
    ///
    /// `capacity_bits` must be a non-zero multiple of 8.
    pub fn new(inner: R, capacity_bits: usize) -> io::Result<Self> {
        let capacity_bits = check_capacity(capacity_bits)?;
        Ok(BitReader {
            inner,
            buf: vec![0u8; capacity_bits / 8],
            w_start: 0,
            w_len: 0,
            at_eof: false,
        })
    }

    /// `true` once the underlying stream has reported end-of-input.
    ///
    /// Distinguishes a short [`read`](Self::read) caused by stream
    /// exhaustion from one caused by a would-block condition.
    pub fn at_eof(&self) -> bool {
        self.at_eof
    }

    /// Copies up to `n_bits` bits from the stream into `dst`, starting at
    /// bit `ofs` of `dst[0]`.
    ///
    /// Returns the number of bits actually copied, which is less than
    /// `n_bits` when the source would block or is exhausted (query
    /// [`at_eof`](Self::at_eof) to tell the two apart).  Bits in `dst`
    /// outside the written span are left untouched.
    pub fn read(&mut self, dst: &mut [u8], n_bits: usize, ofs: u8) -> io::Result<usize> {
        check_span(dst.len(), n_bits, ofs)?;

        let mut dst_pos = ofs as usize;
        let mut moved = 0usize;

        while moved < n_bits {
            if self.w_len == 0 {
                match self.inner.read(&mut self.buf) {
                    Ok(0) => {
                        self.at_eof = true;
                        break;
                    }
                    Ok(c) => {
                        self.w_start = 0;
                        self.w_len = c * 8;
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                    Err(e) => return Err(e),
                }
            }

            let aligned = dst_pos % 8 == 0 && self.w_start % 8 == 0;
            if aligned && self.w_len >= 8 && n_bits - moved >= self.w_len {
                // Whole window fits in the request: block copy.
                let count = self.w_len / 8;
                let src = self.w_start / 8;
                dst[dst_pos / 8..dst_pos / 8 + count]
                    .copy_from_slice(&self.buf[src..src + count]);
                dst_pos += count * 8;
                self.w_start += count * 8;
                self.w_len -= count * 8;
                moved += count * 8;
            } else {
                put_bit(dst, dst_pos, get_bit(&self.buf, self.w_start));
                dst_pos += 1;
                self.w_start += 1;
                self.w_len -= 1;
                moved += 1;
            }
        }

        Ok(moved)
    }

    /// Consumes the reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BitWriter
// ─────────────────────────────────────────────────────────────────────────────

/// Buffered bit-granular writer over a byte stream.
pub struct BitWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
    capacity_bits: usize,
    /// Window start in bits.  Always byte-aligned: flushes move whole bytes.
    w_start: usize,
    /// Window length in bits.  `w_len % 8` trailing bits stay buffered
    /// until [`close`](Self::close) pads them.
    w_len: usize,
    closed: bool,
}

impl<W: Write> BitWriter<W> {
    /// Creates a writer with an internal buffer of `capacity_bits` bits.
    ///
    /// `capacity_bits` must be a non-zero multiple of 8.
    pub fn new(inner: W, capacity_bits: usize) -> io::Result<Self> {
        let capacity_bits = check_capacity(capacity_bits)?;
        Ok(BitWriter {
            inner,
            buf: vec![0u8; capacity_bits / 8],
            capacity_bits,
            w_start: 0,
            w_len: 0,
            closed: false,
        })
    }

    /// Buffers up to `n_bits` bits taken from `src` starting at bit `ofs`
    /// of `src[0]`, flushing to the underlying stream whenever the buffer
    /// fills.
    ///
    /// Returns the number of bits accepted.  A short count means the
    /// buffer filled and the sink would block; retry with the remaining
    /// bits once the sink is ready.
    pub fn write(&mut self, src: &[u8], n_bits: usize, ofs: u8) -> io::Result<usize> {
        if self.closed {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "write on closed bit stream",
            ));
        }
        check_span(src.len(), n_bits, ofs)?;

        let mut src_pos = ofs as usize;
        let mut moved = 0usize;

        while moved < n_bits {
            // A previous call may have returned with the buffer still
            // full because the sink stalled; it must drain before any
            // new bit lands.
            if self.w_len == self.capacity_bits {
                self.flush()?;
                if self.w_len == self.capacity_bits {
                    return Ok(moved);
                }
            }

            let pos = self.w_start + self.w_len;
            let free = self.capacity_bits - self.w_len;

            let aligned = src_pos % 8 == 0 && pos % 8 == 0;
            if aligned && free >= 8 && n_bits - moved >= free {
                // Request fills all remaining space: block copy up to the
                // buffer edge (the window may wrap).
                let mut count = free / 8;
                let mut src_byte = src_pos / 8;
                let mut dst_byte = (pos % self.capacity_bits) / 8;
                while count > 0 {
                    let contig = count.min(self.buf.len() - dst_byte);
                    self.buf[dst_byte..dst_byte + contig]
                        .copy_from_slice(&src[src_byte..src_byte + contig]);
                    src_byte += contig;
                    dst_byte = (dst_byte + contig) % self.buf.len();
                    count -= contig;
                }
                src_pos += free;
                self.w_len += free;
                moved += free;
            } else {
                put_bit(
                    &mut self.buf,
                    pos % self.capacity_bits,
                    get_bit(src, src_pos),
                );
                src_pos += 1;
                self.w_len += 1;
                moved += 1;
            }

            if self.w_len == self.capacity_bits {
                self.flush()?;
                if self.w_len != 0 {
                    // Sink stalled mid-flush; report the partial count.
                    return Ok(moved);
                }
            }
        }

        Ok(moved)
    }

    /// Writes all whole buffered bytes to the underlying stream.
    ///
    /// Trailing bits short of a byte stay buffered until
    /// [`close`](Self::close).  Returns the number of bytes written; a
    /// would-block condition on the sink stops the flush early.
    pub fn flush(&mut self) -> io::Result<usize> {
        let count = self.w_len / 8;
        let buf_bytes = self.buf.len();
        let start = self.w_start / 8;
        let mut written = 0usize;

        while written < count {
            let at = (start + written) % buf_bytes;
            let contig = (count - written).min(buf_bytes - at);
            match self.inner.write(&self.buf[at..at + contig]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "bit stream sink accepted no bytes",
                    ))
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => return Err(e),
            }
        }

        self.w_start = (self.w_start + written * 8) % self.capacity_bits;
        self.w_len -= written * 8;
        Ok(written)
    }

    /// Pads the trailing partial byte with zero bits, then flushes
    /// everything to the underlying stream.
    ///
    /// Returns [`io::ErrorKind::WouldBlock`] if the sink stalled before
    /// the buffer drained; calling `close` again resumes the flush
    /// (padding is applied only once).
    pub fn close(&mut self) -> io::Result<()> {
        if !self.closed {
            while self.w_len % 8 != 0 {
                let pos = (self.w_start + self.w_len) % self.capacity_bits;
                put_bit(&mut self.buf, pos, false);
                self.w_len += 1;
            }
            self.closed = true;
        }
        self.flush()?;
        if self.w_len != 0 {
            return Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                "bit stream close pending on sink readiness",
            ));
        }
        self.inner.flush()
    }

    /// Consumes the writer, returning the underlying stream.
    ///
    /// Buffered bits that were never flushed are discarded; call
    /// [`close`](Self::close) first to keep them.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
