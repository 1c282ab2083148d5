//! Bit-stream integration tests: arbitrary split points, offset writes,
//! and padding behaviour over full write→close→read cycles.

use std::io::Cursor;

use lz78::bitio::{BitReader, BitWriter};

/// Writes `payload` as a sequence of chunked bit writes described by
/// `splits` (cycled), closes, and returns the produced bytes.
fn write_in_chunks(payload: &[u8], total_bits: usize, splits: &[usize]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut w = BitWriter::new(&mut out, 256).unwrap();
    let mut sent = 0usize;
    let mut k = 0usize;
    while sent < total_bits {
        let want = splits[k % splits.len()].min(total_bits - sent).max(1);
        let n = w
            .write(&payload[sent / 8..], want, (sent % 8) as u8)
            .unwrap();
        assert_eq!(n, want, "in-memory sink never blocks");
        sent += n;
        k += 1;
    }
    w.close().unwrap();
    drop(w);
    out
}

fn read_all_bits(bytes: &[u8], total_bits: usize, splits: &[usize]) -> Vec<u8> {
    let mut r = BitReader::new(Cursor::new(bytes.to_vec()), 256).unwrap();
    let mut out = vec![0u8; (total_bits + 7) / 8];
    let mut got = 0usize;
    let mut k = 0usize;
    while got < total_bits {
        let want = splits[k % splits.len()].min(total_bits - got).max(1);
        let n = r.read(&mut out[got / 8..], want, (got % 8) as u8).unwrap();
        assert_eq!(n, want);
        got += n;
        k += 1;
    }
    out
}

#[test]
fn chunked_writes_equal_single_write() {
    let payload: Vec<u8> = (0u16..97).map(|i| (i * 53 % 256) as u8).collect();
    let total_bits = payload.len() * 8 - 3; // deliberately not byte-aligned

    let whole = write_in_chunks(&payload, total_bits, &[usize::MAX]);
    for splits in [&[1usize][..], &[3, 7, 1][..], &[8][..], &[13, 2][..], &[64][..]] {
        assert_eq!(write_in_chunks(&payload, total_bits, splits), whole);
    }
}

#[test]
fn written_bits_read_back_identically() {
    let payload: Vec<u8> = (0u16..256).map(|i| (i ^ (i >> 3)) as u8).collect();
    for total_bits in [1usize, 7, 8, 9, 100, 2041, 2048] {
        let bytes = write_in_chunks(&payload, total_bits, &[11, 1, 29]);
        // Padded to whole bytes.
        assert_eq!(bytes.len(), (total_bits + 7) / 8);
        let back = read_all_bits(&bytes, total_bits, &[5, 17, 1]);
        // All bits up to total_bits match; pad bits beyond are zero.
        for pos in 0..total_bits {
            let want = payload[pos / 8] >> (pos % 8) & 1;
            let got = back[pos / 8] >> (pos % 8) & 1;
            assert_eq!(want, got, "bit {pos} of {total_bits}");
        }
        if total_bits % 8 != 0 {
            let last = bytes[bytes.len() - 1];
            assert_eq!(last >> (total_bits % 8), 0, "pad bits must be zero");
        }
    }
}

#[test]
fn reader_stops_at_stream_end() {
    let mut r = BitReader::new(Cursor::new(vec![0x0F, 0xF0]), 64).unwrap();
    let mut out = [0u8; 4];
    assert_eq!(r.read(&mut out, 32, 0).unwrap(), 16);
    assert!(r.at_eof());
    assert_eq!(&out[..2], &[0x0F, 0xF0]);
    // Further reads keep returning 0 bits.
    assert_eq!(r.read(&mut out, 8, 0).unwrap(), 0);
}

#[test]
fn tiny_buffer_forces_flush_cycles() {
    // An 8-bit internal buffer flushes once per byte moved.
    let payload: Vec<u8> = (0..64u8).collect();
    let mut out = Vec::new();
    let mut w = BitWriter::new(&mut out, 8).unwrap();
    let mut sent = 0;
    while sent < payload.len() * 8 {
        sent += w
            .write(&payload[sent / 8..], payload.len() * 8 - sent, (sent % 8) as u8)
            .unwrap();
    }
    w.close().unwrap();
    drop(w);
    assert_eq!(out, payload);
}
