//! Decompressor-side LZ78 dictionary: a parent-pointer table indexed by
//! code, plus the scratch buffer phrases are reconstructed into.
//!
//! Reconstruction walks parent links from the received code down to a
//! byte literal, writing labels from the high end of the scratch buffer
//! toward the low end.  The decoded phrase therefore comes out in the
//! right order without a reverse pass; `pending()` exposes exactly the
//! slice that was filled.

use crate::config::{dict_limit, dict_threshold, DICT_SIZE_MIN};

/// One code's tree link: the code of the one-byte-shorter prefix and the
/// final byte of the phrase.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Entry {
    pub(crate) parent: u32,
    pub(crate) label: u16,
}

/// Parent-pointer LZ78 phrase dictionary.
pub struct Dictionary {
    root: Vec<Entry>,
    d_size: u32,
    d_thr: u32,
    /// Lowest learnable code.  260 on a fresh dictionary; after a
    /// rotation it is the adopted next-code, marking the boundary below
    /// which no in-progress entry can exist.
    d_min: u32,
    d_next: u32,
    /// Phrase reconstruction scratch, filled from the high end.
    bytebuf: Vec<u8>,
    n_bytes: u32,
    offset: u32,
}

impl Dictionary {
    /// Creates a dictionary of `d_size` codes (clamped to the valid
    /// range) with the byte literals 0..=255 pre-seeded.
    pub fn new(d_size: u32) -> Self {
        let d_size = dict_limit(d_size);
        let mut root = vec![Entry::default(); d_size as usize];
        for code in 0..256u32 {
            root[code as usize] = Entry { parent: 0, label: code as u16 };
        }
        Dictionary {
            root,
            d_size,
            d_thr: dict_threshold(d_size),
            d_min: DICT_SIZE_MIN,
            d_next: DICT_SIZE_MIN,
            bytebuf: vec![0u8; d_size as usize],
            n_bytes: 0,
            offset: 0,
        }
    }

    /// Decodes `code` into the scratch buffer and learns from it.
    ///
    /// Performs, in order:
    /// 1. the parent-link walk filling the scratch from the high end;
    /// 2. the KwK completion — when `code` is the entry still being
    ///    formed, its final byte equals the phrase's first byte;
    /// 3. back-patching the previous in-progress entry's label with this
    ///    phrase's first byte;
    /// 4. seeding the next in-progress entry with `parent = code`.
    ///
    /// The caller must have validated `code < d_next` (or a pre-seeded
    /// literal) beforehand.
    pub fn update(&mut self, code: u32) {
        let last = self.d_size - 1;
        let d_next = self.d_next;
        let d_min = self.d_min;

        let mut i = last;
        let mut p = code;
        loop {
            self.bytebuf[i as usize] = self.root[p as usize].label as u8;
            i -= 1;
            if p < DICT_SIZE_MIN || i == 0 {
                break;
            }
            p = self.root[p as usize].parent;
        }
        let first = self.bytebuf[(i + 1) as usize];

        // KwK: the walk read the not-yet-patched label of the entry being
        // formed; the phrase's last byte is its own first byte.
        if code >= d_min && code == d_next - 1 {
            self.bytebuf[last as usize] = first;
        }

        if d_next > d_min {
            self.root[(d_next - 1) as usize].label = first as u16;
        }

        self.n_bytes = last - i;
        self.offset = i + 1;
        self.root[d_next as usize].parent = code;
        self.d_next += 1;
    }

    /// Decoded bytes not yet handed to the output.
    pub fn pending(&self) -> &[u8] {
        &self.bytebuf[self.offset as usize..(self.offset + self.n_bytes) as usize]
    }

    /// Marks `n` pending bytes as delivered.
    pub fn consume(&mut self, n: usize) {
        debug_assert!(n as u32 <= self.n_bytes);
        self.offset += n as u32;
        self.n_bytes -= n as u32;
    }

    /// Forgets every learned code, keeping the byte literals.
    ///
    /// Stale entries above `d_min` are left in place; they are
    /// unreachable until overwritten because code validation is bounded
    /// by `d_next`.
    pub fn reset(&mut self) {
        self.d_min = DICT_SIZE_MIN;
        self.d_next = DICT_SIZE_MIN;
    }

    /// Installs a migrated entry at `code`.  Used by the rotation to copy
    /// the secondary dictionary's entries into this one.
    pub(crate) fn install(&mut self, code: u32, parent: u32, label: u16) {
        self.root[code as usize] = Entry { parent, label };
    }

    /// Moves the learnable-code floor and next-code to `next`, as part of
    /// adopting a secondary dictionary's numbering after a rotation.
    pub(crate) fn adopt_next(&mut self, next: u32) {
        self.d_min = next;
        self.d_next = next;
    }

    pub fn next_code(&self) -> u32 {
        self.d_next
    }

    pub fn size(&self) -> u32 {
        self.d_size
    }

    pub fn threshold(&self) -> u32 {
        self.d_thr
    }

    pub fn is_full(&self) -> bool {
        self.d_next == self.d_size
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_decodes_to_single_byte() {
        let mut d = Dictionary::new(4096);
        d.update(b'A' as u32);
        assert_eq!(d.pending(), b"A");
        assert_eq!(d.next_code(), DICT_SIZE_MIN + 1);
    }

    #[test]
    fn backpatch_completes_previous_entry() {
        let mut d = Dictionary::new(4096);
        // Codes for input "abab" compressed with an empty dictionary:
        // 'a', 'b', then 260 = "ab".
        d.update(b'a' as u32);
        assert_eq!(d.pending(), b"a");
        d.update(b'b' as u32);
        assert_eq!(d.pending(), b"b");
        d.update(DICT_SIZE_MIN);
        assert_eq!(d.pending(), b"ab");
    }

    #[test]
    fn kwk_code_fills_last_byte_with_first() {
        let mut d = Dictionary::new(4096);
        // "aaaa" compresses to 'a', 260 where 260 = "aa" is still being
        // formed when its code arrives.
        d.update(b'a' as u32);
        d.update(DICT_SIZE_MIN);
        assert_eq!(d.pending(), b"aa");
    }

    #[test]
    fn consume_tracks_partial_delivery() {
        let mut d = Dictionary::new(4096);
        d.update(b'x' as u32);
        d.update(b'y' as u32);
        d.update(DICT_SIZE_MIN); // "xy"
        assert_eq!(d.pending(), b"xy");
        d.consume(1);
        assert_eq!(d.pending(), b"y");
        d.consume(1);
        assert!(d.pending().is_empty());
    }

    #[test]
    fn reset_keeps_literals() {
        let mut d = Dictionary::new(4096);
        d.update(b'a' as u32);
        d.update(b'b' as u32);
        d.update(DICT_SIZE_MIN);
        d.reset();
        assert_eq!(d.next_code(), DICT_SIZE_MIN);
        d.update(b'q' as u32);
        assert_eq!(d.pending(), b"q");
    }
}
