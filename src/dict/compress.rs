//! Compressor-side LZ78 dictionary: an open-addressed hash table mapping
//! `(parent, label)` pairs to child codes.
//!
//! The table doubles as the phrase-matching cursor: [`HtDictionary::update`]
//! advances an internal current-node pointer while the input keeps matching
//! known phrases, and reports the code to emit when the phrase ends.

use crate::config::{dict_limit, dict_threshold, DICT_SIZE_MIN};
use crate::engine::types::bitlen;

/// One hash-table slot.
///
/// `used` distinguishes live slots from empty ones; no two live slots
/// share a `(parent, label)` pair or a `child` code.
#[derive(Debug, Clone, Copy, Default)]
struct HtEntry {
    used: bool,
    parent: u32,
    /// Byte label, widened to `u16` so the end-of-stream pseudo-label
    /// (256) can flow through the same path as real bytes.
    label: u16,
    child: u32,
}

/// Outcome of feeding one label into the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictUpdate {
    /// The label extended a known phrase; nothing to emit.
    Absorbed,
    /// The phrase ended: emit `prev`, the code of the phrase without the
    /// label that broke it.  A new entry for the extended phrase was
    /// allocated and the cursor restarted at the breaking label.
    Inserted {
        /// Code of the phrase accumulated before this label.
        prev: u32,
    },
}

/// Open-addressed LZ78 phrase dictionary.
pub struct HtDictionary {
    root: Vec<HtEntry>,
    /// Code of the phrase matched so far; `None` before the first label
    /// of a phrase (and right after [`reset`](Self::reset)).
    cur_node: Option<u32>,
    d_size: u32,
    d_thr: u32,
    d_next: u32,
}

impl HtDictionary {
    /// Creates a dictionary with `d_size` slots (clamped to the valid
    /// range) and no learned entries.
    pub fn new(d_size: u32) -> Self {
        let d_size = dict_limit(d_size);
        HtDictionary {
            root: vec![HtEntry::default(); d_size as usize],
            cur_node: None,
            d_size,
            d_thr: dict_threshold(d_size),
            d_next: DICT_SIZE_MIN,
        }
    }

    /// Bernstein hash over the `(label, parent)` tuple, reduced mod the
    /// table size.
    fn hash(&self, parent: u32, label: u16) -> usize {
        let mut key = ((label as u32) << bitlen(self.d_size)).wrapping_add(parent);
        let mut hash: u32 = 0;
        for _ in 0..4 {
            hash = hash.wrapping_mul(33).wrapping_add(key & 0xFF);
            key >>= 8;
        }
        (hash % self.d_size) as usize
    }

    /// Feeds one label, extending the current phrase or closing it.
    ///
    /// On a miss the extended phrase is recorded under code `d_next`, the
    /// cursor restarts at `label`, and the caller is told to emit the
    /// closed phrase's code.
    pub fn update(&mut self, label: u16) -> DictUpdate {
        let cur = match self.cur_node {
            None => {
                self.cur_node = Some(label as u32);
                return DictUpdate::Absorbed;
            }
            Some(cur) => cur,
        };

        let mut slot = self.hash(cur, label);
        while self.root[slot].used {
            let entry = self.root[slot];
            if entry.parent == cur && entry.label == label {
                self.cur_node = Some(entry.child);
                return DictUpdate::Absorbed;
            }
            // Collision: linear probe.
            slot = (slot + 1) % self.d_size as usize;
        }

        self.root[slot] = HtEntry {
            used: true,
            parent: cur,
            label,
            child: self.d_next,
        };
        self.cur_node = Some(label as u32);
        self.d_next += 1;
        DictUpdate::Inserted { prev: cur }
    }

    /// Drops every learned entry and restarts the cursor.
    pub fn reset(&mut self) {
        self.root.fill(HtEntry::default());
        self.d_next = DICT_SIZE_MIN;
        self.cur_node = None;
    }

    /// Forces the phrase cursor to `node`.  Used when this dictionary is
    /// promoted to main during a rotation: the byte being absorbed at the
    /// moment of the swap becomes the start of its next phrase.
    pub fn set_cur(&mut self, node: u32) {
        self.cur_node = Some(node);
    }

    /// Next code to be allocated.
    pub fn next_code(&self) -> u32 {
        self.d_next
    }

    /// Table capacity in entries.
    pub fn size(&self) -> u32 {
        self.d_size
    }

    /// Shadowing threshold (80% of capacity).
    pub fn threshold(&self) -> u32 {
        self.d_thr
    }

    /// `true` once every allocatable code has been handed out.
    pub fn is_full(&self) -> bool {
        self.d_next == self.d_size
    }

    /// Visits every live entry as `(parent, label, child)`.
    ///
    /// Iteration order is table order, which is stable for a given entry
    /// set; rotation migration only needs the set, not the order.
    pub fn for_each_entry<F: FnMut(u32, u16, u32)>(&self, mut f: F) {
        for entry in &self.root {
            if entry.used {
                f(entry.parent, entry.label, entry.child);
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
