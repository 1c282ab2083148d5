//! Main/secondary dictionary rotation.
//!
//! Both engines run a pair of dictionaries of the same size.  Once the
//! main dictionary's occupancy passes the 80% threshold, every byte it
//! processes is also fed to the secondary, which rebuilds a small, recent
//! phrase set from scratch.  When the main dictionary fills, the pair
//! rotates: the secondary becomes the new main, so the dictionary is
//! never cold after a rotation.
//!
//! The compressor rotates by exchanging its two hash tables.  The
//! decompressor rebuilds its parent-pointer main from the secondary's
//! entries, placing each migrated entry at the child code the compressor
//! allocated for it; the rotation therefore preserves every code the
//! compressor can still emit.
//!
//! Both sides must make identical shadowing decisions from identical
//! state, byte for byte; any divergence desynchronises the code spaces at
//! the next rotation.

use crate::dict::compress::{DictUpdate, HtDictionary};
use crate::dict::decompress::Dictionary;

/// Outcome of feeding one label through the compressor's pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Phrase still growing; nothing to emit.
    Absorbed,
    /// Emit `code`.  `next_code` is the main dictionary's next-code right
    /// after the allocation that closed the phrase and before any
    /// rotation — the value the emitted code's width is derived from.
    Emit { code: u32, next_code: u32 },
}

/// Feeds `label` to a secondary dictionary, unless the secondary is too
/// full to accept it.
///
/// One slot is held back so a dictionary promoted to main can always
/// allocate at least one entry before its own rotation triggers.  The
/// check depends only on state both engines share, keeping the decision
/// identical on both sides.
fn shadow(secondary: &mut HtDictionary, label: u16) {
    if secondary.next_code() + 1 < secondary.size() {
        secondary.update(label);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Compressor pair
// ─────────────────────────────────────────────────────────────────────────────

/// The compressor's rotating dictionary pair.
pub struct CompressDual {
    main: HtDictionary,
    secondary: HtDictionary,
    d_size: u32,
}

impl CompressDual {
    pub fn new(d_size: u32) -> Self {
        let main = HtDictionary::new(d_size);
        let d_size = main.size();
        CompressDual {
            main,
            secondary: HtDictionary::new(d_size),
            d_size,
        }
    }

    /// Dictionary size after clamping; the value announced in the stream
    /// header.
    pub fn size(&self) -> u32 {
        self.d_size
    }

    /// The main dictionary's next code; drives sentinel code widths.
    pub fn next_code(&self) -> u32 {
        self.main.next_code()
    }

    /// Feeds one label through the pair: main update, rotation on fill,
    /// threshold shadowing.
    pub fn update(&mut self, label: u16) -> Step {
        match self.main.update(label) {
            DictUpdate::Absorbed => {
                if self.main.next_code() >= self.main.threshold() {
                    shadow(&mut self.secondary, label);
                }
                Step::Absorbed
            }
            DictUpdate::Inserted { prev } => {
                // Width derives from the state at allocation, before any
                // rotation; the decoder sees the same value.
                let next_code = self.main.next_code();
                if self.main.is_full() {
                    std::mem::swap(&mut self.main, &mut self.secondary);
                    self.main.set_cur(label as u32);
                    self.secondary.reset();
                }
                if self.main.next_code() >= self.main.threshold() {
                    shadow(&mut self.secondary, label);
                }
                Step::Emit { code: prev, next_code }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decompressor pair
// ─────────────────────────────────────────────────────────────────────────────

/// The decompressor's rotating dictionary pair.
///
/// The secondary is the same hash-table shape the compressor uses: the
/// decoder replays each decoded byte through it, mirroring the
/// compressor's shadow insertions exactly.
pub struct DecompressDual {
    main: Dictionary,
    secondary: HtDictionary,
}

impl DecompressDual {
    pub fn new(d_size: u32) -> Self {
        let main = Dictionary::new(d_size);
        let secondary = HtDictionary::new(main.size());
        DecompressDual { main, secondary }
    }

    pub fn next_code(&self) -> u32 {
        self.main.next_code()
    }

    /// Decoded bytes awaiting delivery to the output.
    pub fn pending(&self) -> &[u8] {
        self.main.pending()
    }

    /// Marks `n` pending bytes as delivered.
    pub fn consume(&mut self, n: usize) {
        self.main.consume(n);
    }

    /// Decodes one validated code: main update, byte-wise mirror into the
    /// secondary past the threshold, rotation on fill.
    pub fn update(&mut self, code: u32) {
        self.main.update(code);

        if self.main.next_code() > self.main.threshold() {
            // The compressor fed these bytes to its secondary one at a
            // time as it consumed them; replay them the same way.
            for k in 0..self.main.pending().len() {
                let byte = self.main.pending()[k];
                shadow(&mut self.secondary, byte as u16);
            }
        }

        if self.main.is_full() {
            self.main.reset();
            self.main.adopt_next(self.secondary.next_code());
            let main = &mut self.main;
            self.secondary.for_each_entry(|parent, label, child| {
                main.install(child, parent, label);
            });
            self.secondary.reset();
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
