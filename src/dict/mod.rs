//! LZ78 dictionary engines.
//!
//! Two dictionary shapes serve the two directions:
//!
//! - [`compress::HtDictionary`] — an open-addressed hash table keyed on
//!   `(parent, label)`, used by the compressor to extend the current
//!   phrase one byte at a time.
//! - [`decompress::Dictionary`] — a parent-pointer table indexed by code,
//!   used by the decompressor to reconstruct phrase byte strings.
//!
//! [`dual`] wraps each shape in the main/secondary rotation scheme that
//! both engines share: past an occupancy threshold every new phrase is
//! shadowed into a secondary dictionary, and when the main dictionary
//! fills the pair rotates, carrying the recent entries forward.

pub mod compress;
pub mod decompress;
pub mod dual;

pub use compress::{DictUpdate, HtDictionary};
pub use decompress::Dictionary;
pub use dual::{CompressDual, DecompressDual, Step};
