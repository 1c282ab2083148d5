//! LZ78 streaming engines and the stream protocol.
//!
//! [`compress::Compressor`] and [`decompress::Decompressor`] are the two
//! poll-style state machines; [`types`] holds the code space, the width
//! rule both sides agree on, and the [`types::Lz78Error`] taxonomy.

pub mod compress;
pub mod decompress;
pub mod types;

pub use compress::Compressor;
pub use decompress::Decompressor;
pub use types::{bitlen, Lz78Error, CODE_EOF, CODE_SIZE, CODE_START, CODE_STOP};
