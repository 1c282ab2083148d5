//! `lz78` — a streaming LZ78 compressor and decompressor with
//! dual-dictionary rotation, plus the command-line program built on it.
//!
//! The compressed stream is a sequence of variable-width codes whose
//! width tracks dictionary occupancy, framed by start/size/EOF/stop
//! sentinels and packed LSB-first into bytes.  Instead of resetting a
//! full dictionary, both ends run a main/secondary pair: past 80%
//! occupancy the secondary shadows recent phrases, and on overflow the
//! pair rotates so the fresh dictionary starts warm.
//!
//! Both engines are poll-style state machines: any read or write that
//! would block unwinds to the caller with all state preserved, and the
//! same call resumes the operation later.
//!
//! # Crate layout
//!
//! | Module   | Contents |
//! |----------|----------|
//! | `bitio`  | Bit-granular buffered reader/writer with would-block semantics. |
//! | `dict`   | LZ78 dictionaries and the main/secondary rotation scheme. |
//! | `engine` | Streaming compress/decompress state machines and the wire protocol. |
//! | `io`     | File-level API: path resolution, algorithm dispatch, retry loop. |
//! | `cli`    | Argument parsing, help text, display macros. |
//! | `util`   | Size-string parsing. |
//! | `config` | Dictionary and buffer size constants. |

pub mod config;

pub mod bitio;
pub mod cli;
pub mod dict;
pub mod engine;
pub mod io;
pub mod util;

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use config::{B_SIZE_DEFAULT, DICT_SIZE_DEFAULT, DICT_SIZE_MAX, DICT_SIZE_MIN};
pub use engine::{Compressor, Decompressor, Lz78Error};
pub use io::{Mode, Prefs};
