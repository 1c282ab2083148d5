//! File-level I/O: open sources and sinks, pick an algorithm, and drive
//! an engine to completion.
//!
//! This is the layer between the CLI and the streaming engines.  It
//! resolves path arguments (with standard-stream fallbacks), constructs
//! the engine described by a [`Prefs`] record, and owns the retry loop
//! that re-invokes a suspended engine until it completes.

pub mod dispatch;
pub mod file_io;
pub mod prefs;

pub use dispatch::{exec, get_algorithm, Algorithm, WrapperError};
pub use file_io::{open_dst_file, open_src_file};
pub use prefs::{Mode, Prefs};
