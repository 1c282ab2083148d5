//! CLI identity strings, the global verbosity level, and output macros.
//!
//! The verbosity level is a process-wide atomic so any module can gate
//! diagnostics without threading a context value through the engine
//! layers.  Semantics:
//!
//!   0 — completely silent
//!   1 — errors only
//!   2 — normal informational output (default)
//!   3 — non-suppressible informational messages
//!   4 — verbose / diagnostic

use std::sync::atomic::{AtomicU32, Ordering};

/// Program name used in diagnostics and usage text.
pub const COMPRESSOR_NAME: &str = "lz78";

/// Process-wide verbosity level consumed by [`displaylevel!`].
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current verbosity level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the verbosity level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Output macros ────────────────────────────────────────────────────────────

/// Write a formatted message to **stderr** unconditionally.
///
/// Prefer [`displaylevel!`] when the message should be suppressible.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Write a formatted message to **stderr** if the current verbosity level
/// is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_level_roundtrips() {
        let before = display_level();
        set_display_level(4);
        assert_eq!(display_level(), 4);
        set_display_level(before);
    }
}
