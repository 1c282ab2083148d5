//! Runtime preferences shared by the I/O layer and the CLI.

use crate::config::B_SIZE_DEFAULT;

/// Direction of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Compress,
    Decompress,
}

/// Engine configuration assembled by the CLI and consumed by
/// [`crate::io::dispatch`].
#[derive(Debug, Clone)]
pub struct Prefs {
    /// Operation direction.
    pub mode: Mode,
    /// Requested dictionary size in entries; 0 selects the default.
    /// Only meaningful for compression — the decompressor learns the
    /// size from the stream header.
    pub dict_size: u32,
    /// Bit-stream buffer capacity in bits.  Must be a non-zero multiple
    /// of 8.
    pub buffer_bits: usize,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            mode: Mode::Compress,
            dict_size: 0,
            buffer_bits: B_SIZE_DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefs() {
        let p = Prefs::default();
        assert_eq!(p.mode, Mode::Compress);
        assert_eq!(p.dict_size, 0);
        assert_eq!(p.buffer_bits, B_SIZE_DEFAULT);
        assert_eq!(p.buffer_bits % 8, 0);
    }
}
