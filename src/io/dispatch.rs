//! Algorithm selection and the engine retry loop.
//!
//! Only one algorithm exists in this repository, but the dispatch keeps
//! the algorithm name → engine mapping in one place so the CLI stays
//! algorithm-agnostic.
//!
//! The retry loop is the counterpart of the engines' cooperative
//! suspension: an engine that returns [`Lz78Error::Again`] is re-invoked
//! with its state intact until it completes or fails.

use core::fmt;
use std::path::Path;

use crate::displaylevel;
use crate::engine::{Compressor, Decompressor, Lz78Error};
use crate::io::file_io::{open_dst_file, open_src_file};
use crate::io::prefs::{Mode, Prefs};

/// Compression algorithms this build knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Lz78,
}

/// Resolves an algorithm name from the `-t` flag.
pub fn get_algorithm(name: &str) -> Option<Algorithm> {
    match name {
        "lz78" => Some(Algorithm::Lz78),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wrapper-level errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failures of the file-level API: everything the engines themselves
/// cannot see, plus engine errors carried through.
#[derive(Debug)]
pub enum WrapperError {
    /// The requested algorithm name is not recognised.
    Algorithm,
    /// The input path could not be opened for reading.
    FileIn,
    /// The output path could not be opened for writing.
    FileOut,
    /// The engine failed; the original error is preserved.
    Engine(Lz78Error),
}

impl fmt::Display for WrapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapperError::Algorithm => write!(f, "Unrecognized compression algorithm"),
            WrapperError::FileIn => write!(f, "Unable to read input file"),
            WrapperError::FileOut => write!(f, "Unable to write output file"),
            WrapperError::Engine(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for WrapperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WrapperError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Lz78Error> for WrapperError {
    fn from(e: Lz78Error) -> Self {
        WrapperError::Engine(e)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Executes the operation described by `prefs` on the given paths
/// (`None` = standard streams).
pub fn exec(
    prefs: &Prefs,
    algorithm: Algorithm,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), WrapperError> {
    match algorithm {
        Algorithm::Lz78 => match prefs.mode {
            Mode::Compress => compress_filename(prefs, input, output),
            Mode::Decompress => decompress_filename(prefs, input, output),
        },
    }
}

/// Compresses `input` into `output`, retrying through would-block
/// suspensions.
pub fn compress_filename(
    prefs: &Prefs,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), WrapperError> {
    let src = open_src_file(input).map_err(|_| WrapperError::FileIn)?;
    let dst = open_dst_file(output).map_err(|_| WrapperError::FileOut)?;
    let mut engine = Compressor::new(src, dst, prefs.dict_size, prefs.buffer_bits)?;
    displaylevel!(
        3,
        "lz78: compressing with a {}-entry dictionary\n",
        engine.dict_size()
    );
    drive(|| engine.run())
}

/// Decompresses `input` into `output`, retrying through would-block
/// suspensions.
pub fn decompress_filename(
    prefs: &Prefs,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), WrapperError> {
    let src = open_src_file(input).map_err(|_| WrapperError::FileIn)?;
    let dst = open_dst_file(output).map_err(|_| WrapperError::FileOut)?;
    let mut engine = Decompressor::new(src, dst, prefs.buffer_bits)?;
    drive(|| engine.run())
}

/// Re-invokes a suspended engine until it completes or fails hard.
fn drive<F: FnMut() -> Result<(), Lz78Error>>(mut run: F) -> Result<(), WrapperError> {
    loop {
        match run() {
            Ok(()) => return Ok(()),
            Err(e) if e.is_again() => {
                displaylevel!(4, "lz78: {}\n", e.message());
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn algorithm_lookup() {
        assert_eq!(get_algorithm("lz78"), Some(Algorithm::Lz78));
        assert_eq!(get_algorithm("lz77"), None);
        assert_eq!(get_algorithm(""), None);
    }

    #[test]
    fn file_roundtrip_through_dispatch() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("plain.txt");
        let packed = dir.path().join("plain.txt.lz78");
        let restored = dir.path().join("restored.txt");
        let data = b"dispatch roundtrip payload ".repeat(500);
        fs::write(&plain, &data).unwrap();

        let prefs = Prefs::default();
        exec(&prefs, Algorithm::Lz78, Some(plain.as_path()), Some(packed.as_path())).unwrap();

        let prefs = Prefs {
            mode: Mode::Decompress,
            ..Prefs::default()
        };
        exec(&prefs, Algorithm::Lz78, Some(packed.as_path()), Some(restored.as_path())).unwrap();

        assert_eq!(fs::read(&restored).unwrap(), data);
    }

    #[test]
    fn missing_input_maps_to_file_in() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.lz78");
        let err = compress_filename(
            &Prefs::default(),
            Some(Path::new("/nonexistent/__lz78__")),
            Some(out.as_path()),
        )
        .unwrap_err();
        assert!(matches!(err, WrapperError::FileIn));
    }

    #[test]
    fn corrupt_stream_maps_to_engine_error() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("bad.lz78");
        let out = dir.path().join("out.txt");
        fs::write(&bad, b"this is not a compressed stream").unwrap();
        let prefs = Prefs {
            mode: Mode::Decompress,
            ..Prefs::default()
        };
        let err = decompress_filename(&prefs, Some(bad.as_path()), Some(out.as_path())).unwrap_err();
        assert!(matches!(
            err,
            WrapperError::Engine(Lz78Error::Decompress)
        ));
    }
}
