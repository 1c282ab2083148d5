//! Source and sink resolution for the file-level API.
//!
//! Paths are optional everywhere: a missing input means standard input, a
//! missing output means standard output, matching the CLI contract.
//! Regular files are wrapped in [`BufReader`] / [`BufWriter`] so the
//! byte-at-a-time engines do not pay a syscall per byte.
//!
//! Verbosity-gated diagnostics go to stderr via [`displaylevel!`].

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::displaylevel;

/// Opens a source for reading.
///
/// - `None` resolves to standard input.
/// - A directory is rejected with [`io::ErrorKind::InvalidInput`].
/// - Anything else is opened and buffered.
pub fn open_src_file(path: Option<&Path>) -> io::Result<Box<dyn Read>> {
    match path {
        None => {
            displaylevel!(4, "Using stdin for input\n");
            Ok(Box::new(io::stdin()))
        }
        Some(path) => {
            if path.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} is a directory", path.display()),
                ));
            }
            displaylevel!(4, "Opening {} for input\n", path.display());
            Ok(Box::new(BufReader::new(File::open(path)?)))
        }
    }
}

/// Opens a sink for writing.
///
/// - `None` resolves to standard output.
/// - An existing file is truncated, mirroring `O_CREAT | O_TRUNC`.
pub fn open_dst_file(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        None => {
            displaylevel!(4, "Using stdout for output\n");
            Ok(Box::new(io::stdout()))
        }
        Some(path) => {
            displaylevel!(4, "Opening {} for output\n", path.display());
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rejects_directory_input() {
        let dir = TempDir::new().unwrap();
        let err = match open_src_file(Some(dir.path())) {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn missing_input_file_errors() {
        let err = match open_src_file(Some(Path::new("/nonexistent/__lz78_missing__"))) {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn output_file_is_truncated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.lz78");
        std::fs::write(&path, b"old content").unwrap();
        {
            let mut dst = open_dst_file(Some(&path)).unwrap();
            dst.write_all(b"new").unwrap();
            dst.flush().unwrap();
        }
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }
}
