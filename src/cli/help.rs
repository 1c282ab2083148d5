//! Help and usage text for the `lz78` CLI.

use crate::cli::constants::COMPRESSOR_NAME;

/// Prints the usage summary to stderr.
pub fn print_usage() {
    eprintln!("Usage: {} [Options]", COMPRESSOR_NAME);
    eprintln!();
    eprintln!("Options:");
    eprintln!("-h          show this help");
    eprintln!("-i input    sets input source (default: stdin)");
    eprintln!("-o output   sets output destination (default: stdout)");
    eprintln!("-d          sets decompress mode");
    eprintln!("-t type     sets compression algorithm (default: lz78)");
    eprintln!();
    eprintln!("Optional flags:");
    eprintln!("-b bsize    sets size of I/O buffers in bytes (suffixes K, M)");
    eprintln!("-a param    sets dictionary size in entries (suffixes K, M)");
    eprintln!("-v          more verbose output");
    eprintln!("-q          quieter output");
}
