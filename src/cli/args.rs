//! Command-line argument parsing.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for
//! unit-testing).  Both return a [`ParsedArgs`] capturing every option
//! discovered during the parse.
//!
//! Options take their value either attached (`-ifile`) or as the next
//! argument (`-i file`).  Unrecognised options and missing values return
//! an `Err` with a message that begins with `"bad usage: "`.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::cli::constants::{display_level, set_display_level};
use crate::config::B_SIZE_DEFAULT;
use crate::io::dispatch::{get_algorithm, Algorithm};
use crate::io::prefs::{Mode, Prefs};
use crate::util::byte_size;

/// Complete set of options produced by the argument parsing loop.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Engine configuration assembled from `-d`, `-a`, and `-b`.
    pub prefs: Prefs,
    /// Algorithm selected with `-t`.
    pub algorithm: Algorithm,
    /// Input path from `-i`; `None` reads standard input.
    pub input: Option<PathBuf>,
    /// Output path from `-o`; `None` writes standard output.
    pub output: Option<PathBuf>,
    /// When `true`, `-h` was processed; the caller should print nothing
    /// further and exit 0.
    pub exit_early: bool,
}

/// Parses `std::env::args()`, skipping the program name.
pub fn parse_args() -> Result<ParsedArgs> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&argv)
}

/// Fetches an option's value: the rest of the same argument (`-ifile`)
/// or, failing that, the next argument (`-i file`).
fn take_value<'a>(
    attached: &'a str,
    rest: &mut std::slice::Iter<'a, String>,
    name: &str,
) -> Result<&'a str> {
    if !attached.is_empty() {
        Ok(attached)
    } else {
        rest.next()
            .map(String::as_str)
            .ok_or_else(|| anyhow!("bad usage: option -{name} requires a value"))
    }
}

/// Parses an explicit argument slice (no program name).
pub fn parse_args_from(argv: &[String]) -> Result<ParsedArgs> {
    let mut prefs = Prefs::default();
    let mut algorithm = Algorithm::Lz78;
    let mut input = None;
    let mut output = None;
    let mut exit_early = false;
    let mut buffer_bytes: u64 = (B_SIZE_DEFAULT / 8) as u64;

    let mut it = argv.iter();
    while let Some(arg) = it.next() {
        let Some(flag) = arg.strip_prefix('-').filter(|f| !f.is_empty()) else {
            return Err(anyhow!("bad usage: unexpected argument '{arg}'"));
        };
        if !flag.is_char_boundary(1) {
            return Err(anyhow!("bad usage: unknown option '{arg}'"));
        }
        let (opt, attached) = flag.split_at(1);

        match opt {
            "i" => input = Some(PathBuf::from(take_value(attached, &mut it, "i")?)),
            "o" => output = Some(PathBuf::from(take_value(attached, &mut it, "o")?)),
            "d" => prefs.mode = Mode::Decompress,
            "t" => {
                let name = take_value(attached, &mut it, "t")?;
                algorithm = get_algorithm(name)
                    .ok_or_else(|| anyhow!("bad usage: invalid algorithm type: {name}"))?;
            }
            "b" => buffer_bytes = byte_size(take_value(attached, &mut it, "b")?),
            "a" => {
                let size = byte_size(take_value(attached, &mut it, "a")?);
                prefs.dict_size = size.min(u32::MAX as u64) as u32;
            }
            "v" => set_display_level(display_level() + 1),
            "q" => set_display_level(display_level().saturating_sub(1)),
            "h" => exit_early = true,
            _ => return Err(anyhow!("bad usage: unknown option -{opt}")),
        }
    }

    if buffer_bytes == 0 {
        return Err(anyhow!("bad usage: buffer size must be positive"));
    }
    prefs.buffer_bits = usize::try_from(buffer_bytes)
        .ok()
        .and_then(|b| b.checked_mul(8))
        .ok_or_else(|| anyhow!("bad usage: buffer size too large"))?;

    Ok(ParsedArgs {
        prefs,
        algorithm,
        input,
        output,
        exit_early,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
