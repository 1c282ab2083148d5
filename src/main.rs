//! Binary entry point for the `lz78` command-line tool.
//!
//! Control flow:
//!
//! 1. [`parse_args`](lz78::cli::args::parse_args) processes the flags
//!    into a [`ParsedArgs`](lz78::cli::args::ParsedArgs) value;
//! 2. [`exec`](lz78::io::dispatch::exec) opens the streams and drives
//!    the selected engine to completion, retrying through would-block
//!    suspensions;
//! 3. failures are printed to stderr and reported via the exit code.

use std::process::ExitCode;

use lz78::cli::args::parse_args;
use lz78::cli::help::print_usage;
use lz78::display;
use lz78::io::dispatch::exec;

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            display!("{}: {}\n", lz78::cli::constants::COMPRESSOR_NAME, e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    if args.exit_early {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match exec(
        &args.prefs,
        args.algorithm,
        args.input.as_deref(),
        args.output.as_deref(),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display!("{}\n", e);
            ExitCode::FAILURE
        }
    }
}
