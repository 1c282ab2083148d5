//! Command-line front end: argument parsing, help text, and the display
//! macros shared by every layer that talks to stderr.

pub mod args;
pub mod constants;
pub mod help;

pub use args::{parse_args, parse_args_from, ParsedArgs};
