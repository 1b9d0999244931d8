//! Command-line interface: arguments and operator input

pub mod args;

pub use args::Args;

use std::io::{self, BufRead, Write};

/// Prompt shown before reading the backtrace line
pub const PROMPT: &str = "BT: ";

/// Read one line of crash output, prompting first unless `quiet`
///
/// End of input before any text yields an empty line.
///
/// # Errors
/// Reading `input` or writing the prompt fails.
pub fn read_backtrace_line<R: BufRead, W: Write>(
    input: &mut R,
    prompt_out: &mut W,
    quiet: bool,
) -> io::Result<String> {
    if !quiet {
        write!(prompt_out, "{PROMPT}")?;
        prompt_out.flush()?;
    }

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}
