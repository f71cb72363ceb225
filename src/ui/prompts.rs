//! Line prompts.

use std::io::{BufRead, Write};

use anyhow::Context;
use console::Term;
use dialoguer::Input;

use crate::error::{Result, SetupError};

/// Prompt on a terminal and return the raw line the operator typed.
///
/// Empty input is allowed; deciding what it means is up to the caller.
pub fn prompt_line(question: &str, term: &Term) -> Result<String> {
    Input::<String>::new()
        .with_prompt(question)
        .allow_empty(true)
        .interact_on(term)
        .context("Failed to read answer from terminal")
        .map_err(SetupError::from)
}

/// Write `question` to `writer` and read one line from `reader`.
///
/// Used when stdin is not a terminal. End of input yields an empty string.
/// Bytes that are not UTF-8 are replaced rather than rejected, so garbage
/// input is still an answer (and never an affirmative one).
pub fn read_answer<R: BufRead, W: Write>(
    question: &str,
    reader: &mut R,
    writer: &mut W,
) -> Result<String> {
    write!(writer, "{}: ", question)?;
    writer.flush()?;

    let mut buf = Vec::new();
    reader
        .read_until(b'\n', &mut buf)
        .context("Failed to read answer from input")?;
    let line = String::from_utf8_lossy(&buf);
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
