//! Yes/no questions on the console.
use std::io::{BufRead, Write};

use oof_common::Result;

/// Ask `question` and read one answer line. Only `y`/`yes` count as consent.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
