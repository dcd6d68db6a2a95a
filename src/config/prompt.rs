//! The one-shot "quit?" question asked when the config had problems.

use super::ConfigWarning;
use std::io::{self, BufRead, Write};

/// Answers that abort startup. Anything else, including an empty line or EOF, continues.
pub const ABORT_ANSWERS: [&str; 5] = ["yes", "Yes", "YES", "y", "Y"];

/// What the user chose after seeing the config warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptDecision {
    /// Carry on with the offending entries skipped.
    Continue,
    /// Exit without following the file.
    Abort,
}

/// Whether `answer` is one of [`ABORT_ANSWERS`], ignoring surrounding whitespace.
pub fn is_abort_answer(answer: &str) -> bool {
    ABORT_ANSWERS.contains(&answer.trim())
}

/// Print every warning, then ask once whether to quit.
///
/// With no warnings nothing is printed or read and the answer is
/// [`PromptDecision::Continue`].
pub fn confirm_warnings<R, W>(
    warnings: &[ConfigWarning],
    input: &mut R,
    output: &mut W,
) -> io::Result<PromptDecision>
where
    R: BufRead,
    W: Write,
{
    if warnings.is_empty() {
        return Ok(PromptDecision::Continue);
    }

    for warning in warnings {
        writeln!(output, "namedtail: config warning: {}", warning)?;
    }
    write!(output, "quit [y/N]? ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(if is_abort_answer(&answer) {
        PromptDecision::Abort
    } else {
        PromptDecision::Continue
    })
}
