//! # Prompt — Line-Oriented Console Dialogue
//!
//! Every interaction in the tool is a prompt written to an output stream and a
//! single line read back from an input stream. `Prompter` owns both ends and is
//! generic over `BufRead`/`Write`, so the session runs against stdin/stdout in
//! the binary and against scripted `Cursor` input in tests.
//!
//! Validation failures never escape: the `ask_*` helpers print the complaint
//! and ask again. The only error a caller sees is the input closing (or a real
//! I/O failure), which ends the session.

use std::io::{self, BufRead, Write};

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Input reached end-of-file while a prompt was waiting.
    #[error("input closed")]
    Closed,
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type PromptResult<T> = Result<T, PromptError>;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl AsRef<str>) -> PromptResult<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    pub fn blank(&mut self) -> PromptResult<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Print `message` without a newline and return the next input line,
    /// minus its line terminator.
    pub fn ask(&mut self, message: &str) -> PromptResult<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a garbled
    /// line reaches the caller's validator instead of failing the read.
    fn read_line(&mut self) -> PromptResult<String> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(PromptError::Closed);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Ask repeatedly until `parse` accepts the answer. A rejected answer
    /// prints the returned message before the next attempt.
    pub fn ask_until<T>(
        &mut self,
        message: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> PromptResult<T> {
        loop {
            let line = self.ask(message)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(complaint) => self.say(complaint)?,
            }
        }
    }

    /// Yes/no question. Accepts yes/y/no/n in any case.
    pub fn confirm(&mut self, message: &str) -> PromptResult<bool> {
        let prompt = format!("{} (yes/no): ", message);
        self.ask_until(&prompt, |answer| {
            parse_yes_no(answer).ok_or_else(|| "Invalid choice. Please enter 'yes' or 'no'.".into())
        })
    }

    /// Non-negative integer.
    pub fn ask_number(&mut self, message: &str) -> PromptResult<u32> {
        self.ask_until(message, parse_non_negative)
    }

    /// Non-negative integer inside `lo..=hi`; anything else prints `out_of_range`.
    pub fn ask_number_in(
        &mut self,
        message: &str,
        lo: u32,
        hi: u32,
        out_of_range: &str,
    ) -> PromptResult<u32> {
        self.ask_until(message, |answer| {
            let n = parse_non_negative(answer)?;
            if (lo..=hi).contains(&n) {
                Ok(n)
            } else {
                Err(out_of_range.to_string())
            }
        })
    }

    /// Hand back the output stream (tests inspect what was printed).
    pub fn into_output(self) -> W {
        self.output
    }
}

/// `Some(true)` for yes/y, `Some(false)` for no/n, ignoring case and padding.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y") {
        Some(true)
    } else if answer.eq_ignore_ascii_case("no") || answer.eq_ignore_ascii_case("n") {
        Some(false)
    } else {
        None
    }
}

fn parse_non_negative(answer: &str) -> Result<u32, String> {
    match answer.trim().parse::<i64>() {
        Ok(n) if n < 0 => Err("Invalid input. Please enter a positive integer.".into()),
        Ok(n) => u32::try_from(n).map_err(|_| "Invalid input. Please enter a valid integer.".into()),
        Err(_) => Err("Invalid input. Please enter a valid integer.".into()),
    }
}
