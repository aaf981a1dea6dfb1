//! # Terminal Prompts
//!
//! Line-based question/answer helpers for the interactive wizard.
//! Generic over the reader and writer so tests can script a session.
//!
//! End of input at any prompt is reported as `UnexpectedEof`, which the
//! CLI treats as the user cancelling.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for messages between prompts.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Free text. The current value, if any, is kept on an empty answer.
    pub fn text(&mut self, label: &str, current: &str) -> io::Result<String> {
        if current.is_empty() {
            write!(self.output, "{}: ", label)?;
        } else {
            write!(self.output, "{} [{}]: ", label, current)?;
        }
        let answer = self.read_line()?;
        Ok(if answer.is_empty() {
            current.to_string()
        } else {
            answer
        })
    }

    /// A value parsed with `FromStr`; asks again until it parses.
    ///
    /// An empty answer keeps `current` when there is one.
    pub fn parsed<T>(&mut self, label: &str, current: Option<T>) -> io::Result<T>
    where
        T: FromStr + Display + Copy,
        T::Err: Display,
    {
        loop {
            match current {
                Some(value) => write!(self.output, "{} [{}]: ", label, value)?,
                None => write!(self.output, "{}: ", label)?,
            }
            let answer = self.read_line()?;
            if answer.is_empty() {
                if let Some(value) = current {
                    return Ok(value);
                }
                continue;
            }
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "  {}", e)?,
            }
        }
    }

    /// Picks one of `options` by number (1-based).
    pub fn choose<T: Copy + Display>(&mut self, label: &str, options: &[T]) -> io::Result<T> {
        writeln!(self.output, "{}:", label)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, option)?;
        }
        loop {
            write!(self.output, "Choice [1-{}]: ", options.len())?;
            let answer = self.read_line()?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(options[n - 1]),
                _ => writeln!(self.output, "  Enter a number between 1 and {}", options.len())?,
            }
        }
    }

    /// Yes/no question. An empty answer takes `default`.
    pub fn confirm(&mut self, label: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "{} [{}]: ", label, hint)?;
            match self.read_line()?.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "  Please answer y or n")?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }
}
