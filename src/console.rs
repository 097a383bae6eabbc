//! Player I/O
//!
//! The game only talks to the player through [`Console`], which keeps the
//! round logic testable with scripted answers.

use std::io::{self, BufRead, Write};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input closed")]
    Closed,

    #[error("no valid answer after {0} attempts")]
    TooManyAttempts(u32),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub trait Console {
    /// Print a line of output
    fn say(&mut self, text: &str) -> io::Result<()>;

    /// Show `prompt` and read one line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Console on the process stdin/stdout
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.stdout, "{}", text)
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.stdout, "{}", prompt)?;
        self.stdout.flush()?;

        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Ask until `parse` accepts the answer.
///
/// Each rejected answer prints `hint`. With `limit` set, gives up after that
/// many rejections; without it, keeps asking until input ends.
pub fn ask<C, T, F>(
    console: &mut C,
    prompt: &str,
    hint: &str,
    limit: Option<u32>,
    parse: F,
) -> Result<T, InputError>
where
    C: Console + ?Sized,
    F: Fn(&str) -> Option<T>,
{
    let mut rejected = 0u32;
    loop {
        let line = console.read_line(prompt)?.ok_or(InputError::Closed)?;
        if let Some(value) = parse(line.trim()) {
            return Ok(value);
        }

        rejected += 1;
        tracing::debug!("Rejected input {:?} ({} so far)", line, rejected);
        if limit.is_some_and(|max| rejected >= max) {
            return Err(InputError::TooManyAttempts(rejected));
        }
        console.say(hint)?;
    }
}

/// Accept an integer in `min..=max`
pub fn in_range(min: usize, max: usize) -> impl Fn(&str) -> Option<usize> {
    move |s| s.parse::<usize>().ok().filter(|n| (min..=max).contains(n))
}

/// Only an explicit "n"/"no" declines
pub fn wants_replay(answer: &str) -> bool {
    !matches!(answer.trim().to_uppercase().as_str(), "N" | "NO")
}
