//! Line-oriented prompts for the interactive console.

use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Line-oriented console I/O shared by the menu and its callbacks.
///
/// Methods take `&self` so that the confirmation and edit closures handed to
/// the store can each hold a reference at the same time.
pub struct Prompter<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    /// Writes one line.
    pub fn say(&self, line: impl Display) -> io::Result<()> {
        writeln!(self.output.borrow_mut(), "{line}")
    }

    /// Shows `prompt` and reads one trimmed line; `None` at end of input.
    pub fn ask(&self, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut output = self.output.borrow_mut();
            write!(output, "{prompt}")?;
            output.flush()?;
        }

        let mut line = String::new();
        if self.input.borrow_mut().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks a yes/no question; only `y` (any case) counts as yes.
    pub fn confirm(&self, question: &str) -> io::Result<bool> {
        let answer = self.ask(question)?;
        Ok(answer.is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_trims_and_reports_end_of_input() {
        let prompter = Prompter::new("  Alice \r\n".as_bytes(), Vec::new());

        assert_eq!(prompter.ask("Name: ").unwrap().as_deref(), Some("Alice"));
        assert_eq!(prompter.ask("Again: ").unwrap(), None);
        assert_eq!(
            String::from_utf8(prompter.into_output()).unwrap(),
            "Name: Again: "
        );
    }

    #[test]
    fn confirm_accepts_only_y() {
        let prompter = Prompter::new("Y\nyes\nn\n".as_bytes(), Vec::new());

        assert!(prompter.confirm("? ").unwrap());
        assert!(!prompter.confirm("? ").unwrap());
        assert!(!prompter.confirm("? ").unwrap());
        assert!(!prompter.confirm("? ").unwrap());
    }
}
