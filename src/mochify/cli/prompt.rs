use console::{style, Term};
use mochify::commands::export::FolderPrompt;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

const CANCEL_ANSWER: &str = "q";

/// Asks for the destination folder on the terminal.
///
/// Empty input takes the default, `q` or end of input cancels.
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

/// One line of input. `None` at end of input, on a terminal (Ctrl-D) or a pipe alike.
fn read_answer_from<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderPrompt for TerminalPrompt {
    fn choose_folder(&mut self, default: &Path) -> Option<PathBuf> {
        let question = format!(
            "Save deck to [{}] ({} to cancel): ",
            style(default.display()).cyan(),
            CANCEL_ANSWER
        );
        self.term.write_str(&question).ok()?;
        let answer = read_answer_from(&mut io::stdin().lock())?;
        interpret_answer(&answer, default)
    }
}

fn interpret_answer(answer: &str, default: &Path) -> Option<PathBuf> {
    match answer.trim() {
        "" => Some(default.to_path_buf()),
        a if a.eq_ignore_ascii_case(CANCEL_ANSWER) => None,
        dir => Some(PathBuf::from(dir)),
    }
}
