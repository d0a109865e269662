use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::command::{DispatchMode, Dispatcher};
use crate::error::{Result, ShellError};
use crate::prompt;
use crate::session::Session;
use crate::tokenizer::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptState {
    Idle,
    Running,
    // stopped by exit
    Halted,
    // couldn't open or read the file
    Failed,
    Completed,
}

// number is 1-based and counts blank and comment lines too
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub number: usize,
    pub text: String,
}

/// Lines that carry a command, skipping blanks and `#` comments.
pub fn script_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<ScriptLine>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| match line {
            Ok(line) => {
                let text = line.trim();
                if text.is_empty() || text.starts_with('#') {
                    None
                } else {
                    Some(Ok(ScriptLine {
                        number: idx + 1,
                        text: text.to_string(),
                    }))
                }
            }
            Err(e) => Some(Err(e)),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    pub state: ScriptState,
    // includes the line that halted
    pub executed: usize,
    pub halted_at: Option<usize>,
}

pub struct ScriptRunner {
    path: PathBuf,
    dispatcher: Dispatcher,
    state: ScriptState,
}

impl ScriptRunner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dispatcher: Dispatcher::new(DispatchMode::Script),
            state: ScriptState::Idle,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> ScriptState {
        self.state
    }

    /// Play the script. Open or read failures give `ScriptUnavailable`,
    /// bad lines are reported and skipped.
    pub fn run(&mut self, session: &mut Session, out: &mut dyn Write) -> Result<ScriptReport> {
            let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(source) => return Err(self.fail(source)),
        };
        self.state = ScriptState::Running;
        tracing::info!(path = %self.path.display(), "running script");
        if session.debug_enabled() {
            writeln!(out, "[DEBUG] Running script: {}", self.path.display())?;
        }

        let mut report = ScriptReport {
            state: ScriptState::Running,
            executed: 0,
            halted_at: None,
        };

        for line in script_lines(BufReader::new(file)) {
            let line = match line {
                Ok(line) => line,
                Err(source) => return Err(self.fail(source)),
            };
            if self.run_line(&line, session, out)? {
                report.executed += 1;
            }
            if self.state == ScriptState::Halted {
                report.halted_at = Some(line.number);
                break;
            }
        }

        if self.state == ScriptState::Running {
            self.state = ScriptState::Completed;
        }
        report.state = self.state;
        tracing::info!(state = ?report.state, executed = report.executed, "script finished");
        Ok(report)
    }

    // echo, tokenize, dispatch. true if it got to the dispatcher
    fn run_line(
        &mut self,
        line: &ScriptLine,
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<bool> {
        if session.debug_enabled() {
            writeln!(out, "[DEBUG] Processing line {}: {}", line.number, line.text)?;
        }
        tracing::debug!(line = line.number, text = %line.text, "script line");

        // fresh prompt so earlier cd's show up
        writeln!(out, "{}{}", prompt::render(session), line.text)?;

        let tokens = match tokenize(&line.text) {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!(line = line.number, "skipping line: {e}");
                writeln!(out, "{e}")?;
                return Ok(false);
            }
        };

        match self.dispatcher.dispatch(&tokens, session, out) {
            Ok(result) => {
                if result.halt_session {
                    self.state = ScriptState::Halted;
                }
            }
            Err(e) if e.is_recoverable() => writeln!(out, "{e}")?,
            Err(e) => return Err(e),
        }
        Ok(true)
    }

    fn fail(&mut self, source: io::Error) -> ShellError {
        self.state = ScriptState::Failed;
        tracing::warn!(path = %self.path.display(), "script unavailable: {source}");
        ShellError::ScriptUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}
