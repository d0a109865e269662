use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::command::{DispatchMode, Dispatcher};
use crate::error::{Result, ShellError};
use crate::prompt;
use crate::session::Session;
use crate::tokenizer::tokenize;

// off: only a bare typed `exit` ends the loop and `exit` is missing from the
// interactive table. on: `exit` dispatches like in scripts and its halt is obeyed.
// DispatchMode::INTERACTIVE reads this, so flipping it changes both
pub const INTERACTIVE_HONORS_HALT: bool = false;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    // ctrl-d / closed stdin
    Ended,
    // ctrl-c
    Interrupted,
}

pub trait LineSource {
    /// Show `prompt` and block until the user produces something.
    fn read_line(&mut self, prompt: &str) -> Result<Input>;

    // called once when the loop is done
    fn finish(&mut self) {}
}

fn history_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "vshell")
        .map(|dirs| dirs.data_dir().join("history.txt"))
}

/// rustyline editor, optionally keeping history across runs.
pub struct LineEditor {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl LineEditor {
    pub fn new(history: bool) -> Result<Self> {
        let mut editor = DefaultEditor::new().map_err(|e| ShellError::Readline(e.to_string()))?;
        let history_path = history.then(history_file).flatten();

        // nothing saved yet on a first run, so only load what is there
        if let Some(path) = history_path.as_deref().filter(|p| p.exists()) {
            if let Err(e) = editor.load_history(path) {
                tracing::warn!(path = %path.display(), "history not loaded: {e}");
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }
}

impl LineSource for LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                    tracing::warn!("history entry dropped: {e}");
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Ended),
            Err(e) => Err(ShellError::Readline(e.to_string())),
        }
    }

    fn finish(&mut self) {
        let Some(path) = self.history_path.clone() else {
            return;
        };
        let saved = path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .map_err(|e| e.to_string())
            .and_then(|()| self.editor.save_history(&path).map_err(|e| e.to_string()));
        if let Err(e) = saved {
            tracing::warn!(path = %path.display(), "history not saved: {e}");
        }
    }
}

/// Replays canned input, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Input>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = Input>) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(|l| Input::Line(l.into())))
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        self.prompts.push(prompt.to_string());
        Ok(self.queue.pop_front().unwrap_or(Input::Ended))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEnd {
    Exit,
    EndOfInput,
    Interrupted,
}

pub struct InteractiveLoop<S> {
    source: S,
    dispatcher: Dispatcher,
}

impl<S: LineSource> InteractiveLoop<S> {
    pub fn new(source: S) -> Self {
        Self::with_dispatcher(source, Dispatcher::new(DispatchMode::INTERACTIVE))
    }

    pub fn with_dispatcher(source: S, dispatcher: Dispatcher) -> Self {
        Self { source, dispatcher }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Print the banner and read lines until the session ends.
    pub fn run(&mut self, session: &mut Session, out: &mut dyn Write) -> Result<LoopEnd> {
        self.banner(session, out)?;
        let end = self.read_loop(session, out);
        self.source.finish();
        end
    }

    fn banner(&self, session: &Session, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "vshell {} on {}", env!("CARGO_PKG_VERSION"), session.vfs_path())?;
        writeln!(
            out,
            "Session started {}. Built-ins: {}. Type 'exit' to quit.",
            session.started_at().format("%Y-%m-%d %H:%M:%S"),
            self.dispatcher.command_names().join(", ")
        )?;
        Ok(())
    }

    fn read_loop(&mut self, session: &mut Session, out: &mut dyn Write) -> Result<LoopEnd> {
        loop {
            let prompt = prompt::render(session);
            match self.source.read_line(&prompt)? {
                Input::Ended => {
                    writeln!(out)?;
                    writeln!(out, "End of input. Goodbye.")?;
                    return Ok(LoopEnd::EndOfInput);
                }
                Input::Interrupted => {
                    writeln!(out)?;
                    writeln!(out, "Interrupted. Leaving the shell.")?;
                    return Ok(LoopEnd::Interrupted);
                }
                // bare exit never goes through the dispatcher
                Input::Line(line) if line.trim() == "exit" => return Ok(LoopEnd::Exit),
                Input::Line(line) => match self.process(&line, session, out) {
                    Ok(true) => return Ok(LoopEnd::Exit),
                    Ok(false) => {}
                    Err(ShellError::Io(e)) => return Err(ShellError::Io(e)),
                    Err(e) if e.is_recoverable() => writeln!(out, "{e}")?,
                    Err(e) => {
                        tracing::warn!("line failed: {e}");
                        writeln!(out, "Error: {e}")?;
                    }
                },
            }
        }
    }

    // true when the line ends the session
    fn process(&self, line: &str, session: &mut Session, out: &mut dyn Write) -> Result<bool> {
        let tokens = tokenize(line)?;
        if tokens.is_empty() {
            return Ok(false);
        }
        let result = self.dispatcher.dispatch(&tokens, session, out)?;
        Ok(self.dispatcher.mode().honors_halt() && result.halt_session)
    }
}
