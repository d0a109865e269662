pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod interactive;
pub mod prompt;
pub mod script;
pub mod session;
pub mod tokenizer;

use std::io::Write;
use std::path::Path;

pub use command::{Builtin, DispatchMode, DispatchResult, Dispatcher};
pub use config::ShellConfig;
pub use error::{Result, ShellError};
pub use interactive::{InteractiveLoop, Input, LineEditor, LineSource, LoopEnd, ScriptedInput};
pub use script::{ScriptLine, ScriptReport, ScriptRunner, ScriptState};
pub use session::Session;
pub use tokenizer::tokenize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Script(ScriptReport),
    Interactive(LoopEnd),
}

/// Run the configured script, or the interactive prompt when there is none.
pub fn run(config: &ShellConfig, out: &mut dyn Write) -> Result<RunOutcome> {
    let mut session = Session::new(&config.vfs_path, config.debug);
    tracing::debug!(vfs = session.vfs_identity(), debug = config.debug, "session created");

    match &config.script {
        Some(path) => run_script(path, &mut session, out).map(RunOutcome::Script),
        None => {
            let editor = LineEditor::new(config.history)?;
            run_interactive(editor, &mut session, out).map(RunOutcome::Interactive)
        }
    }
}

pub fn run_script(
    path: &Path,
    session: &mut Session,
    out: &mut dyn Write,
) -> Result<ScriptReport> {
    let mut runner = ScriptRunner::new(path);
    let report = runner.run(session, out)?;
    match report.halted_at {
        Some(line) => writeln!(out, "Script stopped by exit at line {line}")?,
        None => writeln!(out, "Script finished")?,
    }
    Ok(report)
}

pub fn run_interactive<S: LineSource>(
    source: S,
    session: &mut Session,
    out: &mut dyn Write,
) -> Result<LoopEnd> {
    InteractiveLoop::new(source).run(session, out)
}
