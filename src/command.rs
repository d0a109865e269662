use std::io::Write;

use crate::commands::{cd::CdCommand, exit::ExitCommand, ls::LsCommand};
use crate::error::{Result, ShellError};
use crate::interactive::INTERACTIVE_HONORS_HALT;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    // empty = nothing to print
    pub output: String,
    pub halt_session: bool,
}

impl Reply {
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            halt_session: false,
        }
    }

    pub fn halt(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            halt_session: true,
        }
    }
}

pub type CommandResult = Result<Reply>;

pub trait Command {
    fn execute(&self, args: &[String], session: &mut Session) -> CommandResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    pub halt_session: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Ls,
    Cd,
    Exit,
}

// name -> builtin, matched exactly and case-sensitively
const BUILTINS: &[(&str, Builtin)] = &[
    ("ls", Builtin::Ls),
    ("cd", Builtin::Cd),
    ("exit", Builtin::Exit),
];

impl Builtin {
    pub fn lookup(name: &str) -> Option<Self> {
        BUILTINS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, builtin)| builtin)
    }

    pub fn name(self) -> &'static str {
        BUILTINS
            .iter()
            .find(|&&(_, builtin)| builtin == self)
            .map(|&(name, _)| name)
            .unwrap_or_default()
    }

    fn command(self) -> &'static dyn Command {
        match self {
            Self::Ls => &LsCommand,
            Self::Cd => &CdCommand,
            Self::Exit => &ExitCommand,
        }
    }
}

// which loop is dispatching. interactive mode only gets `exit` from the table
// when it is set to honor halts, otherwise the loop's own `exit` check is the
// only way out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Script,
    Interactive { honors_halt: bool },
}

impl DispatchMode {
    pub const INTERACTIVE: Self = Self::Interactive {
        honors_halt: INTERACTIVE_HONORS_HALT,
    };

    pub fn honors_halt(self) -> bool {
        match self {
            Self::Script => true,
            Self::Interactive { honors_halt } => honors_halt,
        }
    }

    pub fn allows(self, builtin: Builtin) -> bool {
        builtin != Builtin::Exit || self.honors_halt()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    mode: DispatchMode,
}

impl Dispatcher {
    pub fn new(mode: DispatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = BUILTINS
            .iter()
            .filter(|(_, builtin)| self.mode.allows(*builtin))
            .map(|(name, _)| *name)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn resolve(&self, name: &str) -> Option<Builtin> {
        Builtin::lookup(name).filter(|builtin| self.mode.allows(*builtin))
    }

    // unknown names leave the session alone and come back as CommandNotFound
    pub fn dispatch(
        &self,
        tokens: &[String],
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<DispatchResult> {
        let Some((name, args)) = tokens.split_first() else {
            return Ok(DispatchResult::default());
        };

        let builtin = self
            .resolve(name)
            .ok_or_else(|| ShellError::CommandNotFound(name.clone()))?;
        tracing::debug!(command = builtin.name(), ?args, "dispatching");

        let reply = builtin.command().execute(args, session)?;
        if !reply.output.is_empty() {
            writeln!(out, "{}", reply.output)?;
        }
        Ok(DispatchResult {
            halt_session: reply.halt_session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn run(
        dispatcher: &Dispatcher,
        words: &[&str],
        session: &mut Session,
    ) -> (Result<DispatchResult>, String) {
        let mut out = Vec::new();
        let result = dispatcher.dispatch(&tokens(words), session, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(Builtin::lookup("ls"), Some(Builtin::Ls));
        assert_eq!(Builtin::lookup("cd"), Some(Builtin::Cd));
        assert_eq!(Builtin::lookup("exit"), Some(Builtin::Exit));
        assert_eq!(Builtin::lookup("LS"), None);
        assert_eq!(Builtin::lookup("ls "), None);
        assert_eq!(Builtin::lookup(""), None);
    }

    #[test]
    fn test_builtin_names_round_trip() {
        for &(name, builtin) in BUILTINS {
            assert_eq!(builtin.name(), name);
        }
    }

    #[test]
    fn test_cd_then_bare_cd() {
        let dispatcher = Dispatcher::new(DispatchMode::Script);
        let mut session = Session::new("/default/vfs", false);

        let (result, output) = run(&dispatcher, &["cd", "foo"], &mut session);
        assert!(!result.unwrap().halt_session);
        assert_eq!(session.current_dir(), "foo");
        assert!(output.contains("foo"));

        let (result, _) = run(&dispatcher, &["cd"], &mut session);
        assert!(result.is_ok());
        assert_eq!(session.current_dir(), "/");
    }

    #[test]
    fn test_unknown_command_leaves_session_alone() {
        let dispatcher = Dispatcher::new(DispatchMode::Script);
        let mut session = Session::new("/default/vfs", false);
        session.set_current_dir("/srv");

        let cases: [&[&str]; 4] = [&["pwd"], &["Ls"], &["rm", "-rf", "/"], &["EXIT"]];
        for words in cases {
            let (result, output) = run(&dispatcher, words, &mut session);
            let err = result.unwrap_err();
            assert_eq!(err.to_string(), format!("{}: command not found", words[0]));
            assert!(output.is_empty());
            assert_eq!(session.current_dir(), "/srv");
        }
    }

    #[test]
    fn test_exit_halts_in_script_mode() {
        let dispatcher = Dispatcher::new(DispatchMode::Script);
        let mut session = Session::new("/default/vfs", false);
        session.set_current_dir("/tmp");

        let (result, output) = run(&dispatcher, &["exit"], &mut session);
        assert!(result.unwrap().halt_session);
        assert!(!output.is_empty());
        assert_eq!(session.current_dir(), "/tmp");
    }

    #[test]
    fn test_interactive_mode_without_halt_has_no_exit() {
        let dispatcher = Dispatcher::new(DispatchMode::Interactive { honors_halt: false });
        let mut session = Session::new("/default/vfs", false);

        assert_eq!(dispatcher.command_names(), vec!["cd", "ls"]);
        let (result, _) = run(&dispatcher, &["exit", "now"], &mut session);
        assert_eq!(result.unwrap_err().to_string(), "exit: command not found");
    }

    #[test]
    fn test_interactive_mode_with_halt_has_exit() {
        let dispatcher = Dispatcher::new(DispatchMode::Interactive { honors_halt: true });
        let mut session = Session::new("/default/vfs", false);

        assert_eq!(dispatcher.command_names(), vec!["cd", "exit", "ls"]);
        let (result, _) = run(&dispatcher, &["exit", "now"], &mut session);
        assert!(result.unwrap().halt_session);
    }

    #[test]
    fn test_default_interactive_mode_follows_switch() {
        assert_eq!(DispatchMode::INTERACTIVE.honors_halt(), INTERACTIVE_HONORS_HALT);
        assert_eq!(
            DispatchMode::INTERACTIVE.allows(Builtin::Exit),
            INTERACTIVE_HONORS_HALT
        );
        assert!(DispatchMode::INTERACTIVE.allows(Builtin::Cd));
        assert!(DispatchMode::Script.allows(Builtin::Exit));
    }

    #[test]
    fn test_empty_tokens_are_noop() {
        let dispatcher = Dispatcher::new(DispatchMode::Script);
        let mut session = Session::new("/default/vfs", false);
        let (result, output) = run(&dispatcher, &[], &mut session);
        assert_eq!(result.unwrap(), DispatchResult::default());
        assert!(output.is_empty());
    }
}
