use crate::command::{Command, CommandResult, Reply};
use crate::session::Session;

// exit, arguments ignored
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, _args: &[String], _session: &mut Session) -> CommandResult {
        Ok(Reply::halt("exit: ending session"))
    }
}
