use crate::command::{Command, CommandResult, Reply};
use crate::session::Session;

// cd [DIRECTORY]
// takes DIRECTORY as given, bare cd goes back to /. nothing is checked
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> CommandResult {
        match args.first() {
            Some(target) => {
                if args.len() > 1 {
                    tracing::warn!(ignored = ?&args[1..], "cd: extra arguments ignored");
                }
                session.set_current_dir(target);
            }
            None => session.reset_current_dir(),
        }
        Ok(Reply::text(format!(
            "cd: current directory is now {}",
            session.current_dir()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_cd_absolute_path() {
        let mut session = Session::new("/default/vfs", false);
        let reply = CdCommand.execute(&args(&["/home/user"]), &mut session).unwrap();
        assert_eq!(session.current_dir(), "/home/user");
        assert_eq!(reply.output, "cd: current directory is now /home/user");
    }

    #[test]
    fn test_cd_relative_path_replaces() {
        let mut session = Session::new("/default/vfs", false);
        session.set_current_dir("/home");
        CdCommand.execute(&args(&["user"]), &mut session).unwrap();
        // no resolution against the old directory
        assert_eq!(session.current_dir(), "user");
    }

    #[test]
    fn test_cd_bare_resets_to_root() {
        let mut session = Session::new("/default/vfs", false);
        session.set_current_dir("/some/path");
        let reply = CdCommand.execute(&[], &mut session).unwrap();
        assert_eq!(session.current_dir(), "/");
        assert_eq!(reply.output, "cd: current directory is now /");
    }

    #[test]
    fn test_cd_uses_first_argument() {
        let mut session = Session::new("/default/vfs", false);
        CdCommand.execute(&args(&["/a", "/b"]), &mut session).unwrap();
        assert_eq!(session.current_dir(), "/a");
    }

    #[test]
    fn test_cd_empty_argument_keeps_dir_non_empty() {
        let mut session = Session::new("/default/vfs", false);
        session.set_current_dir("/tmp");
        CdCommand.execute(&args(&[""]), &mut session).unwrap();
        assert_eq!(session.current_dir(), "/");
    }
}
