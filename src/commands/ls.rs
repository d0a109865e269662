use crate::command::{Command, CommandResult, Reply};
use crate::session::Session;

// ls [OPTION]... [PATH]...
// only says what it would list, nothing is read
pub struct LsCommand;

impl Command for LsCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> CommandResult {
        // split flags from paths, same as a real ls would
        let (flags, mut paths): (Vec<&str>, Vec<&str>) = args
            .iter()
            .map(String::as_str)
            .partition(|arg| arg.starts_with('-') && arg.len() > 1);

        // default to cwd if no path given
        if paths.is_empty() {
            paths.push(session.current_dir());
        }

        let mut ack = format!("ls: would list {}", paths.join(" "));
        if !flags.is_empty() {
            ack.push_str(&format!(" with options {}", flags.join(" ")));
        }
        Ok(Reply::text(ack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_ls_defaults_to_cwd() {
        let mut session = Session::new("/default/vfs", false);
        session.set_current_dir("/home/user");

        let reply = LsCommand.execute(&[], &mut session).unwrap();
        assert_eq!(reply.output, "ls: would list /home/user");
        assert!(!reply.halt_session);
    }

    #[test]
    fn test_ls_paths_and_flags() {
        let mut session = Session::new("/default/vfs", false);

        let reply = LsCommand
            .execute(&args(&["-la", "/etc", "docs"]), &mut session)
            .unwrap();
        assert_eq!(reply.output, "ls: would list /etc docs with options -la");
    }

    #[test]
    fn test_ls_lone_dash_is_a_path() {
        let mut session = Session::new("/default/vfs", false);
        let reply = LsCommand.execute(&args(&["-"]), &mut session).unwrap();
        assert_eq!(reply.output, "ls: would list -");
    }

    #[test]
    fn test_ls_does_not_touch_session() {
        let mut session = Session::new("/default/vfs", false);
        session.set_current_dir("/srv");
        LsCommand.execute(&args(&["/tmp"]), &mut session).unwrap();
        assert_eq!(session.current_dir(), "/srv");
    }
}
