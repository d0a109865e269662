use crate::session::Session;

// "{vfs}:{cwd}$ ", rebuilt before every line so it follows cd
pub fn render(session: &Session) -> String {
    format!("{}:{}$ ", session.vfs_identity(), session.current_dir())
}
