use std::path::Path;

use chrono::{DateTime, Local};

const ROOT_DIR: &str = "/";
const FALLBACK_IDENTITY: &str = "vfs";

// one per run, only the dispatcher gets a &mut to it
#[derive(Debug, Clone)]
pub struct Session {
    vfs_path: String,
    vfs_identity: String,
    current_dir: String,
    debug: bool,
    started_at: DateTime<Local>,
}

impl Session {
    pub fn new(vfs_path: &str, debug: bool) -> Self {
        Self {
            vfs_path: vfs_path.to_string(),
            vfs_identity: vfs_identity(vfs_path),
            current_dir: ROOT_DIR.to_string(),
            debug,
            started_at: Local::now(),
        }
    }

    /// Configured location, as given.
    pub fn vfs_path(&self) -> &str {
        &self.vfs_path
    }

    // short name for the prompt
    pub fn vfs_identity(&self) -> &str {
        &self.vfs_identity
    }

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    // replaced wholesale, empty falls back to / so it is never blank
    pub(crate) fn set_current_dir(&mut self, path: &str) {
        if path.is_empty() {
            self.reset_current_dir();
        } else {
            self.current_dir = path.to_string();
        }
    }

    pub(crate) fn reset_current_dir(&mut self) {
        self.current_dir = ROOT_DIR.to_string();
    }
}

/// Last path segment (`/default/vfs` -> `vfs`), else the trimmed path, else `vfs`.
pub fn vfs_identity(vfs_path: &str) -> String {
    let trimmed = vfs_path.trim();
    if let Some(name) = Path::new(trimmed).file_name() {
        return name.to_string_lossy().into_owned();
    }
    if trimmed.is_empty() {
        FALLBACK_IDENTITY.to_string()
    } else {
        trimmed.to_string()
    }
}
