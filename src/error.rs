use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    // bad quoting or escaping
    #[error("syntax error: {reason}")]
    MalformedInput { reason: String },

    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("cannot read script {}: {source}", path.display())]
    ScriptUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // anything rustyline reports besides eof and ctrl-c
    #[error("input error: {0}")]
    Readline(String),

    #[error("config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    // the loop reports these and moves on to the next line
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. } | Self::CommandNotFound(_)
        )
    }
}
