use std::io;

use f2edit_core::CoreError;
use thiserror::Error;

/// Failures of the one-shot launch sequence. All of them end the process
/// with exit status 1.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Unable to list files in: {path}\n{source}")]
    ListDir { path: String, source: io::Error },

    #[error("Integer required.")]
    IntegerRequired,

    #[error("Invalid slot.")]
    InvalidSlot,

    #[error("Unable to open save {path}\n{source}")]
    OpenSave { path: String, source: CoreError },

    #[error("Error reading input: {}", _0)]
    Input(#[from] io::Error),
}

impl LaunchError {
    pub fn list_dir(path: impl Into<String>, source: io::Error) -> Self {
        Self::ListDir {
            path: path.into(),
            source,
        }
    }

    pub fn open_save(path: impl Into<String>, source: CoreError) -> Self {
        Self::OpenSave {
            path: path.into(),
            source,
        }
    }
}
