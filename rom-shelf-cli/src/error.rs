use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Gamelist sidecar could not be read or written
    #[error("Gamelist error: {0}")]
    Gamelist(#[from] rom_shelf_frontend::GamelistError),

    /// Launch coordination failed
    #[error("Launch error: {0}")]
    Launch(#[from] rom_shelf_launch::LaunchError),

    /// Unknown display mode or other bad argument
    #[error("{0}")]
    InvalidArgument(String),

    /// The requested ROM is not part of the scanned tree
    #[error("ROM not found in {1}: {0}")]
    RomNotFound(String, String),
}

impl CliError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
