/// Errors that can occur while coordinating a launch.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no launch command configured for platform: {0}")]
    MissingTemplate(String),
}
