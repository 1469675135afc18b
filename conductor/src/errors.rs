use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("Application not found: {0}")]
    AppNotFound(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Platform-specific error: {0}")]
    PlatformError(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid script: {0}")]
    InvalidScript(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Script file not found: {0}")]
    ScriptNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
