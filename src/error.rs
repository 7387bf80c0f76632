//! Errors raised by the console engine. These are usage errors: they point at a
//! caller doing something out of order, never at a failing collaborator.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Console capture has already been started.")]
    CaptureAlreadyStarted,

    #[error("Console capture has not been started.")]
    CaptureNotStarted,

    /// Raised on any assignment to a registered read-only property
    #[error("Property '{0}' is read-only.")]
    ReadOnly(String),

    #[error("Property '{0}' is not defined.")]
    UnknownProperty(String),

    #[error("Property '{0}' has already been defined.")]
    AlreadyDefined(String),

    #[error("Unknown console platform '{0}', expected one of: github, devops, win32, other")]
    UnknownPlatform(String),

    #[error("Unknown log level '{0}', expected one of: default, verbose, debug")]
    UnknownLogLevel(String),

    #[error("Unknown severity '{0}', expected one of: debug, info, warn, error")]
    UnknownSeverity(String),

    #[error("Unknown style '{0}'")]
    UnknownStyle(String),
}

pub type Result<T> = std::result::Result<T, Error>;
