//! Data models shared across the console engine

pub mod severity;
pub mod log_level;
pub mod platform;
pub mod style;

pub use severity::{Severity, Stream};
pub use log_level::{LogLevel, ConsoleOptions, Verbosity, MISSING_LOG_LEVEL_WARNING};
pub use platform::Platform;
pub use style::Style;
