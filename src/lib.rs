//! Console helpers for npm lifecycle scripts.
//!
//! A [`Console`] stands in for the four severity logging methods (debug,
//! info, warn, error). Profiles pushed onto it decide what each severity
//! writes: which CI annotation goes in front (GitHub Actions, Azure DevOps),
//! which prefix follows, how the text is styled, or whether it is muted at
//! all. Capture sessions collect the output in memory so it can be asserted
//! on instead of reaching the terminal.
//!
//! Consoles are plain values, so tests can each own one. [`global`] gives
//! access to a process-wide instance initialized for the detected platform.

pub mod console;
pub mod env;
pub mod error;
pub mod models;
pub mod os;
pub mod strings;

mod parser;

pub use console::{Console, CaptureGuard, ProfileGuard, SharedBuffer, Output};
pub use env::Environment;
pub use error::{Error, Result};
pub use models::{ConsoleOptions, LogLevel, Platform, Severity, Stream, Style, Verbosity};

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static GLOBAL: OnceLock<Mutex<Console>> = OnceLock::new();

/// The process-wide console, created from the process environment on first
/// use
pub fn global() -> MutexGuard<'static, Console> {
    GLOBAL
        .get_or_init(|| Mutex::new(Console::from_process()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
