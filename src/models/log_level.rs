//! Verbosity options as handed in by callers, and the validated descriptor
//! every profile push works from.
use std::str::FromStr;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const MISSING_LOG_LEVEL_WARNING: &str = "Using 'ConsoleOptions' without specifying the 'logLevel' property is deprecated and may no longer be supported from the next major version release on.";

/// Overall level of console output. Ordered, so `Debug` implies `Verbose`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Default = 0,
    Verbose = 1,
    Debug = 2,
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(input: &str) -> Result<LogLevel, Self::Err> {
        match input {
            "default" => Ok(Self::Default),
            "verbose" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            other => Err(Error::UnknownLogLevel(other.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Verbose => write!(f, "verbose"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

/// Loosely specified options, e.g. deserialized from a JSON blob. Every field
/// is optional, see [`Verbosity::validate`] for the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleOptions {
    pub log_level: Option<LogLevel>,
    pub verbose: Option<bool>,
    pub debug: Option<bool>,
}

impl ConsoleOptions {
    pub fn with_log_level(log_level: LogLevel) -> Self {
        Self { log_level: Some(log_level), ..Self::default() }
    }
}

/// Canonical verbosity descriptor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verbosity {
    pub log_level: LogLevel,
    pub verbose: bool,
    pub debug: bool,
}

impl Verbosity {
    /// Normalizes `options` into a descriptor. `warn` receives the deprecation
    /// notice when options are given without a log level.
    pub fn validate<W: FnOnce(&str)>(options: Option<&ConsoleOptions>, warn: W) -> Verbosity {
        let options = match options {
            Some(options) => options,
            None => return Verbosity::default(),
        };

        let log_level = match options.log_level {
            Some(log_level) => log_level,
            None => {
                warn(MISSING_LOG_LEVEL_WARNING);
                LogLevel::Default
            }
        };

        let mut result = Verbosity {
            log_level,
            verbose: options.verbose.unwrap_or(false),
            debug: options.debug.unwrap_or(false),
        };

        if log_level >= LogLevel::Verbose {
            result.verbose = true;
        }
        if log_level >= LogLevel::Debug {
            result.debug = true;
        }

        result
    }
}

impl From<Verbosity> for ConsoleOptions {
    fn from(v: Verbosity) -> Self {
        Self { log_level: Some(v.log_level), verbose: Some(v.verbose), debug: Some(v.debug) }
    }
}
