//! Console platforms a profile can be initialized for
use std::str::FromStr;
use std::fmt;

use serde::Serialize;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// GitHub Actions workflow commands
    Github,
    /// Azure DevOps logging commands
    Devops,
    /// Windows console, PowerShell-like labels
    Win32,
    /// Plain colored terminal output
    Other,
}

impl Platform {
    pub const SUPPORTED: [&'static str; 4] = ["github", "devops", "win32", "other"];

    /// Maps a node-style OS platform string (or a detected CI name) to a
    /// platform. Anything unrecognized is a plain terminal.
    pub fn from_detected(name: &str) -> Self {
        name.parse().unwrap_or(Self::Other)
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(input: &str) -> Result<Platform, Self::Err> {
        match input {
            "github" => Ok(Self::Github),
            "devops" => Ok(Self::Devops),
            "win32" => Ok(Self::Win32),
            "other" => Ok(Self::Other),
            other => Err(Error::UnknownPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Github => write!(f, "github"),
            Self::Devops => write!(f, "devops"),
            Self::Win32 => write!(f, "win32"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_detected() {
        assert_eq!(Platform::from_detected("github"), Platform::Github);
        assert_eq!(Platform::from_detected("win32"), Platform::Win32);
        assert_eq!(Platform::from_detected("linux"), Platform::Other);
        assert_eq!(Platform::from_detected("darwin"), Platform::Other);
    }

    #[test]
    fn test_supported_round_trip_names() {
        for name in Platform::SUPPORTED {
            assert_eq!(name.parse::<Platform>().unwrap().to_string(), name);
        }
    }
}
