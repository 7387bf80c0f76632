//! The process environment as seen by the console: which CI system we run
//! under, whether debug output was requested, and what the terminal can do.
use std::collections::BTreeMap;
use std::io::IsTerminal;

use tracing::{event, Level};

use crate::models::Platform;

/// Command line switch that turns on debug mode
pub const DEBUG_SWITCH: &str = "--vscode-debug";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
    args: Vec<String>,
    stdin_is_terminal: bool,
    os_platform: String,
}

impl Environment {
    pub fn new<V, K, S, A, T>(vars: V, args: A, stdin_is_terminal: bool, os_platform: &str) -> Self
    where
        V: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
        A: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            args: args.into_iter().map(Into::into).collect(),
            stdin_is_terminal,
            os_platform: os_platform.to_string(),
        }
    }

    /// An environment with the given variables, no arguments and no terminal
    pub fn with_vars<V, K, S>(vars: V, os_platform: &str) -> Self
    where
        V: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        Self::new(vars, Vec::<String>::new(), false, os_platform)
    }

    pub fn from_process() -> Self {
        let env = Self::new(
            std::env::vars(),
            std::env::args(),
            std::io::stdin().is_terminal(),
            node_platform(),
        );
        event!(
            Level::DEBUG,
            "Process environment: github={}, devops={}, debug={}, platform={}",
            env.running_in_github(),
            env.running_in_devops(),
            env.debug_mode(),
            env.os_platform
        );
        env
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    pub fn running_in_github(&self) -> bool {
        self.vars.contains_key("GITHUB_WORKFLOW")
    }

    pub fn running_in_devops(&self) -> bool {
        self.vars.contains_key("AGENT_ID")
    }

    /// Step debugging in GitHub Actions or Azure DevOps, or the debug switch
    pub fn debug_mode(&self) -> bool {
        self.flag_is_true("ACTIONS_STEP_DEBUG")
            || self.flag_is_true("SYSTEM_DEBUG")
            || self.args.iter().any(|arg| arg == DEBUG_SWITCH)
    }

    pub fn stdin_is_terminal(&self) -> bool {
        self.stdin_is_terminal
    }

    pub fn os_platform(&self) -> &str {
        &self.os_platform
    }

    /// CI system name when running under one, the OS platform otherwise
    pub fn console_platform(&self) -> String {
        if self.running_in_github() {
            "github".to_string()
        } else if self.running_in_devops() {
            "devops".to_string()
        } else {
            self.os_platform.clone()
        }
    }

    pub fn detected_platform(&self) -> Platform {
        Platform::from_detected(&self.console_platform())
    }

    fn flag_is_true(&self, name: &str) -> bool {
        self.var(name).map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
    }
}

/// OS name in the spelling build scripts expect ("darwin", "win32", ...)
pub fn node_platform() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}
