use std::collections::BTreeMap;

use super::Console;
use crate::models::Severity;
use crate::parser::strip_ansi;

/// Annotation written ahead of a severity's prefix, e.g. "::warning::"
pub type SystemPrefixes = BTreeMap<Severity, String>;

impl Console {
    pub fn push_system_prefixes(&mut self, prefixes: SystemPrefixes) {
        self.system_prefixes.push(prefixes);
    }

    pub fn pop_system_prefixes(&mut self) -> bool {
        self.system_prefixes.pop()
    }

    pub fn system_prefixes(&self) -> &SystemPrefixes {
        self.system_prefixes.active()
    }

    /// The active annotation for `severity`, empty when none is bound
    pub fn system_prefix(&self, severity: Severity) -> &str {
        self.system_prefixes.get(&severity).map(String::as_str).unwrap_or("")
    }

    /// Reduces an output line to what a reader sees: no system prefix, no
    /// styling.
    pub fn plain(&self, severity: Severity, text: &str) -> String {
        let prefix = self.system_prefix(severity);
        let text = if prefix.is_empty() {
            text
        } else {
            text.strip_prefix(prefix).unwrap_or(text)
        };
        strip_ansi(text)
    }
}
