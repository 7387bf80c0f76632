//! Severity dispatch. Pushing prefixes rebinds the handler of each severity
//! named; the logging facade consults whatever is bound at call time.
use std::collections::BTreeMap;

use tracing::{event, Level};

use super::Console;
use crate::models::{Severity, Stream};

/// Marks line continuation. At the end of a text the line is left open (a
/// single space instead of a line break); at the start the text continues an
/// open line and gets no prefixes.
pub const CONTINUE: char = '\u{8}';

#[cfg(windows)]
pub const EOL: &str = "\r\n";
#[cfg(not(windows))]
pub const EOL: &str = "\n";

/// Prefix per severity. `None` mutes the severity.
pub type Prefixes = BTreeMap<Severity, Option<String>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Handler {
    Muted,
    Prefixed(String),
}

impl Console {
    /// Binds a handler for every severity in `prefixes`. Debug output stays
    /// muted unless the environment is in debug mode.
    pub fn push_prefixes(&mut self, prefixes: Prefixes) {
        let debug_mode = self.env.debug_mode();
        let handlers = prefixes
            .into_iter()
            .map(|(severity, prefix)| {
                let handler = match prefix {
                    Some(_) if severity == Severity::Debug && !debug_mode => Handler::Muted,
                    Some(prefix) => Handler::Prefixed(prefix),
                    None => Handler::Muted,
                };
                (severity, handler)
            })
            .collect();
        self.handlers.push(handlers);
    }

    pub fn pop_prefixes(&mut self) -> bool {
        self.handlers.pop()
    }

    /// The bound handler, `None` while the severity behaves natively
    pub fn handler(&self, severity: Severity) -> Option<&Handler> {
        self.handlers.get(&severity)
    }

    pub fn emit(&mut self, severity: Severity, text: &str) {
        if let Some((stream, line)) = self.render(severity, text) {
            self.write(stream, &line);
        }
    }

    /// What a call to `severity` with `text` writes, and where
    fn render(&self, severity: Severity, text: &str) -> Option<(Stream, String)> {
        let prefix = match self.handler(severity) {
            None => return Some((severity.native_stream(), format!("{}\n", text))),
            Some(Handler::Muted) => {
                event!(Level::TRACE, "Muted {} output", severity);
                return None;
            },
            Some(Handler::Prefixed(prefix)) => prefix,
        };

        let (text, eol) = match text.strip_suffix(CONTINUE) {
            Some(text) => (text, " "),
            None => (text, EOL),
        };

        let line = match text.strip_prefix(CONTINUE) {
            Some(rest) => format!("{}{}", self.styled(severity.name(), rest), eol),
            None => format!(
                "{}{}{}{}",
                self.system_prefix(severity),
                prefix,
                self.styled(severity.name(), text),
                eol
            ),
        };

        Some((severity.stream(), line))
    }
}
