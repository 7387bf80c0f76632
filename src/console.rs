//! The console virtualizes the four severity logging methods. Its behavior is
//! driven by three layered stacks:
//!
//! - themes: style names bound to text styles
//! - system prefixes: CI annotations per severity, e.g. "::error::"
//! - prefixes: the handler each severity dispatches to, muted or prefixed
//!
//! Profiles push onto all three at once and pop them again in reverse. All
//! writes go through a single choke point so a capture session can collect
//! them into memory instead of letting them reach the terminal.

mod stack;
mod output;
mod theme;
mod system_prefix;
mod prefix;
mod capture;
mod properties;
mod profile;

pub use output::{Output, SharedBuffer, Sink};
pub use theme::{Theme, parse_theme};
pub use system_prefix::SystemPrefixes;
pub use prefix::{Handler, Prefixes, CONTINUE, EOL};
pub use capture::{CaptureSession, CaptureGuard};
pub use properties::{Getter, ReadOnlyRegistry};
pub use profile::ProfileGuard;

use std::fmt;

use crate::env::Environment;
use crate::models::{Severity, Stream, Style};

use stack::LayeredMap;

pub struct Console {
    env: Environment,
    output: Output,
    themes: LayeredMap<String, Style>,
    system_prefixes: LayeredMap<Severity, String>,
    handlers: LayeredMap<Severity, Handler>,
    capture: CaptureSession,
    properties: ReadOnlyRegistry,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Console {{ themes: {}, system_prefixes: {}, prefixes: {}, capturing: {} }}",
            self.themes.depth(),
            self.system_prefixes.depth(),
            self.handlers.depth(),
            self.capture.is_active()
        )
    }
}

impl Console {
    /// An unconfigured console writing to the process streams. Until a
    /// profile is pushed every severity behaves natively.
    pub fn new(env: Environment) -> Self {
        Self::with_output(env, Output::process())
    }

    pub fn with_output(env: Environment, output: Output) -> Self {
        let mut console = Self {
            env,
            output,
            themes: LayeredMap::new("theme"),
            system_prefixes: LayeredMap::new("system prefix"),
            handlers: LayeredMap::new("prefix"),
            capture: CaptureSession::default(),
            properties: ReadOnlyRegistry::default(),
        };
        console.define_builtin_properties();
        console
    }

    /// A console for the current process, initialized for the detected
    /// platform
    pub fn from_process() -> Self {
        let mut console = Self::new(Environment::from_process());
        console.init(None);
        console
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn debug_mode(&self) -> bool {
        self.env.debug_mode()
    }

    /// Whether it is fine to wait for a key press: stdin is a terminal,
    /// nothing is being captured and no CI system is driving us.
    pub fn terminal_can_block(&self) -> bool {
        self.env.stdin_is_terminal()
            && !self.capture.is_active()
            && !self.env.running_in_github()
            && !self.env.running_in_devops()
    }

    /// Raw write to a stream. This is where capture sessions intercept.
    pub fn write(&mut self, stream: Stream, text: &str) {
        if self.capture.is_active() {
            self.capture.record(stream, text);
            if !self.env.debug_mode() {
                return;
            }
        }
        self.output.write(stream, text);
    }

    /// Plain line to stdout, never prefixed, styled or muted
    pub fn print(&mut self, text: &str) {
        self.write(Stream::Stdout, &format!("{}\n", text));
    }

    pub fn debug(&mut self, text: &str) {
        self.emit(Severity::Debug, text)
    }

    pub fn info(&mut self, text: &str) {
        self.emit(Severity::Info, text)
    }

    pub fn warn(&mut self, text: &str) {
        self.emit(Severity::Warn, text)
    }

    pub fn error(&mut self, text: &str) {
        self.emit(Severity::Error, text)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::testing::*;

    #[test]
    fn test_unconfigured_is_native() {
        let (mut console, out, err) = console(plain_env());

        console.debug("d");
        console.info("i");
        console.warn("w");
        console.error("e");
        console.print("p");

        assert_eq!(out.contents(), "d\ni\np\n");
        assert_eq!(err.contents(), "w\ne\n");
    }

    #[test]
    fn test_terminal_can_block() {
        let env = Environment::new(Vec::<(String, String)>::new(), Vec::<String>::new(), true, "linux");
        let (mut console, _, _) = console(env);
        assert!(console.terminal_can_block());

        console.capture_start().unwrap();
        assert!(!console.terminal_can_block());
        console.capture_stop(false).unwrap();
        assert!(console.terminal_can_block());

        let env = Environment::new([("GITHUB_WORKFLOW", "ci")], Vec::<String>::new(), true, "linux");
        let (console, _, _) = super::testing::console(env);
        assert!(!console.terminal_can_block());
    }
}
