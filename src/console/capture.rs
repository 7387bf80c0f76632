//! Capture sessions collect everything written through a console into
//! memory, e.g. so tests can assert on exact output.
use std::ops::{Deref, DerefMut};

use itertools::Itertools;
use tracing::{event, Level};

use super::Console;
use crate::error::{Error, Result};
use crate::models::Stream;

/// Buffers are cleared on start and stay readable after stop, until the
/// next start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureSession {
    active: bool,
    stdout: Vec<String>,
    stderr: Vec<String>,
}

impl CaptureSession {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stdout(&self) -> &[String] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[String] {
        &self.stderr
    }

    fn start(&mut self) -> Result<()> {
        if self.active {
            return Err(Error::CaptureAlreadyStarted);
        }
        self.stdout.clear();
        self.stderr.clear();
        self.active = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if !self.active {
            return Err(Error::CaptureNotStarted);
        }
        self.active = false;
        Ok(())
    }

    pub(super) fn record(&mut self, stream: Stream, text: &str) {
        if text.is_empty() {
            return;
        }
        match stream {
            Stream::Stdout => self.stdout.push(text.to_string()),
            Stream::Stderr => self.stderr.push(text.to_string()),
        }
    }
}

impl Console {
    /// Starts intercepting writes. In debug mode they still reach the real
    /// streams as well.
    pub fn capture_start(&mut self) -> Result<()> {
        self.capture.start()?;
        event!(Level::DEBUG, "Console capture started");
        Ok(())
    }

    /// Stops intercepting writes. With `emit`, everything captured is
    /// flushed to the real streams.
    pub fn capture_stop(&mut self, emit: bool) -> Result<()> {
        self.capture.stop()?;
        event!(
            Level::DEBUG,
            "Console capture stopped with {} stdout and {} stderr entries",
            self.capture.stdout.len(),
            self.capture.stderr.len()
        );

        if emit {
            let stdout = self.capture.stdout.iter().join("");
            let stderr = self.capture.stderr.iter().join("");
            self.output.write(Stream::Stdout, &stdout);
            self.output.write(Stream::Stderr, &stderr);
        }
        Ok(())
    }

    /// Starts a capture session that stops when the guard is dropped
    pub fn capture(&mut self) -> Result<CaptureGuard<'_>> {
        self.capture_start()?;
        Ok(CaptureGuard { console: self })
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_active()
    }

    pub fn captured_stdout(&self) -> &[String] {
        self.capture.stdout()
    }

    pub fn captured_stderr(&self) -> &[String] {
        self.capture.stderr()
    }
}

pub struct CaptureGuard<'a> {
    console: &'a mut Console,
}

impl CaptureGuard<'_> {
    /// Stops the session now, optionally flushing what was captured
    pub fn finish(self, emit: bool) -> Result<()> {
        self.console.capture_stop(emit)
    }
}

impl Deref for CaptureGuard<'_> {
    type Target = Console;

    fn deref(&self) -> &Console {
        self.console
    }
}

impl DerefMut for CaptureGuard<'_> {
    fn deref_mut(&mut self) -> &mut Console {
        self.console
    }
}

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        if self.console.is_capturing() {
            if let Err(e) = self.console.capture_stop(false) {
                event!(Level::WARN, "Failed to stop console capture: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::*;
    use crate::console::{Prefixes, EOL};
    use crate::models::Severity;

    fn baseline() -> Prefixes {
        Severity::ALL.iter().map(|s| (*s, Some(String::new()))).collect()
    }

    #[test]
    fn test_start_twice_fails() {
        let (mut console, _, _) = console(plain_env());
        console.capture_start().unwrap();
        assert_eq!(console.capture_start(), Err(Error::CaptureAlreadyStarted));
        assert_eq!(
            console.capture_start().unwrap_err().to_string(),
            "Console capture has already been started."
        );
    }

    #[test]
    fn test_stop_without_start_fails() {
        let (mut console, _, _) = console(plain_env());
        assert_eq!(console.capture_stop(false), Err(Error::CaptureNotStarted));

        console.capture_start().unwrap();
        console.capture_stop(false).unwrap();
        assert_eq!(console.capture_stop(false), Err(Error::CaptureNotStarted));
    }

    #[test]
    fn test_captures_one_line() {
        let (mut console, out, err) = console(plain_env());
        console.push_prefixes(baseline());

        console.capture_start().unwrap();
        console.info("captured");
        console.capture_stop(false).unwrap();

        assert_eq!(console.captured_stdout(), &[format!("captured{}", EOL)]);
        assert!(console.captured_stderr().is_empty());
        assert_eq!(out.contents(), "");
        assert_eq!(err.contents(), "");
    }

    #[test]
    fn test_separates_streams() {
        let (mut console, _, _) = console(plain_env());
        console.push_prefixes(baseline());

        console.capture_start().unwrap();
        console.warn("w");
        console.error("e");
        console.write(Stream::Stdout, "");
        console.capture_stop(false).unwrap();

        assert_eq!(console.captured_stdout(), &[format!("w{}", EOL)]);
        assert_eq!(console.captured_stderr(), &[format!("e{}", EOL)]);
    }

    #[test]
    fn test_buffers_survive_stop_until_next_start() {
        let (mut console, _, _) = console(plain_env());
        console.capture_start().unwrap();
        console.print("first");
        console.capture_stop(false).unwrap();

        console.print("uncaptured");
        assert_eq!(console.captured_stdout(), &["first\n".to_string()]);

        console.capture_start().unwrap();
        assert!(console.captured_stdout().is_empty());
        console.capture_stop(false).unwrap();
    }

    #[test]
    fn test_emit_on_stop() {
        let (mut console, out, err) = console(plain_env());
        console.capture_start().unwrap();
        console.print("a");
        console.print("b");
        console.error("c");
        console.capture_stop(true).unwrap();

        assert_eq!(out.contents(), "a\nb\n");
        assert_eq!(err.contents(), "c\n");
    }

    #[test]
    fn test_debug_mode_passes_through() {
        let (mut console, out, _) = console(debug_env());
        console.capture_start().unwrap();
        console.print("live");
        console.capture_stop(false).unwrap();

        assert_eq!(out.contents(), "live\n");
        assert_eq!(console.captured_stdout(), &["live\n".to_string()]);
    }

    #[test]
    fn test_guard_stops_on_drop() {
        let (mut console, _, _) = console(plain_env());
        {
            let mut capture = console.capture().unwrap();
            capture.print("inside");
            assert!(capture.is_capturing());
        }
        assert!(!console.is_capturing());
        assert_eq!(console.captured_stdout(), &["inside\n".to_string()]);

        let capture = console.capture().unwrap();
        capture.finish(false).unwrap();
        assert!(!console.is_capturing());
    }
}
