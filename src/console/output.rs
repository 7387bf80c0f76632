//! The real output streams behind a console
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{event, Level};

use crate::models::Stream;

pub type Sink = Box<dyn Write + Send>;

pub struct Output {
    stdout: Sink,
    stderr: Sink,
}

impl Output {
    pub fn new(stdout: Sink, stderr: Sink) -> Self {
        Self { stdout, stderr }
    }

    /// The process' own stdout and stderr
    pub fn process() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Writes `text` as is. Failures are reported as tracing events only,
    /// a log call never fails.
    pub fn write(&mut self, stream: Stream, text: &str) {
        let sink = match stream {
            Stream::Stdout => &mut self.stdout,
            Stream::Stderr => &mut self.stderr,
        };

        let result = sink.write_all(text.as_bytes()).and_then(|_| sink.flush());
        if let Err(e) = result {
            event!(Level::WARN, "Failed to write to {}: {}", stream, e);
        }
    }
}

/// An in-memory sink that stays readable after being handed to a console
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn sink(&self) -> Sink {
        Box::new(self.clone())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_streams() {
        let out = SharedBuffer::new();
        let err = SharedBuffer::new();
        let mut output = Output::new(out.sink(), err.sink());

        output.write(Stream::Stdout, "one\n");
        output.write(Stream::Stderr, "two\n");
        output.write(Stream::Stdout, "three\n");

        assert_eq!(out.contents(), "one\nthree\n");
        assert_eq!(err.contents(), "two\n");
    }
}
