//! Parsers for the text formats the console has to look inside of. For now
//! that is styled terminal output.

mod common;
mod ansi;

use tracing::{event, Level};

pub use ansi::Segment;

/// Removes all ANSI escape sequences from `input`
pub fn strip_ansi(input: &str) -> String {
    match ansi::segments(input) {
        Ok((rest, segments)) => {
            let mut out: String = segments
                .into_iter()
                .filter_map(|segment| match segment {
                    Segment::Text(text) => Some(text),
                    Segment::Escape(_) => None,
                })
                .collect();
            out.push_str(rest);
            out
        },
        Err(e) => {
            event!(Level::DEBUG, "Failed to parse styled text {:?}: {}", input, e);
            input.to_string()
        }
    }
}
