//! Named text styles a theme binds to its keys
use std::str::FromStr;

use colored::{Color, Colorize};

use crate::error::Error;
use crate::parser::strip_ansi;

const RAINBOW: [Color; 6] = [Color::Red, Color::Yellow, Color::Green, Color::Blue, Color::Magenta, Color::Cyan];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Removes any styling already present in the text
    Strip,
    /// Leaves the text as it is
    Reset,
    Rainbow,
    Bold,
    Dim,
    Italic,
    Underline,
    Color(Color),
}

impl Style {
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Strip => strip_ansi(text),
            Self::Reset => text.clear().to_string(),
            Self::Bold => text.bold().to_string(),
            Self::Dim => text.dimmed().to_string(),
            Self::Italic => text.italic().to_string(),
            Self::Underline => text.underline().to_string(),
            Self::Color(color) => text.color(*color).to_string(),
            Self::Rainbow => rainbow(text),
        }
    }
}

fn rainbow(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut colors = RAINBOW.iter().cycle();
    for c in text.chars() {
        if c.is_whitespace() {
            out.push(c);
        } else if let Some(color) = colors.next() {
            out.push_str(&c.to_string().color(*color).to_string());
        }
    }
    out
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(input: &str) -> Result<Style, Self::Err> {
        let style = match input {
            "strip" | "stripColors" => Self::Strip,
            "reset" => Self::Reset,
            "rainbow" => Self::Rainbow,
            "bold" => Self::Bold,
            "dim" => Self::Dim,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "black" => Self::Color(Color::Black),
            "red" => Self::Color(Color::Red),
            "green" => Self::Color(Color::Green),
            "yellow" => Self::Color(Color::Yellow),
            "blue" => Self::Color(Color::Blue),
            "magenta" => Self::Color(Color::Magenta),
            "cyan" => Self::Color(Color::Cyan),
            "white" => Self::Color(Color::White),
            "grey" | "gray" | "brightBlack" => Self::Color(Color::BrightBlack),
            "brightRed" => Self::Color(Color::BrightRed),
            "brightGreen" => Self::Color(Color::BrightGreen),
            "brightYellow" => Self::Color(Color::BrightYellow),
            "brightBlue" => Self::Color(Color::BrightBlue),
            "brightMagenta" => Self::Color(Color::BrightMagenta),
            "brightCyan" => Self::Color(Color::BrightCyan),
            "brightWhite" => Self::Color(Color::BrightWhite),
            other => return Err(Error::UnknownStyle(other.to_string())),
        };
        Ok(style)
    }
}
