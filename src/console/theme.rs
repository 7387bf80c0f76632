use std::collections::BTreeMap;

use super::Console;
use crate::error::Result;
use crate::models::Style;

/// Style names bound to styles. Besides the severity names, themes commonly
/// bind "silly", "input", "verbose", "prompt", "data" and "help".
pub type Theme = BTreeMap<String, Style>;

/// Builds a theme from style names, e.g. `[("error", "red")]`
pub fn parse_theme<'a, I>(entries: I) -> Result<Theme>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    entries
        .into_iter()
        .map(|(key, style)| Ok((key.to_string(), style.parse::<Style>()?)))
        .collect()
}

impl Console {
    pub fn push_theme(&mut self, theme: Theme) {
        self.themes.push(theme);
    }

    /// Returns false when there was no theme left to pop
    pub fn pop_theme(&mut self) -> bool {
        self.themes.pop()
    }

    pub fn theme(&self) -> &Theme {
        self.themes.active()
    }

    pub fn style(&self, key: &str) -> Option<Style> {
        self.themes.get(&key.to_string()).copied()
    }

    /// Applies the style bound to `key`, if there is one
    pub fn styled(&self, key: &str, text: &str) -> String {
        match self.style(key) {
            Some(style) => style.apply(text),
            None => text.to_string(),
        }
    }
}
