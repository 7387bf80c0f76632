//! Profiles combine a theme, system prefixes and prefixes, and are pushed and
//! popped as one unit. Platform profiles mimic what a CI system expects in
//! its logs.
use std::ops::{Deref, DerefMut};

use colored::{Color, Colorize};
use tracing::{event, instrument, Level};

use super::{Console, Prefixes, SystemPrefixes, Theme};
use crate::models::{ConsoleOptions, Platform, Severity, Style, Verbosity};

impl Console {
    /// Validates `options`, reporting deprecated usage through `warn`
    pub fn validate(&mut self, options: Option<&ConsoleOptions>) -> Verbosity {
        Verbosity::validate(options, |msg| self.warn(msg))
    }

    /// Mutes info unless verbose and debug unless debug, leaving theme and
    /// system prefixes as they are. Returns the validated options.
    #[instrument(skip(self))]
    pub fn push_options(&mut self, options: Option<&ConsoleOptions>) -> Verbosity {
        let verbosity = self.validate(options);

        let mut prefixes = Prefixes::new();
        if !verbosity.verbose {
            prefixes.insert(Severity::Info, None);
        }
        if !verbosity.debug {
            prefixes.insert(Severity::Debug, None);
        }

        self.push_theme(Theme::new());
        self.push_system_prefixes(SystemPrefixes::new());
        self.push_prefixes(prefixes);

        verbosity
    }

    pub fn pop_options(&mut self) {
        self.pop_prefixes();
        self.pop_system_prefixes();
        self.pop_theme();
    }

    /// Pushes options for as long as the returned guard lives
    pub fn scoped_options(&mut self, options: Option<&ConsoleOptions>) -> ProfileGuard<'_> {
        let verbosity = self.push_options(options);
        ProfileGuard { console: self, verbosity }
    }

    /// Output in the style of npm itself: "npm WARN ...", "npm ERR! ..."
    #[instrument(skip(self))]
    pub fn push_npm(&mut self, options: Option<&ConsoleOptions>) -> Verbosity {
        let verbosity = self.validate(options);

        let theme: Theme = Severity::ALL.iter().map(|s| (s.name().to_string(), Style::Reset)).collect();

        let system = if self.env.running_in_github() {
            SystemPrefixes::new()
        } else {
            Severity::ALL.iter().map(|s| (*s, String::new())).collect()
        };

        let mut prefixes = Prefixes::new();
        prefixes.insert(Severity::Info, verbosity.verbose.then(|| format!("npm {} ", "notice".blue())));
        prefixes.insert(Severity::Debug, verbosity.debug.then(|| format!("npm {} ", "debug".yellow())));
        prefixes.insert(Severity::Warn, Some(format!("npm {} ", "WARN".black().on_yellow())));
        prefixes.insert(Severity::Error, Some(format!("npm {} ", "ERR!".red())));

        self.push_theme(theme);
        self.push_system_prefixes(system);
        self.push_prefixes(prefixes);

        verbosity
    }

    pub fn pop_npm(&mut self) {
        self.pop_options()
    }

    /// Resets, then sets up the profile for `platform`, or for the detected
    /// platform when none is given.
    pub fn init(&mut self, platform: Option<Platform>) {
        self.reset();

        let platform = platform.unwrap_or_else(|| self.env.detected_platform());
        event!(Level::DEBUG, "Initializing console for platform {}", platform);

        match platform {
            Platform::Github => {
                self.push_theme(ci_theme());
                self.push_system_prefixes(system_prefixes(["::debug::", "", "::warning::", "::error::"]));
            },
            Platform::Devops => {
                self.push_theme(ci_theme());
                self.push_system_prefixes(system_prefixes([
                    "##vso[task.debug]",
                    "",
                    "##vso[task.logissue type=warning]",
                    "##vso[task.logissue type=error]",
                ]));
            },
            Platform::Win32 => {
                self.push_theme(win32_theme());
                let labels = ["DEBUG: ", "VERBOSE: ", "WARNING: ", "ERROR: "];
                let styled: SystemPrefixes = Severity::ALL
                    .iter()
                    .zip(labels)
                    .map(|(s, label)| (*s, self.styled(s.name(), label)))
                    .collect();
                self.push_system_prefixes(styled);
            },
            Platform::Other => {
                self.push_theme(terminal_theme());
                self.push_system_prefixes(system_prefixes(["", "", "", ""]));
            },
        }

        self.push_prefixes(Severity::ALL.iter().map(|s| (*s, Some(String::new()))).collect());
    }

    /// Like [`Console::init`], taking a platform name. Names that aren't
    /// supported fall back to detection.
    pub fn init_named(&mut self, name: Option<&str>) {
        let platform = name.and_then(|n| match n.parse::<Platform>() {
            Ok(platform) => Some(platform),
            Err(e) => {
                event!(Level::DEBUG, "{}, detecting platform instead", e);
                None
            }
        });
        self.init(platform)
    }

    /// Pops every stack until it is empty
    pub fn reset(&mut self) {
        self.system_prefixes.unwind();
        self.handlers.unwind();
        self.themes.unwind();
    }
}

/// Ordered debug, info, warn, error
fn system_prefixes(prefixes: [&str; 4]) -> SystemPrefixes {
    Severity::ALL.iter().zip(prefixes).map(|(s, p)| (*s, p.to_string())).collect()
}

fn theme(entries: &[(&str, Style)]) -> Theme {
    entries.iter().map(|(key, style)| (key.to_string(), *style)).collect()
}

/// CI logs render annotations themselves, so severities are left unstyled
fn ci_theme() -> Theme {
    theme(&[
        ("silly", Style::Rainbow),
        ("input", Style::Color(Color::BrightBlack)),
        ("verbose", Style::Strip),
        ("prompt", Style::Color(Color::BrightBlack)),
        ("info", Style::Strip),
        ("data", Style::Color(Color::BrightBlack)),
        ("help", Style::Color(Color::Cyan)),
        ("warn", Style::Strip),
        ("debug", Style::Strip),
        ("error", Style::Strip),
    ])
}

fn win32_theme() -> Theme {
    theme(&[
        ("silly", Style::Rainbow),
        ("input", Style::Color(Color::BrightBlack)),
        ("verbose", Style::Color(Color::BrightCyan)),
        ("prompt", Style::Color(Color::BrightBlack)),
        ("info", Style::Color(Color::Cyan)),
        ("data", Style::Color(Color::BrightBlack)),
        ("help", Style::Color(Color::Cyan)),
        ("warn", Style::Color(Color::Yellow)),
        ("debug", Style::Color(Color::BrightCyan)),
        ("error", Style::Color(Color::Red)),
    ])
}

fn terminal_theme() -> Theme {
    theme(&[
        ("silly", Style::Rainbow),
        ("input", Style::Color(Color::BrightBlack)),
        ("verbose", Style::Color(Color::Cyan)),
        ("prompt", Style::Color(Color::BrightBlack)),
        ("info", Style::Color(Color::Green)),
        ("data", Style::Color(Color::BrightBlack)),
        ("help", Style::Color(Color::Cyan)),
        ("warn", Style::Color(Color::Yellow)),
        ("debug", Style::Color(Color::Blue)),
        ("error", Style::Color(Color::Red)),
    ])
}

/// Keeps a pushed profile for its lifetime, popping it on drop
pub struct ProfileGuard<'a> {
    console: &'a mut Console,
    verbosity: Verbosity,
}

impl ProfileGuard<'_> {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl Deref for ProfileGuard<'_> {
    type Target = Console;

    fn deref(&self) -> &Console {
        self.console
    }
}

impl DerefMut for ProfileGuard<'_> {
    fn deref_mut(&mut self) -> &mut Console {
        self.console
    }
}

impl Drop for ProfileGuard<'_> {
    fn drop(&mut self) {
        self.console.pop_options();
    }
}
