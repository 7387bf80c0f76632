//! Provides parsing of command line arguments and runs the requested command
//! against a console

use btools::{
    env::DEBUG_SWITCH,
    models::{ConsoleOptions, LogLevel, Platform, Severity},
    strings::to_literal,
    Console,
};

use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches, Command};

pub struct CLI {
    matches: ArgMatches,
}

impl CLI {
    pub fn init() -> Result<CLI> {
        let matches = get_cli_definition().get_matches();
        let cli = CLI { matches };

        Ok(cli)
    }

    pub fn run(&self, console: &mut Console) -> Result<()> {
        console.init_named(self.get_platform());

        match self.matches.subcommand() {
            Some(("log", sub)) => self.log(console, sub),
            Some(("resolve-path", sub)) => self.resolve_path(console, sub),
            Some(("properties", _)) => {
                let listed = console.listed_properties();
                console.print(&serde_json::to_string_pretty(&listed)?);
                Ok(())
            },
            Some(("literal", sub)) => {
                let text = sub.get_one::<String>("text").map(String::as_str).unwrap_or("");
                console.print(&to_literal(text));
                Ok(())
            },
            _ => Err(anyhow!("No command given, see --help")),
        }
    }

    fn get_platform(&self) -> Option<&str> {
        self.matches.get_one::<String>("platform").map(String::as_str)
    }

    fn log(&self, console: &mut Console, sub: &ArgMatches) -> Result<()> {
        let severity = sub
            .get_one::<String>("severity")
            .ok_or_else(|| anyhow!("No severity given"))?
            .parse::<Severity>()?;
        let options = get_console_options(sub)?;

        if sub.get_flag("npm") {
            console.push_npm(options.as_ref());
        } else {
            console.push_options(options.as_ref());
        }

        if let Some(texts) = sub.get_many::<String>("text") {
            for text in texts {
                console.emit(severity, text);
            }
        }

        if sub.get_flag("npm") {
            console.pop_npm();
        } else {
            console.pop_options();
        }
        Ok(())
    }

    fn resolve_path(&self, console: &mut Console, sub: &ArgMatches) -> Result<()> {
        let basename = sub
            .get_one::<String>("basename")
            .ok_or_else(|| anyhow!("No file name given"))?;
        let limit = sub.get_one::<usize>("limit").copied().unwrap_or(1);

        let found = console.resolve_path(basename, limit, sub.get_one::<String>("as").map(String::as_str));
        if found.is_empty() {
            return Err(anyhow!("'{}' could not be found in PATH", basename));
        }

        for path in found {
            console.print(&path.display().to_string());
        }
        Ok(())
    }
}

fn get_console_options(sub: &ArgMatches) -> Result<Option<ConsoleOptions>> {
    let debug = sub.get_flag("debug");
    let verbose = sub.get_flag("verbose");
    let json = sub.get_one::<String>("options");

    if (debug as usize + verbose as usize + json.is_some() as usize) > 1 {
        return Err(anyhow!(
            "Only one of --debug, --verbose, or --options can be used at a time"
        ));
    }

    if debug {
        Ok(Some(ConsoleOptions::with_log_level(LogLevel::Debug)))
    } else if verbose {
        Ok(Some(ConsoleOptions::with_log_level(LogLevel::Verbose)))
    } else if let Some(json) = json {
        let options = serde_json::from_str(json)
            .with_context(|| format!("Invalid console options: {}", json))?;
        Ok(Some(options))
    } else {
        Ok(None)
    }
}

fn get_cli_definition() -> Command {
    Command::new("btools")
        .version("0.1")
        .about("Console helpers for npm lifecycle scripts")
        .arg(
            Arg::new("platform")
                .help("The platform output should look like, detected when omitted")
                .long("platform")
                .global(true)
                .value_parser(Platform::SUPPORTED)
                .num_args(1),
        )
        .arg(
            Arg::new("vscode_debug")
                .help("Enable debug mode, same as step debugging in CI")
                .long(DEBUG_SWITCH.trim_start_matches('-'))
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("log")
                .about("Writes text through one of the severities")
                .arg(
                    Arg::new("severity")
                        .help("The severity to log with")
                        .required(true)
                        .value_parser(["debug", "info", "warn", "error"])
                        .index(1),
                )
                .arg(
                    Arg::new("text")
                        .help("Text to log, one line per value")
                        .required(true)
                        .num_args(1..)
                        .index(2),
                )
                .arg(
                    Arg::new("verbose")
                        .help("Enable verbose output")
                        .action(clap::ArgAction::SetTrue)
                        .short('v')
                        .long("verbose"),
                )
                .arg(
                    Arg::new("debug")
                        .help("Enable debug output")
                        .action(clap::ArgAction::SetTrue)
                        .short('d')
                        .long("debug"),
                )
                .arg(
                    Arg::new("options")
                        .help("Console options as JSON, e.g. {\"logLevel\":\"verbose\"}")
                        .long("options")
                        .value_name("JSON")
                        .num_args(1),
                )
                .arg(
                    Arg::new("npm")
                        .help("Format like npm's own output")
                        .action(clap::ArgAction::SetTrue)
                        .long("npm"),
                ),
        )
        .subcommand(
            Command::new("resolve-path")
                .about("Searches PATH for an executable")
                .arg(
                    Arg::new("basename")
                        .help("The file name to look for")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("limit")
                        .help("Maximum number of results, 0 for all")
                        .long("limit")
                        .short('l')
                        .value_parser(clap::value_parser!(usize))
                        .num_args(1),
                )
                .arg(
                    Arg::new("as")
                        .help("Search like on this OS platform, e.g. win32")
                        .long("as")
                        .value_name("PLATFORM")
                        .num_args(1),
                ),
        )
        .subcommand(
            Command::new("properties")
                .about("Prints the console's read-only properties as JSON"),
        )
        .subcommand(
            Command::new("literal")
                .about("Prints text with every character escaped")
                .arg(Arg::new("text").help("The text to escape").required(true).index(1)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(args: &[&str]) -> ArgMatches {
        let matches = get_cli_definition().try_get_matches_from(args).unwrap();
        matches.subcommand_matches("log").unwrap().clone()
    }

    #[test]
    fn test_console_options() {
        let options = get_console_options(&sub(&["btools", "log", "info", "x", "-v"])).unwrap();
        assert_eq!(options, Some(ConsoleOptions::with_log_level(LogLevel::Verbose)));

        let options = get_console_options(&sub(&["btools", "log", "info", "x"])).unwrap();
        assert_eq!(options, None);

        let options = get_console_options(&sub(&["btools", "log", "info", "x", "--options", r#"{"debug":true}"#])).unwrap();
        assert_eq!(options, Some(ConsoleOptions { debug: Some(true), ..ConsoleOptions::default() }));
    }

    #[test]
    fn test_exclusive_verbosity() {
        assert!(get_console_options(&sub(&["btools", "log", "info", "x", "-v", "-d"])).is_err());
        assert!(get_console_options(&sub(&["btools", "log", "info", "x", "--options", "{"])).is_err());
    }

    #[test]
    fn test_accepts_debug_switch() {
        let matches = get_cli_definition()
            .try_get_matches_from(["btools", "--vscode-debug", "--platform", "github", "properties"])
            .unwrap();
        assert!(matches.get_flag("vscode_debug"));
        assert_eq!(matches.get_one::<String>("platform").map(String::as_str), Some("github"));
    }
}
