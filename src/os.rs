//! Locating executables and expanding environment references the way build
//! scripts on each platform would.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{event, Level};

use crate::console::Console;

/// References may expand to further references, but not forever
const MAX_PASSES: usize = 32;

fn is_win32(platform: &str) -> bool {
    platform.eq_ignore_ascii_case("win32")
}

/// Replaces `$NAME` (`%NAME%` on win32) with the value of `NAME`, longest
/// names first, until nothing is left to replace.
pub fn resolve_env(text: &str, vars: &BTreeMap<String, String>, platform: &str) -> String {
    let references: Vec<(String, &String)> = vars
        .iter()
        .sorted_by(|(a, _), (b, _)| b.len().cmp(&a.len()))
        .map(|(key, value)| {
            let reference = if is_win32(platform) { format!("%{}%", key) } else { format!("${}", key) };
            (reference, value)
        })
        .collect();

    let mut out = text.to_string();
    for _ in 0..MAX_PASSES {
        let mut replaced = false;
        for (reference, value) in references.iter() {
            if out.contains(reference.as_str()) {
                out = out.replace(reference.as_str(), value);
                replaced = true;
            }
        }
        if !replaced {
            break;
        }
    }
    out
}

impl Console {
    /// Searches `PATH` for `basename`, also probing every `PATHEXT`
    /// extension. On win32 the current directory is searched first and the
    /// bare name is probed last. A `limit` of 0 returns every match.
    pub fn resolve_path(&mut self, basename: &str, limit: usize, platform: Option<&str>) -> Vec<PathBuf> {
        let platform = platform.unwrap_or(self.env().os_platform()).to_string();
        search_path(self, basename, limit, &platform)
    }
}

fn search_path(console: &mut Console, basename: &str, limit: usize, platform: &str) -> Vec<PathBuf> {
    let win32 = is_win32(platform);
    let separator = if win32 { ';' } else { ':' };
    let vars = console.env().vars().clone();

    let mut extensions: Vec<String> = Vec::new();
    if !win32 {
        extensions.push(String::new());
    }
    match vars.get("PATHEXT") {
        Some(pathext) => {
            for ext in pathext.split(separator) {
                if !extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                    extensions.push(ext.to_lowercase());
                }
            }
        },
        None => console.debug("Environment variable PATHEXT isn't present."),
    }
    if win32 {
        extensions.push(String::new());
    }

    let mut dirs: Vec<String> = Vec::new();
    if win32 {
        if let Ok(cwd) = std::env::current_dir() {
            dirs.push(cwd.to_string_lossy().into_owned());
        }
    }
    match vars.get("PATH") {
        Some(path) => {
            for dir in path.split(separator).filter(|d| !d.is_empty()) {
                if !dirs.iter().any(|d| d.eq_ignore_ascii_case(dir)) {
                    dirs.push(dir.to_string());
                }
            }
        },
        None => console.debug("Environment variable PATH isn't present."),
    }

    let mut result: Vec<PathBuf> = Vec::new();
    'search: for dir in dirs.iter() {
        for ext in extensions.iter() {
            let candidate = format!("{}{}", Path::new(dir).join(basename).display(), ext);
            let candidate = PathBuf::from(resolve_env(&candidate, &vars, platform));
            if candidate.exists() && !result.contains(&candidate) {
                result.push(candidate);
                if limit > 0 && result.len() >= limit {
                    break 'search;
                }
            }
        }
    }

    event!(Level::DEBUG, "Resolved '{}' to {} path(s)", basename, result.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::*;
    use crate::env::Environment;
    use crate::models::Platform;
    use std::fs;

    fn vars(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_resolve_env() {
        let vars = vars(&[("HOME", "/home/me"), ("HOMEDIR", "/srv"), ("BIN", "$HOME/bin")]);

        assert_eq!(resolve_env("$HOMEDIR/x", &vars, "linux"), "/srv/x");
        assert_eq!(resolve_env("$BIN/tool", &vars, "linux"), "/home/me/bin/tool");
        assert_eq!(resolve_env("%HOME%\\x", &vars, "win32"), "/home/me\\x");
        assert_eq!(resolve_env("$NOPE", &vars, "linux"), "$NOPE");
    }

    #[test]
    fn test_resolve_env_self_reference_terminates() {
        let vars = vars(&[("LOOP", "$LOOP!")]);
        let resolved = resolve_env("$LOOP", &vars, "linux");
        assert!(resolved.ends_with("!"));
    }

    #[test]
    fn test_resolve_path() {
        let root = tempfile::tempdir().unwrap();
        let a = root.path().join("a");
        let b = root.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("tool"), "").unwrap();
        fs::write(b.join("tool"), "").unwrap();
        fs::write(b.join("tool.sh"), "").unwrap();

        let path = format!("{}:{}:{}", a.display(), b.display(), a.display());
        let env = Environment::with_vars([("PATH", path.as_str()), ("PATHEXT", ".SH")], "linux");
        let (mut console, _, _) = console(env);

        let all = console.resolve_path("tool", 0, None);
        assert_eq!(all, vec![a.join("tool"), b.join("tool"), b.join("tool.sh")]);

        let first = console.resolve_path("tool", 1, None);
        assert_eq!(first, vec![a.join("tool")]);

        assert!(console.resolve_path("missing", 0, None).is_empty());
    }

    #[test]
    fn test_resolve_path_reports_missing_vars() {
        let (mut console, _, _) = console(debug_env());
        console.init(Some(Platform::Other));
        console.capture_start().unwrap();

        let found = console.resolve_path("tool", 1, Some("linux"));
        console.capture_stop(false).unwrap();

        assert!(found.is_empty());
        let captured = console.captured_stdout().join("");
        assert!(captured.contains("Environment variable PATHEXT isn't present."));
        assert!(captured.contains("Environment variable PATH isn't present."));
    }
}
