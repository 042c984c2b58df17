// Process environment consumed by a run, captured once at start-up

use std::ffi::OsString;
use std::path::PathBuf;

/// The environment variables a run depends on.
///
/// Captured up front so the rest of the program (and its tests) never read
/// the process environment directly.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Effective `LC_CTYPE` locale: `LC_ALL`, then `LC_CTYPE`, then `LANG`.
    pub locale: Option<String>,
    /// Extra dictionary directories from `DICPATH`.
    pub dicpath: Option<OsString>,
    pub home: Option<PathBuf>,
    pub cwd: Option<PathBuf>,
}

impl Environment {
    pub fn from_process() -> Self {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.is_empty());
        Self {
            locale,
            dicpath: std::env::var_os("DICPATH").filter(|v| !v.is_empty()),
            home: std::env::var_os("HOME").map(PathBuf::from),
            cwd: std::env::current_dir().ok(),
        }
    }

    /// Locale name with the `C` default applied.
    pub fn locale_or_default(&self) -> &str {
        self.locale.as_deref().unwrap_or("C")
    }
}

/// Dictionary name implied by a locale: `en_US.UTF-8@euro` gives `en_US`.
/// `C`, `POSIX` and empty locales imply none.
pub fn dictionary_name_from_locale(locale: &str) -> Option<&str> {
    let name = locale.split(['.', '@']).next().unwrap_or(locale);
    match name {
        "" | "C" | "POSIX" => None,
        _ => Some(name),
    }
}
