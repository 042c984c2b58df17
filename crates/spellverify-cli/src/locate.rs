// Hunspell dictionary discovery

use std::path::{Path, PathBuf};

use spellverify_engines::aff::with_suffix;

use crate::environment::Environment;

/// Directories searched for `<name>.aff` + `<name>.dic`, in order:
///
/// 1. every entry of `DICPATH`
/// 2. `~/.local/share/hunspell`
/// 3. `~/Library/Spelling` (macOS)
/// 4. system directories used by Hunspell and MySpell packages
/// 5. the current directory
pub fn search_paths(env: &Environment) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(dicpath) = &env.dicpath {
        paths.extend(std::env::split_paths(dicpath).filter(|p| !p.as_os_str().is_empty()));
    }

    if let Some(home) = &env.home {
        paths.push(home.join(".local/share/hunspell"));
        #[cfg(target_os = "macos")]
        paths.push(home.join("Library/Spelling"));
    }

    for dir in [
        "/usr/local/share/hunspell",
        "/usr/share/hunspell",
        "/usr/share/myspell",
        "/usr/share/myspell/dicts",
    ] {
        paths.push(PathBuf::from(dir));
    }

    if let Some(cwd) = &env.cwd {
        paths.push(cwd.clone());
    }

    paths
}

/// Resolve a dictionary name to its path stem (without extension).
///
/// A name containing a path separator is taken as a stem directly. Both
/// files of the pair must exist.
pub fn locate(name: &str, search: &[PathBuf]) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        let stem = PathBuf::from(name);
        return has_pair(&stem).then_some(stem);
    }
    search
        .iter()
        .map(|dir| dir.join(name))
        .find(|stem| has_pair(stem))
}

fn has_pair(stem: &Path) -> bool {
    with_suffix(stem, ".aff").is_file() && with_suffix(stem, ".dic").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn pair(dir: &Path, name: &str) {
        fs::write(dir.join(format!("{name}.aff")), "SET UTF-8\n").unwrap();
        fs::write(dir.join(format!("{name}.dic")), "0\n").unwrap();
    }

    #[test]
    fn dicpath_comes_first() {
        let env = Environment {
            dicpath: Some("/a:/b".into()),
            home: Some("/home/u".into()),
            cwd: Some("/work".into()),
            ..Environment::default()
        };
        let paths = search_paths(&env);
        assert_eq!(paths[0], PathBuf::from("/a"));
        assert_eq!(paths[1], PathBuf::from("/b"));
        assert_eq!(paths[2], PathBuf::from("/home/u/.local/share/hunspell"));
        assert!(paths.contains(&PathBuf::from("/usr/share/hunspell")));
        assert_eq!(paths.last(), Some(&PathBuf::from("/work")));
    }

    #[test]
    fn first_complete_pair_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        // Only half a pair in the first directory.
        fs::write(first.path().join("en_US.dic"), "0\n").unwrap();
        pair(second.path(), "en_US");
        let search = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(locate("en_US", &search), Some(second.path().join("en_US")));
        assert_eq!(locate("fr_FR", &search), None);
    }

    #[test]
    fn explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        pair(dir.path(), "custom");
        let stem = dir.path().join("custom");
        let name = stem.to_string_lossy().into_owned();
        assert_eq!(locate(&name, &[]), Some(stem));
        let missing = dir.path().join("missing").to_string_lossy().into_owned();
        assert_eq!(locate(&missing, &[]), None);
    }

    #[test]
    fn empty_name() {
        assert_eq!(locate("", &[PathBuf::from("/")]), None);
    }
}
