// Hunspell dictionary files: locating the `.aff`/`.dic` pair and reading
// the SET directive that names their encoding

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use spellverify_core::encoding::encoding_for_label;

/// Encoding assumed when a `.aff` file has no SET line. Hunspell uses
/// ISO-8859-1; WHATWG maps that label onto windows-1252.
pub fn default_encoding() -> &'static Encoding {
    WINDOWS_1252
}

/// `stem` with `suffix` appended. `Path::with_extension` would eat the
/// `.frami` of `de_DE.frami`.
pub fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// The header directives of an affix file.
#[derive(Debug, Clone, PartialEq)]
pub struct AffixHeader {
    encoding: &'static Encoding,
}

/// A SET directive naming an encoding we cannot map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncoding(pub String);

impl AffixHeader {
    /// Parse the raw bytes of an `.aff` file. The first SET line wins.
    pub fn parse(bytes: &[u8]) -> Result<Self, UnknownEncoding> {
        let label = directives(bytes)
            .find(|(keyword, _)| *keyword == b"SET")
            .map(|(_, rest)| String::from_utf8_lossy(first_field(rest)).into_owned());
        let encoding = match label {
            Some(label) => encoding_for_label(&label).ok_or(UnknownEncoding(label))?,
            None => default_encoding(),
        };
        Ok(Self { encoding })
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

/// Re-label decoded affix text as UTF-8.
///
/// Once the file has been decoded with its SET encoding the text is UTF-8,
/// so any SET line is rewritten and one is added when missing.
pub fn relabel_utf8(aff: &str) -> String {
    let mut out = String::with_capacity(aff.len() + 10);
    let mut labelled = false;
    for line in aff.lines() {
        if line.trim_start().starts_with("SET") && !labelled {
            out.push_str("SET UTF-8");
            labelled = true;
        } else if line.trim_start().starts_with("SET") {
            continue;
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    if labelled {
        out
    } else {
        format!("SET {}\n{out}", UTF_8.name())
    }
}

fn directives(bytes: &[u8]) -> impl Iterator<Item = (&[u8], &[u8])> {
    bytes.split(|&b| b == b'\n').filter_map(|line| {
        let line = line.strip_suffix(b"\r").unwrap_or(line).trim_ascii_start();
        if line.is_empty() || line[0] == b'#' {
            return None;
        }
        match line.iter().position(|b| b.is_ascii_whitespace()) {
            Some(pos) => Some((&line[..pos], &line[pos..])),
            None => Some((line, &[][..])),
        }
    })
}

fn first_field(rest: &[u8]) -> &[u8] {
    let rest = rest.trim_ascii_start();
    let end = rest
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(rest.len());
    &rest[..end]
}
