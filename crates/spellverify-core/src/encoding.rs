// Encoding bridge: moves words between the input encoding and the
// encodings the engines expect.
//
// All conversions happen outside the timed regions of the invoker, so their
// cost never shows up in an engine's measured latency.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

/// Converts words into, and suggestions out of, one engine's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingBridge {
    target: &'static Encoding,
}

impl EncodingBridge {
    /// Bridge towards an engine whose dictionary uses `target`.
    pub fn new(target: &'static Encoding) -> Self {
        Self {
            target: target.output_encoding(),
        }
    }

    pub fn target(&self) -> &'static Encoding {
        self.target
    }

    /// Re-encode `word` for the engine.
    ///
    /// Characters the target cannot represent are replaced (encoding_rs
    /// writes them as numeric character references). The result is still
    /// handed to the engine; the loss is only logged.
    pub fn to_engine_encoding<'a>(&self, word: &'a str) -> Cow<'a, [u8]> {
        let (bytes, _, had_unmappable) = self.target.encode(word);
        if had_unmappable {
            tracing::info!(
                word,
                encoding = self.target.name(),
                "word is not representable in the engine encoding, using lossy conversion"
            );
        }
        bytes
    }

    /// Decode a word the engine produced back into text.
    pub fn from_engine_encoding<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let (text, had_errors) = self.target.decode_without_bom_handling(bytes);
        if had_errors {
            tracing::info!(
                encoding = self.target.name(),
                "engine output is malformed in its own encoding, using lossy conversion"
            );
        }
        text
    }
}

/// Decode one raw input line from the input encoding.
///
/// Malformed sequences become U+FFFD; this is logged, not fatal.
pub fn decode_input<'a>(encoding: &'static Encoding, line: &'a [u8]) -> Cow<'a, str> {
    let (text, had_errors) = encoding.decode_without_bom_handling(line);
    if had_errors {
        tracing::info!(
            encoding = encoding.name(),
            "input line is malformed in the input encoding, using lossy conversion"
        );
    }
    text
}

/// Look up an encoding by name, accepting the spellings used by Hunspell
/// `.aff` files and POSIX locale codesets as well as WHATWG labels.
///
/// ```
/// use spellverify_core::encoding::encoding_for_label;
/// assert_eq!(encoding_for_label("UTF-8"), Some(encoding_rs::UTF_8));
/// assert_eq!(encoding_for_label("utf8"), Some(encoding_rs::UTF_8));
/// assert!(encoding_for_label("ISO8859-15").is_some());
/// assert!(encoding_for_label("no-such-charset").is_none());
/// ```
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    let label = label.trim();
    if let Some(enc) = Encoding::for_label_no_replacement(label.as_bytes()) {
        return Some(enc);
    }
    let lower = label.to_ascii_lowercase();
    let normalized = if let Some(rest) = lower.strip_prefix("microsoft-cp") {
        format!("cp{rest}")
    } else if lower.starts_with("tis620") {
        "tis-620".to_string()
    } else if let Some(rest) = lower.strip_prefix("iso8859") {
        // ISO8859_1, ISO8859:1 and friends
        format!("iso-8859-{}", rest.trim_start_matches(['-', '_', ':']))
    } else {
        return None;
    };
    Encoding::for_label_no_replacement(normalized.as_bytes())
}

/// Extract the codeset from a POSIX locale name: `en_US.UTF-8@euro` gives
/// `UTF-8`. Returns `None` when the locale names no codeset.
pub fn locale_codeset(locale: &str) -> Option<&str> {
    let (_, rest) = locale.split_once('.')?;
    let codeset = rest.split('@').next().unwrap_or(rest);
    if codeset.is_empty() {
        None
    } else {
        Some(codeset)
    }
}

/// The encoding implied by a locale name. Locales without a codeset
/// (`C`, `POSIX`, `en_US`) fall back to UTF-8.
pub fn encoding_for_locale(locale: &str) -> Option<&'static Encoding> {
    match locale_codeset(locale) {
        Some(codeset) => encoding_for_label(codeset),
        None => Some(UTF_8),
    }
}
