// In-process engine: a Hunspell dictionary compiled by `spellbook`

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use spellbook::Dictionary;
use spellverify_core::{DEFAULT_MAX_SUGGESTIONS, EngineError, SpellEngine};

use crate::aff::{AffixHeader, relabel_utf8, with_suffix};

/// Spell checker over a Hunspell `.aff`/`.dic` pair, affix rules included.
///
/// Words cross the engine boundary in the dictionary's SET encoding and
/// are checked as UTF-8 internally.
pub struct SpellbookEngine {
    name: String,
    encoding: &'static Encoding,
    dictionary: Dictionary,
    max_suggestions: usize,
}

impl SpellbookEngine {
    /// Load the dictionary at `stem` (without `.aff`/`.dic`).
    pub fn open(stem: &Path) -> Result<Self, EngineError> {
        let aff_path = with_suffix(stem, ".aff");
        let dic_path = with_suffix(stem, ".dic");
        let aff = std::fs::read(&aff_path).map_err(|e| dictionary_error(&aff_path, e))?;
        let dic = std::fs::read(&dic_path).map_err(|e| dictionary_error(&dic_path, e))?;
        let engine = Self::from_bytes(&aff, &dic)
            .map_err(|reason| EngineError::Dictionary { path: aff_path, reason })?;
        tracing::debug!(
            path = %dic_path.display(),
            encoding = engine.encoding.name(),
            "dictionary compiled"
        );
        Ok(engine)
    }

    /// Build from in-memory file contents. The error is a human-readable
    /// reason.
    pub fn from_bytes(aff: &[u8], dic: &[u8]) -> Result<Self, String> {
        let encoding = AffixHeader::parse(aff)
            .map_err(|e| format!("unknown SET encoding '{}'", e.0))?
            .encoding();
        let (aff_text, _, aff_errors) = encoding.decode(aff);
        let (dic_text, _, dic_errors) = encoding.decode(dic);
        if aff_errors || dic_errors {
            tracing::warn!(
                encoding = encoding.name(),
                "dictionary is malformed in its declared encoding"
            );
        }
        let dictionary = Dictionary::new(&relabel_utf8(&aff_text), &dic_text)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            name: "spellbook".to_string(),
            encoding,
            dictionary,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    fn decode(&self, word: &[u8]) -> String {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(word);
        if had_errors {
            tracing::debug!(engine = %self.name, "word is malformed in the dictionary encoding");
        }
        text.into_owned()
    }
}

fn dictionary_error(path: &Path, e: std::io::Error) -> EngineError {
    EngineError::Dictionary {
        path: PathBuf::from(path),
        reason: e.to_string(),
    }
}

impl SpellEngine for SpellbookEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn dictionary_encoding(&self) -> &'static Encoding {
        self.encoding
    }

    fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    fn spell(&mut self, word: &[u8]) -> Result<bool, EngineError> {
        let word = self.decode(word);
        Ok(self.dictionary.check(&word))
    }

    fn suggest(&mut self, word: &[u8]) -> Result<Vec<Vec<u8>>, EngineError> {
        let word = self.decode(word);
        let mut suggestions = Vec::with_capacity(self.max_suggestions);
        self.dictionary.suggest(&word, &mut suggestions);
        suggestions.truncate(self.max_suggestions);
        Ok(suggestions
            .iter()
            .map(|s| self.encoding.encode(s).0.into_owned())
            .collect())
    }
}
