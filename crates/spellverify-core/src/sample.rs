// Per-line input samples and per-call engine verdicts

use std::time::Duration;

use crate::enums::{CORRECTIONS_SEPARATOR, Engine, Operation, Provenance};

/// One word taken from an input line, ready to be fed to both engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSample {
    word: String,
    provenance: Provenance,
    expected: Option<String>,
}

impl WordSample {
    /// A word from the primary stream.
    pub fn primary(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            provenance: Provenance::Primary,
            expected: None,
        }
    }

    /// A word from the corrections file, paired with the desired suggestion.
    pub fn correction(word: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            provenance: Provenance::Corrections,
            expected: Some(expected.into()),
        }
    }

    /// Parse a corrections file line of the form `word<TAB>expected`.
    ///
    /// Returns `None` when the line has no tab. Anything after a second tab
    /// is ignored.
    pub fn parse_correction(line: &str) -> Option<Self> {
        let mut fields = line.split(CORRECTIONS_SEPARATOR);
        let word = fields.next()?;
        let expected = fields.next()?;
        Some(Self::correction(word, expected))
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// The expected correction; `Some` only for corrections-file samples.
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }
}

/// Result of one engine call together with how long it took.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineVerdict<T> {
    pub engine: Engine,
    pub operation: Operation,
    pub outcome: T,
    pub elapsed: Duration,
}

impl<T> EngineVerdict<T> {
    pub fn new(engine: Engine, operation: Operation, outcome: T, elapsed: Duration) -> Self {
        Self {
            engine,
            operation,
            outcome,
            elapsed,
        }
    }
}
