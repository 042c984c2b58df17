// Shared enums: Engine, Operation, Provenance, and policy constants

use std::fmt;

use serde::Serialize;

/// Which side of the comparison an engine sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Engine {
    /// System under test. Its verdicts are the predictions.
    A,
    /// Reference implementation. Its verdicts are the ground truth.
    B,
}

impl Engine {
    pub const ALL: [Engine; 2] = [Engine::A, Engine::B];

    /// Dense index, usable for per-engine arrays.
    pub fn index(self) -> usize {
        match self {
            Engine::A => 0,
            Engine::B => 1,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::A => f.write_str("A"),
            Engine::B => f.write_str("B"),
        }
    }
}

/// The engine capability being exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    /// Spelling verdict for a word.
    Spell,
    /// Suggestion list for a word.
    Suggest,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Spell, Operation::Suggest];

    pub fn index(self) -> usize {
        match self {
            Operation::Spell => 0,
            Operation::Suggest => 1,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Spell => f.write_str("spell"),
            Operation::Suggest => f.write_str("suggest"),
        }
    }
}

/// Where a word sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Provenance {
    /// One word per line from stdin or a named input file.
    Primary,
    /// A `word<TAB>expected` line from the corrections file.
    Corrections,
}

// ---------------------------------------------------------------------------
// Policy constants
// ---------------------------------------------------------------------------

/// Maximum number of suggestions the reference engine returns.
///
/// Engines surface their own cap through
/// [`SpellEngine::max_suggestions`](crate::engine::SpellEngine::max_suggestions);
/// this is the default when they don't override it.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 15;

/// Separator between the misspelled word and the expected correction in a
/// corrections file line.
pub const CORRECTIONS_SEPARATOR: char = '\t';
