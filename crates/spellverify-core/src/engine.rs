// Capability interface for the spell-checking engines under comparison

use std::path::PathBuf;

use encoding_rs::Encoding;

use crate::enums::DEFAULT_MAX_SUGGESTIONS;

/// Failure of a single engine call or of engine construction.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Reading from or writing to the engine failed.
    #[error("engine i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The engine answered with something we could not interpret.
    #[error("engine protocol violation: {0}")]
    Protocol(String),

    /// An external engine process went away mid-conversation.
    #[error("engine process terminated")]
    Terminated,

    /// The dictionary backing the engine could not be loaded.
    #[error("failed to load dictionary {}: {reason}", path.display())]
    Dictionary { path: PathBuf, reason: String },
}

/// A spell-checking engine, treated as a black box.
///
/// Words cross this boundary as bytes in the engine's own dictionary
/// encoding (see [`SpellEngine::dictionary_encoding`]); the harness does the
/// conversion before any timing starts. Methods take `&mut self` because
/// engines may keep internal caches or talk to an external process, but the
/// harness never changes their configuration.
pub trait SpellEngine {
    /// Short human-readable name used in logs and report labels.
    fn name(&self) -> &str;

    /// Encoding the engine expects words in and returns suggestions in.
    fn dictionary_encoding(&self) -> &'static Encoding;

    /// Upper bound on the length of a list returned by [`SpellEngine::suggest`].
    fn max_suggestions(&self) -> usize {
        DEFAULT_MAX_SUGGESTIONS
    }

    /// Is `word` correctly spelled?
    fn spell(&mut self, word: &[u8]) -> Result<bool, EngineError>;

    /// Ordered suggestions for `word`, best first.
    fn suggest(&mut self, word: &[u8]) -> Result<Vec<Vec<u8>>, EngineError>;
}

impl<E: SpellEngine + ?Sized> SpellEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn dictionary_encoding(&self) -> &'static Encoding {
        (**self).dictionary_encoding()
    }

    fn max_suggestions(&self) -> usize {
        (**self).max_suggestions()
    }

    fn spell(&mut self, word: &[u8]) -> Result<bool, EngineError> {
        (**self).spell(word)
    }

    fn suggest(&mut self, word: &[u8]) -> Result<Vec<Vec<u8>>, EngineError> {
        (**self).suggest(word)
    }
}
