// Error types for the comparison harness

use spellverify_core::{Engine, EngineError, Operation};

/// An engine failed on one sample. The sample is skipped, the run goes on.
#[derive(Debug, thiserror::Error)]
#[error("engine {engine} ({name}) failed to {operation} {word:?}: {source}")]
pub struct InvokeError {
    pub engine: Engine,
    pub name: String,
    pub operation: Operation,
    pub word: String,
    #[source]
    pub source: EngineError,
}

/// Failure that aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Reading input or writing output failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
