// Errors that end a spellverify run

use std::path::PathBuf;

use spellverify_core::{Engine, EngineError};
use spellverify_harness::HarnessError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("no dictionary given with -d and none could be derived from the locale")]
    NoDictionary,

    #[error("dictionary '{name}' not found (searched {searched} locations)")]
    DictionaryNotFound { name: String, searched: usize },

    #[error("invalid engine spec '{spec}': {reason}")]
    EngineSpec { spec: String, reason: String },

    #[error("cannot start engine {which}: {source}")]
    Engine {
        which: Engine,
        #[source]
        source: EngineError,
    },

    #[error("cannot read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot render report: {0}")]
    Json(#[from] serde_json::Error),
}
