//! Shared building blocks for the spellverify workspace.
//!
//! - [`enums`] -- engine / operation / provenance identifiers and constants
//! - [`sample`] -- per-line input samples and per-call verdicts
//! - [`engine`] -- the capability interface every spell-checking engine implements
//! - [`encoding`] -- the bridge between the input encoding and engine encodings

pub mod encoding;
pub mod engine;
pub mod enums;
pub mod sample;

pub use encoding::EncodingBridge;
pub use engine::{EngineError, SpellEngine};
pub use enums::{DEFAULT_MAX_SUGGESTIONS, Engine, Operation, Provenance};
pub use sample::{EngineVerdict, WordSample};
