//! Spell-checking engines that plug into the spellverify harness.
//!
//! - [`SpellbookEngine`] -- in-process checker over a Hunspell dictionary,
//!   compiled with `spellbook`
//! - [`IspellPipeEngine`] -- any external checker speaking the ispell `-a`
//!   pipe protocol, e.g. `hunspell -a`
//!
//! Both exchange words as bytes in their dictionary encoding.

pub mod aff;
pub mod pipe;
pub mod spellbook_engine;

pub use pipe::IspellPipeEngine;
pub use spellbook_engine::SpellbookEngine;
