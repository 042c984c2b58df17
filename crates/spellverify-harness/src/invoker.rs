// Dual-engine invocation protocol
//
// For every word the same operation runs on engine A, then immediately on
// engine B. Three clock reads bracket the pair: t1 before A, t2 between A
// and B, t3 after B. Encoding conversion and error handling happen outside
// the t1..t3 window so neither engine's figure includes harness overhead.

use std::borrow::Cow;

use spellverify_core::{EncodingBridge, Engine, EngineVerdict, Operation, SpellEngine};

use crate::error::InvokeError;
use crate::timing::Stopwatch;

/// A word already converted into both engines' encodings.
#[derive(Debug, Clone)]
pub struct PreparedWord<'w> {
    text: &'w str,
    for_a: Cow<'w, [u8]>,
    for_b: Cow<'w, [u8]>,
}

impl PreparedWord<'_> {
    pub fn text(&self) -> &str {
        self.text
    }
}

/// Paired verdicts of one dual call.
#[derive(Debug, Clone, PartialEq)]
pub struct DualVerdict<T> {
    pub a: EngineVerdict<T>,
    pub b: EngineVerdict<T>,
}

/// Owns both engines and calls them in the fixed A-then-B order.
pub struct DualInvoker<A, B> {
    engine_a: A,
    engine_b: B,
    bridge_a: EncodingBridge,
    bridge_b: EncodingBridge,
}

impl<A: SpellEngine, B: SpellEngine> DualInvoker<A, B> {
    pub fn new(engine_a: A, engine_b: B) -> Self {
        let bridge_a = EncodingBridge::new(engine_a.dictionary_encoding());
        let bridge_b = EncodingBridge::new(engine_b.dictionary_encoding());
        Self {
            engine_a,
            engine_b,
            bridge_a,
            bridge_b,
        }
    }

    pub fn name_a(&self) -> &str {
        self.engine_a.name()
    }

    pub fn name_b(&self) -> &str {
        self.engine_b.name()
    }

    /// Suggestion cap of the reference engine.
    pub fn reference_cap(&self) -> usize {
        self.engine_b.max_suggestions()
    }

    /// Convert `word` for both engines. Done once per sample, untimed.
    pub fn prepare<'w>(&self, word: &'w str) -> PreparedWord<'w> {
        PreparedWord {
            text: word,
            for_a: self.bridge_a.to_engine_encoding(word),
            for_b: self.bridge_b.to_engine_encoding(word),
        }
    }

    /// Spelling verdicts of A and B.
    pub fn spell(&mut self, word: &PreparedWord<'_>) -> Result<DualVerdict<bool>, InvokeError> {
        let mut watch = Stopwatch::start();
        let res_a = self.engine_a.spell(&word.for_a);
        let elapsed_a = watch.lap();
        let res_b = self.engine_b.spell(&word.for_b);
        let elapsed_b = watch.lap();

        let a = res_a.map_err(|e| self.fail(Engine::A, Operation::Spell, word, e))?;
        let b = res_b.map_err(|e| self.fail(Engine::B, Operation::Spell, word, e))?;
        Ok(DualVerdict {
            a: EngineVerdict::new(Engine::A, Operation::Spell, a, elapsed_a),
            b: EngineVerdict::new(Engine::B, Operation::Spell, b, elapsed_b),
        })
    }

    /// Suggestion lists of A and B, decoded back to text after timing.
    pub fn suggest(
        &mut self,
        word: &PreparedWord<'_>,
    ) -> Result<DualVerdict<Vec<String>>, InvokeError> {
        let mut watch = Stopwatch::start();
        let res_a = self.engine_a.suggest(&word.for_a);
        let elapsed_a = watch.lap();
        let res_b = self.engine_b.suggest(&word.for_b);
        let elapsed_b = watch.lap();

        let a = res_a.map_err(|e| self.fail(Engine::A, Operation::Suggest, word, e))?;
        let b = res_b.map_err(|e| self.fail(Engine::B, Operation::Suggest, word, e))?;
        let a = decode_all(&self.bridge_a, a);
        let b = decode_all(&self.bridge_b, b);
        Ok(DualVerdict {
            a: EngineVerdict::new(Engine::A, Operation::Suggest, a, elapsed_a),
            b: EngineVerdict::new(Engine::B, Operation::Suggest, b, elapsed_b),
        })
    }

    fn fail(
        &self,
        engine: Engine,
        operation: Operation,
        word: &PreparedWord<'_>,
        source: spellverify_core::EngineError,
    ) -> InvokeError {
        let name = match engine {
            Engine::A => self.engine_a.name(),
            Engine::B => self.engine_b.name(),
        };
        InvokeError {
            engine,
            name: name.to_string(),
            operation,
            word: word.text.to_string(),
            source,
        }
    }
}

fn decode_all(bridge: &EncodingBridge, raw: Vec<Vec<u8>>) -> Vec<String> {
    raw.iter()
        .map(|s| bridge.from_engine_encoding(s).into_owned())
        .collect()
}
