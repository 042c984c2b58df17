// The sequential processing loop of one comparison run
//
// A session owns the invoker and every accumulator. Samples are processed
// strictly one at a time in input order; nothing runs in the background.
// Primary-stream words and corrections-file words fold into the same
// confusion matrix and spell-duration buckets; only corrections lines feed
// the suggestion comparator.

use std::io::{BufRead, Write};

use encoding_rs::Encoding;
use spellverify_core::encoding::decode_input;
use spellverify_core::{Engine, Operation, Provenance, SpellEngine, WordSample};

use crate::comparator::{SuggestionComparator, SuggestionCounts};
use crate::error::{HarnessError, InvokeError};
use crate::invoker::DualInvoker;
use crate::stats::{Classification, ConfusionMatrix, DurationTable};

/// Options for a comparison run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Write `FalseNegativeWord` / `FalsePositiveWord` lines while processing.
    pub print_false: bool,
    /// Also time suggestions for primary-stream words both engines reject.
    pub test_suggestions: bool,
}

/// Everything a finished run accumulated. Input to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTotals {
    pub name_a: String,
    pub name_b: String,
    pub confusion: ConfusionMatrix,
    pub durations: DurationTable,
    pub suggestions: SuggestionCounts,
    /// Samples dropped because an engine call failed.
    pub skipped: u64,
    /// Corrections lines dropped because they had no tab.
    pub malformed: u64,
}

impl RunTotals {
    /// Totals for engines named `a` and `b` with nothing recorded yet.
    pub fn empty(name_a: impl Into<String>, name_b: impl Into<String>) -> Self {
        Self {
            name_a: name_a.into(),
            name_b: name_b.into(),
            confusion: ConfusionMatrix::new(),
            durations: DurationTable::new(),
            suggestions: SuggestionCounts::default(),
            skipped: 0,
            malformed: 0,
        }
    }
}

/// One comparison run over two engines.
pub struct Session<A, B> {
    invoker: DualInvoker<A, B>,
    config: HarnessConfig,
    confusion: ConfusionMatrix,
    durations: DurationTable,
    comparator: SuggestionComparator,
    skipped: u64,
    malformed: u64,
}

impl<A: SpellEngine, B: SpellEngine> Session<A, B> {
    pub fn new(engine_a: A, engine_b: B, config: HarnessConfig) -> Self {
        let invoker = DualInvoker::new(engine_a, engine_b);
        let comparator = SuggestionComparator::new(invoker.reference_cap());
        Self {
            invoker,
            config,
            confusion: ConfusionMatrix::new(),
            durations: DurationTable::new(),
            comparator,
            skipped: 0,
            malformed: 0,
        }
    }

    /// Process a primary stream: one word per line, blank lines ignored.
    pub fn process_primary<R: BufRead, W: Write>(
        &mut self,
        input: R,
        encoding: &'static Encoding,
        out: &mut W,
    ) -> Result<(), HarnessError> {
        for_each_line(input, encoding, |line| {
            if line.is_empty() {
                return Ok(());
            }
            self.process_sample(&WordSample::primary(line), out)
        })
    }

    /// Process a corrections file: `word<TAB>expected` per line.
    ///
    /// Lines without a tab are skipped with a warning.
    pub fn process_corrections<R: BufRead, W: Write>(
        &mut self,
        input: R,
        encoding: &'static Encoding,
        out: &mut W,
    ) -> Result<(), HarnessError> {
        let mut line_no = 0usize;
        for_each_line(input, encoding, |line| {
            line_no += 1;
            if line.is_empty() {
                return Ok(());
            }
            match WordSample::parse_correction(line) {
                Some(sample) => self.process_sample(&sample, out),
                None => {
                    tracing::warn!(
                        line = line_no,
                        text = line,
                        "corrections line has no tab, skipping"
                    );
                    self.malformed += 1;
                    Ok(())
                }
            }
        })
    }

    /// Run one sample through both engines and fold the results.
    ///
    /// All engine calls for the sample happen first; accumulators are only
    /// touched once every call succeeded, so a failing engine leaves no
    /// partial trace.
    pub fn process_sample<W: Write>(
        &mut self,
        sample: &WordSample,
        out: &mut W,
    ) -> Result<(), HarnessError> {
        let word = self.invoker.prepare(sample.word());

        let spelled = match self.invoker.spell(&word) {
            Ok(v) => v,
            Err(e) => {
                self.skip(&e);
                return Ok(());
            }
        };

        let wants_suggestions = match sample.provenance() {
            Provenance::Corrections => true,
            Provenance::Primary => {
                self.config.test_suggestions && !spelled.a.outcome && !spelled.b.outcome
            }
        };
        let suggested = if wants_suggestions {
            match self.invoker.suggest(&word) {
                Ok(v) => Some(v),
                Err(e) => {
                    self.skip(&e);
                    return Ok(());
                }
            }
        } else {
            None
        };

        self.durations.record(Engine::A, Operation::Spell, spelled.a.elapsed);
        self.durations.record(Engine::B, Operation::Spell, spelled.b.elapsed);
        let class = self.confusion.record(spelled.a.outcome, spelled.b.outcome);
        if self.config.print_false {
            match class {
                Classification::FalseNegative => {
                    writeln!(out, "FalseNegativeWord   {}", sample.word())?
                }
                Classification::FalsePositive => {
                    writeln!(out, "FalsePositiveWord   {}", sample.word())?
                }
                Classification::TruePositive | Classification::TrueNegative => {}
            }
        }

        if let Some(sugs) = suggested {
            self.durations.record(Engine::A, Operation::Suggest, sugs.a.elapsed);
            self.durations.record(Engine::B, Operation::Suggest, sugs.b.elapsed);
            if let Some(expected) = sample.expected() {
                self.comparator.record(&sugs.a.outcome, &sugs.b.outcome, expected);
            }
        }
        Ok(())
    }

    fn skip(&mut self, err: &InvokeError) {
        tracing::warn!("{err}, skipping sample");
        self.skipped += 1;
    }

    pub fn confusion(&self) -> &ConfusionMatrix {
        &self.confusion
    }

    pub fn durations(&self) -> &DurationTable {
        &self.durations
    }

    pub fn suggestion_counts(&self) -> &SuggestionCounts {
        self.comparator.counts()
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Snapshot of the accumulators, ready for the report.
    pub fn totals(&self) -> RunTotals {
        RunTotals {
            name_a: self.invoker.name_a().to_string(),
            name_b: self.invoker.name_b().to_string(),
            confusion: self.confusion,
            durations: self.durations,
            suggestions: *self.comparator.counts(),
            skipped: self.skipped,
            malformed: self.malformed,
        }
    }
}

/// Read `input` line by line, strip the line terminator (`\n` or `\r\n`),
/// decode, and hand each line to `f` in order.
fn for_each_line<R, F>(
    mut input: R,
    encoding: &'static Encoding,
    mut f: F,
) -> Result<(), HarnessError>
where
    R: BufRead,
    F: FnMut(&str) -> Result<(), HarnessError>,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let line = decode_input(encoding, &buf);
        f(&line)?;
    }
}
