// Report derivation and rendering
//
// A report is computed once from the final RunTotals and never changes
// afterwards. Text output is one `label` + padding + `value` line per
// metric, in a fixed order; JSON output maps metric keys to values.

use std::fmt;
use std::time::Duration;

use serde::ser::{Serialize, SerializeMap, Serializer};
use spellverify_core::{Engine, Operation};

use crate::session::RunTotals;
use crate::stats::DurationStats;

/// Label column width of the spelling block.
const SPELL_LABEL_WIDTH: usize = 24;

/// Label column width of the suggestion block.
const SUGGEST_LABEL_WIDTH: usize = 32;

const SPELL_DURATION_KEYS: [[&str; 2]; 4] = [
    ["duration_total_a", "duration_total_b"],
    ["duration_min_a", "duration_min_b"],
    ["duration_avg_a", "duration_avg_b"],
    ["duration_max_a", "duration_max_b"],
];

const SUGGEST_DURATION_KEYS: [[&str; 2]; 4] = [
    ["sug_duration_total_a", "sug_duration_total_b"],
    ["sug_duration_min_a", "sug_duration_min_b"],
    ["sug_duration_avg_a", "sug_duration_avg_b"],
    ["sug_duration_max_a", "sug_duration_max_b"],
];

/// Why no metrics could be derived.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// Not a single sample was processed.
    #[error("no input provided")]
    NoInput,

    /// The tested engine's total spelling time rounded to zero.
    #[error("invalid zero duration for {engine}, clock resolution is insufficient")]
    ZeroDuration { engine: String },
}

/// A rendered metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(u64),
    Rate(f64),
    /// Duration in whole nanoseconds.
    Nanos(u64),
}

impl MetricValue {
    fn nanos(d: Duration) -> Self {
        MetricValue::Nanos(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) | MetricValue::Nanos(n) => write!(f, "{n}"),
            MetricValue::Rate(r) => f.write_str(&format_general(*r)),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Count(n) | MetricValue::Nanos(n) => serializer.serialize_u64(*n),
            MetricValue::Rate(r) => serializer.serialize_f64(*r),
        }
    }
}

/// One report line.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Stable machine-readable name, e.g. `true_pos_rate`.
    pub key: &'static str,
    /// Human-readable label, e.g. `True Positive Rate`.
    pub label: String,
    pub value: MetricValue,
    width: usize,
}

/// The final statistics of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    metrics: Vec<Metric>,
}

impl Report {
    /// Derive every metric from the accumulated totals.
    ///
    /// Fails when there is nothing to divide by: zero samples, or a zero
    /// total spelling duration for engine A.
    pub fn derive(totals: &RunTotals) -> Result<Self, ReportError> {
        let c = &totals.confusion;
        let total = c.total();
        if total == 0 {
            return Err(ReportError::NoInput);
        }
        let spell_a = totals.durations.get(Engine::A, Operation::Spell);
        let spell_b = totals.durations.get(Engine::B, Operation::Spell);
        if spell_a.total().is_zero() {
            return Err(ReportError::ZeroDuration {
                engine: totals.name_a.clone(),
            });
        }

        let (a, b) = (totals.name_a.as_str(), totals.name_b.as_str());
        let mut m = Builder::new(SPELL_LABEL_WIDTH);

        m.count("total_words", "Total Words".into(), total);
        m.count("positives_a", format!("Positives {a}"), c.positives_a());
        m.count("positives_b", format!("Positives {b}"), c.positives_b());
        m.count("negatives_a", format!("Negatives {a}"), c.negatives_a());
        m.count("negatives_b", format!("Negatives {b}"), c.negatives_b());
        m.count("true_pos", "True Positives".into(), c.true_pos());
        m.rate("true_pos_rate", "True Positive Rate".into(), ratio(c.true_pos(), total));
        m.count("true_neg", "True Negatives".into(), c.true_neg());
        m.rate("true_neg_rate", "True Negative Rate".into(), ratio(c.true_neg(), total));
        m.count("false_pos", "False Positives".into(), c.false_pos());
        m.rate("false_pos_rate", "False Positive Rate".into(), ratio(c.false_pos(), total));
        m.count("false_neg", "False Negatives".into(), c.false_neg());
        m.rate("false_neg_rate", "False Negative Rate".into(), ratio(c.false_neg(), total));
        m.rate(
            "accuracy",
            "Accuracy".into(),
            ratio(c.true_pos() + c.true_neg(), total),
        );
        m.rate(
            "precision",
            "Precision".into(),
            ratio(c.true_pos(), c.true_pos() + c.false_pos()),
        );
        m.durations(&SPELL_DURATION_KEYS, "", a, b, spell_a, spell_b);
        m.rate(
            "speedup",
            "Speedup Rate".into(),
            duration_ratio(spell_b.total(), spell_a.total()),
        );
        if totals.skipped > 0 {
            m.count("skipped", "Skipped Samples".into(), totals.skipped);
        }

        let s = &totals.suggestions;
        let sug_a = totals.durations.get(Engine::A, Operation::Suggest);
        let sug_b = totals.durations.get(Engine::B, Operation::Suggest);
        if s.total > 0 && !sug_a.total().is_zero() {
            let cor = s.total;
            let rate_a = ratio(s.satisfied_a, cor);
            let rate_b = ratio(s.satisfied_b, cor);
            let improvement = if rate_b != 0.0 { rate_a / rate_b } else { 0.0 };

            m.width = SUGGEST_LABEL_WIDTH;
            m.count("total_corrections", "Total Corrections".into(), cor);
            m.count("satisfied_a", format!("Satisfied Suggestions {a}"), s.satisfied_a);
            m.count("satisfied_b", format!("Satisfied Suggestions {b}"), s.satisfied_b);
            m.rate("correction_rate_a", format!("Correction Rate Sat.S. {a}"), rate_a);
            m.rate("correction_rate_b", format!("Correction Rate Sat.S. {b}"), rate_b);
            m.rate(
                "correction_improvement_rate",
                "Correction Improvement Rate".into(),
                improvement,
            );
            m.count("none_both", "Cor. No Suggestions Both".into(), s.none_both);
            m.count("none_a", format!("Cor. No Suggestions {a}"), s.none_a);
            m.count("none_b", format!("Cor. No Suggestions {b}"), s.none_b);
            m.count("with_both", "Cor. With Suggestions Both".into(), cor - s.none_both);
            m.count("with_a", format!("Cor. With Suggestions {a}"), cor - s.none_a);
            m.count("with_b", format!("Cor. With Suggestions {b}"), cor - s.none_b);
            m.count("equal_size", "Cor. Equal # Sug. Both".into(), s.equal_size);
            m.count("more_a", format!("Cor. More # Sug. {a}"), s.more_a);
            m.count("more_b", format!("Cor. More # Sug. {b}"), s.more_b);
            m.count("max_both", "Cor. Maximum # Sug. Both".into(), s.max_both);
            m.count("max_a", format!("Cor. Maximum # Sug. {a}"), s.max_a);
            m.count("max_b", format!("Cor. Maximum # Sug. {b}"), s.max_b);
            m.count("equal_first", "Cor. Equal First Sug. Both".into(), s.equal_first);
            m.rate(
                "equal_first_rate",
                "Cor. Equal First Sug. Both Rate".into(),
                ratio(s.equal_first, cor),
            );
            m.durations(&SUGGEST_DURATION_KEYS, "Sug. ", a, b, sug_a, sug_b);
            m.rate(
                "suggestion_speedup",
                "Suggestion Speedup Rate".into(),
                duration_ratio(sug_b.total(), sug_a.total()),
            );
        } else if s.total > 0 {
            tracing::warn!(
                corrections = s.total,
                "suggestion timings of {a} summed to zero, omitting suggestion metrics"
            );
        }

        Ok(Self { metrics: m.metrics })
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Look up a metric value by key.
    pub fn get(&self, key: &str) -> Option<MetricValue> {
        self.metrics.iter().find(|m| m.key == key).map(|m| m.value)
    }

    /// Whether the suggestion block was produced.
    pub fn has_suggestion_metrics(&self) -> bool {
        self.get("total_corrections").is_some()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.metrics {
            // Always at least one space between label and value.
            let width = m.width.max(m.label.chars().count() + 1);
            writeln!(f, "{:<width$}{}", m.label, m.value)?;
        }
        Ok(())
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.metrics.len()))?;
        for m in &self.metrics {
            map.serialize_entry(m.key, &m.value)?;
        }
        map.end()
    }
}

struct Builder {
    metrics: Vec<Metric>,
    width: usize,
}

impl Builder {
    fn new(width: usize) -> Self {
        Self {
            metrics: Vec::new(),
            width,
        }
    }

    fn push(&mut self, key: &'static str, label: String, value: MetricValue) {
        self.metrics.push(Metric {
            key,
            label,
            value,
            width: self.width,
        });
    }

    fn count(&mut self, key: &'static str, label: String, n: u64) {
        self.push(key, label, MetricValue::Count(n));
    }

    fn rate(&mut self, key: &'static str, label: String, r: f64) {
        self.push(key, label, MetricValue::Rate(r));
    }

    /// Total / min / average / max lines for one operation, A and B.
    fn durations(
        &mut self,
        keys: &[[&'static str; 2]; 4],
        sug: &str,
        name_a: &str,
        name_b: &str,
        a: &DurationStats,
        b: &DurationStats,
    ) {
        let heads = ["Tot.", "Min.", "Ave.", "Max."];
        let stats: [fn(&DurationStats) -> MetricValue; 4] = [
            |s| MetricValue::nanos(s.total()),
            |s| MetricValue::nanos(s.min().unwrap_or_default()),
            |s| {
                let avg = s.average_nanos().unwrap_or(0);
                MetricValue::Nanos(u64::try_from(avg).unwrap_or(u64::MAX))
            },
            |s| MetricValue::nanos(s.max().unwrap_or_default()),
        ];
        for ((head, [key_a, key_b]), value) in heads.iter().zip(keys.iter().copied()).zip(stats) {
            self.push(key_a, format!("{head} Duration {sug}{name_a}"), value(a));
            self.push(key_b, format!("{head} Duration {sug}{name_b}"), value(b));
        }
    }
}

/// `num / den`, or 0 when `den` is 0.
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn duration_ratio(num: Duration, den: Duration) -> f64 {
    let den = den.as_nanos();
    if den == 0 {
        0.0
    } else {
        num.as_nanos() as f64 / den as f64
    }
}

/// Format like C's `%g`: six significant digits, trailing zeros dropped,
/// scientific notation for very small or large magnitudes.
pub fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    // Rounding to six significant digits may bump the exponent (9.999999
    // becomes 10), so take the exponent from the rounded form.
    let sci = format!("{value:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs());
    }
    let decimals = (5 - exp).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::SuggestionCounts;

    fn ns(n: u64) -> Duration {
        Duration::from_nanos(n)
    }

    fn totals_with(pairs: &[(bool, bool, u64, u64)]) -> RunTotals {
        let mut t = RunTotals::empty("Tested", "Reference");
        for &(a, b, da, db) in pairs {
            t.confusion.record(a, b);
            t.durations.record(Engine::A, Operation::Spell, ns(da));
            t.durations.record(Engine::B, Operation::Spell, ns(db));
        }
        t
    }

    fn rate(report: &Report, key: &str) -> f64 {
        match report.get(key) {
            Some(MetricValue::Rate(r)) => r,
            other => panic!("{key}: expected a rate, got {other:?}"),
        }
    }

    #[test]
    fn no_input_is_an_error() {
        let t = RunTotals::empty("a", "b");
        assert_eq!(Report::derive(&t), Err(ReportError::NoInput));
        assert_eq!(ReportError::NoInput.to_string(), "no input provided");
    }

    #[test]
    fn zero_duration_is_an_error() {
        let t = totals_with(&[(true, true, 0, 5)]);
        assert_eq!(
            Report::derive(&t),
            Err(ReportError::ZeroDuration {
                engine: "Tested".into()
            })
        );
    }

    #[test]
    fn perfect_agreement() {
        let t = totals_with(&[
            (true, true, 10, 20),
            (false, false, 10, 20),
            (false, false, 10, 20),
        ]);
        let r = Report::derive(&t).unwrap();
        assert_eq!(r.get("total_words"), Some(MetricValue::Count(3)));
        assert_eq!(r.get("true_pos"), Some(MetricValue::Count(1)));
        assert_eq!(r.get("true_neg"), Some(MetricValue::Count(2)));
        assert_eq!(rate(&r, "accuracy"), 1.0);
        assert_eq!(rate(&r, "precision"), 1.0);
        assert_eq!(rate(&r, "speedup"), 2.0);
        assert_eq!(r.get("duration_avg_b"), Some(MetricValue::Nanos(20)));
        assert!(!r.has_suggestion_metrics());
    }

    #[test]
    fn precision_guard_when_a_accepts_nothing() {
        let t = totals_with(&[(false, true, 10, 10), (false, false, 10, 10)]);
        let r = Report::derive(&t).unwrap();
        assert_eq!(rate(&r, "precision"), 0.0);
        assert_eq!(rate(&r, "accuracy"), 0.5);
        assert_eq!(r.get("false_neg"), Some(MetricValue::Count(1)));
    }

    #[test]
    fn suggestion_block_requires_corrections_and_timing() {
        let mut t = totals_with(&[(false, false, 10, 10)]);
        t.suggestions = SuggestionCounts {
            total: 1,
            ..SuggestionCounts::default()
        };
        // No suggestion timings yet.
        assert!(!Report::derive(&t).unwrap().has_suggestion_metrics());

        t.durations.record(Engine::A, Operation::Suggest, ns(100));
        t.durations.record(Engine::B, Operation::Suggest, ns(300));
        let r = Report::derive(&t).unwrap();
        assert!(r.has_suggestion_metrics());
        assert_eq!(rate(&r, "suggestion_speedup"), 3.0);
    }

    #[test]
    fn improvement_rate_guarded_against_zero_reference_rate() {
        let mut t = totals_with(&[(false, false, 10, 10), (false, false, 10, 10)]);
        t.durations.record(Engine::A, Operation::Suggest, ns(100));
        t.durations.record(Engine::B, Operation::Suggest, ns(100));
        t.suggestions = SuggestionCounts {
            total: 2,
            satisfied_a: 1,
            ..SuggestionCounts::default()
        };
        let r = Report::derive(&t).unwrap();
        assert_eq!(rate(&r, "correction_rate_a"), 0.5);
        assert_eq!(rate(&r, "correction_rate_b"), 0.0);
        assert_eq!(rate(&r, "correction_improvement_rate"), 0.0);
        assert_eq!(r.get("with_a"), Some(MetricValue::Count(2)));
    }

    #[test]
    fn all_rates_are_finite() {
        let mut t = totals_with(&[(true, false, 3, 7), (false, true, 1, 1)]);
        t.durations.record(Engine::A, Operation::Suggest, ns(9));
        t.durations.record(Engine::B, Operation::Suggest, ns(1));
        t.suggestions = SuggestionCounts {
            total: 2,
            satisfied_a: 2,
            satisfied_b: 1,
            equal_first: 1,
            ..SuggestionCounts::default()
        };
        let r = Report::derive(&t).unwrap();
        for m in r.metrics() {
            if let MetricValue::Rate(v) = m.value {
                assert!(v.is_finite(), "{} is not finite", m.key);
            }
        }
    }

    #[test]
    fn text_layout_pads_labels() {
        let t = totals_with(&[(true, true, 1_000, 1_620)]);
        let text = Report::derive(&t).unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Total Words             1");
        assert_eq!(lines[1], "Positives Tested        1");
        assert!(text.contains("\nSpeedup Rate            1.62\n"));
        assert!(text.contains("\nTot. Duration Reference 1620\n"));
        assert!(text.contains("\nMin. Duration Tested    1000\n"));
    }

    #[test]
    fn long_labels_keep_a_separator() {
        let t = RunTotals {
            name_a: "an-engine-with-a-long-name".into(),
            ..totals_with(&[(true, true, 5, 5)])
        };
        let text = Report::derive(&t).unwrap().to_string();
        assert!(text.contains("Positives an-engine-with-a-long-name 1\n"));
    }

    #[test]
    fn skipped_samples_only_shown_when_present() {
        let mut t = totals_with(&[(true, true, 5, 5)]);
        assert_eq!(Report::derive(&t).unwrap().get("skipped"), None);
        t.skipped = 2;
        assert_eq!(
            Report::derive(&t).unwrap().get("skipped"),
            Some(MetricValue::Count(2))
        );
    }

    #[test]
    fn json_maps_keys_to_values() {
        let t = totals_with(&[(true, true, 10, 5)]);
        let r = Report::derive(&t).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["total_words"], 1);
        assert_eq!(v["speedup"], 0.5);
        assert_eq!(v["duration_total_a"], 10);
    }

    #[test]
    fn general_number_format() {
        assert_eq!(format_general(1.0), "1");
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(2.0 / 3.0), "0.666667");
        assert_eq!(format_general(1.62), "1.62");
        assert_eq!(format_general(100.0), "100");
        assert_eq!(format_general(9.9999999), "10");
        assert_eq!(format_general(123_456_789.0), "1.23457e+08");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(0.0001), "0.0001");
    }
}
