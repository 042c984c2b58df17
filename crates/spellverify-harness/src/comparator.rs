// Suggestion-quality comparison driven by the corrections file
//
// Each corrections line yields one suggestion list per engine plus the word
// a human expects to see. The counters below are independent tallies over
// the same pass; one line can bump several of them.

use serde::Serialize;

/// Tallies over all compared corrections lines.
///
/// Every field is bounded above by `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionCounts {
    /// Corrections lines compared.
    pub total: u64,
    /// Lines where A's list contains the expected word.
    pub satisfied_a: u64,
    /// Lines where B's list contains the expected word.
    pub satisfied_b: u64,
    /// Both lists non-empty and starting with the same word.
    pub equal_first: u64,
    /// Both lists of the same length.
    pub equal_size: u64,
    /// A returned more suggestions than B.
    pub more_a: u64,
    /// B returned more suggestions than A.
    pub more_b: u64,
    /// Neither engine had a suggestion.
    pub none_both: u64,
    pub none_a: u64,
    pub none_b: u64,
    /// Both lists hit the suggestion cap.
    pub max_both: u64,
    pub max_a: u64,
    pub max_b: u64,
}

/// Compares the suggestion lists of both engines against expected words.
#[derive(Debug, Clone)]
pub struct SuggestionComparator {
    cap: usize,
    counts: SuggestionCounts,
}

impl SuggestionComparator {
    /// `cap` is the suggestion limit of the reference engine; a list of
    /// exactly this length was probably truncated.
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            counts: SuggestionCounts::default(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn counts(&self) -> &SuggestionCounts {
        &self.counts
    }

    /// Fold one corrections line.
    pub fn record<S: AsRef<str>>(&mut self, sugs_a: &[S], sugs_b: &[S], expected: &str) {
        let c = &mut self.counts;
        c.total += 1;

        if contains(sugs_a, expected) {
            c.satisfied_a += 1;
        }
        if contains(sugs_b, expected) {
            c.satisfied_b += 1;
        }

        if let (Some(first_a), Some(first_b)) = (sugs_a.first(), sugs_b.first()) {
            if first_a.as_ref() == first_b.as_ref() {
                c.equal_first += 1;
            }
        }

        let (len_a, len_b) = (sugs_a.len(), sugs_b.len());
        match len_a.cmp(&len_b) {
            std::cmp::Ordering::Equal => c.equal_size += 1,
            std::cmp::Ordering::Greater => c.more_a += 1,
            std::cmp::Ordering::Less => c.more_b += 1,
        }

        if len_a == 0 && len_b == 0 {
            c.none_both += 1;
        }
        if len_a == 0 {
            c.none_a += 1;
        }
        if len_b == 0 {
            c.none_b += 1;
        }

        if len_a == self.cap && len_b == self.cap {
            c.max_both += 1;
        }
        if len_a == self.cap {
            c.max_a += 1;
        }
        if len_b == self.cap {
            c.max_b += 1;
        }
    }
}

fn contains<S: AsRef<str>>(sugs: &[S], expected: &str) -> bool {
    sugs.iter().any(|s| s.as_ref() == expected)
}
