// Confusion matrix of engine A's verdicts against engine B's

/// Outcome of comparing one pair of verdicts, B taken as ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    TruePositive,
    TrueNegative,
    FalsePositive,
    FalseNegative,
}

impl Classification {
    /// Classify A's verdict (`predicted`) against B's (`actual`).
    pub fn of(predicted: bool, actual: bool) -> Self {
        match (actual, predicted) {
            (true, true) => Classification::TruePositive,
            (true, false) => Classification::FalseNegative,
            (false, true) => Classification::FalsePositive,
            (false, false) => Classification::TrueNegative,
        }
    }
}

/// Running TP/TN/FP/FN counters.
///
/// Every call to [`ConfusionMatrix::record`] bumps exactly one counter, so
/// the four always sum to [`ConfusionMatrix::total`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    true_pos: u64,
    true_neg: u64,
    false_pos: u64,
    false_neg: u64,
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample: `verdict_a` is the prediction, `verdict_b` the truth.
    pub fn record(&mut self, verdict_a: bool, verdict_b: bool) -> Classification {
        let class = Classification::of(verdict_a, verdict_b);
        match class {
            Classification::TruePositive => self.true_pos += 1,
            Classification::TrueNegative => self.true_neg += 1,
            Classification::FalsePositive => self.false_pos += 1,
            Classification::FalseNegative => self.false_neg += 1,
        }
        class
    }

    pub fn true_pos(&self) -> u64 {
        self.true_pos
    }

    pub fn true_neg(&self) -> u64 {
        self.true_neg
    }

    pub fn false_pos(&self) -> u64 {
        self.false_pos
    }

    pub fn false_neg(&self) -> u64 {
        self.false_neg
    }

    pub fn total(&self) -> u64 {
        self.true_pos + self.true_neg + self.false_pos + self.false_neg
    }

    /// Words engine A accepted.
    pub fn positives_a(&self) -> u64 {
        self.true_pos + self.false_pos
    }

    /// Words engine B accepted.
    pub fn positives_b(&self) -> u64 {
        self.true_pos + self.false_neg
    }

    /// Words engine A rejected.
    pub fn negatives_a(&self) -> u64 {
        self.true_neg + self.false_neg
    }

    /// Words engine B rejected.
    pub fn negatives_b(&self) -> u64 {
        self.true_neg + self.false_pos
    }
}
