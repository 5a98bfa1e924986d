
use std::ops::AddAssign;

/// Core confusion counts for one benchmarking category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BenchmarkCounts {
    /// Number of variants in the truth set
    pub truth_total: u64,
    /// Number of query entries that match truth
    pub query_tp: u64,
    /// Number of query entries that are not in truth
    pub query_fp: u64,
    /// Number of truth entries missing in the query
    pub truth_fn: u64,
}

impl AddAssign for BenchmarkCounts {
    // Enables += with counts, used by the indel-size rollup
    fn add_assign(&mut self, rhs: Self) {
        self.truth_total += rhs.truth_total;
        self.query_tp += rhs.query_tp;
        self.query_fp += rhs.query_fp;
        self.truth_fn += rhs.truth_fn;
    }
}

impl BenchmarkCounts {
    /// Constructor
    pub fn new(truth_total: u64, query_tp: u64, query_fp: u64, truth_fn: u64) -> Self {
        Self {
            truth_total, query_tp, query_fp, truth_fn
        }
    }

    /// Builds counts from raw TP / FP / FN where the truth total is implied as TP + FN
    pub fn from_tp_fp_fn(query_tp: u64, query_fp: u64, truth_fn: u64) -> Self {
        Self {
            truth_total: query_tp + truth_fn,
            query_tp, query_fp, truth_fn
        }
    }

    /// Calculates true negatives against a region size: TN = num_bases - (TP + FP + FN).
    /// Signed because inconsistent inputs can drive this negative.
    pub fn true_negatives(&self, num_bases: u64) -> i64 {
        num_bases as i64 - (self.query_tp + self.query_fp + self.truth_fn) as i64
    }

    /// Calculates total negatives against a region size: FP + TN
    pub fn total_negatives(&self, num_bases: u64) -> i64 {
        self.query_fp as i64 + self.true_negatives(num_bases)
    }

    /// Calculates negative percent agreement if it can: 100 * TN / (FP + TN)
    pub fn npa(&self, num_bases: u64) -> Option<f64> {
        let true_neg = self.true_negatives(num_bases);
        let denom = self.query_fp as i64 + true_neg;
        if denom != 0 {
            Some(100.0 * true_neg as f64 / denom as f64)
        } else {
            None
        }
    }

    /// Calculates precision as a percent if it can, which is relative to query
    pub fn precision(&self) -> Option<f64> {
        let denom = self.query_tp + self.query_fp;
        if denom > 0 {
            Some(100.0 * self.query_tp as f64 / denom as f64)
        } else {
            None
        }
    }

    /// Calculates recall as a percent if it can, which is relative to truth
    pub fn recall(&self) -> Option<f64> {
        let denom = self.query_tp + self.truth_fn;
        if denom > 0 {
            Some(100.0 * self.query_tp as f64 / denom as f64)
        } else {
            None
        }
    }
}

/// Counts paired with the precision / recall values reported by the comparison tool itself.
/// Rows sourced from an extended comparison CSV keep the tool's own metrics instead of recomputing them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReportedMetrics {
    /// The parsed confusion counts
    pub counts: BenchmarkCounts,
    /// Precision as a percent; None when the tool reported no value
    pub precision: Option<f64>,
    /// Recall as a percent; None when the tool reported no value
    pub recall: Option<f64>,
}

impl ReportedMetrics {
    /// Constructor
    pub fn new(counts: BenchmarkCounts, precision: Option<f64>, recall: Option<f64>) -> Self {
        Self {
            counts, precision, recall
        }
    }
}
