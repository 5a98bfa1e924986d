
use std::collections::BTreeMap;
use strum_macros::EnumIter;

use crate::data_types::benchmark_metrics::{BenchmarkCounts, ReportedMetrics};

/// The genomic regions every case is benchmarked against
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum RegionKind {
    /// The full exome target regions
    WholeExome=0,
    /// The coding exon subset
    CodingExons
}

impl RegionKind {
    /// The required file suffix for the extended comparison CSV of this region
    pub fn extended_csv_suffix(&self) -> &'static str {
        match self {
            RegionKind::WholeExome => "WholeExomeRegions.extended.csv",
            RegionKind::CodingExons => "CodingExons.extended.csv"
        }
    }

    /// The required file suffix for the indel size distribution of this region
    pub fn indel_distribution_suffix(&self) -> &'static str {
        match self {
            RegionKind::WholeExome => "WholeExomeRegions_indelSizeDistribution.txt",
            RegionKind::CodingExons => "CodingExons_indelSizeDistribution.txt"
        }
    }

    /// Human label used in the report section banners
    pub fn section_label(&self) -> &'static str {
        match self {
            RegionKind::WholeExome => "Whole Exome",
            RegionKind::CodingExons => "Coding Exons"
        }
    }
}

/// The indel size classes that appear in the report after rollup.
/// The distribution files bin sizes 1, 2-5, and 6-10 separately; those collapse into `Size1To10`.
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum IndelSizeClass {
    Size1To10=0,
    Size11To20,
    Size21To50
}

impl IndelSizeClass {
    /// Human label used in the per-case report rows
    pub fn label(&self) -> &'static str {
        match self {
            IndelSizeClass::Size1To10 => "Indels 1 - 10",
            IndelSizeClass::Size11To20 => "Indels 11 - 20",
            IndelSizeClass::Size21To50 => "Indels 21 - 50"
        }
    }
}

/// All parsed results for one region of one case
#[derive(Clone, Debug, PartialEq)]
pub struct RegionBenchmark {
    /// Number of bases in this region for the case
    num_bases: u64,
    /// SNP row from the extended comparison CSV
    snp: ReportedMetrics,
    /// Overall indel row from the extended comparison CSV
    indel: ReportedMetrics,
    /// Indel counts per reported size class
    indel_by_size: BTreeMap<IndelSizeClass, BenchmarkCounts>
}

impl RegionBenchmark {
    /// Constructor
    pub fn new(
        num_bases: u64, snp: ReportedMetrics, indel: ReportedMetrics,
        indel_by_size: BTreeMap<IndelSizeClass, BenchmarkCounts>
    ) -> Self {
        Self {
            num_bases, snp, indel, indel_by_size
        }
    }

    pub fn num_bases(&self) -> u64 {
        self.num_bases
    }

    pub fn snp(&self) -> &ReportedMetrics {
        &self.snp
    }

    pub fn indel(&self) -> &ReportedMetrics {
        &self.indel
    }

    /// Counts for one size class; absent classes report as all-zero
    pub fn indel_counts_for_size(&self, size_class: IndelSizeClass) -> BenchmarkCounts {
        self.indel_by_size.get(&size_class).copied().unwrap_or_default()
    }
}

/// The full set of benchmark results for one case directory
#[derive(Clone, Debug, PartialEq)]
pub struct CaseBenchmark {
    /// The case label, which is the directory name
    case_name: String,
    /// Results for the whole exome region
    whole_exome: RegionBenchmark,
    /// Results for the coding exon region
    coding_exons: RegionBenchmark
}

impl CaseBenchmark {
    /// Constructor
    pub fn new(case_name: String, whole_exome: RegionBenchmark, coding_exons: RegionBenchmark) -> Self {
        Self {
            case_name, whole_exome, coding_exons
        }
    }

    pub fn case_name(&self) -> &str {
        &self.case_name
    }

    pub fn region(&self, kind: RegionKind) -> &RegionBenchmark {
        match kind {
            RegionKind::WholeExome => &self.whole_exome,
            RegionKind::CodingExons => &self.coding_exons
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_region_tables() {
        assert_eq!(RegionKind::iter().count(), 2);
        assert_eq!(RegionKind::WholeExome.extended_csv_suffix(), "WholeExomeRegions.extended.csv");
        assert_eq!(RegionKind::CodingExons.indel_distribution_suffix(), "CodingExons_indelSizeDistribution.txt");
        assert_eq!(RegionKind::CodingExons.section_label(), "Coding Exons");
    }

    #[test]
    fn test_size_class_order() {
        // report rows rely on the enum ordering matching ascending size
        let labels: Vec<&str> = IndelSizeClass::iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Indels 1 - 10", "Indels 11 - 20", "Indels 21 - 50"]);
    }

    #[test]
    fn test_absent_size_class_is_zero() {
        let region = RegionBenchmark::new(
            100, ReportedMetrics::default(), ReportedMetrics::default(), BTreeMap::new()
        );
        assert_eq!(region.indel_counts_for_size(IndelSizeClass::Size11To20), BenchmarkCounts::default());
    }
}
