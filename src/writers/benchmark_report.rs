
use anyhow::Context;
use chrono::NaiveDate;
use derive_builder::Builder;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use strum::IntoEnumIterator;

use crate::data_types::benchmark_metrics::{BenchmarkCounts, ReportedMetrics};
use crate::data_types::case_benchmark::{CaseBenchmark, IndelSizeClass, RegionKind};

/// File name prefix of the generated report; the date and extension get appended
pub const REPORT_PREFIX: &str = "Final_benchmarking_metrics_";

/// Marker written for ratios with an empty denominator
const UNDEFINED_RATIO: &str = "NaN";

/// Column headers repeated at the top of every report section
const HEADER_COLUMNS: [&str; 11] = [
    "Case", "Number of bases", "Truth total", "TP", "FP", "FN",
    "TN = TotalBases - (TP + FN + FP)", "TotalNegative = TN + FP",
    "NPA = TN/(Total Negative)", "Precision", "Recall"
];

/// Configuration for the report output
#[derive(Builder, Clone, Debug)]
pub struct ReportConfig {
    /// Directory the report file is created in
    pub output_folder: PathBuf,
    /// Date stamped into the report file name
    #[builder(default = "chrono::Local::now().date_naive()")]
    pub report_date: NaiveDate
}

/// Builds the date-stamped report file name
pub fn report_filename(report_date: NaiveDate) -> String {
    format!("{REPORT_PREFIX}{report_date}.txt")
}

/// Contains all the data written to one row of the report
#[derive(Serialize)]
struct ReportRow {
    /// Case label, suffixed with the indel size class on the by-size rows
    case: String,
    /// Region size in bases
    num_bases: u64,
    /// Total number of variants in the truth set
    truth_total: u64,
    /// Total number of true positives in query
    query_tp: u64,
    /// Total number of false positives
    query_fp: u64,
    /// Total number of false negatives
    truth_fn: u64,
    /// TN = num_bases - (TP + FP + FN)
    true_negatives: i64,
    /// Total negative = TN + FP
    total_negatives: i64,
    /// NPA = 100 * TN / (FP + TN), pre-formatted so undefined values render as NaN
    npa: String,
    /// Precision percent, pre-formatted
    precision: String,
    /// Recall percent, pre-formatted
    recall: String
}

impl ReportRow {
    /// Row whose precision and recall were reported by the comparison tool
    fn from_reported(case: String, num_bases: u64, metrics: &ReportedMetrics) -> Self {
        Self::assemble(case, num_bases, &metrics.counts, metrics.precision, metrics.recall)
    }

    /// Row whose precision and recall are computed from the counts (the indel by-size rows)
    fn from_counts(case: String, num_bases: u64, counts: &BenchmarkCounts) -> Self {
        Self::assemble(case, num_bases, counts, counts.precision(), counts.recall())
    }

    fn assemble(case: String, num_bases: u64, counts: &BenchmarkCounts, precision: Option<f64>, recall: Option<f64>) -> Self {
        Self {
            case,
            num_bases,
            truth_total: counts.truth_total,
            query_tp: counts.query_tp,
            query_fp: counts.query_fp,
            truth_fn: counts.truth_fn,
            true_negatives: counts.true_negatives(num_bases),
            total_negatives: counts.total_negatives(num_bases),
            npa: format_ratio(counts.npa(num_bases)),
            precision: format_ratio(precision),
            recall: format_ratio(recall)
        }
    }
}

/// Formats a percent ratio with two decimals, or the NaN marker when undefined
fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => UNDEFINED_RATIO.to_string()
    }
}

/// This is a wrapper for accumulating per-case results and writing the final report
#[derive(Default)]
pub struct BenchmarkReportWriter {
    /// All accumulated case results
    cases: Vec<CaseBenchmark>
}

impl BenchmarkReportWriter {
    /// Adds one case's results to the accumulation
    /// # Arguments
    /// * `case` - the fully parsed case benchmark
    pub fn add_case_benchmark(&mut self, case: CaseBenchmark) {
        self.cases.push(case);
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Will write the report into the configured folder and return the written path.
    /// Sections come out in a fixed order; within a section, cases come out in sorted name order.
    /// # Arguments
    /// * `config` - the output folder and report date
    /// # Errors
    /// * if opening or writing the report file throws errors
    pub fn write_report(&mut self, config: &ReportConfig) -> anyhow::Result<PathBuf> {
        self.cases.sort_by(|c1, c2| c1.case_name().cmp(c2.case_name()));

        let out_fn = config.output_folder.join(report_filename(config.report_date));
        let mut csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true) // banner rows are shorter than data rows
            .has_headers(false) // each section writes its own header row
            .from_path(&out_fn)
            .with_context(|| format!("Error while creating {out_fn:?}:"))?;

        for region in RegionKind::iter() {
            self.write_snp_section(&mut csv_writer, region)
                .with_context(|| format!("Error while writing SNP section for {}:", region.section_label()))?;
            self.write_indel_section(&mut csv_writer, region)
                .with_context(|| format!("Error while writing INDEL section for {}:", region.section_label()))?;
        }

        csv_writer.flush()?;
        Ok(out_fn)
    }

    /// Writes the banner and column header lines that start every section
    fn write_section_header(csv_writer: &mut csv::Writer<File>, title: &str) -> csv::Result<()> {
        csv_writer.write_record(["", title])?;
        csv_writer.write_record(HEADER_COLUMNS)
    }

    /// Writes one SNP section: a single row per case from the extended CSV
    fn write_snp_section(&self, csv_writer: &mut csv::Writer<File>, region: RegionKind) -> csv::Result<()> {
        Self::write_section_header(csv_writer, &format!("Benchmarking SNPs {}", region.section_label()))?;

        for case in self.cases.iter() {
            let region_benchmark = case.region(region);
            let row = ReportRow::from_reported(
                case.case_name().to_string(), region_benchmark.num_bases(), region_benchmark.snp()
            );
            csv_writer.serialize(&row)?;
        }

        Ok(())
    }

    /// Writes one INDEL section: per case, the overall row from the extended CSV followed by the by-size rollup rows
    fn write_indel_section(&self, csv_writer: &mut csv::Writer<File>, region: RegionKind) -> csv::Result<()> {
        Self::write_section_header(csv_writer, &format!("Benchmarking INDELs {}", region.section_label()))?;

        for case in self.cases.iter() {
            let region_benchmark = case.region(region);
            let overall_row = ReportRow::from_reported(
                case.case_name().to_string(), region_benchmark.num_bases(), region_benchmark.indel()
            );
            csv_writer.serialize(&overall_row)?;

            for size_class in IndelSizeClass::iter() {
                let counts = region_benchmark.indel_counts_for_size(size_class);
                let size_row = ReportRow::from_counts(
                    format!("{} - {}", case.case_name(), size_class.label()),
                    region_benchmark.num_bases(), &counts
                );
                csv_writer.serialize(&size_row)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::case_benchmark::RegionBenchmark;
    use std::collections::BTreeMap;

    #[test]
    fn test_report_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(report_filename(date), "Final_benchmarking_metrics_2024-05-01.txt");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Some(99.8)), "99.80");
        assert_eq!(format_ratio(Some(100.0)), "100.00");
        assert_eq!(format_ratio(None), "NaN");
    }

    /// Builds a small fully-populated case for writer tests
    fn mock_case(case_name: &str) -> CaseBenchmark {
        let snp = ReportedMetrics::new(BenchmarkCounts::new(100, 98, 1, 2), Some(98.99), Some(98.0));
        let indel = ReportedMetrics::new(BenchmarkCounts::new(50, 48, 2, 2), Some(96.0), Some(96.0));
        let indel_by_size: BTreeMap<IndelSizeClass, BenchmarkCounts> = [
            (IndelSizeClass::Size1To10, BenchmarkCounts::from_tp_fp_fn(40, 1, 1)),
            (IndelSizeClass::Size11To20, BenchmarkCounts::from_tp_fp_fn(8, 1, 1)),
            // 21-50 left absent so it reports as zero
        ].into_iter().collect();

        let whole_exome = RegionBenchmark::new(1000, snp, indel, indel_by_size.clone());
        let coding_exons = RegionBenchmark::new(500, snp, indel, indel_by_size);
        CaseBenchmark::new(case_name.to_string(), whole_exome, coding_exons)
    }

    #[test]
    fn test_write_report() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ReportConfigBuilder::default()
            .output_folder(temp_dir.path().to_path_buf())
            .report_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .build().unwrap();

        let mut writer = BenchmarkReportWriter::default();
        writer.add_case_benchmark(mock_case("NA24385"));
        writer.add_case_benchmark(mock_case("NA12878"));

        let out_fn = writer.write_report(&config).unwrap();
        assert_eq!(out_fn, temp_dir.path().join("Final_benchmarking_metrics_2024-05-01.txt"));

        let contents = std::fs::read_to_string(&out_fn).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        // 4 sections, each with banner + header; SNP sections carry 2 rows, INDEL sections 2 * 4 rows
        assert_eq!(lines.len(), 2 * (2 + 2) + 2 * (2 + 8));
        assert_eq!(lines[0], "\tBenchmarking SNPs Whole Exome");
        assert_eq!(lines[1], HEADER_COLUMNS.join("\t"));
        assert_eq!(lines[14], "\tBenchmarking SNPs Coding Exons");

        // cases are sorted by name even though they were added out of order
        assert_eq!(lines[2], "NA12878\t1000\t100\t98\t1\t2\t899\t900\t99.89\t98.99\t98.00");
        assert!(lines[3].starts_with("NA24385\t"));

        // overall indel row keeps the reported metrics; by-size rows compute their own
        assert_eq!(lines[6], "NA12878\t1000\t50\t48\t2\t2\t948\t950\t99.79\t96.00\t96.00");
        assert_eq!(lines[7], "NA12878 - Indels 1 - 10\t1000\t41\t40\t1\t1\t958\t959\t99.90\t97.56\t97.56");

        // the absent 21-50 class reports zero counts and undefined ratios
        assert_eq!(lines[9], "NA12878 - Indels 21 - 50\t1000\t0\t0\t0\t0\t1000\t1000\t100.00\tNaN\tNaN");
    }
}
