
use anyhow::{anyhow, bail, Context};
use csv::StringRecord;
use std::path::Path;

use crate::data_types::benchmark_metrics::{BenchmarkCounts, ReportedMetrics};
use crate::parsing::text_reader::open_text_reader;

/// Row label for the overall indel results
const INDEL_ROW_LABEL: &str = "Locations.INDEL";
/// Row label for the SNP results
const SNP_ROW_LABEL: &str = "Locations.SNP";

/// The SNP and overall-indel results pulled from one extended comparison CSV
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtendedComparison {
    /// Metrics from the Locations.SNP row
    pub snp: ReportedMetrics,
    /// Metrics from the Locations.INDEL row
    pub indel: ReportedMetrics
}

/// Column positions of interest, located by name in the header record
#[derive(Clone, Copy, Debug)]
struct ColumnIndexes {
    truth_total: usize,
    query_tp: usize,
    query_fp: usize,
    truth_fn: usize,
    precision: usize,
    recall: usize
}

impl ColumnIndexes {
    /// Locates the columns of interest in the header record
    /// # Errors
    /// * if any required column is absent
    fn from_header(header: &StringRecord) -> anyhow::Result<Self> {
        let position = |name: &str| -> anyhow::Result<usize> {
            header.iter().position(|field| field == name)
                .ok_or(anyhow!("Missing column {name:?} in header: {header:?}"))
        };

        Ok(Self {
            truth_total: position("TRUTH.TOTAL")?,
            query_tp: position("QUERY.TP")?,
            query_fp: position("QUERY.FP")?,
            truth_fn: position("TRUTH.FN")?,
            precision: position("METRIC.Precision")?,
            recall: position("METRIC.Recall")?
        })
    }
}

/// Loads the SNP and overall-indel metrics from an extended comparison CSV.
/// The header is the record whose first field is empty and second field starts with "METRIC.";
/// count columns may be written as floats and are truncated to integers;
/// metric columns are fractions and get scaled to percents, with NaN treated as absent.
/// # Arguments
/// * `filename` - the extended CSV to parse
/// # Errors
/// * if the file does not open or parse properly
/// * if the header or either data row is missing
pub fn load_extended_csv(filename: &Path) -> anyhow::Result<ExtendedComparison> {
    let reader = open_text_reader(filename)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false) // the header row is located by content, not position
        .flexible(true)
        .from_reader(reader);

    let mut header_record: Option<StringRecord> = None;
    let mut indel_record: Option<StringRecord> = None;
    let mut snp_record: Option<StringRecord> = None;

    for result in csv_reader.records() {
        let record = result.with_context(|| format!("Error while reading {filename:?}"))?;
        let first_field = record.get(0).unwrap_or_default();
        if first_field.is_empty() && record.get(1).is_some_and(|f| f.starts_with("METRIC.")) {
            header_record = Some(record);
        } else if first_field == INDEL_ROW_LABEL {
            indel_record = Some(record);
        } else if first_field == SNP_ROW_LABEL {
            snp_record = Some(record);
        }
    }

    let header = header_record.ok_or(anyhow!("No metric header row found in {filename:?}"))?;
    let indexes = ColumnIndexes::from_header(&header)
        .with_context(|| format!("Error while locating columns in {filename:?}:"))?;

    let indel_record = indel_record.ok_or(anyhow!("No {INDEL_ROW_LABEL} row found in {filename:?}"))?;
    let snp_record = snp_record.ok_or(anyhow!("No {SNP_ROW_LABEL} row found in {filename:?}"))?;

    let indel = parse_metrics_record(&indel_record, indexes)
        .with_context(|| format!("Error while parsing {INDEL_ROW_LABEL} row in {filename:?}:"))?;
    let snp = parse_metrics_record(&snp_record, indexes)
        .with_context(|| format!("Error while parsing {SNP_ROW_LABEL} row in {filename:?}:"))?;

    Ok(ExtendedComparison {
        snp, indel
    })
}

/// Pulls the located columns out of one data record
fn parse_metrics_record(record: &StringRecord, indexes: ColumnIndexes) -> anyhow::Result<ReportedMetrics> {
    let counts = BenchmarkCounts::new(
        parse_count_field(record, indexes.truth_total)?,
        parse_count_field(record, indexes.query_tp)?,
        parse_count_field(record, indexes.query_fp)?,
        parse_count_field(record, indexes.truth_fn)?
    );
    let precision = parse_metric_field(record, indexes.precision)?;
    let recall = parse_metric_field(record, indexes.recall)?;

    Ok(ReportedMetrics::new(counts, precision, recall))
}

/// Count fields may be serialized as floats ("488.0"); they are truncated to integers
fn parse_count_field(record: &StringRecord, index: usize) -> anyhow::Result<u64> {
    let field = record.get(index)
        .ok_or(anyhow!("Missing field at column {index} in record: {record:?}"))?;
    let value: f64 = field.trim().parse()
        .with_context(|| format!("Error while parsing count field {field:?}:"))?;
    if value < 0.0 {
        bail!("Count field is negative: {field:?}");
    }
    Ok(value as u64)
}

/// Metric fields are fractions in [0, 1]; empty or NaN values are treated as absent
fn parse_metric_field(record: &StringRecord, index: usize) -> anyhow::Result<Option<f64>> {
    let field = record.get(index)
        .ok_or(anyhow!("Missing field at column {index} in record: {record:?}"))?
        .trim();
    if field.is_empty() {
        return Ok(None);
    }

    let value: f64 = field.parse()
        .with_context(|| format!("Error while parsing metric field {field:?}:"))?;
    if value.is_nan() {
        Ok(None)
    } else {
        Ok(Some(100.0 * value))
    }
}
