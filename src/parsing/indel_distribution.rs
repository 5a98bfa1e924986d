
use anyhow::{anyhow, bail, Context};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::data_types::benchmark_metrics::BenchmarkCounts;
use crate::data_types::case_benchmark::IndelSizeClass;
use crate::parsing::text_reader::open_text_reader;

/// Size-bin labels as they appear in the distribution file, before rollup
#[derive(Clone, Copy, Debug, EnumIter, Eq, PartialEq)]
enum RawSizeBin {
    Size1,
    Size2To5,
    Size6To10,
    Size11To20,
    Size21To50
}

impl RawSizeBin {
    /// The label in column 0 of the distribution file
    fn file_label(&self) -> &'static str {
        match self {
            RawSizeBin::Size1 => "1",
            RawSizeBin::Size2To5 => "2 - 5",
            RawSizeBin::Size6To10 => "6 - 10",
            RawSizeBin::Size11To20 => "11 - 20",
            RawSizeBin::Size21To50 => "21 - 50"
        }
    }

    /// The reported class this bin rolls up into
    fn size_class(&self) -> IndelSizeClass {
        match self {
            RawSizeBin::Size1 | RawSizeBin::Size2To5 | RawSizeBin::Size6To10 => IndelSizeClass::Size1To10,
            RawSizeBin::Size11To20 => IndelSizeClass::Size11To20,
            RawSizeBin::Size21To50 => IndelSizeClass::Size21To50
        }
    }
}

/// Loads an indel size distribution file and rolls the bins up into the reported size classes.
/// The file is tab-delimited with the size label in column 0 and TP / FP / FN in columns 2-4;
/// the header line and the 51+ size row are skipped, as is any unrecognized label.
/// Every reported class is present in the result, defaulting to zero counts.
/// # Arguments
/// * `filename` - the distribution file to parse
/// # Errors
/// * if the file does not open or parse properly
pub fn load_indel_distribution(filename: &Path) -> anyhow::Result<BTreeMap<IndelSizeClass, BenchmarkCounts>> {
    let reader = open_text_reader(filename)?;

    let mut by_class: BTreeMap<IndelSizeClass, BenchmarkCounts> = IndelSizeClass::iter()
        .map(|size_class| (size_class, BenchmarkCounts::default()))
        .collect();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Error while reading {filename:?}"))?;
        // the header starts with 'I' and indels longer than 50 bp are not benchmarked
        if line.starts_with('I') || line.starts_with("51") {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        let bin = match RawSizeBin::iter().find(|b| b.file_label() == columns[0]) {
            Some(bin) => bin,
            None => continue
        };

        if columns.len() < 5 {
            bail!("Size bin line {} of {filename:?} has {} columns, 5 are required", line_index + 1, columns.len());
        }
        let counts = BenchmarkCounts::from_tp_fp_fn(
            parse_count(columns[2], "TP", line_index)?,
            parse_count(columns[3], "FP", line_index)?,
            parse_count(columns[4], "FN", line_index)?
        );

        *by_class.get_mut(&bin.size_class()).unwrap() += counts;
    }

    Ok(by_class)
}

fn parse_count(field: &str, label: &str, line_index: usize) -> anyhow::Result<u64> {
    field.trim().parse()
        .map_err(|_| anyhow!("Error while parsing {label} count {field:?} on line {}", line_index + 1))
}
