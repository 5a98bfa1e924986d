
use anyhow::{anyhow, bail, Context};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::data_types::case_benchmark::RegionKind;
use crate::parsing::text_reader::open_text_reader;

/// File name prefix that identifies the base-count table inside an input directory
pub const BASE_COUNT_PREFIX: &str = "number_of_bases";

/// Base counts for the two benchmarked regions of a single case
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegionBaseCounts {
    /// Number of bases in the whole exome region
    pub whole_exome: u64,
    /// Number of bases in the coding exon region
    pub coding_exons: u64
}

impl RegionBaseCounts {
    pub fn for_region(&self, kind: RegionKind) -> u64 {
        match kind {
            RegionKind::WholeExome => self.whole_exome,
            RegionKind::CodingExons => self.coding_exons
        }
    }
}

/// Wrapper for the per-case base-count table.
/// The table drives the TN derivation, so every case that gets aggregated must have a row here.
#[derive(Clone, Debug, Default)]
pub struct BaseCountTable {
    /// Lookup from a case label to its base counts, in file order
    counts: IndexMap<String, RegionBaseCounts>
}

impl BaseCountTable {
    /// Locates the base-count table inside an input directory.
    /// The table is any file named `number_of_bases*.txt` (optionally gzipped); exactly one must exist.
    /// # Arguments
    /// * `input_dir` - the aggregation input directory
    /// # Errors
    /// * if the directory cannot be read
    /// * if no table is present, or more than one is
    pub fn find_in_dir(input_dir: &Path) -> anyhow::Result<PathBuf> {
        let mut candidates: Vec<PathBuf> = vec![];
        for entry in std::fs::read_dir(input_dir)
            .with_context(|| format!("Error while reading {input_dir:?}:"))? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if entry.file_type()?.is_file()
                && file_name.starts_with(BASE_COUNT_PREFIX)
                && (file_name.ends_with("txt") || file_name.ends_with("txt.gz")) {
                candidates.push(entry.path());
            }
        }

        match candidates.len() {
            0 => bail!("The number of bases file ({BASE_COUNT_PREFIX}*.txt) is missing from {input_dir:?}"),
            1 => Ok(candidates.pop().unwrap()),
            _ => {
                candidates.sort();
                bail!("Multiple number of bases files found in {input_dir:?}: {candidates:?}")
            }
        }
    }

    /// This will open a table file that is expected to have three tab-separated columns and no header.
    /// The first column is a case label, the second is the whole exome base count, and the third is the coding exon base count.
    /// Lines starting with '#' are ignored.
    /// # Arguments
    /// * `filename` - the table file to parse
    /// # Errors
    /// * if the file does not open or parse properly
    /// * if a case label appears twice
    pub fn from_path(filename: &Path) -> anyhow::Result<Self> {
        let reader = open_text_reader(filename)?;
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false) // no headers in the file, disable so we do not skip first row
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut counts: IndexMap<String, RegionBaseCounts> = Default::default();
        for result in csv_reader.records() {
            let row = result.with_context(|| format!("Error while reading {filename:?}"))?;

            // make sure this is not a duplicate
            let case = row.get(0).ok_or(anyhow!("Missing case label on row: {row:?}"))?;
            if counts.contains_key(case) {
                bail!("Duplicate case label found: {case}");
            }

            let whole_exome: u64 = row.get(1)
                .ok_or(anyhow!("Missing whole exome base count on row: {row:?}"))?
                .trim().parse()
                .with_context(|| format!("Error while parsing whole exome base count for case {case:?}:"))?;
            let coding_exons: u64 = row.get(2)
                .ok_or(anyhow!("Missing coding exon base count on row: {row:?}"))?
                .trim().parse()
                .with_context(|| format!("Error while parsing coding exon base count for case {case:?}:"))?;

            assert!(counts.insert(case.to_string(), RegionBaseCounts { whole_exome, coding_exons }).is_none());
        }

        Ok(Self {
            counts
        })
    }

    /// Returns the base counts for a case if the table has a row for it
    pub fn get(&self, case: &str) -> Option<RegionBaseCounts> {
        self.counts.get(case).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_table() {
        let input_dir = PathBuf::from("test_data/example_metrics");
        let table_fn = BaseCountTable::find_in_dir(&input_dir).unwrap();
        assert_eq!(table_fn.file_name().unwrap(), "number_of_bases_grch38.txt");

        let table = BaseCountTable::from_path(&table_fn).unwrap();
        assert_eq!(table.len(), 2);
        let na12878 = table.get("NA12878").unwrap();
        assert_eq!(na12878.for_region(RegionKind::WholeExome), 64000000);
        assert_eq!(na12878.for_region(RegionKind::CodingExons), 32000000);
        assert!(table.get("HuRef").is_none());
    }

    #[test]
    fn test_missing_table() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = BaseCountTable::find_in_dir(temp_dir.path());
        assert!(result.unwrap_err().to_string().contains("missing"));
    }

    #[test]
    fn test_duplicate_case() {
        let temp_dir = tempfile::tempdir().unwrap();
        let table_fn = temp_dir.path().join("number_of_bases.txt");
        std::fs::write(&table_fn, "NA12878\t100\t50\nNA12878\t200\t60\n").unwrap();
        let result = BaseCountTable::from_path(&table_fn);
        assert!(result.unwrap_err().to_string().contains("Duplicate case label"));
    }
}
