
use anyhow::{anyhow, bail, Context};
use itertools::Itertools;
use lazy_static::lazy_static;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use walkdir::WalkDir;

use crate::data_types::case_benchmark::{CaseBenchmark, RegionBenchmark, RegionKind};
use crate::parsing::base_counts::BaseCountTable;
use crate::parsing::extended_csv::load_extended_csv;
use crate::parsing::indel_distribution::load_indel_distribution;
use crate::parsing::text_reader::matches_suffix;

lazy_static! {
    /// File suffixes every case directory must contain, derived from the region table
    pub static ref REQUIRED_SUFFIXES: Vec<&'static str> = RegionKind::iter()
        .flat_map(|region| [region.extended_csv_suffix(), region.indel_distribution_suffix()])
        .collect();
}

/// Finds the case directories directly under the input directory, sorted by name.
/// A case directory is any immediate subdirectory whose name starts with one of the prefixes.
/// # Arguments
/// * `input_dir` - the aggregation input directory
/// * `case_prefixes` - accepted directory name prefixes
/// # Errors
/// * if the directory traversal fails
pub fn find_case_dirs(input_dir: &Path, case_prefixes: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut case_dirs: Vec<PathBuf> = vec![];
    for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Error while scanning {input_dir:?}:"))?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir_name = entry.file_name().to_string_lossy();
        if case_prefixes.iter().any(|prefix| dir_name.starts_with(prefix.as_str())) {
            case_dirs.push(entry.into_path());
        }
    }

    case_dirs.sort();
    Ok(case_dirs)
}

/// Checks that every required file suffix is matched in a case directory.
/// # Arguments
/// * `case_name` - the case label for error messages
/// * `file_names` - the file names present in the case directory
/// # Errors
/// * if any required suffix is unmatched; the error lists all of them
fn verify_required_files(case_name: &str, file_names: &[String]) -> anyhow::Result<()> {
    let missing: Vec<&str> = REQUIRED_SUFFIXES.iter()
        .filter(|suffix| !file_names.iter().any(|name| matches_suffix(name, suffix)))
        .copied()
        .collect();

    if !missing.is_empty() {
        bail!(
            "The following file{} missing in {case_name}: {}",
            if missing.len() > 1 { "s are" } else { " is" },
            missing.iter().join(", ")
        );
    }

    Ok(())
}

/// Finds the single file in a case directory matching a required suffix
fn find_required_file(case_dir: &Path, file_names: &[String], suffix: &str) -> anyhow::Result<PathBuf> {
    let matched: Vec<&String> = file_names.iter()
        .filter(|name| matches_suffix(name, suffix))
        .collect();
    match matched.len() {
        0 => bail!("No file matching *{suffix} in {case_dir:?}"),
        1 => Ok(case_dir.join(matched[0])),
        _ => bail!("Multiple files matching *{suffix} in {case_dir:?}: {matched:?}")
    }
}

/// Loads and parses everything for one case directory.
/// # Arguments
/// * `case_dir` - the case directory to load
/// * `base_counts` - the per-case base-count table
/// # Errors
/// * if the case has no base-count row
/// * if a required file is missing or fails to parse
pub fn load_case_benchmark(case_dir: &Path, base_counts: &BaseCountTable) -> anyhow::Result<CaseBenchmark> {
    let case_name = case_dir.file_name()
        .ok_or(anyhow!("Case directory has no name: {case_dir:?}"))?
        .to_string_lossy().to_string();

    let case_bases = base_counts.get(&case_name)
        .ok_or(anyhow!("No entry in the number of bases table for case {case_name:?}"))?;

    // snapshot the directory listing once, sorted so duplicate detection is deterministic
    let file_names: Vec<String> = std::fs::read_dir(case_dir)
        .with_context(|| format!("Error while reading {case_dir:?}:"))?
        .map(|entry| Ok(entry?.file_name().to_string_lossy().to_string()))
        .collect::<anyhow::Result<Vec<_>>>()?
        .into_iter().sorted().collect();

    verify_required_files(&case_name, &file_names)?;

    let mut regions: Vec<RegionBenchmark> = vec![];
    for region in RegionKind::iter() {
        let num_bases = case_bases.for_region(region);

        let extended_fn = find_required_file(case_dir, &file_names, region.extended_csv_suffix())?;
        let comparison = load_extended_csv(&extended_fn)
            .with_context(|| format!("Error while parsing extended CSV for case {case_name:?}:"))?;

        let distribution_fn = find_required_file(case_dir, &file_names, region.indel_distribution_suffix())?;
        let indel_by_size = load_indel_distribution(&distribution_fn)
            .with_context(|| format!("Error while parsing indel distribution for case {case_name:?}:"))?;

        regions.push(RegionBenchmark::new(num_bases, comparison.snp, comparison.indel, indel_by_size));
    }

    // RegionKind::iter() order is WholeExome then CodingExons
    let coding_exons = regions.pop().unwrap();
    let whole_exome = regions.pop().unwrap();
    Ok(CaseBenchmark::new(case_name, whole_exome, coding_exons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::benchmark_metrics::BenchmarkCounts;
    use crate::data_types::case_benchmark::IndelSizeClass;

    #[test]
    fn test_find_case_dirs() {
        let input_dir = PathBuf::from("test_data/example_metrics");
        let prefixes = vec!["NA".to_string(), "HuRef".to_string()];
        let case_dirs = find_case_dirs(&input_dir, &prefixes).unwrap();

        // sorted, and the non-case "scratch" directory is skipped
        let names: Vec<&str> = case_dirs.iter().map(|d| d.file_name().unwrap().to_str().unwrap()).collect();
        assert_eq!(names, vec!["NA12878", "NA24385"]);
    }

    #[test]
    fn test_load_example_case() {
        let input_dir = PathBuf::from("test_data/example_metrics");
        let base_counts = BaseCountTable::from_path(&input_dir.join("number_of_bases_grch38.txt")).unwrap();

        let case = load_case_benchmark(&input_dir.join("NA12878"), &base_counts).unwrap();
        assert_eq!(case.case_name(), "NA12878");

        let whole_exome = case.region(RegionKind::WholeExome);
        assert_eq!(whole_exome.num_bases(), 64000000);
        assert_eq!(whole_exome.snp().counts, BenchmarkCounts::new(4000, 3992, 4, 8));
        assert_eq!(
            whole_exome.indel_counts_for_size(IndelSizeClass::Size1To10),
            BenchmarkCounts::from_tp_fp_fn(170, 3, 6)
        );

        let coding_exons = case.region(RegionKind::CodingExons);
        assert_eq!(coding_exons.num_bases(), 32000000);
        assert_eq!(coding_exons.snp().counts, BenchmarkCounts::new(2000, 1996, 2, 4));
    }

    #[test]
    fn test_missing_required_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let case_dir = temp_dir.path().join("NA00001");
        std::fs::create_dir(&case_dir).unwrap();
        std::fs::write(case_dir.join("NA00001_WholeExomeRegions.extended.csv"), ",METRIC.x\n").unwrap();

        std::fs::write(temp_dir.path().join("number_of_bases.txt"), "NA00001\t100\t50\n").unwrap();
        let base_counts_fn = BaseCountTable::find_in_dir(temp_dir.path()).unwrap();
        let base_counts = BaseCountTable::from_path(&base_counts_fn).unwrap();

        let error = load_case_benchmark(&case_dir, &base_counts).unwrap_err().to_string();
        assert!(error.contains("files are missing in NA00001"));
        assert!(error.contains("WholeExomeRegions_indelSizeDistribution.txt"));
        assert!(error.contains("CodingExons.extended.csv"));
        assert!(!error.contains("WholeExomeRegions.extended.csv,"));
    }

    #[test]
    fn test_unlisted_case() {
        let base_counts = BaseCountTable::default();
        let error = load_case_benchmark(&PathBuf::from("test_data/example_metrics/NA12878"), &base_counts)
            .unwrap_err().to_string();
        assert!(error.contains("No entry in the number of bases table"));
    }
}
