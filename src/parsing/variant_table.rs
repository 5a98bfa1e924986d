
use anyhow::{bail, Context};
use rustc_hash::FxHashSet;
use std::io::BufRead;
use std::path::Path;

use crate::data_types::variant_key::VariantKey;

/// FILTER value a VCF record must carry to count as a passing variant
pub const PASS_FILTER: &str = "PASS";

/// The parsed truth table: a variant key set pinned to a single chromosome
#[derive(Clone, Debug)]
pub struct TruthSet {
    /// The chromosome every truth variant sits on
    pub chromosome: String,
    /// The truth variant keys
    pub variants: FxHashSet<VariantKey>
}

/// Result of checking a truth set against a VCF's passing variants
#[derive(Clone, Debug)]
pub struct VerifyOutcome {
    /// Number of truth variants found in the VCF
    pub matched: usize,
    /// Truth variants absent from the VCF, sorted for stable output
    pub missing: Vec<VariantKey>
}

impl VerifyOutcome {
    /// True when every truth variant was found
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Loads the truth table: tab-separated variant rows, '#' comment lines ignored.
/// # Arguments
/// * `filename` - the truth table to parse
/// # Errors
/// * if the file does not open or a row does not parse
/// * if the table is empty or spans more than one chromosome
pub fn load_truth_table(filename: &Path) -> anyhow::Result<TruthSet> {
    let reader = crate::parsing::text_reader::open_text_reader(filename)?;

    let mut chromosome: Option<String> = None;
    let mut variants: FxHashSet<VariantKey> = Default::default();
    for (line_index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Error while reading {filename:?}"))?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let key = VariantKey::from_truth_line(&line)
            .with_context(|| format!("Error while parsing line {} of {filename:?}:", line_index + 1))?;

        match chromosome.as_deref() {
            None => chromosome = Some(key.chrom.clone()),
            Some(chrom) if chrom != key.chrom => {
                bail!(
                    "Truth table {filename:?} spans multiple chromosomes: {chrom:?} and {:?} (line {})",
                    key.chrom, line_index + 1
                );
            },
            Some(_) => {}
        }
        variants.insert(key);
    }

    let chromosome = match chromosome {
        Some(c) => c,
        None => bail!("Truth table {filename:?} contains no variants")
    };

    Ok(TruthSet {
        chromosome, variants
    })
}

/// Loads the passing variant keys on one chromosome from a VCF file.
/// Records are tab-split on their fixed columns only; no further VCF interpretation happens.
/// # Arguments
/// * `filename` - the VCF to scan, plain or gzipped
/// * `chromosome` - the chromosome of interest
/// # Errors
/// * if the file does not open or a matching record does not split into enough columns
pub fn load_passing_variants(filename: &Path, chromosome: &str) -> anyhow::Result<FxHashSet<VariantKey>> {
    let reader = crate::parsing::text_reader::open_text_reader(filename)?;
    let chrom_prefix = format!("{chromosome}\t");

    let mut variants: FxHashSet<VariantKey> = Default::default();
    for (line_index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Error while reading {filename:?}"))?;
        if line.starts_with('#') || !line.starts_with(&chrom_prefix) {
            continue;
        }

        let key = VariantKey::from_vcf_line(&line)
            .with_context(|| format!("Error while parsing line {} of {filename:?}:", line_index + 1))?;
        if key.filter == PASS_FILTER {
            variants.insert(key);
        }
    }

    Ok(variants)
}

/// Checks whether the truth set is fully contained in the passing variant set.
/// # Arguments
/// * `truth` - the parsed truth table
/// * `passing_variants` - the VCF's passing variant keys
pub fn check_containment(truth: &TruthSet, passing_variants: &FxHashSet<VariantKey>) -> VerifyOutcome {
    let mut matched = 0;
    let mut missing: Vec<VariantKey> = vec![];
    for key in truth.variants.iter() {
        if passing_variants.contains(key) {
            matched += 1;
        } else {
            missing.push(key.clone());
        }
    }
    missing.sort();

    VerifyOutcome {
        matched, missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn example_path(name: &str) -> PathBuf {
        PathBuf::from("test_data/example_verify").join(name)
    }

    #[test]
    fn test_load_truth_table() {
        let truth = load_truth_table(&example_path("truth_chr7.txt")).unwrap();
        assert_eq!(truth.chromosome, "chr7");
        assert_eq!(truth.variants.len(), 3);
    }

    #[test]
    fn test_load_passing_variants() {
        let variants = load_passing_variants(&example_path("complete.vcf"), "chr7").unwrap();

        // only PASS records on chr7 survive
        assert_eq!(variants.len(), 3);
        assert!(variants.iter().all(|v| v.chrom == "chr7" && v.filter == PASS_FILTER));
    }

    #[test]
    fn test_containment_pass() {
        let truth = load_truth_table(&example_path("truth_chr7.txt")).unwrap();
        let variants = load_passing_variants(&example_path("complete.vcf"), &truth.chromosome).unwrap();

        let outcome = check_containment(&truth, &variants);
        assert!(outcome.passed());
        assert_eq!(outcome.matched, 3);
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_containment_fail() {
        let truth = load_truth_table(&example_path("truth_chr7.txt")).unwrap();
        let variants = load_passing_variants(&example_path("missing_one.vcf"), &truth.chromosome).unwrap();

        let outcome = check_containment(&truth, &variants);
        assert!(!outcome.passed());
        assert_eq!(outcome.matched, 2);
        assert_eq!(outcome.missing.len(), 1);
        // the missing record is present in the VCF but filtered, so it must not count
        assert_eq!(outcome.missing[0].position, "117227792");
    }

    #[test]
    fn test_mixed_chromosomes_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let filename = temp_dir.path().join("mixed.txt");
        std::fs::write(&filename, "chr7\t100\tA\tC\tPASS\nchr8\t200\tG\tT\tPASS\n").unwrap();

        let error = load_truth_table(&filename).unwrap_err().to_string();
        assert!(error.contains("spans multiple chromosomes"));
    }

    #[test]
    fn test_empty_truth_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let filename = temp_dir.path().join("empty.txt");
        std::fs::write(&filename, "# chrom\tpos\tref\talt\tfilter\n").unwrap();

        let error = load_truth_table(&filename).unwrap_err().to_string();
        assert!(error.contains("contains no variants"));
    }
}
