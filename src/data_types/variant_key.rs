
#[derive(thiserror::Error, Debug)]
pub enum VariantKeyError {
    #[error("line has {found} tab-separated columns, at least {required} are required")]
    TooFewColumns { required: usize, found: usize }
}

/// Textual identity of a variant call.
/// Fields are compared exactly as written; there is no normalization of positions or alleles.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariantKey {
    /// Chromosome name
    pub chrom: String,
    /// Position, kept textual so "007" and "7" stay distinct
    pub position: String,
    /// Reference allele
    pub ref_allele: String,
    /// Alternate allele
    pub alt_allele: String,
    /// FILTER value the call was recorded with
    pub filter: String
}

impl VariantKey {
    /// Parses a truth table line, which has chromosome, position, REF, ALT, and FILTER in columns 0-4.
    /// # Arguments
    /// * `line` - one non-comment line from the truth table
    /// # Errors
    /// * if the line has fewer than five columns
    pub fn from_truth_line(line: &str) -> Result<Self, VariantKeyError> {
        let columns: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        if columns.len() < 5 {
            return Err(VariantKeyError::TooFewColumns { required: 5, found: columns.len() });
        }

        Ok(Self {
            chrom: columns[0].to_string(),
            position: columns[1].to_string(),
            ref_allele: columns[2].to_string(),
            alt_allele: columns[3].to_string(),
            filter: columns[4].to_string()
        })
    }

    /// Parses a VCF record line, taking CHROM, POS, REF, ALT, and FILTER from their fixed columns.
    /// # Arguments
    /// * `line` - one non-header line from a VCF file
    /// # Errors
    /// * if the line has fewer than seven columns
    pub fn from_vcf_line(line: &str) -> Result<Self, VariantKeyError> {
        let columns: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        if columns.len() < 7 {
            return Err(VariantKeyError::TooFewColumns { required: 7, found: columns.len() });
        }

        Ok(Self {
            chrom: columns[0].to_string(),
            position: columns[1].to_string(),
            ref_allele: columns[3].to_string(),
            alt_allele: columns[4].to_string(),
            filter: columns[6].to_string()
        })
    }
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}>{} [{}]", self.chrom, self.position, self.ref_allele, self.alt_allele, self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truth_line() {
        let key = VariantKey::from_truth_line("chr7\t117199644\tATCT\tA\tPASS\n").unwrap();
        assert_eq!(key, VariantKey {
            chrom: "chr7".to_string(),
            position: "117199644".to_string(),
            ref_allele: "ATCT".to_string(),
            alt_allele: "A".to_string(),
            filter: "PASS".to_string()
        });
        assert_eq!(key.to_string(), "chr7:117199644 ATCT>A [PASS]");
    }

    #[test]
    fn test_vcf_line() {
        let line = "chr7\t117227792\trs13245\tG\tA\t50\tPASS\tDP=20\tGT\t0/1";
        let key = VariantKey::from_vcf_line(line).unwrap();
        assert_eq!(key.ref_allele, "G");
        assert_eq!(key.alt_allele, "A");
        assert_eq!(key.filter, "PASS");
    }

    #[test]
    fn test_short_lines() {
        let result = VariantKey::from_truth_line("chr7\t100\tA\tC");
        assert!(matches!(result, Err(VariantKeyError::TooFewColumns { required: 5, found: 4 })));

        let result = VariantKey::from_vcf_line("chr7\t100\t.\tA\tC\t30");
        assert!(matches!(result, Err(VariantKeyError::TooFewColumns { required: 7, found: 6 })));
    }
}
