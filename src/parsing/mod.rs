/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// Parser for the per-case base-count table
pub mod base_counts;
/// Handles case directory discovery and required-file checks
pub mod case_scan;
/// Parser for the extended comparison CSV files
pub mod extended_csv;
/// Parser for the indel size distribution files
pub mod indel_distribution;
/// Helper functions for buffered, optionally gzipped text input
pub mod text_reader;
/// Parsers for the truth table and VCF passing variants, plus the containment check
pub mod variant_table;
