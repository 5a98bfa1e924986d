/*!
# Data types module
Contains the shared data types for benchmark metrics and variant identity.
*/
/// Contains the confusion counts and the derived metric calculations
pub mod benchmark_metrics;
/// Contains the per-case and per-region result containers plus their enumerations
pub mod case_benchmark;
/// Contains the textual variant identity used by the truth-set validator
pub mod variant_key;
