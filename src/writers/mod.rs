/*!
# Writers module
Contains the logic for writing the aggregation report.
*/
/// Generates the final benchmarking metrics report
pub mod benchmark_report;
