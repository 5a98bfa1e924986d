/// Helper function for writing JSON via serde
pub mod json_io;
/// Helper function for generating the progress bars
pub mod progress_bar;
