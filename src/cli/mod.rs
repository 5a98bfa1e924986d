/*!
# CLI module
Command line interface functionality that is specific to Exomark.
*/
/// The main CLI module that contains the top-level CLI parser
pub mod core;
/// The aggregate CLI subcommand
pub mod aggregate;
/// The verify CLI subcommand
pub mod verify;
