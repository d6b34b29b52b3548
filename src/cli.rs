use clap::Parser;

/// Regenerates the golden fixture files for the proto code generator tests.
///
/// A run always refreshes every fixture family in full; there are no
/// meaningful flags. Run from the repository root.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {}
