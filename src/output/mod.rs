mod progress;
mod styling;
mod summary;
mod tables;

pub use progress::FetchProgress;
pub use summary::{render_git_info, render_state_summary};

use styling::{dim, magenta_bold};

/// Prints the `PipeLens` banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🔭 PipeLens"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("CodePipeline state and git provenance")
    );
}
