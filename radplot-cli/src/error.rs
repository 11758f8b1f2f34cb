use std::path::PathBuf;

use miette::Diagnostic;
use radplot_core::PlotError;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Cannot solve plot: {0}")]
    #[diagnostic(code(radplot::plot))]
    Plot(#[from] PlotError),

    #[error("Cannot access {}", .path.display())]
    #[diagnostic(code(radplot::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read plot state {}", .path.display())]
    #[diagnostic(
        code(radplot::state),
        help("Run `radplot init --force` to replace it with the default plot")
    )]
    StateFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Plot state {} already exists", .0.display())]
    #[diagnostic(code(radplot::state), help("Pass --force to overwrite it"))]
    StateExists(PathBuf),

    #[error("No contact {index}: the plot has {count}")]
    #[diagnostic(code(radplot::target))]
    NoSuchTarget { index: usize, count: usize },

    #[error("No home directory found for the plot state")]
    #[diagnostic(code(radplot::config), help("Pass --state <FILE> explicitly"))]
    NoDataDir,

    #[error("Cannot write output")]
    #[diagnostic(code(radplot::output))]
    Output(#[from] serde_json::Error),
}
