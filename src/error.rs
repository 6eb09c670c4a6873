use std::io;
use std::path::PathBuf;

/// Failures of the file-level driver in [`crate::batch`].
///
/// Converting HTML itself never fails, so every variant is about the filesystem or the glob
/// pattern. A batch records these per file and moves on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTML file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        /// The input file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The CSV file could not be created.
    #[error("cannot create {}: {source}", .path.display())]
    Create {
        /// The output file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading HTML or writing CSV failed halfway through.
    #[error("error converting {}: {source}", .path.display())]
    Convert {
        /// The input file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Deriving the output name from the input name would overwrite the input, e.g. for
    /// `table.csv`.
    #[error("refusing to overwrite input {} with its own CSV", .path.display())]
    OutputIsInput {
        /// The input file.
        path: PathBuf,
    },

    /// The glob pattern is malformed.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A path matched by the glob pattern could not be read.
    #[error("cannot read matched path: {0}")]
    Glob(#[from] glob::GlobError),
}
