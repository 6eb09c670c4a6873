//! html2csv - a coarse HTML tables to CSV converter.
//!
//! ```text
//! html2csv 'reports/*.html'
//! ```
//!
//! converts every matched file to a CSV file with the same name and the `csv` extension
//! (`source.html -> source.csv`). Logging goes to stderr and honors `RUST_LOG`.
use std::process::ExitCode;

use argh::FromArgs;
use html2csv::batch::{convert_glob, Options, DEFAULT_CHUNK_SIZE};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// A coarse HTML tables to CSV converter. Every file matching the pattern is converted to a CSV
/// file with the same name and the csv extension (source.html -> source.csv). You can use * and ?.
struct Args {
    /// number of bytes of HTML to read at a time
    #[argh(option, default = "DEFAULT_CHUNK_SIZE")]
    chunk_size: usize,

    /// only report failures
    #[argh(switch, short = 'q')]
    quiet: bool,

    /// the HTML file(s) to convert, e.g. mypage.html or '*.html'
    #[argh(positional)]
    pattern: String,
}

fn init_logging(quiet: bool) {
    let default_filter = if quiet { "warn" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    init_logging(args.quiet);

    if !args.quiet {
        println!("html2csv {}", env!("CARGO_PKG_VERSION"));
    }

    let options = Options {
        chunk_size: args.chunk_size,
    };
    let report = match convert_glob(&args.pattern, &options) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    if report.is_empty() {
        error!(pattern = %args.pattern, "no files match");
        return ExitCode::from(2);
    }

    if !args.quiet {
        println!(
            "{} file(s) converted, {} CSV rows written, {} failed. All done.",
            report.converted.len(),
            report.total_rows(),
            report.failed.len()
        );
    }

    if report.failed.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
