//! Driving [`Html2Csv`] over files.
//!
//! HTML is read in blocks of [`Options::chunk_size`] bytes, decoded as UTF-8 (invalid sequences
//! become U+FFFD), fed to the converter, and whatever CSV is finished after each block is written
//! out immediately. Memory use therefore does not grow with the size of the document.
use std::char::REPLACEMENT_CHARACTER;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::mem::take;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{Error, Html2Csv};

/// Read size used when nothing else is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Settings for converting files.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    /// How many bytes of HTML to read before pulling CSV out of the converter. Zero is treated
    /// as one.
    pub chunk_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// A file that was converted successfully.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Converted {
    /// The HTML file.
    pub input: PathBuf,
    /// The CSV file written.
    pub output: PathBuf,
    /// Number of CSV records written.
    pub rows: usize,
}

/// A file that could not be converted.
#[derive(Debug)]
pub struct Failed {
    /// The matched path.
    pub input: PathBuf,
    /// Why it failed.
    pub error: Error,
}

/// Outcome of [`convert_glob`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files converted, in match order.
    pub converted: Vec<Converted>,
    /// Files that failed, in match order.
    pub failed: Vec<Failed>,
}

impl BatchReport {
    /// Whether the pattern matched no files at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converted.is_empty() && self.failed.is_empty()
    }

    /// Total number of CSV records written across all files.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.converted.iter().map(|c| c.rows).sum()
    }
}

/// Derive the CSV file name for an HTML file by replacing its extension.
///
/// ```
/// use std::path::Path;
/// use html2csv::batch::output_path;
///
/// assert_eq!(output_path(Path::new("pages/report.html")), Path::new("pages/report.csv"));
/// assert_eq!(output_path(Path::new("README")), Path::new("README.csv"));
/// ```
#[must_use]
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("csv")
}

/// Convert HTML from `input` to CSV written to `output`, returning the number of records.
///
/// A UTF-8 sequence split between two reads is reassembled, so the block size never shows in
/// the output.
pub fn convert_reader<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    options: &Options,
) -> io::Result<usize> {
    let mut converter = Html2Csv::new();
    let mut decoder = Utf8Decoder::default();
    let mut buf = vec![0; options.chunk_size.max(1)];
    let mut text = String::new();

    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        text.clear();
        decoder.decode(&buf[..n], &mut text);
        converter.feed(&text);
        output.write_all(converter.pull_output(false).as_bytes())?;
        debug!(rows = converter.row_count(), "CSV rows written");
    }

    text.clear();
    decoder.finish(&mut text);
    converter.feed(&text);
    output.write_all(converter.pull_output(true).as_bytes())?;
    output.flush()?;
    Ok(converter.row_count())
}

/// Convert the HTML file `input` into the CSV file `output`, returning the number of records.
pub fn convert_file(input: &Path, output: &Path, options: &Options) -> Result<usize, Error> {
    if input == output {
        return Err(Error::OutputIsInput {
            path: input.to_owned(),
        });
    }

    let html = File::open(input).map_err(|source| Error::Open {
        path: input.to_owned(),
        source,
    })?;
    let csv = File::create(output).map_err(|source| Error::Create {
        path: output.to_owned(),
        source,
    })?;

    convert_reader(html, BufWriter::new(csv), options).map_err(|source| Error::Convert {
        path: input.to_owned(),
        source,
    })
}

/// Convert every file matching the glob `pattern`, each into a CSV file next to it (see
/// [`output_path`]).
///
/// A file that fails is logged and recorded in the report, and the batch continues with the next
/// one. Directories matched by the pattern are skipped. Only a malformed pattern fails the whole
/// call.
pub fn convert_glob(pattern: &str, options: &Options) -> Result<BatchReport, Error> {
    let mut report = BatchReport::default();

    for entry in glob::glob(pattern)? {
        let input = match entry {
            Ok(input) => input,
            Err(error) => {
                warn!(path = %error.path().display(), %error, "skipping unreadable path");
                report.failed.push(Failed {
                    input: error.path().to_owned(),
                    error: Error::Glob(error),
                });
                continue;
            }
        };

        if input.is_dir() {
            debug!(path = %input.display(), "skipping directory");
            continue;
        }

        let output = output_path(&input);
        info!(input = %input.display(), output = %output.display(), "converting");
        match convert_file(&input, &output, options) {
            Ok(rows) => {
                info!(input = %input.display(), rows, "CSV rows written");
                report.converted.push(Converted {
                    input,
                    output,
                    rows,
                });
            }
            Err(error) => {
                warn!(input = %input.display(), %error, "error converting");
                report.failed.push(Failed { input, error });
            }
        }
    }

    Ok(report)
}

/// Lossy UTF-8 decoder for a byte stream arriving in arbitrary blocks.
#[derive(Debug, Default)]
struct Utf8Decoder {
    /// Start of a multi-byte sequence cut off at the end of the previous block.
    incomplete: Vec<u8>,
}

impl Utf8Decoder {
    fn decode(&mut self, bytes: &[u8], out: &mut String) {
        let joined;
        let mut input = if self.incomplete.is_empty() {
            bytes
        } else {
            let mut carried = take(&mut self.incomplete);
            carried.extend_from_slice(bytes);
            joined = carried;
            &joined[..]
        };

        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(error) => {
                    let (valid, rest) = input.split_at(error.valid_up_to());
                    // `valid` is well-formed, so this never allocates
                    out.push_str(&String::from_utf8_lossy(valid));
                    match error.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT_CHARACTER);
                            input = &rest[len..];
                        }
                        None => {
                            self.incomplete.extend_from_slice(rest);
                            break;
                        }
                    }
                }
            }
        }
    }

    fn finish(&mut self, out: &mut String) {
        if !self.incomplete.is_empty() {
            out.push(REPLACEMENT_CHARACTER);
            self.incomplete.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode_in_blocks(bytes: &[u8], block: usize) -> String {
        let mut decoder = Utf8Decoder::default();
        let mut out = String::new();
        for chunk in bytes.chunks(block) {
            decoder.decode(chunk, &mut out);
        }
        decoder.finish(&mut out);
        out
    }

    #[test]
    fn test_decoder_reassembles_split_sequences() {
        let text = "zoë · 東京 · 🦀";
        for block in 1..=text.len() {
            assert_eq!(decode_in_blocks(text.as_bytes(), block), text, "block={}", block);
        }
    }

    #[test]
    fn test_decoder_replaces_invalid_bytes() {
        assert_eq!(decode_in_blocks(b"a\xffb", 1), "a\u{fffd}b");
        assert_eq!(decode_in_blocks(b"a\xffb", 8), "a\u{fffd}b");
    }

    #[test]
    fn test_decoder_replaces_truncated_sequence_at_end() {
        assert_eq!(decode_in_blocks(b"ok\xe6\x9d", 2), "ok\u{fffd}");
    }

    #[test]
    fn test_convert_reader_counts_rows() {
        let html = "<table><tr><td>1</td></tr><tr><td>2</td></tr></table>";
        let mut csv = Vec::new();
        let rows = convert_reader(html.as_bytes(), &mut csv, &Options { chunk_size: 3 }).unwrap();
        assert_eq!(rows, 2);
        assert_eq!(String::from_utf8(csv).unwrap(), "\"1\"\n\"2\"\n");
    }

    #[test]
    fn test_zero_chunk_size_is_usable() {
        let mut csv = Vec::new();
        let rows =
            convert_reader("<td>x".as_bytes(), &mut csv, &Options { chunk_size: 0 }).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(String::from_utf8(csv).unwrap(), "\"x\"\n");
    }
}
