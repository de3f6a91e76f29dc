use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use csv::{QuoteStyle, Writer, WriterBuilder};
use log::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::generator::RowGenerator;
use crate::record::{Record, HEADER};

const PROGRESS_INTERVAL: u64 = 100_000;

/// Outcome of a completed [`write_table`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub rows_written: u64,
    /// Size of the finished file
    pub bytes_written: u64,
    pub elapsed: Duration,
}

impl WriteSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rows_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.rows_written as f64 / secs
        } else {
            0.0
        }
    }
}

/// The header is written by hand so that an empty table still gets one.
#[must_use]
pub fn csv_writer<W: io::Write>(sink: W) -> Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(sink)
}

/// Writes the header followed by every record, returning the number of data
/// rows written.
///
/// # Errors
/// Errors when a record cannot be serialized or the sink fails
pub fn write_records<W: io::Write>(
    records: impl IntoIterator<Item = Record>,
    writer: &mut Writer<W>,
) -> Result<u64, GenError> {
    writer.write_record(HEADER)?;
    let mut rows = 0_u64;
    for record in records {
        writer.serialize(&record)?;
        rows += 1;
        if rows % PROGRESS_INTERVAL == 0 {
            debug!("Written {} rows", rows);
        }
    }
    writer.flush()?;
    Ok(rows)
}

/// Writes `records` to `destination`, truncating it if it exists.
///
/// Either every record ends up in the destination or an error is returned.
/// A regular file left incomplete by a failed write is removed; pipes, devices
/// and symlinks are never unlinked.
///
/// # Errors
/// Errors when the destination cannot be created or any write fails
pub fn write_table<P: AsRef<Path>>(
    records: impl IntoIterator<Item = Record>,
    destination: P,
) -> Result<WriteSummary, GenError> {
    let destination = destination.as_ref();
    let start = Instant::now();
    info!("Writing table to {}", destination.display());

    let file = fs::File::create(destination)?;
    let (rows_written, bytes_written) = match stream_to_file(records, file) {
        Ok(counts) => counts,
        Err(e) => {
            remove_incomplete(destination);
            return Err(e);
        }
    };

    let summary = WriteSummary {
        rows_written,
        bytes_written,
        elapsed: start.elapsed(),
    };
    info!(
        "Wrote {} rows, {} bytes in {:.2?} ({:.0} rows/sec)",
        summary.rows_written,
        summary.bytes_written,
        summary.elapsed,
        summary.rows_per_second()
    );
    Ok(summary)
}

/// The file handle is dropped on every return path.
fn stream_to_file(
    records: impl IntoIterator<Item = Record>,
    file: fs::File,
) -> Result<(u64, u64), GenError> {
    // sync_all fails with EINVAL on pipes and ttys
    let regular = file.metadata()?.is_file();
    let mut writer = csv_writer(CountingWriter::new(file));
    let rows = write_records(records, &mut writer)?;
    let counting = writer.into_inner().map_err(|e| e.into_error())?;
    let bytes = counting.bytes_written();
    if regular {
        counting.inner.sync_all()?;
    }
    Ok((rows, bytes))
}

fn remove_incomplete(destination: &Path) {
    match fs::symlink_metadata(destination) {
        Ok(meta) if meta.is_file() => match fs::remove_file(destination) {
            Ok(()) => warn!("Removed incomplete file {}", destination.display()),
            Err(e) => warn!(
                "Could not remove incomplete file {}: {}",
                destination.display(),
                e
            ),
        },
        Ok(_) => warn!(
            "Left {} in place, it is not a regular file",
            destination.display()
        ),
        Err(e) => warn!("Could not inspect {}: {}", destination.display(), e),
    }
}

#[derive(Debug)]
struct CountingWriter<W: io::Write> {
    inner: W,
    bytes: u64,
}

impl<W: io::Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: io::Write> io::Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Generates `config.rows` records and streams them into `config.output`.
///
/// # Errors
/// Errors when the vocabulary is unusable or the table cannot be written
pub fn generate_table(config: &GeneratorConfig) -> Result<WriteSummary, GenError> {
    let generator = RowGenerator::new(&config.vocabulary, config.rng())?;
    write_table(generator.generate_all(config.rows), &config.output)
}
