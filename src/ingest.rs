//! Directory ingestion: container files in, alert records out

use crate::config::IngestConfig;
use crate::decoder::ContainerDecoder;
use crate::error::{AlertError, Result};
use crate::types::{AlertBatch, AlertRecord};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

const BUFFER_PREFIX: &str = "alertEmail";
const BUFFER_SUFFIX: &str = ".txt";

/// A file that was left out of the batch, and why
#[derive(Debug)]
pub struct SkippedFile {
    pub file: PathBuf,
    pub reason: AlertError,
}

/// Result of processing a single container file
#[derive(Debug)]
pub enum FileOutcome {
    Ingested(AlertRecord),
    Skipped(SkippedFile),
}

/// Batch plus the files that did not make it in
#[derive(Debug, Default)]
pub struct IngestReport {
    pub batch: AlertBatch,
    pub skipped: Vec<SkippedFile>,
}

impl IngestReport {
    /// Number of candidate files seen by the run
    #[must_use]
    pub const fn candidates(&self) -> usize {
        self.batch.len() + self.skipped.len()
    }

    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Ingested(record) => self.batch.push(record),
            FileOutcome::Skipped(skipped) => self.skipped.push(skipped),
        }
    }
}

/// Reads a directory of container files into an [`AlertBatch`]
#[derive(Debug, Clone)]
pub struct BatchIngester<D> {
    decoder: D,
    config: IngestConfig,
}

impl<D: ContainerDecoder> BatchIngester<D> {
    #[must_use]
    pub const fn new(decoder: D, config: IngestConfig) -> Self {
        Self { decoder, config }
    }

    /// Ingest every candidate file in `dir`.
    ///
    /// Files that fail to decode or have an empty body are skipped with a
    /// warning. Only an invalid `dir` is an error.
    pub fn ingest(&self, dir: &Path) -> Result<AlertBatch> {
        self.ingest_with_report(dir).map(|report| report.batch)
    }

    /// Like [`Self::ingest`], also returning the skipped files
    pub fn ingest_with_report(&self, dir: &Path) -> Result<IngestReport> {
        let candidates = list_candidates(dir, &self.config)?;
        info!(
            "Found {} candidate files in {}",
            candidates.len(),
            dir.display()
        );

        let mut report = IngestReport::default();
        if candidates.is_empty() {
            return Ok(report);
        }

        let workers = self.config.workers.get().min(candidates.len());
        if workers == 1 {
            for path in &candidates {
                report.record(self.process_file(path));
            }
        } else {
            for outcome in self.process_parallel(&candidates, workers) {
                report.record(outcome);
            }
        }

        info!(
            "Ingested {} alerts, skipped {} files",
            report.batch.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Decode, buffer and extract one file; never fails the batch
    pub fn process_file(&self, path: &Path) -> FileOutcome {
        match self.try_process(path) {
            Ok(record) => {
                debug!("Parsed alert: {record}");
                FileOutcome::Ingested(record)
            }
            Err(reason) => {
                warn!("Skipping {}: {reason}", path.display());
                FileOutcome::Skipped(SkippedFile {
                    file: path.to_path_buf(),
                    reason,
                })
            }
        }
    }

    fn try_process(&self, path: &Path) -> Result<AlertRecord> {
        let decoded = self.decoder.decode(path)?;
        let body = decoded.usable_body().ok_or_else(|| AlertError::EmptyBody {
            file: path.to_path_buf(),
        })?;

        let buffer_error = |source| AlertError::Buffer {
            file: path.to_path_buf(),
            source,
        };
        let buffer = TextBuffer::write(body, self.config.buffer_dir()).map_err(buffer_error)?;
        let text = buffer.read().map_err(buffer_error)?;

        let original_filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(AlertRecord::build(
            &text,
            buffer.path().display().to_string(),
            original_filename,
            decoded.message_id.unwrap_or_default(),
        ))
    }

    /// Fan files out to `workers` threads; outcomes come back in listing order
    fn process_parallel(&self, candidates: &[PathBuf], workers: usize) -> Vec<FileOutcome> {
        let next = AtomicUsize::new(0);
        let mut slots: Vec<Option<FileOutcome>> = candidates.iter().map(|_| None).collect();
        let (tx, rx) = mpsc::channel();

        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let next = &next;
                scope.spawn(move || {
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(path) = candidates.get(index) else {
                            break;
                        };
                        if tx.send((index, self.process_file(path))).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);

            for (index, outcome) in rx {
                if let Some(slot) = slots.get_mut(index) {
                    *slot = Some(outcome);
                }
            }
        });

        slots.into_iter().flatten().collect()
    }
}

/// List files in `dir` carrying the configured extension, sorted by name
pub fn list_candidates(dir: &Path, config: &IngestConfig) -> Result<Vec<PathBuf>> {
    let invalid = || AlertError::InvalidDirectory {
        path: dir.to_path_buf(),
    };

    if !dir.is_dir() {
        return Err(invalid());
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|_| invalid())?
        .filter_map(|entry| {
            entry
                .inspect_err(|e| warn!("Skipping unreadable entry in {}: {e}", dir.display()))
                .ok()
        })
        .filter(|entry| config.matches(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(candidates)
}

/// Scratch file holding one body text; deleted when dropped
struct TextBuffer {
    file: NamedTempFile,
}

impl TextBuffer {
    fn write(body: &str, dir: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(BUFFER_PREFIX).suffix(BUFFER_SUFFIX);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(body.as_bytes())?;
        file.flush()?;

        Ok(Self { file })
    }

    fn path(&self) -> &Path {
        self.file.path()
    }

    fn read(&self) -> io::Result<String> {
        fs::read_to_string(self.path())
    }
}
