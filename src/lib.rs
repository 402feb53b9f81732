// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Rail Alert Extraction
//!
//! Reads a directory of exported Outlook `.msg` alert emails, pulls the
//! detection time, location and direction out of each plain-text body, and
//! writes the whole batch as one JSON document.
//!
//! Per-file problems (corrupt container, empty body) are logged and the file
//! is skipped; only an invalid input directory or a failed output write stops
//! a run.
//!
//! # Example
//!
//! ```rust
//! use alert_extract::{AlertRecord, UNKNOWN};
//!
//! let body = "Time of detection: 2024-01-01 08:00\nLocation: Main St\nDirection: E";
//! let alert = AlertRecord::build(body, "", "alert.msg", "");
//!
//! assert_eq!(alert.location(), "Main St");
//! assert_ne!(alert.direction(), UNKNOWN);
//! ```

mod config;
mod decoder;
mod emit;
mod error;
mod extract;
mod ingest;
mod types;

pub use config::{DEFAULT_EXTENSION, IngestConfig};
pub use decoder::{ContainerDecoder, DecodedMessage, MsgDecoder};
pub use emit::{OUTPUT_FILE_NAME, batch_to_json, load_batch, record_to_json, save_batch, write_json};
pub use error::{AlertError, Result};
pub use extract::{Marker, extract_field};
pub use ingest::{BatchIngester, FileOutcome, IngestReport, SkippedFile, list_candidates};
pub use types::{AlertBatch, AlertRecord, UNKNOWN};
