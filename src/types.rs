//! Core types for parsed alerts

use crate::extract::Marker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel stored in a field whose marker was not found
pub const UNKNOWN: &str = "UNKNOWN";

/// One alert parsed from one email body
///
/// Serialized keys and their order are fixed: `msgId`, `originalFilename`,
/// `timestamp`, `location`, `direction`, `rawText`, `imagePath`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    msg_id: String,
    original_filename: String,
    timestamp: String,
    location: String,
    direction: String,
    raw_text: String,
    image_path: String,
}

impl AlertRecord {
    /// Build a record from one body text and its file identity.
    ///
    /// Missing markers become [`UNKNOWN`]; `body` is kept verbatim as the raw text.
    #[must_use]
    pub fn build(
        body: &str,
        source_path: impl Into<String>,
        original_filename: impl Into<String>,
        message_id: impl Into<String>,
    ) -> Self {
        let field = |marker: Marker| {
            marker
                .find_in(body)
                .filter(|value| !value.is_empty())
                .unwrap_or(UNKNOWN)
                .to_string()
        };

        Self {
            msg_id: message_id.into(),
            original_filename: original_filename.into(),
            timestamp: field(Marker::TimeOfDetection),
            location: field(Marker::Location),
            direction: field(Marker::Direction),
            raw_text: body.to_string(),
            image_path: source_path.into(),
        }
    }

    /// Correlation id from the container, possibly empty
    #[must_use]
    pub const fn msg_id(&self) -> &str {
        self.msg_id.as_str()
    }

    #[must_use]
    pub const fn original_filename(&self) -> &str {
        self.original_filename.as_str()
    }

    #[must_use]
    pub const fn timestamp(&self) -> &str {
        self.timestamp.as_str()
    }

    #[must_use]
    pub const fn location(&self) -> &str {
        self.location.as_str()
    }

    #[must_use]
    pub const fn direction(&self) -> &str {
        self.direction.as_str()
    }

    /// The full body text the record was extracted from
    #[must_use]
    pub const fn raw_text(&self) -> &str {
        self.raw_text.as_str()
    }

    /// Path of the intermediate text buffer (diagnostic only)
    #[must_use]
    pub const fn source_path(&self) -> &str {
        self.image_path.as_str()
    }

    /// Value of a semantic field by marker
    #[must_use]
    pub const fn field(&self, marker: Marker) -> &str {
        match marker {
            Marker::TimeOfDetection => self.timestamp(),
            Marker::Location => self.location(),
            Marker::Direction => self.direction(),
        }
    }

    /// Check if any marker was missing from the body
    #[must_use]
    pub fn has_unknown_fields(&self) -> bool {
        Marker::ALL
            .iter()
            .any(|marker| self.field(*marker) == UNKNOWN)
    }
}

impl fmt::Display for AlertRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} / {} / {}]",
            self.original_filename, self.timestamp, self.location, self.direction
        )
    }
}

/// Ordered alerts produced by one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertBatch(Vec<AlertRecord>);

impl AlertBatch {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, record: AlertRecord) {
        self.0.push(record);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlertRecord> {
        self.0.iter()
    }

    #[must_use]
    pub const fn records(&self) -> &[AlertRecord] {
        self.0.as_slice()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<AlertRecord> {
        self.0
    }
}

impl From<Vec<AlertRecord>> for AlertBatch {
    fn from(records: Vec<AlertRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<AlertRecord> for AlertBatch {
    fn from_iter<I: IntoIterator<Item = AlertRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AlertBatch {
    type Item = AlertRecord;
    type IntoIter = std::vec::IntoIter<AlertRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AlertBatch {
    type Item = &'a AlertRecord;
    type IntoIter = std::slice::Iter<'a, AlertRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
