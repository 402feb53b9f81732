//! Marker-based field extraction from alert email bodies
//!
//! Alert emails carry their data as plain lines:
//!
//! ```text
//! Time of detection: YYYY-MM-DD HH:MM
//! Location: x
//! Direction: E/W
//! ```

use std::fmt;

/// A fixed line prefix identifying one structured field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    TimeOfDetection,
    Location,
    Direction,
}

impl Marker {
    /// All markers, in record field order
    pub const ALL: [Self; 3] = [Self::TimeOfDetection, Self::Location, Self::Direction];

    /// Literal prefix matched against each trimmed body line
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::TimeOfDetection => "Time of detection:",
            Self::Location => "Location:",
            Self::Direction => "Direction:",
        }
    }

    /// Extract this marker's value from `text`
    #[must_use]
    pub fn find_in(self, text: &str) -> Option<&str> {
        extract_field(text, self.prefix())
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Return the value following `prefix` on the first line that starts with it.
///
/// Lines break on `\n` or `\r\n`; a lone `\r` does not end a line.
/// Lines are trimmed before matching and the value is trimmed after the
/// prefix is removed. Matching is exact and case-sensitive; later lines
/// carrying the same prefix are ignored.
#[must_use]
pub fn extract_field<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(prefix))
        .map(str::trim)
}
