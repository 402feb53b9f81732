//! Outlook `.msg` container decoding
//!
//! A `.msg` file is an OLE compound file. Each MAPI property of the message
//! lives in its own stream named `__substg1.0_<tag><type>`, where the type
//! suffix is `001F` for UTF-16LE strings and `001E` for 8-bit strings.

use crate::error::{AlertError, Result};
use mailparse::MailHeaderMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// `PR_BODY`: plain-text body
const BODY_TAG: &str = "1000";
/// `PR_INTERNET_MESSAGE_ID`
const MESSAGE_ID_TAG: &str = "1035";
/// `PR_TRANSPORT_MESSAGE_HEADERS`
const TRANSPORT_HEADERS_TAG: &str = "007D";

const UNICODE_SUFFIX: &str = "001F";
const STRING8_SUFFIX: &str = "001E";

/// What a container decoder hands back for one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedMessage {
    /// Plain-text body, if the container has one
    pub body: Option<String>,

    /// Internet message id, if the container has one
    pub message_id: Option<String>,
}

impl DecodedMessage {
    /// Body text when present and non-empty; whitespace-only bodies are kept
    #[must_use]
    pub fn usable_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}

/// Turns one container file into its plain-text body
pub trait ContainerDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<DecodedMessage>;
}

impl<D: ContainerDecoder + ?Sized> ContainerDecoder for &D {
    fn decode(&self, path: &Path) -> Result<DecodedMessage> {
        (**self).decode(path)
    }
}

/// Decoder for Outlook `.msg` exports
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgDecoder;

impl MsgDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ContainerDecoder for MsgDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedMessage> {
        let decode_error = |details: String| AlertError::ContainerDecode {
            file: path.to_path_buf(),
            details,
        };

        let mut container = cfb::open(path).map_err(|e| decode_error(e.to_string()))?;

        let body = read_string_property(&mut container, BODY_TAG)
            .map_err(|e| decode_error(format!("body stream: {e}")))?;

        let message_id = read_string_property(&mut container, MESSAGE_ID_TAG)
            .map_err(|e| decode_error(format!("message id stream: {e}")))?
            .filter(|id| !id.trim().is_empty())
            .or_else(|| {
                read_string_property(&mut container, TRANSPORT_HEADERS_TAG)
                    .ok()
                    .flatten()
                    .and_then(|headers| message_id_from_headers(&headers))
            })
            .map(|id| id.trim().to_string());

        debug!(
            "Decoded {}: body={} message_id={:?}",
            path.display(),
            body.as_ref().map_or(0, String::len),
            message_id
        );

        Ok(DecodedMessage { body, message_id })
    }
}

/// Read a string property, preferring the UTF-16 stream over the 8-bit one
fn read_string_property(
    container: &mut cfb::CompoundFile<File>,
    tag: &str,
) -> std::io::Result<Option<String>> {
    let unicode = format!("/__substg1.0_{tag}{UNICODE_SUFFIX}");
    if container.is_stream(&unicode) {
        let bytes = read_stream(container, &unicode)?;
        return Ok(Some(decode_utf16le(&bytes)));
    }

    let string8 = format!("/__substg1.0_{tag}{STRING8_SUFFIX}");
    if container.is_stream(&string8) {
        let bytes = read_stream(container, &string8)?;
        return Ok(Some(decode_string8(&bytes)));
    }

    Ok(None)
}

fn read_stream(container: &mut cfb::CompoundFile<File>, name: &str) -> std::io::Result<Vec<u8>> {
    let mut stream = container.open_stream(name)?;
    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn decode_utf16le(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    String::from_utf16_lossy(&units)
        .trim_end_matches('\0')
        .to_string()
}

fn decode_string8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .to_string()
}

fn message_id_from_headers(headers: &str) -> Option<String> {
    let (parsed, _) = mailparse::parse_headers(headers.as_bytes()).ok()?;
    parsed
        .get_first_value("Message-ID")
        .filter(|id| !id.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_strips_nul_padding() {
        let mut bytes: Vec<u8> = "Direction: E"
            .encode_utf16()
            .flat_map(u16::to_le_bytes)
            .collect();
        bytes.extend_from_slice(&[0, 0]);

        assert_eq!(decode_utf16le(&bytes), "Direction: E");
    }

    #[test]
    fn utf16_ignores_odd_trailing_byte() {
        let mut bytes: Vec<u8> = "ok".encode_utf16().flat_map(u16::to_le_bytes).collect();
        bytes.push(0x41);

        assert_eq!(decode_utf16le(&bytes), "ok");
    }

    #[test]
    fn string8_is_lossy() {
        assert_eq!(decode_string8(b"Location: Main St\0"), "Location: Main St");
        assert_eq!(decode_string8(&[0x4c, 0xff]), "L\u{fffd}");
    }

    #[test]
    fn message_id_from_transport_headers() {
        let headers = "Received: from relay\r\nMessage-ID: <alert-1@rail.example>\r\nSubject: Alert\r\n\r\n";
        assert_eq!(
            message_id_from_headers(headers).as_deref(),
            Some("<alert-1@rail.example>")
        );
    }

    #[test]
    fn transport_headers_without_message_id() {
        assert_eq!(message_id_from_headers("Subject: Alert\r\n\r\n"), None);
    }

    #[test]
    fn empty_body_is_not_usable() {
        let decoded = DecodedMessage {
            body: Some(String::new()),
            message_id: None,
        };
        assert_eq!(decoded.usable_body(), None);
        assert_eq!(DecodedMessage::default().usable_body(), None);
    }

    #[test]
    fn whitespace_body_is_usable() {
        let decoded = DecodedMessage {
            body: Some(" \r\n ".into()),
            message_id: None,
        };
        assert_eq!(decoded.usable_body(), Some(" \r\n "));
    }

    #[test]
    fn garbage_file_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.msg");
        std::fs::write(&path, b"definitely not a compound file").unwrap();

        let err = MsgDecoder::new().decode(&path).unwrap_err();
        assert!(matches!(err, AlertError::ContainerDecode { .. }));
        assert!(!err.is_fatal());
    }
}
