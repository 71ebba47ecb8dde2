//! `data:<mime>;base64,<payload>` encoding and decoding.
//!
//! The MIME type is everything between `data:` and the first `;`. The text
//! `;base64,` must follow it directly, and the payload is the rest of the
//! string. The payload must be non-empty and on a single line. The payload is
//! passed through as-is; it is not base64-decoded here.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::InferenceError;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Message shown when an image string is not a data URL.
pub const INVALID_IMAGE_DATA: &str = "Invalid image data format.";

/// Borrowed view of a parsed data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    pub mime_type: &'a str,
    pub payload: &'a str,
}

/// Split a data URL into MIME type and base64 payload.
pub fn parse_data_url(input: &str) -> Result<DataUrl<'_>, InferenceError> {
    let invalid = || InferenceError::InvalidInputFormat(INVALID_IMAGE_DATA.to_string());

    let rest = input.strip_prefix(SCHEME).ok_or_else(invalid)?;
    let semicolon = rest.find(';').ok_or_else(invalid)?;
    let (mime_type, rest) = rest.split_at(semicolon);
    let payload = rest.strip_prefix(BASE64_MARKER).ok_or_else(invalid)?;

    if mime_type.is_empty() || payload.is_empty() || payload.contains(is_line_break) {
        return Err(invalid());
    }

    Ok(DataUrl { mime_type, payload })
}

/// Encode raw bytes as a base64 data URL.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("{SCHEME}{mime_type}{BASE64_MARKER}{}", STANDARD.encode(bytes))
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
