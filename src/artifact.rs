//! Downloadable artifacts derived from generation results.
//!
//! An [`Artifact`] is recomputed on demand from a [`GenerationResult`] and
//! never cached.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::types::GenerationResult;
use crate::{PenwrightError, Result};

/// Suffix appended to every artifact filename.
pub const FILENAME_SUFFIX: &str = "_blog.txt";

/// Replaces each whitespace character of the topic in filenames.
pub const FILENAME_SEPARATOR: char = '_';

/// A named byte payload ready for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub filename: String,
    /// UTF-8 encoding of the generated text.
    #[serde(skip)]
    pub payload: Vec<u8>,
    /// `payload` transport-encoded as standard base64.
    #[serde(rename = "payload")]
    encoded: String,
}

impl Artifact {
    /// Base64 form of the payload, for embedding in a link.
    pub fn encoded_payload(&self) -> &str {
        &self.encoded
    }

    /// `data:` URI carrying the payload.
    pub fn data_uri(&self) -> String {
        format!("data:file/txt;base64,{}", self.encoded)
    }
}

/// Package a result for download.
///
/// The transport encoding is decoded again and compared byte for byte; a
/// mismatch fails with `Encoding` rather than handing out a corrupt link.
pub fn package(result: &GenerationResult) -> Result<Artifact> {
    let payload = result.text().as_bytes().to_vec();
    let encoded = STANDARD.encode(&payload);

    let decoded = STANDARD
        .decode(&encoded)
        .map_err(|e| PenwrightError::Encoding(e.to_string()))?;
    if decoded != payload {
        return Err(PenwrightError::Encoding(
            "transport encoding did not round-trip".to_string(),
        ));
    }

    Ok(Artifact {
        filename: filename_for(result.source_request().topic()),
        payload,
        encoded,
    })
}

/// `<topic with whitespace replaced>_blog.txt`.
pub fn filename_for(topic: &str) -> String {
    let mut name: String = topic
        .chars()
        .map(|c| if c.is_whitespace() { FILENAME_SEPARATOR } else { c })
        .collect();
    name.push_str(FILENAME_SUFFIX);
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_whitespace_char_becomes_one_separator() {
        assert_eq!(filename_for("a  b\tc"), "a__b_c_blog.txt");
    }

    #[test]
    fn non_ascii_topic_kept() {
        assert_eq!(filename_for("café au lait"), "café_au_lait_blog.txt");
    }
}
