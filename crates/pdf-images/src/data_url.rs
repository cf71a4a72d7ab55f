//! `data:` URL encoding for image bytes

use crate::types::{ConvertError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Encode bytes as a base64 `data:` URL.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a base64 `data:` URL into its MIME type and decoded bytes.
pub fn decode(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ConvertError::DataUrl("missing data: prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ConvertError::DataUrl("missing payload separator".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| ConvertError::DataUrl("only base64 payloads are supported".to_string()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| ConvertError::DataUrl(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}
