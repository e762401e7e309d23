//! Gmail body decoding
//!
//! Gmail emits body data base64-encoded with the URL-safe alphabet
//! (`-` and `_` instead of `+` and `/`) but without a padding
//! convention a strict URL-safe decoder can rely on. Decoding is
//! therefore done in two explicit steps: substitute the URL-safe
//! characters back to the standard alphabet, then run a standard
//! base64 decode that accepts padded and unpadded input alike. Do not
//! collapse this into a direct URL-safe decode; the two are not
//! equivalent under partial padding.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

/// Standard alphabet, padding accepted whether present or absent.
const STANDARD_INDIFFERENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A message body that could not be decoded.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Decode a raw body string as resolved from the part tree.
///
/// An empty input decodes to an empty output and never fails.
/// Decoded bytes are interpreted as UTF-8 lossily: notification
/// mails occasionally carry latin-1 fragments, and a stray byte
/// should not abort the run when the rules can still scan the rest
/// of the text.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the substituted string is not valid
/// base64 (invalid characters or broken padding).
pub fn decode_body(raw: &str) -> Result<String, DecodeError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let substituted = raw.replace('-', "+").replace('_', "/");
    let bytes = STANDARD_INDIFFERENT.decode(substituted)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
