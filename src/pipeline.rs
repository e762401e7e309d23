//! The message-processing pipeline
//!
//! Ties the resolver, decoder, and extraction engine together over a
//! batch of already-fetched messages. Processing is synchronous and
//! single-threaded: each message is fully resolved, decoded, and
//! scanned before the next one is touched.

use tracing::debug;

use crate::decode::decode_body;
use crate::error::{Error, Result};
use crate::lookup::{LookupResult, LookupSet};
use crate::message::Message;

/// Run the lookup set over every message, in order.
///
/// For each message: resolve the HTML body, decode it, scan it with
/// every rule, and append the results. The output preserves message
/// order first and rule order within each message. A message without
/// an HTML part scans as empty text and simply contributes nothing.
///
/// # Errors
///
/// Returns [`Error::Decode`] as soon as any message body fails to
/// decode; messages after the failing one are not processed.
pub fn run<'a>(messages: &[Message], set: &'a LookupSet) -> Result<Vec<LookupResult<'a>>> {
    let mut results = Vec::new();

    for message in messages {
        let text = decode_body(message.html_body()).map_err(|source| Error::Decode {
            id: message.id.clone(),
            source,
        })?;

        let found = set.scan(&text);
        debug!(
            message_id = %message.id,
            matches = found.len(),
            "Scanned message"
        );
        results.extend(found);
    }

    Ok(results)
}
