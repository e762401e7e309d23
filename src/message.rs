//! Gmail message structures
//!
//! Mirrors the JSON shape returned by
//! `users.messages.get?format=full`: a message carries a payload,
//! which is the root of a recursive part tree. A part is a leaf iff
//! it has no sub-parts; only leaves carry meaningful body data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum part-tree nesting the body resolver will follow. Parts
/// nested deeper than this are not visited.
const MAX_PART_DEPTH: usize = 32;

/// A full Gmail message: its ID plus the root of the MIME part tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub payload: MessagePart,
    #[serde(rename = "internalDate", default)]
    pub internal_date: Option<String>,
}

/// One node of the MIME part tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePart {
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub body: PartBody,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

/// Body payload of a leaf part. `data` is base64-encoded with Gmail's
/// URL-safe alphabet; see [`crate::decode::decode_body`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartBody {
    #[serde(default)]
    pub data: String,
}

/// A single `(name, value)` message header. Headers form an ordered
/// sequence and names are not unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Read-only summary of one fetched message.
///
/// `body` is the raw resolver output, still base64-encoded; decode it
/// with [`crate::decode::decode_body`] when readable text is needed.
#[derive(Debug, Clone, Serialize)]
pub struct Email {
    pub id: String,
    pub subject: String,
    pub sender: String,
    pub body: String,
}

/// Return the value of the first header whose name matches `wanted`
/// exactly (case-sensitive, as delivered by the API), or `None`.
#[must_use]
pub fn header_value<'a>(headers: &'a [Header], wanted: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name == wanted)
        .map(|h| h.value.as_str())
}

impl MessagePart {
    /// Find the raw body of the first `text/html` leaf in pre-order.
    ///
    /// At a node with children, each child is tried in order and the
    /// first non-empty result wins; siblings after a match are not
    /// visited. A leaf qualifies only if its declared type is exactly
    /// `text/html`. Returns an empty string when no HTML leaf exists
    /// anywhere in the tree, which is not an error.
    ///
    /// Many messages nest a `multipart/alternative` list above the
    /// HTML part, so leftmost-deepest-first matches what Gmail
    /// actually produces.
    #[must_use]
    pub fn html_body(&self) -> &str {
        self.html_body_at(0)
    }

    fn html_body_at(&self, depth: usize) -> &str {
        if depth >= MAX_PART_DEPTH {
            return "";
        }

        if self.parts.is_empty() {
            if self.mime_type == "text/html" {
                self.body.data.as_str()
            } else {
                ""
            }
        } else {
            for part in &self.parts {
                let found = part.html_body_at(depth + 1);
                if !found.is_empty() {
                    return found;
                }
            }
            ""
        }
    }
}

impl Message {
    /// Raw encoded HTML body of this message, or `""` if it has none.
    #[must_use]
    pub fn html_body(&self) -> &str {
        self.payload.html_body()
    }

    /// Value of the `Subject` header, or `""` when absent.
    #[must_use]
    pub fn subject(&self) -> &str {
        header_value(&self.payload.headers, "Subject").unwrap_or("")
    }

    /// Value of the `From` header, or `""` when absent.
    #[must_use]
    pub fn sender(&self) -> &str {
        header_value(&self.payload.headers, "From").unwrap_or("")
    }

    /// Delivery time derived from `internalDate` (epoch milliseconds).
    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        let millis = self.internal_date.as_ref()?.parse().ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    /// Derive the read-only [`Email`] summary for this message.
    #[must_use]
    pub fn to_email(&self) -> Email {
        Email {
            id: self.id.clone(),
            subject: self.subject().to_string(),
            sender: self.sender().to_string(),
            body: self.html_body().to_string(),
        }
    }
}
