//! Gmail lookup library
//!
//! Fetches the emails carrying a chosen Gmail label and extracts
//! correlated `(label, data)` string pairs from each email's HTML
//! body using paired regular expressions. Built for scraping
//! recurring notification mails, not as a general mail client.
//!
//! The core is [`pipeline::run`]: resolve each message's HTML part,
//! decode Gmail's URL-safe base64 body variant, and scan the text
//! with a [`LookupSet`]. The [`GmailClient`] collaborator does the
//! fetching; OAuth token acquisition happens out-of-band and the
//! token arrives via [`GmailConfig`].

mod client;
mod config;
pub mod decode;
mod error;
mod lookup;
mod message;
pub mod pipeline;

pub use client::{GmailClient, Label};
pub use config::GmailConfig;
pub use error::{Error, Result};
pub use lookup::{LookupResult, LookupRule, LookupSet, LookupSetConfig, RuleConfig};
pub use message::{Email, Header, Message, MessagePart, PartBody, header_value};
