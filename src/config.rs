//! Gmail API connection configuration

use crate::error::{Error, Result};
use std::env;

/// Connection settings for the Gmail REST API.
#[derive(Debug, Clone)]
pub struct GmailConfig {
    /// Base URL of the Gmail API, without a trailing slash.
    pub api_base: String,
    /// Gmail user ID; `me` addresses the authenticated account.
    pub user: String,
    /// OAuth bearer token, acquired out-of-band.
    pub access_token: String,
}

impl GmailConfig {
    /// Load Gmail configuration from environment variables
    ///
    /// Reads from `.env` file if present. Required variables:
    /// - `GMAIL_ACCESS_TOKEN`
    ///
    /// Optional (with defaults):
    /// - `GMAIL_USER` (default: `me`)
    /// - `GMAIL_API_BASE` (default: `https://gmail.googleapis.com`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `GMAIL_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_base: env::var("GMAIL_API_BASE")
                .unwrap_or_else(|_| "https://gmail.googleapis.com".to_string()),
            user: env::var("GMAIL_USER").unwrap_or_else(|_| "me".to_string()),
            access_token: env::var("GMAIL_ACCESS_TOKEN")
                .map_err(|_| Error::Config("GMAIL_ACCESS_TOKEN not set".into()))?,
        })
    }
}
