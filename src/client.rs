//! Gmail REST API client
//!
//! Read-only access to the handful of Gmail endpoints the pipeline
//! needs: listing labels, listing the message IDs under a label, and
//! fetching a full message. Authentication is a plain bearer token
//! from [`GmailConfig`]; acquiring and refreshing that token is the
//! caller's problem.

use crate::config::GmailConfig;
use crate::error::{Error, Result};
use crate::message::{Email, Message};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// A Gmail label as returned by `users.labels.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ListLabelsResponse {
    #[serde(default)]
    labels: Vec<Label>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ListMessagesResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

/// Read-only Gmail API client.
pub struct GmailClient {
    config: GmailConfig,
    http: reqwest::Client,
}

impl GmailClient {
    #[must_use]
    pub fn new(config: GmailConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// List all labels on the account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] on transport or API failure.
    pub async fn list_labels(&self) -> Result<Vec<Label>> {
        let url = self.url("labels");
        let response: ListLabelsResponse = self.get_json(&url, "Label list").await?;
        Ok(response.labels)
    }

    /// Find a label by its display name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LabelNotFound`] when no label carries that
    /// name, or [`Error::Fetch`] on transport or API failure.
    pub async fn find_label(&self, name: &str) -> Result<Label> {
        let labels = self.list_labels().await?;
        labels
            .into_iter()
            .find(|label| label.name == name)
            .ok_or_else(|| Error::LabelNotFound(name.to_string()))
    }

    /// List the IDs of all messages carrying a label, in the order
    /// the API returns them (newest first).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] on transport or API failure.
    pub async fn list_message_ids(&self, label_id: &str) -> Result<Vec<String>> {
        let url = format!("{}?labelIds={label_id}", self.url("messages"));
        let response: ListMessagesResponse = self.get_json(&url, "Message list").await?;
        Ok(response.messages.into_iter().map(|m| m.id).collect())
    }

    /// Fetch one full message: headers plus the MIME part tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] on transport or API failure.
    pub async fn get_message(&self, id: &str) -> Result<Message> {
        let url = format!("{}/{id}?format=full", self.url("messages"));
        self.get_json(&url, "Message fetch").await
    }

    /// Fetch every message carrying the named label, in listing
    /// order. Any individual fetch failure aborts the whole batch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LabelNotFound`] when the label is absent, or
    /// [`Error::Fetch`] on transport or API failure.
    pub async fn fetch_by_label(&self, name: &str) -> Result<Vec<Message>> {
        let label = self.find_label(name).await?;
        let ids = self.list_message_ids(&label.id).await?;
        info!("Found {} messages under label '{}'", ids.len(), name);

        let mut messages = Vec::with_capacity(ids.len());
        for id in &ids {
            messages.push(self.get_message(id).await?);
        }
        Ok(messages)
    }

    /// Fetch one message and derive its [`Email`] summary. The body
    /// is the raw resolver output, still encoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] on transport or API failure.
    pub async fn email(&self, id: &str) -> Result<Email> {
        let message = self.get_message(id).await?;
        Ok(message.to_email())
    }

    // -- private helpers --

    fn url(&self, resource: &str) -> String {
        format!(
            "{}/gmail/v1/users/{}/{resource}",
            self.config.api_base, self.config.user
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("{what} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Fetch(format!("{what} failed: {status} ({body})")));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("{what} returned invalid JSON: {e}")))
    }
}
