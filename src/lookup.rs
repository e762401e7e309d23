//! Lookup rules and the extraction engine
//!
//! A [`LookupRule`] pairs two regular expressions, each with one
//! capture group: one finds the data of interest, the other finds the
//! label to file it under. A [`LookupSet`] groups the rules applied
//! to every message under one Gmail label.
//!
//! Patterns are compiled once, when the rule is constructed, so a
//! malformed pattern fails before any message is fetched. The `regex`
//! crate guarantees linear-time matching, so scanning untrusted
//! message bodies cannot backtrack catastrophically.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// A paired regex rule. Group 1 of `data` captures the data string,
/// group 1 of `label` captures the label string.
#[derive(Debug, Clone)]
pub struct LookupRule {
    data: Regex,
    label: Regex,
}

impl LookupRule {
    /// Compile a rule from its two patterns.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Pattern`] if either pattern is not a
    /// valid regular expression.
    pub fn new(data_pattern: &str, label_pattern: &str) -> Result<Self> {
        Ok(Self {
            data: Regex::new(data_pattern)?,
            label: Regex::new(label_pattern)?,
        })
    }

    /// The data pattern as configured.
    #[must_use]
    pub fn data_pattern(&self) -> &str {
        self.data.as_str()
    }

    /// The label pattern as configured.
    #[must_use]
    pub fn label_pattern(&self) -> &str {
        self.label.as_str()
    }
}

/// An ordered set of lookup rules tied to one Gmail label.
#[derive(Debug, Clone)]
pub struct LookupSet {
    gmail_label: String,
    rules: Vec<LookupRule>,
}

/// One correlated extraction, with a reference to the rule that
/// produced it.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResult<'a> {
    pub label: String,
    pub data: String,
    #[serde(skip)]
    pub rule: &'a LookupRule,
}

impl LookupSet {
    /// Create an empty rule set for the given Gmail label.
    #[must_use]
    pub fn new(gmail_label: impl Into<String>) -> Self {
        Self {
            gmail_label: gmail_label.into(),
            rules: Vec::new(),
        }
    }

    /// Append a compiled rule, builder-style.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Pattern`] if either pattern is invalid.
    pub fn rule(mut self, data_pattern: &str, label_pattern: &str) -> Result<Self> {
        self.rules.push(LookupRule::new(data_pattern, label_pattern)?);
        Ok(self)
    }

    /// The Gmail label this set applies to.
    #[must_use]
    pub fn gmail_label(&self) -> &str {
        &self.gmail_label
    }

    /// The configured rules, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[LookupRule] {
        &self.rules
    }

    /// Run every rule against `text`, in order, emitting one result
    /// per rule for which BOTH patterns capture. A one-sided match
    /// produces no result; it is reported as a debug diagnostic and
    /// never aborts the scan.
    ///
    /// The two patterns are searched independently over the whole
    /// text: the first data match is paired with the first label
    /// match even when they come from unrelated fragments. That
    /// imprecision is intentional and matches the producing mails
    /// this tool was built for.
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<LookupResult<'_>> {
        let mut results = Vec::new();

        for rule in &self.rules {
            let data_match = rule.data.captures(text).and_then(|c| c.get(1));
            let label_match = rule.label.captures(text).and_then(|c| c.get(1));

            if let (Some(data), Some(label)) = (data_match, label_match) {
                results.push(LookupResult {
                    label: label.as_str().to_string(),
                    data: data.as_str().to_string(),
                    rule,
                });
            } else {
                debug!(
                    data_pattern = rule.data_pattern(),
                    data_matched = data_match.is_some(),
                    label_pattern = rule.label_pattern(),
                    label_matched = label_match.is_some(),
                    "Lookup rule did not match"
                );
            }
        }

        results
    }
}

/// Serializable form of a [`LookupSet`], as found in a rules file.
///
/// ```json
/// {
///   "gmailLabel": "Seek",
///   "lookups": [
///     {"data": "found <b>\\s*(\\d+)\\s*</b>", "label": "<b>software in (.+)</b>"}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupSetConfig {
    pub gmail_label: String,
    pub lookups: Vec<RuleConfig>,
}

/// One uncompiled rule in a rules file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub data: String,
    pub label: String,
}

impl LookupSetConfig {
    /// Read a rules file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, or
    /// [`Error::Config`] when it is not valid rules JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| Error::Config(format!("Invalid rules file: {e}")))
    }

    /// Compile every configured pattern into a ready [`LookupSet`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Pattern`] on the first invalid pattern.
    pub fn compile(&self) -> Result<LookupSet> {
        let mut set = LookupSet::new(self.gmail_label.clone());
        for rule in &self.lookups {
            set = set.rule(&rule.data, &rule.label)?;
        }
        Ok(set)
    }
}
