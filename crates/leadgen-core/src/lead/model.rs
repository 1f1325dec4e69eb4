//! Lead domain models.

use serde::{Deserialize, Serialize};

use crate::error::{LeadgenError, Result};

/// Number of leads requested when the caller does not say otherwise.
pub const DEFAULT_LEAD_COUNT: usize = 10;

/// A social-profile link attached to a lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialProfile {
    /// Free-form platform tag (e.g. "linkedin", "instagram")
    pub platform: String,
    pub url: String,
}

/// A discovered business contact.
///
/// Leads are built by the response extractor and are immutable afterwards;
/// selection state lives with whoever displays them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Unique within a single result set
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub socials: Vec<SocialProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// An attribution link returned alongside a grounded answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GroundingSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// What the user is looking for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    pub industry: String,
    pub location: String,
    /// Desired number of leads
    pub count: usize,
}

impl SearchQuery {
    /// Creates a query asking for [`DEFAULT_LEAD_COUNT`] leads.
    pub fn new(industry: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            industry: industry.into(),
            location: location.into(),
            count: DEFAULT_LEAD_COUNT,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Rejects queries that would waste an external call.
    pub fn validate(&self) -> Result<()> {
        if self.industry.trim().is_empty() {
            return Err(LeadgenError::config("industry must not be empty"));
        }
        if self.location.trim().is_empty() {
            return Err(LeadgenError::config("location must not be empty"));
        }
        if self.count == 0 {
            return Err(LeadgenError::config("count must be at least 1"));
        }
        Ok(())
    }
}

/// The outcome of one lead search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LeadSearchResult {
    pub leads: Vec<Lead>,
    pub sources: Vec<GroundingSource>,
}
