//! Lead search service trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::lead::{LeadSearchResult, SearchQuery};

/// Service that turns an industry/location query into leads.
#[async_trait]
pub trait LeadSearchService: Send + Sync {
    /// Runs one search.
    ///
    /// An unusable model response is not an error: it yields a result with
    /// no leads. Errors are reserved for invalid queries, a missing API key
    /// and failed calls to the model.
    async fn search(&self, query: &SearchQuery) -> Result<LeadSearchResult>;
}
