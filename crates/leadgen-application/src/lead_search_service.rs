//! Lead search use case.
//!
//! Renders the lead prompt, asks the search agent, and runs the answer
//! through the response extractor.

use async_trait::async_trait;
use leadgen_core::agent::SearchAgent;
use leadgen_core::error::Result;
use leadgen_core::lead::{LeadSearchResult, LeadSearchService, ResponseExtractor, SearchQuery};

use crate::lead_prompt::render_lead_prompt;

/// [`LeadSearchService`] backed by a search-grounded model.
pub struct GeminiLeadSearchService<A> {
    agent: A,
    extractor: ResponseExtractor,
}

impl<A: SearchAgent> GeminiLeadSearchService<A> {
    pub fn new(agent: A) -> Self {
        Self {
            agent,
            extractor: ResponseExtractor::default(),
        }
    }

    /// Replaces the default extraction strategy chain.
    pub fn with_extractor(mut self, extractor: ResponseExtractor) -> Self {
        self.extractor = extractor;
        self
    }
}

#[async_trait]
impl<A: SearchAgent> LeadSearchService for GeminiLeadSearchService<A> {
    async fn search(&self, query: &SearchQuery) -> Result<LeadSearchResult> {
        query.validate()?;

        let prompt = render_lead_prompt(query)?;
        tracing::info!(
            industry = %query.industry,
            location = %query.location,
            count = query.count,
            "Searching for leads"
        );

        let response = self.agent.generate(&prompt).await?;
        let leads = self.extractor.extract(&response.text, query.industry.trim());

        if leads.is_empty() {
            tracing::warn!("Model response contained no usable leads");
        }
        tracing::info!(
            leads = leads.len(),
            sources = response.sources.len(),
            "Lead search finished"
        );

        Ok(LeadSearchResult {
            leads,
            sources: response.sources,
        })
    }
}
