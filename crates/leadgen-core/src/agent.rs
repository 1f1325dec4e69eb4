//! Generative search agent port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::lead::GroundingSource;

/// Free text produced by a search-grounded model plus its attributions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GroundedResponse {
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

/// A model that answers a prompt with web search augmentation.
#[async_trait]
pub trait SearchAgent: Send + Sync {
    /// Sends `prompt` and returns the model's answer.
    async fn generate(&self, prompt: &str) -> Result<GroundedResponse>;
}
