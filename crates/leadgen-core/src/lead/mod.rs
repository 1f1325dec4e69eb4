//! Lead domain module.
//!
//! - `model`: Lead, SocialProfile, GroundingSource, SearchQuery
//! - `extractor`: turns free-form model output into leads
//! - `service`: the lead search service trait

mod extractor;
mod model;
mod service;

pub use extractor::{
    BracketedArray, ExtractionStrategy, FencedJsonBlock, ResponseExtractor, UNKNOWN_BUSINESS,
};
pub use model::{
    DEFAULT_LEAD_COUNT, GroundingSource, Lead, LeadSearchResult, SearchQuery, SocialProfile,
};
pub use service::LeadSearchService;
