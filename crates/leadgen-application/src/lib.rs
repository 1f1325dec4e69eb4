pub mod lead_prompt;
pub mod lead_search_service;

pub use lead_search_service::GeminiLeadSearchService;
