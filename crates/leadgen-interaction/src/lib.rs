//! Clients for external generative models.

pub mod gemini_search_agent;

pub use gemini_search_agent::GeminiSearchAgent;
