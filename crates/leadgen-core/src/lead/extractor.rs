//! Extraction of typed leads from free-form model output.
//!
//! The model is asked to answer with a fenced JSON block, but it sometimes
//! drops the fence or wraps the array in conversational text. Extraction is
//! therefore an ordered chain of [`ExtractionStrategy`] implementations: the
//! first strategy that yields an array wins, and when none does the result is
//! an empty list. Nothing in this module returns an error.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::model::{Lead, SocialProfile};

/// Name used when the model did not provide one.
pub const UNKNOWN_BUSINESS: &str = "Unknown Business";

const DEFAULT_SOCIAL_PLATFORM: &str = "website";

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```json\s*(.*?)\s*```").expect("fenced json pattern is valid")
});

static BRACKETED_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[\s*\{.*\}\s*\]").expect("bracketed array pattern is valid")
});

/// One way of locating a JSON array inside model output.
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the array elements, or `None` when this strategy found
    /// nothing usable.
    fn extract(&self, text: &str) -> Option<Vec<Value>>;
}

/// Parses the interior of a ```` ```json ```` fenced block.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedJsonBlock;

impl ExtractionStrategy for FencedJsonBlock {
    fn name(&self) -> &'static str {
        "fenced_json_block"
    }

    fn extract(&self, text: &str) -> Option<Vec<Value>> {
        let captures = FENCED_JSON.captures(text)?;
        parse_array(captures.get(1)?.as_str())
    }
}

/// Parses the span from the first `[ {` to the last `} ]` in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedArray;

impl ExtractionStrategy for BracketedArray {
    fn name(&self) -> &'static str {
        "bracketed_array"
    }

    fn extract(&self, text: &str) -> Option<Vec<Value>> {
        let found = BRACKETED_ARRAY.find(text)?;
        parse_array(found.as_str())
    }
}

fn parse_array(candidate: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// Turns model output into leads using an ordered strategy chain.
pub struct ResponseExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::new(vec![Box::new(FencedJsonBlock), Box::new(BracketedArray)])
    }
}

impl ResponseExtractor {
    /// Creates an extractor that tries `strategies` in order.
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Extracts leads from `text`.
    ///
    /// `fallback_category` is used for every lead whose category is missing,
    /// normally the industry that was searched for. Returns an empty list
    /// when no strategy finds a parsable array.
    pub fn extract(&self, text: &str, fallback_category: &str) -> Vec<Lead> {
        let Some(items) = self.find_array(text) else {
            tracing::debug!("No JSON array found in model response");
            return Vec::new();
        };

        let mut seen_ids = HashSet::new();
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let mut lead = normalize_lead(item, index, fallback_category);
                if !seen_ids.insert(lead.id.clone()) {
                    lead.id = generate_id(index);
                    seen_ids.insert(lead.id.clone());
                }
                lead
            })
            .collect()
    }

    fn find_array(&self, text: &str) -> Option<Vec<Value>> {
        self.strategies.iter().find_map(|strategy| {
            let items = strategy.extract(text)?;
            tracing::debug!(
                strategy = strategy.name(),
                count = items.len(),
                "Extracted JSON array from model response"
            );
            Some(items)
        })
    }
}

fn normalize_lead(item: &Value, index: usize, fallback_category: &str) -> Lead {
    let empty = Map::new();
    let fields = item.as_object().unwrap_or(&empty);

    Lead {
        id: non_empty_string(fields.get("id")).unwrap_or_else(|| generate_id(index)),
        name: non_empty_string(fields.get("name")).unwrap_or_else(|| UNKNOWN_BUSINESS.to_string()),
        category: non_empty_string(fields.get("category"))
            .unwrap_or_else(|| fallback_category.to_string()),
        address: scalar_string(fields.get("address")),
        phone: scalar_string(fields.get("phone")),
        website: scalar_string(fields.get("website")),
        email: scalar_string(fields.get("email")),
        socials: socials(fields.get("socials")),
        notes: scalar_string(fields.get("notes")),
    }
}

fn generate_id(index: usize) -> String {
    format!("lead-{index}-{}", Uuid::new_v4().simple())
}

/// Strings and numbers pass through; anything else counts as absent.
fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    scalar_string(value).filter(|s| !s.trim().is_empty())
}

fn socials(value: Option<&Value>) -> Vec<SocialProfile> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let url = entry.get("url")?.as_str()?.to_string();
            let platform = entry
                .get("platform")
                .and_then(Value::as_str)
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(DEFAULT_SOCIAL_PLATFORM)
                .to_string();
            Some(SocialProfile { platform, url })
        })
        .collect()
}
