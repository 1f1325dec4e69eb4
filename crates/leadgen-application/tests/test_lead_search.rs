use std::sync::Mutex;

use async_trait::async_trait;
use leadgen_application::GeminiLeadSearchService;
use leadgen_core::LeadgenError;
use leadgen_core::agent::{GroundedResponse, SearchAgent};
use leadgen_core::error::Result;
use leadgen_core::lead::{
    FencedJsonBlock, GroundingSource, LeadSearchService, ResponseExtractor, SearchQuery,
    UNKNOWN_BUSINESS,
};
use pretty_assertions::assert_eq;

/// Agent returning a canned answer and recording the prompts it receives.
struct ScriptedAgent {
    reply: Result<GroundedResponse>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedAgent {
    fn replying(text: &str, sources: Vec<GroundingSource>) -> Self {
        Self {
            reply: Ok(GroundedResponse {
                text: text.to_string(),
                sources,
            }),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: LeadgenError) -> Self {
        Self {
            reply: Err(err),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchAgent for ScriptedAgent {
    async fn generate(&self, prompt: &str) -> Result<GroundedResponse> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

#[async_trait]
impl SearchAgent for &ScriptedAgent {
    async fn generate(&self, prompt: &str) -> Result<GroundedResponse> {
        (**self).generate(prompt).await
    }
}

#[tokio::test]
async fn test_search_returns_leads_and_sources() {
    let source = GroundingSource {
        title: Some("Joe's".to_string()),
        uri: Some("https://joes.example".to_string()),
    };
    let agent = ScriptedAgent::replying(
        "Sure! ```json\n[{\"name\":\"Joe's Pizza\",\"category\":\"Restaurant\"}, {\"phone\": \"555\"}]\n```",
        vec![source.clone()],
    );
    let service = GeminiLeadSearchService::new(&agent);

    let result = service
        .search(&SearchQuery::new("Pizzeria", "Brooklyn").with_count(2))
        .await
        .unwrap();

    assert_eq!(result.leads.len(), 2);
    assert_eq!(result.leads[0].name, "Joe's Pizza");
    assert_eq!(result.leads[0].category, "Restaurant");
    assert_eq!(result.leads[1].name, UNKNOWN_BUSINESS);
    assert_eq!(result.leads[1].category, "Pizzeria");
    assert_eq!(result.sources, vec![source]);

    let prompts = agent.prompts.lock().unwrap();
    assert!(prompts[0].contains("Find 2 real"));
    assert!(prompts[0].contains("\"Pizzeria\""));
    assert!(prompts[0].contains("Brooklyn"));
}

#[tokio::test]
async fn test_unusable_answer_is_empty_result_not_error() {
    let agent = ScriptedAgent::replying("I couldn't find anything, sorry!", vec![]);
    let service = GeminiLeadSearchService::new(&agent);

    let result = service
        .search(&SearchQuery::new("Bakery", "Nowhere"))
        .await
        .unwrap();

    assert!(result.leads.is_empty());
    assert!(result.sources.is_empty());
}

#[tokio::test]
async fn test_invalid_query_never_reaches_agent() {
    let agent = ScriptedAgent::replying("[]", vec![]);
    let service = GeminiLeadSearchService::new(&agent);

    assert!(service.search(&SearchQuery::new("", "Paris")).await.is_err());
    assert_eq!(agent.prompt_count(), 0);
}

#[tokio::test]
async fn test_agent_errors_propagate() {
    let agent = ScriptedAgent::failing(LeadgenError::Upstream {
        status_code: Some(503),
        message: "UNAVAILABLE".to_string(),
        is_retryable: true,
    });
    let service = GeminiLeadSearchService::new(&agent);

    let err = service
        .search(&SearchQuery::new("Bakery", "Lyon"))
        .await
        .unwrap_err();

    assert!(matches!(err, LeadgenError::Upstream { status_code: Some(503), .. }));
    assert_eq!(agent.prompt_count(), 1);
}

#[tokio::test]
async fn test_custom_extractor() {
    let agent = ScriptedAgent::replying("[{\"name\": \"Bare\"}]", vec![]);
    let service = GeminiLeadSearchService::new(&agent)
        .with_extractor(ResponseExtractor::new(vec![Box::new(FencedJsonBlock)]));

    let result = service
        .search(&SearchQuery::new("Bakery", "Lyon"))
        .await
        .unwrap();
    assert!(result.leads.is_empty());
}
