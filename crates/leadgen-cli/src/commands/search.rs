use anyhow::{Result, bail};
use leadgen_application::GeminiLeadSearchService;
use leadgen_core::history::SearchHistoryRepository;
use leadgen_core::lead::{Lead, LeadSearchResult, LeadSearchService, SearchQuery};
use leadgen_core::user::{AuthService, User};
use leadgen_infrastructure::resolve_api_key;
use leadgen_interaction::GeminiSearchAgent;

use crate::context::AppContext;

pub async fn run(
    ctx: &AppContext,
    industry: String,
    location: String,
    count: Option<usize>,
    json: bool,
) -> Result<()> {
    require_session(&ctx.auth).await?;

    let query = SearchQuery::new(industry, location)
        .with_count(count.unwrap_or(ctx.config.search.default_count));
    query.validate()?;

    let api_key = resolve_api_key(&ctx.config.gemini)?;
    let agent = GeminiSearchAgent::new(api_key)?.with_model(ctx.config.gemini.model.clone());
    let service = GeminiLeadSearchService::new(agent);

    let result = search_and_record(&service, &ctx.history, &query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

/// Searching is only offered to a logged-in user.
async fn require_session(auth: &dyn AuthService) -> Result<User> {
    match auth.current_user().await {
        Some(user) => Ok(user),
        None => bail!("Not logged in. Run `leadgen login` or `leadgen register` first."),
    }
}

/// Runs the search, then records it in the history.
///
/// A failed search records nothing. A failed history write is logged and
/// the result is still returned.
async fn search_and_record(
    service: &dyn LeadSearchService,
    history: &dyn SearchHistoryRepository,
    query: &SearchQuery,
) -> Result<LeadSearchResult> {
    let result = service.search(query).await?;

    if let Err(e) = history.record(&query.industry, &query.location).await {
        tracing::warn!(error = %e, "Failed to record search history");
    }

    Ok(result)
}

fn print_result(result: &LeadSearchResult) {
    if result.leads.is_empty() {
        println!("No leads found.");
    }
    for (i, lead) in result.leads.iter().enumerate() {
        print_lead(i + 1, lead);
    }

    if !result.sources.is_empty() {
        println!("\nSources:");
        for source in &result.sources {
            let uri = source.uri.as_deref().unwrap_or("-");
            match &source.title {
                Some(title) => println!("  {title} - {uri}"),
                None => println!("  {uri}"),
            }
        }
    }
}

fn print_lead(position: usize, lead: &Lead) {
    println!("{position}. {} [{}]", lead.name, lead.category);
    let fields = [
        ("address", &lead.address),
        ("phone", &lead.phone),
        ("website", &lead.website),
        ("email", &lead.email),
        ("notes", &lead.notes),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("   {label}: {value}");
        }
    }
    for social in &lead.socials {
        println!("   {}: {}", social.platform, social.url);
    }
}
