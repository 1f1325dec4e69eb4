//! Prompt rendering for lead searches.

use leadgen_core::error::{LeadgenError, Result};
use leadgen_core::lead::SearchQuery;
use minijinja::{Environment, context};

const TEMPLATE_NAME: &str = "lead_search";

const LEAD_SEARCH_TEMPLATE: &str = r#"Find {{ count }} real, currently operating businesses in the "{{ industry }}" industry located in {{ location }}.
Use web search to verify each business and its contact details.

For each business return an object with these fields:
{% for field in fields -%}
- {{ field.name }}: {{ field.description }}
{% endfor %}
Omit a field when you cannot find it. Do not invent contact details.

Return the list as a JSON array inside a single ```json fenced code block."#;

struct FieldSpec {
    name: &'static str,
    description: &'static str,
}

const OUTPUT_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "id", description: "short unique identifier (string)" },
    FieldSpec { name: "name", description: "business name" },
    FieldSpec { name: "category", description: "business category" },
    FieldSpec { name: "address", description: "full street address" },
    FieldSpec { name: "phone", description: "phone number" },
    FieldSpec { name: "website", description: "website URL" },
    FieldSpec { name: "email", description: "contact email address" },
    FieldSpec {
        name: "socials",
        description: "array of {\"platform\": string, \"url\": string} for social profiles",
    },
    FieldSpec { name: "notes", description: "one sentence on why this is a good lead" },
];

/// Renders the instruction sent to the model for `query`.
pub fn render_lead_prompt(query: &SearchQuery) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, LEAD_SEARCH_TEMPLATE)
        .map_err(|e| LeadgenError::internal(format!("Invalid lead prompt template: {}", e)))?;

    let fields: Vec<_> = OUTPUT_FIELDS
        .iter()
        .map(|f| context! { name => f.name, description => f.description })
        .collect();

    env.get_template(TEMPLATE_NAME)
        .and_then(|template| {
            template.render(context! {
                count => query.count,
                industry => query.industry.trim(),
                location => query.location.trim(),
                fields => fields,
            })
        })
        .map_err(|e| LeadgenError::internal(format!("Failed to render lead prompt: {}", e)))
}
