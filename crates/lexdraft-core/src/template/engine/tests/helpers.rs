//! Shared test helpers for template engine tests

use serde_json::{json, Value};

use crate::config::RenderConfig;
use crate::model::TemplateDefinition;
use crate::template::engine::TemplateRenderer;

/// Scalar values at the top level
pub(super) fn simple_context() -> Value {
    json!({
        "title": "Notice of Motion",
        "count": 3,
        "amount": 1250.5,
        "urgent": true,
        "empty": "",
        "filed": "2026-03-09"
    })
}

/// Nested records, arrays and derived fields the way the variable engine lays them out
pub(super) fn matter_context() -> Value {
    json!({
        "caseNumber": "CV-2026-0142",
        "client": {
            "name": "Jane Doe",
            "address": { "city": "Reno", "state": "NV" }
        },
        "client$": { "salutation": "Dear Ms. Doe:" },
        "claims": ["breach of contract", "fraud"],
        "parties": [
            { "name": "Jane Doe", "role": "Plaintiff" },
            { "name": "Acme, Inc.", "role": "Defendant" }
        ],
        "fees": { "filing": 435, "service": 75 }
    })
}

pub(super) fn template(id: &str, body: &str) -> TemplateDefinition {
    TemplateDefinition::new(id, "1", body)
}

pub(super) fn strict_renderer() -> TemplateRenderer {
    TemplateRenderer::with_config(&RenderConfig {
        strict_variables: true,
        ..RenderConfig::default()
    })
}
