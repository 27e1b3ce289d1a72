//! es_schema.rs
//!
//! Request bodies for the Elasticsearch side of the document index:
//! - ingest pipeline that runs the `attachment` processor
//! - index mappings for the raw and extracted fields
//! - save body for one uploaded file
//! - multi-field search with highlighting
//!
//! Every field name lives here exactly once. The pipeline, the mappings, the
//! upload body and the `_source` exclusion must all agree on them.

use serde_json::{Map, Value, json};

/// Document field holding the base64-encoded file bytes.
pub const ATTACHMENT_FIELD: &str = "source_file";
/// Object the `attachment` processor writes its output into.
pub const EXTRACTED_FIELD: &str = "attachment";
/// Extracted plain text, the only field we query and highlight.
pub const CONTENT_FIELD: &str = "attachment.content";
/// Extracted document title.
pub const TITLE_FIELD: &str = "title";
/// Ingest pipeline every document is saved through.
pub const PIPELINE_ID: &str = "document_attachment";

/// Body for `PUT /_ingest/pipeline/{PIPELINE_ID}`.
pub fn pipeline_body() -> Value {
    json!({
        "description": "Extract attachment information",
        "processors": [{
            "attachment": {
                "field": ATTACHMENT_FIELD,
                "target_field": EXTRACTED_FIELD,
            }
        }]
    })
}

/// Body for `PUT /{index}`.
pub fn index_body() -> Value {
    let mut properties = Map::new();
    properties.insert(ATTACHMENT_FIELD.to_string(), json!({ "type": "binary" }));
    properties.insert(
        EXTRACTED_FIELD.to_string(),
        json!({
            "properties": {
                "content": { "type": "text" },
                "title": { "type": "text" },
                "content_type": { "type": "keyword" },
            }
        }),
    );

    json!({
        "mappings": {
            "properties": Value::Object(properties),
        }
    })
}

/// Body for `POST /{index}/_doc`: the encoded file and nothing else.
pub fn document_body(encoded: String) -> Value {
    let mut doc = Map::new();
    doc.insert(ATTACHMENT_FIELD.to_string(), Value::String(encoded));
    Value::Object(doc)
}

/// Body for `POST /{index}/_search`.
pub fn search_body(query: &str) -> Value {
    let mut highlight_fields = Map::new();
    highlight_fields.insert(CONTENT_FIELD.to_string(), json!({}));

    json!({
        "query": {
            "multi_match": {
                "query": query,
                "fields": [CONTENT_FIELD],
            }
        },
        "_source": {
            "includes": [format!("{EXTRACTED_FIELD}.*")],
            "excludes": [ATTACHMENT_FIELD],
        },
        "highlight": {
            "fields": Value::Object(highlight_fields),
        }
    })
}
