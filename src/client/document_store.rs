//! document_store.rs
//!
//! The remote calls the command handlers are allowed to make. `EsClient`
//! is the real implementation; tests swap in a recording fake.

use async_trait::async_trait;

use crate::client::es_client::EsError;

/// One search result, reduced to what the terminal output needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Engine-assigned document id.
    pub id: String,
    /// `attachment.title`, when the ingest pipeline found one.
    pub title: Option<String>,
    /// Highlighted fragments of `attachment.content`, in engine order.
    pub snippets: Vec<String>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Whether `index` exists. Read-only.
    async fn index_exists(&self, index: &str) -> Result<bool, EsError>;

    /// Register (or overwrite) the attachment ingest pipeline.
    async fn put_pipeline(&self) -> Result<(), EsError>;

    /// Create `index` with the document mappings.
    async fn create_index(&self, index: &str) -> Result<(), EsError>;

    /// Delete `index` and all its documents.
    async fn delete_index(&self, index: &str) -> Result<(), EsError>;

    /// Save one document through the ingest pipeline; returns the new id.
    async fn save_document(&self, index: &str, encoded: String) -> Result<String, EsError>;

    /// Match `query` against the extracted content, with highlighting.
    async fn search(&self, index: &str, query: &str) -> Result<Vec<SearchHit>, EsError>;
}
