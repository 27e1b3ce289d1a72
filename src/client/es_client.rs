//! es_client.rs
//!
//! Thin reqwest client for the handful of Elasticsearch REST calls we need.
//!
//! Assumptions:
//! - One base URL, no auth (credentials can ride in the URL userinfo).
//! - Single request in flight at a time; no retries.
//! - Every request is bounded by the configured timeout.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::client::document_store::{DocumentStore, SearchHit};
use crate::index::es_schema::{self, CONTENT_FIELD, EXTRACTED_FIELD, PIPELINE_ID, TITLE_FIELD};

const ALREADY_EXISTS: &str = "resource_already_exists_exception";

#[derive(Error, Debug)]
pub enum EsError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Index named '{0}' already exists")]
    IndexAlreadyExists(String),

    #[error("No index named '{0}'")]
    IndexNotFound(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub struct EsClient {
    http: reqwest::Client,
    /// Cluster URL without a trailing slash (e.g. http://localhost:9200).
    base_url: String,
}

impl EsClient {
    pub fn new<S: Into<String>>(base_url: S, timeout: Duration) -> Result<Self, EsError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    fn index_url(&self, index: &str) -> String {
        format!("{}/{}", self.base_url, index)
    }

    fn pipeline_url(&self) -> String {
        format!("{}/_ingest/pipeline/{}", self.base_url, PIPELINE_ID)
    }

    /// Turns any non-2xx response into `EsError::Status`.
    async fn ensure_success(resp: Response) -> Result<Response, EsError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(EsError::Status { status, body })
    }
}

#[async_trait]
impl DocumentStore for EsClient {
    async fn index_exists(&self, index: &str) -> Result<bool, EsError> {
        let resp = self.http.head(self.index_url(index)).send().await?;
        match resp.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(EsError::Status {
                status,
                body: String::new(),
            }),
        }
    }

    async fn put_pipeline(&self) -> Result<(), EsError> {
        let resp = self
            .http
            .put(self.pipeline_url())
            .json(&es_schema::pipeline_body())
            .send()
            .await?;
        Self::ensure_success(resp).await?;
        debug!(pipeline = PIPELINE_ID, "ingest pipeline registered");
        Ok(())
    }

    async fn create_index(&self, index: &str) -> Result<(), EsError> {
        let resp = self
            .http
            .put(self.index_url(index))
            .json(&es_schema::index_body())
            .send()
            .await?;

        match Self::ensure_success(resp).await {
            Ok(_) => Ok(()),
            Err(EsError::Status { status, body })
                if status == StatusCode::BAD_REQUEST
                    && error_type(&body).as_deref() == Some(ALREADY_EXISTS) =>
            {
                Err(EsError::IndexAlreadyExists(index.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    async fn delete_index(&self, index: &str) -> Result<(), EsError> {
        let resp = self.http.delete(self.index_url(index)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(EsError::IndexNotFound(index.to_string()));
        }
        Self::ensure_success(resp).await?;
        Ok(())
    }

    async fn save_document(&self, index: &str, encoded: String) -> Result<String, EsError> {
        let url = format!("{}/_doc", self.index_url(index));
        let resp = self
            .http
            .post(url)
            .query(&[("pipeline", PIPELINE_ID)])
            .json(&es_schema::document_body(encoded))
            .send()
            .await?;

        let saved: IndexResponse = Self::ensure_success(resp).await?.json().await?;
        Ok(saved.id)
    }

    async fn search(&self, index: &str, query: &str) -> Result<Vec<SearchHit>, EsError> {
        let url = format!("{}/_search", self.index_url(index));
        let resp = self
            .http
            .post(url)
            .json(&es_schema::search_body(query))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(EsError::IndexNotFound(index.to_string()));
        }

        let parsed: SearchResponse = Self::ensure_success(resp).await?.json().await?;
        debug!(hits = parsed.hits.hits.len(), "search returned");
        Ok(parsed.hits.hits.into_iter().map(RawHit::into_hit).collect())
    }
}

/// `error.type` of an Elasticsearch error body, if it has one.
fn error_type(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error.kind)
}

// ---
// Minimal response models (subset of the Elasticsearch API)
// ---

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct IndexResponse {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source", default)]
    source: Option<Value>,
    #[serde(default)]
    highlight: HashMap<String, Vec<String>>,
}

impl RawHit {
    fn into_hit(mut self) -> SearchHit {
        let title = self
            .source
            .as_ref()
            .and_then(|s| s.get(EXTRACTED_FIELD))
            .and_then(|a| a.get(TITLE_FIELD))
            .and_then(Value::as_str)
            .map(str::to_string);
        let snippets = self.highlight.remove(CONTENT_FIELD).unwrap_or_default();

        SearchHit {
            id: self.id,
            title,
            snippets,
        }
    }
}
