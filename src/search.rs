//! search.rs
//!
//! Full-text search over the extracted attachment content.
//!
//! fn search(store, index, terms, out)
//!   1. Joins the terms into one query string
//!   2. Runs a highlighted multi-match against the index
//!   3. Prints a title line and the cleaned-up snippets for each hit

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::client::document_store::DocumentStore;
use crate::client::es_client::EsError;
use crate::transform::hit_formatter::write_hit;

pub async fn search<S, W>(store: &S, index: &str, terms: &[String], out: &mut W) -> Result<()>
where
    S: DocumentStore + ?Sized,
    W: Write,
{
    let query = terms.join(" ");

    let hits = match store.search(index, &query).await {
        Ok(hits) => hits,
        Err(err @ EsError::IndexNotFound(_)) => return Err(err.into()),
        Err(err) => return Err(err).with_context(|| format!("search for '{query}' failed")),
    };

    if hits.is_empty() {
        info!(index, query = %query, "no matches");
    }
    for hit in &hits {
        debug!(id = %hit.id, "hit");
        write_hit(out, hit)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::document_store::SearchHit;
    use crate::indexing::tests::{Call, FakeStore};
    use pretty_assertions::assert_eq;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn joins_terms_into_one_query() {
        let store = FakeStore::default();
        let mut out = Vec::new();
        search(&store, "papers", &terms(&["annual", "report"]), &mut out)
            .await
            .unwrap();

        assert_eq!(
            store.calls(),
            vec![Call::Search {
                index: "papers".into(),
                query: "annual report".into(),
            }]
        );
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn prints_titles_placeholders_and_snippets() {
        let store = FakeStore {
            hits: vec![
                SearchHit {
                    id: "1".into(),
                    title: Some("Budget 2024".into()),
                    snippets: vec!["the <em>budget</em>\n  was\tapproved".into()],
                },
                SearchHit {
                    id: "2".into(),
                    title: None,
                    snippets: vec!["draft <em>budget</em>".into(), "second  hit".into()],
                },
            ],
            ..FakeStore::default()
        };
        let mut out = Vec::new();
        search(&store, "doc-search", &terms(&["budget"]), &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Budget 2024\n\
             the <em>budget</em> was approved\n\
             Untitled\n\
             draft <em>budget</em>\n\
             second hit\n"
        );
    }
}
