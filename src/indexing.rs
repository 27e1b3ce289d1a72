//! Index lifecycle and upload commands:
//! - create: register the ingest pipeline, then create the index
//! - delete: drop the index
//! - upload: glob → read → base64 → save through the pipeline, one file at a time
//!
//! Every remote call is awaited before the next one starts.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use crate::client::document_store::DocumentStore;
use crate::client::es_client::EsError;
use crate::index::es_schema::PIPELINE_ID;
use crate::ingest::file_scanner::{encode_file, expand_glob};

/// What to do when one file of a multi-file upload fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPolicy {
    /// Log the failure, keep uploading, fail the command at the end.
    ContinueOnError,
    /// Stop at the first failure.
    FailFast,
}

pub async fn create_index<S>(store: &S, index: &str) -> Result<()>
where
    S: DocumentStore + ?Sized,
{
    // Nothing is touched when the index is already there.
    if store
        .index_exists(index)
        .await
        .with_context(|| format!("failed to check whether index '{index}' exists"))?
    {
        return Err(EsError::IndexAlreadyExists(index.to_string()).into());
    }

    store
        .put_pipeline()
        .await
        .with_context(|| format!("failed to register ingest pipeline '{PIPELINE_ID}'"))?;

    match store.create_index(index).await {
        Ok(()) => {
            info!(index, "index created");
            Ok(())
        }
        Err(err @ EsError::IndexAlreadyExists(_)) => Err(err.into()),
        Err(err) => Err(err).with_context(|| format!("failed to create index '{index}'")),
    }
}

pub async fn delete_index<S>(store: &S, index: &str) -> Result<()>
where
    S: DocumentStore + ?Sized,
{
    match store.delete_index(index).await {
        Ok(()) => {
            info!(index, "index deleted");
            Ok(())
        }
        Err(err @ EsError::IndexNotFound(_)) => Err(err.into()),
        Err(err) => Err(err).with_context(|| format!("failed to delete index '{index}'")),
    }
}

/// Uploads every file matched by `file_glob`, printing each path to `out`
/// before it is sent. Returns how many files were saved.
pub async fn upload<S, W>(
    store: &S,
    index: &str,
    file_glob: &str,
    policy: UploadPolicy,
    out: &mut W,
) -> Result<usize>
where
    S: DocumentStore + ?Sized,
    W: Write,
{
    let files = expand_glob(file_glob)?;
    if files.is_empty() {
        warn!(pattern = file_glob, "no files matched");
        return Ok(0);
    }
    info!(files = files.len(), index, "uploading");

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(ProgressStyle::with_template(
        "{prefix} [{bar:30}] {pos}/{len} {wide_msg}",
    )?);
    pb.set_prefix("upload");

    let mut uploaded = 0usize;
    let mut failed = 0usize;
    for path in &files {
        pb.suspend(|| writeln!(out, "{}", path.display()))?;
        pb.set_message(path.display().to_string());

        let result = upload_one(store, index, path).await;
        pb.inc(1);

        match result {
            Ok(id) => {
                debug!(path = %path.display(), id = %id, "saved");
                uploaded += 1;
            }
            Err(err) if policy == UploadPolicy::FailFast => {
                pb.abandon();
                return Err(err);
            }
            Err(err) => {
                pb.suspend(|| error!(path = %path.display(), "{err:#}"));
                failed += 1;
            }
        }
    }
    pb.finish_and_clear();

    if failed > 0 {
        bail!("{failed} of {} file(s) failed to upload", files.len());
    }
    info!(uploaded, index, "upload done");
    Ok(uploaded)
}

async fn upload_one<S>(store: &S, index: &str, path: &Path) -> Result<String>
where
    S: DocumentStore + ?Sized,
{
    let encoded =
        encode_file(path).with_context(|| format!("failed to read {}", path.display()))?;
    store
        .save_document(index, encoded)
        .await
        .with_context(|| format!("failed to upload {}", path.display()))
}
