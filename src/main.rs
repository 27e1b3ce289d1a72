//! espdf: text search for binary files (PDF, PPT, XLS, ...) using Elasticsearch.
//!
//! - create: register the `document_attachment` pipeline and create the index
//! - delete: drop the index
//! - upload: base64 every file matched by a glob and save it through the pipeline
//! - search: highlighted full-text search over the extracted content
//!
//! Run: `espdf --endpoint http://localhost:9200 upload 'docs/**/*.pdf'`
//! (`ELASTICSEARCH_ENDPOINT` is used when `--endpoint` is absent.)

mod cli;
mod client;
mod config;
mod index;
mod indexing;
mod ingest;
mod logging;
mod search;
mod transform;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::info;

use crate::cli::{Command, Options};
use crate::client::es_client::EsClient;
use crate::config::{ConfigError, Settings};
use crate::indexing::UploadPolicy;

#[tokio::main]
async fn main() -> ExitCode {
    let opts = Options::parse();

    // Usage error (exit 2) before anything touches the network.
    let settings = match Settings::from_options(&opts) {
        Ok(settings) => settings,
        Err(err) => {
            let kind = match err {
                ConfigError::MissingEndpoint => ErrorKind::MissingRequiredArgument,
                ConfigError::InvalidEndpoint { .. } => ErrorKind::ValueValidation,
            };
            Options::command().error(kind, err).exit()
        }
    };

    if let Err(err) = logging::init(opts.verbose) {
        eprintln!("failed to initialise logging: {err:#}");
    }

    match run(opts.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let client = EsClient::new(settings.endpoint.as_str(), settings.timeout)?;
    let index = settings.index_name.as_str();
    info!(endpoint = %settings.endpoint_label(), index, "client ready");

    let mut stdout = io::stdout();
    match command {
        Command::Create => indexing::create_index(&client, index).await,
        Command::Delete => indexing::delete_index(&client, index).await,
        Command::Upload {
            file_glob,
            fail_fast,
        } => {
            let policy = if fail_fast {
                UploadPolicy::FailFast
            } else {
                UploadPolicy::ContinueOnError
            };
            indexing::upload(&client, index, &file_glob, policy, &mut stdout)
                .await
                .map(|_| ())
        }
        Command::Search { query } => search::search(&client, index, &query, &mut stdout).await,
    }
}
