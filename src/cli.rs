use clap::{Parser, Subcommand};

pub const ENDPOINT_ENV: &str = "ELASTICSEARCH_ENDPOINT";
pub const DEFAULT_INDEX_NAME: &str = "doc-search";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(
    name = "espdf",
    version,
    about = "Text search for binary files (PDF, PPT, XLS, etc) using Elasticsearch",
    long_about = None
)]
pub struct Options {
    /// Elasticsearch URL, e.g. http://localhost:9200
    #[arg(long, global = true, env = ENDPOINT_ENV)]
    pub endpoint: Option<String>,

    /// Index to operate on
    #[arg(long, short = 'i', global = true, default_value = DEFAULT_INDEX_NAME)]
    pub index_name: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create an empty index
    #[command(visible_alias = "index")]
    Create,

    /// Delete an index and its documents
    Delete,

    /// Upload and index document(s)
    #[command(visible_alias = "save")]
    Upload {
        /// Files to upload; `**` matches across directories
        #[arg(value_name = "GLOB")]
        file_glob: String,

        /// Stop at the first file that fails instead of carrying on
        #[arg(long)]
        fail_fast: bool,
    },

    /// Search indexed documents for a word or phrase
    #[command(visible_alias = "s")]
    Search {
        #[arg(value_name = "QUERY", required = true, num_args = 1..)]
        query: Vec<String>,
    },
}
