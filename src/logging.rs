//! Diagnostics go to stderr through `tracing`; stdout is reserved for
//! filenames, titles and snippets.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Crate log level for a `-v` count.
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init(verbose: u8) -> Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => EnvFilter::default()
            .add_directive(format!("espdf={}", level_for(verbose)).parse()?)
            .add_directive("reqwest=warn".parse()?)
            .add_directive("hyper=warn".parse()?),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for(0), Level::WARN);
        assert_eq!(level_for(1), Level::INFO);
        assert_eq!(level_for(2), Level::DEBUG);
        assert_eq!(level_for(9), Level::TRACE);
    }
}
