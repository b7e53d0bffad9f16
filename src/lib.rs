pub mod cli;
pub mod config;
pub mod pipeline;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use pipeline::extraction::{extract, EntityRecord, ExtractionReport, Field, InputError};
pub use pipeline::tagging::{tag_spans, EntityTagger, SpanRecord, TaggingError};

/// Initialize tracing. `RUST_LOG` overrides the default filter.
/// Output goes to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Binary entry point. Returns the process exit code.
pub fn run() -> i32 {
    init_tracing();

    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let cli = cli::Cli::parse();

    match cli::execute(&cli.command) {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            1
        }
    }
}
