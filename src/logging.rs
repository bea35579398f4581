//! Tracing setup for the ledger binary
//!
//! Logs go to stderr so that reports printed on stdout stay clean for
//! piping. `RUST_LOG` overrides the default level.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default directive when `RUST_LOG` does not mention this crate
pub const DEFAULT_DIRECTIVE: &str = "ledger_cli=warn";

/// Initializes the global tracing subscriber once
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = if verbose {
            "ledger_cli=debug"
        } else {
            DEFAULT_DIRECTIVE
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive));

        // try_init: a subscriber may already be installed by an embedding program
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
