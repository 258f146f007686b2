//! Tracing setup for the `payday` binary

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "payday_ledger=warn";
const VERBOSE_DIRECTIVE: &str = "payday_ledger=debug";

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings from this crate are
/// shown, or debug events when `verbose` is requested. Events go to stderr.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let fallback = if verbose {
            VERBOSE_DIRECTIVE
        } else {
            DEFAULT_DIRECTIVE
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        // A subscriber installed by an embedding application takes precedence.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_does_not_panic() {
        super::init_tracing(false);
        super::init_tracing(true);
    }
}
