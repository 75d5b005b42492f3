//! Logging initialization
//!
//! Diagnostics go to stderr through `tracing`; command output stays on stdout.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// How chatty the default filter is when `RUST_LOG` is unset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    fn default_directive(self) -> &'static str {
        match self {
            Self::Quiet => "off",
            Self::Normal => "cheatsheet=warn",
            Self::Verbose => "cheatsheet=debug",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the stderr subscriber. Later calls are ignored.
pub fn init(verbosity: Verbosity) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
