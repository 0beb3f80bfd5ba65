//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directives when `RUST_LOG` is unset.
fn default_directives(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "shctl=debug,sortinghat_search_rs=debug,sortinghat_api_rs=debug"
    } else if quiet {
        "error"
    } else {
        "shctl=info,warn"
    }
}

/// Installs a compact stderr logger. `RUST_LOG` overrides the flags.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, quiet)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("warning: logging already initialized: {e}");
    }
}
