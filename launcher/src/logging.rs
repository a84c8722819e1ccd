//! Diagnostic tracing for the launcher.
//!
//! Tracing only carries diagnostics: engine lookup, the two engine
//! invocations and their exit codes. Everything the user is meant to read
//! (the missing-engine message, plans, the engine table) is printed by the
//! commands in `main.rs` and never goes through a subscriber, so the default
//! filter keeps stderr free of launcher chatter while a container is
//! attached to the terminal.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber.
///
/// `RUST_LOG` selects what is shown; unset means `warn`, which only reports
/// a failed image build. Use `launcher=info` to see the engine commands as
/// they are spawned:
///
/// ```bash
/// RUST_LOG=launcher=info launcher run -- cargo build-sbf
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
