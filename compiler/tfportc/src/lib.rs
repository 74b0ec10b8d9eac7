//! tfport front end.
//!
//! Ties the front-end crates together for a host: configuration,
//! logging setup and whole-graph binding.
//!
//! ```text
//! graph builder → Graph → bind_graph → BoundGraph → rewrite passes → codegen
//! ```

mod binding;
mod config;

use std::sync::Once;

pub use binding::{bind_graph, BoundGraph, BoundLocal, BoundModule, BoundResource};
pub use config::Config;

pub use tfport_bind as bind;
pub use tfport_bound as bound;
pub use tfport_diagnostic as diagnostic;
pub use tfport_graph as graph;
pub use tfport_ir as ir;
pub use tfport_types as types;

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Set `RUST_LOG` to enable, e.g. `RUST_LOG=tfport_bind=trace`.
/// Safe to call more than once; only the first call has any effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
