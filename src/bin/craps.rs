//! Trivial entry point. The engine is a library; UI frontends link
//! against it directly.

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!(
        "craps-engine {}: library crate, nothing to run here",
        env!("CARGO_PKG_VERSION")
    );
}
