//! # Logging
//!
//! Structured logs via `tracing`. Filtering comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run                      # requests, writes, streams
//! RUST_LOG=debug cargo run                     # plus full payloads and every publish
//! RUST_LOG=info,oldrao::events=debug cargo run # registry detail only
//! ```
//!
//! Resource actors tag their lines with `entity_type` and the record id, and
//! the registry with `channel` and `subscribers`, so lines stay short:
//!
//! ```text
//! INFO Created entity_type="Order" id=0192f... size=3
//! INFO Stream opened channel=order:0192f... subscriber=sub-4
//! DEBUG Published to admins event="new-order" subscribers=2
//! ```

/// Installs the global subscriber. Call once, before the system starts.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and channel fields already say where a line came from
        .compact()
        .init();
}
