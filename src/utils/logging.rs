//! # Logging
//!
//! Structured logging configuration built on `tracing`.
//!
//! The codecs themselves only emit events (`debug!` for pipeline stages,
//! `warn!` for tolerated non-strict input); installing a subscriber is the
//! host application's choice. [`init`] is a convenience for binaries and
//! tests that want the conventional env-filtered stderr subscriber.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global stderr subscriber filtered by `RUST_LOG`.
///
/// Falls back to `info` when `RUST_LOG` is unset. Safe to call more than
/// once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
