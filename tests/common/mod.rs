//! Shared test utilities and logging setup.
//!
//! Integration tests pull this in with `mod common;` and call
//! [`init_test_logging`] before doing anything interesting.
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=rgb_text::pipeline=trace` - Watch every dialect rewrite
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing
//!
//! Not every test binary uses every helper.

#![allow(dead_code)]

pub mod assertions;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "rgb_text=debug,test=info";

/// Initialize test logging.
///
/// Output goes through the test writer, so it only shows up for failing
/// tests or with `--nocapture`. Safe to call any number of times.
pub fn init_test_logging() {
    init_test_logging_with_filter(DEFAULT_FILTER);
}

/// Initialize test logging with a custom default filter.
///
/// `RUST_LOG` still wins when it is set.
///
/// ```rust,ignore
/// init_test_logging_with_filter("rgb_text::component=trace");
/// ```
pub fn init_test_logging_with_filter(filter: &str) {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_ansi(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// Enter a named test phase span.
///
/// ```rust,ignore
/// let _setup = test_phase("setup");
/// ```
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Record what a test is about before it starts.
pub fn log_test_context(test_name: &str, description: &str) {
    tracing::info!(
        test_name = test_name,
        description = description,
        "test context"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_phase_logging() {
        init_test_logging();
        {
            let _setup = test_phase("setup");
            tracing::debug!("building pipeline");
        }
        {
            let _verify = test_phase("verify");
            tracing::debug!("checking output");
        }
    }
}
