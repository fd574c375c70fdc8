//! # Todo Store Testing
//!
//! Testing utilities and helpers for reducers and stores.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Assertion helpers for reducer output
//! - [`init_test_tracing`]: Log capture for tests
//!
//! ## Example
//!
//! ```ignore
//! use todostore_testing::ReducerTest;
//!
//! ReducerTest::new(TodoReducer)
//!     .given_state(TodoCollection::seed())
//!     .when_action(Intent::remove(1))
//!     .then_state(|todos| assert_eq!(todos.len(), 2))
//!     .run();
//! ```


use tracing_subscriber::EnvFilter;

/// Install a tracing subscriber that writes through the test harness
///
/// Respects `RUST_LOG` and defaults to `debug`. Safe to call from every test;
/// only the first call installs anything.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Another test may have installed a subscriber already
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use reducer_test::{ReducerTest, assertions};
