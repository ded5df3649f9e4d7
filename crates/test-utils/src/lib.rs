//! Shared helpers for `justrun` integration tests.

pub mod builders;
pub mod terminal;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

pub use terminal::MemoryTerminal;

static TRACING: Once = Once::new();

/// Per-test deadline for anything that spawns a child process.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Install a test-writer subscriber once per test binary.
///
/// Filter comes from `RUST_LOG`; defaults to `justrun=debug` so failing
/// tests show the runner's spawn/exit events.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,justrun=debug"));

        // A second subscriber may already be installed by a unit test in the
        // same binary; that one wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Await `fut`, panicking if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(fut: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, fut).await {
        Ok(value) => value,
        Err(_) => panic!("test did not finish within {TEST_TIMEOUT:?}"),
    }
}
