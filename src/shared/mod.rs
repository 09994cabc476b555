pub mod retry;
pub mod shutdown;

pub use retry::{retry_with_backoff, RetryPolicy};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
