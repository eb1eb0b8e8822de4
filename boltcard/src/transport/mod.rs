// boltcard/src/transport/mod.rs

/// Scripted transport for tests.
pub mod mock;
/// Deadline wrapper.
#[cfg(feature = "tokio")]
pub mod timeout;
/// The `Transport` trait.
pub mod traits;

pub use mock::MockTransport;
#[cfg(feature = "tokio")]
pub use timeout::TimeoutTransport;
pub use traits::Transport;
