// boltcard/src/transport/timeout.rs

use std::time::Duration;

use async_trait::async_trait;

use crate::transport::traits::Transport;
use crate::utils::timeout::default_exchange_timeout;
use crate::{Error, Result};

/// Bounds every exchange of the wrapped transport by a deadline.
#[derive(Debug)]
pub struct TimeoutTransport<T> {
    inner: T,
    timeout: Duration,
}

impl<T: Transport> TimeoutTransport<T> {
    /// Bound each exchange of `inner` by `timeout`.
    pub fn new(inner: T, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Wrap with the default per-exchange timeout.
    pub fn with_default_timeout(inner: T) -> Self {
        Self::new(inner, default_exchange_timeout())
    }

    /// Per-exchange deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Release the wrapped transport.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for TimeoutTransport<T> {
    async fn transceive(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        match tokio::time::timeout(self.timeout, self.inner.transceive(apdu)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("exchange timed out after {:?}", self.timeout);
                Err(Error::Timeout)
            }
        }
    }
}
