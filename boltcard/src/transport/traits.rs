// boltcard/src/transport/traits.rs

use async_trait::async_trait;

use crate::Result;

/// Transport abstracts the host NFC stack away from the command logic.
///
/// One call is one APDU exchange with the tag. The returned buffer is the
/// raw response including the two trailing status bytes. Implementations
/// report link loss as `Error::Transport` and never retry on their own.
#[async_trait]
pub trait Transport: Send {
    /// Send one command APDU and wait for the response APDU.
    async fn transceive(&mut self, apdu: &[u8]) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn transceive(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        (**self).transceive(apdu).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &mut T {
    async fn transceive(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        (**self).transceive(apdu).await
    }
}
