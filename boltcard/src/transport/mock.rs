// boltcard/src/transport/mock.rs

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::transport::traits::Transport;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    Data(Vec<u8>),
    LinkLost(String),
}

/// Mock transport for tests. It records sent APDUs and replays queued
/// responses in order; an empty queue yields `Error::Timeout`.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every APDU transmitted, in order.
    pub sent: Vec<Vec<u8>>,
    responses: VecDeque<Reply>,
}

impl MockTransport {
    /// An empty mock with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response (data followed by both status bytes).
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(Reply::Data(resp));
    }

    /// Queue a transport failure for the next exchange.
    pub fn push_transport_error(&mut self, reason: impl Into<String>) {
        self.responses.push_back(Reply::LinkLost(reason.into()));
    }

    /// Take the oldest recorded APDU.
    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }

    /// Number of queued replies not consumed yet.
    pub fn pending(&self) -> usize {
        self.responses.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn transceive(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        self.sent.push(apdu.to_vec());
        match self.responses.pop_front() {
            Some(Reply::Data(resp)) => Ok(resp),
            Some(Reply::LinkLost(reason)) => Err(Error::Transport(reason)),
            None => Err(Error::Timeout),
        }
    }
}
