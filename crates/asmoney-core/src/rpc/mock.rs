use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::RpcError;

use super::Transport;

enum CannedReply {
    Body(String),
    ConnectFailure,
}

/// A mock transport for testing. Replays canned response bodies in order and
/// records every posted request, populated via the builder pattern.
pub struct MockTransport {
    url: String,
    replies: Mutex<VecDeque<CannedReply>>,
    sent: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            url: "http://mock.invalid/api".into(),
            replies: VecDeque::new(),
        }
    }

    /// Every request body posted so far, decoded as JSON.
    pub fn sent(&self) -> Vec<serde_json::Value> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|body| serde_json::from_str(body).expect("client must post valid JSON"))
            .collect()
    }
}

pub struct MockTransportBuilder {
    url: String,
    replies: VecDeque<CannedReply>,
}

impl MockTransportBuilder {
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.to_owned();
        self
    }

    pub fn reply_json(self, body: serde_json::Value) -> Self {
        self.reply_raw(&body.to_string())
    }

    pub fn reply_raw(mut self, body: &str) -> Self {
        self.replies.push_back(CannedReply::Body(body.to_owned()));
        self
    }

    pub fn fail_connect(mut self) -> Self {
        self.replies.push_back(CannedReply::ConnectFailure);
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            url: self.url,
            replies: Mutex::new(self.replies),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl Transport for MockTransport {
    fn endpoint(&self) -> &str {
        &self.url
    }

    fn post(&self, body: &str) -> Result<String, RpcError> {
        self.sent.lock().unwrap().push(body.to_owned());
        match self.replies.lock().unwrap().pop_front() {
            Some(CannedReply::Body(body)) => Ok(body),
            Some(CannedReply::ConnectFailure) => Err(RpcError::Transport {
                url: self.url.clone(),
                message: "connection refused".into(),
            }),
            None => Err(RpcError::Transport {
                url: self.url.clone(),
                message: "no canned reply left".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_are_replayed_in_order() {
        let transport = MockTransport::builder()
            .reply_raw("first")
            .fail_connect()
            .build();

        assert_eq!(transport.post("{}").expect("first reply"), "first");
        assert!(transport.post("{}").is_err());
        let err = transport.post("{}").expect_err("queue is drained");
        assert!(err.to_string().contains("no canned reply left"));
        assert_eq!(transport.sent().len(), 3);
    }
}
