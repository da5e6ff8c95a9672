use std::sync::{Mutex, PoisonError};

/// The two points in a call where the raw wire payload is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcEvent {
    RequestSent,
    ResponseReceived,
}

/// Sink for raw JSON-RPC payloads. Observers see every exchange but cannot
/// influence it.
pub trait RpcObserver: Send + Sync {
    fn observe(&self, event: RpcEvent, payload: &str);
}

impl<F> RpcObserver for F
where
    F: Fn(RpcEvent, &str) + Send + Sync,
{
    fn observe(&self, event: RpcEvent, payload: &str) {
        self(event, payload)
    }
}

/// Append-only transcript of every request and response, framed so that
/// consecutive exchanges stay readable when dumped to a terminal.
#[derive(Debug, Default)]
pub struct DebugBuffer {
    transcript: Mutex<String>,
}

impl DebugBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> String {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl RpcObserver for DebugBuffer {
    fn observe(&self, event: RpcEvent, payload: &str) {
        let mut transcript = self
            .transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match event {
            RpcEvent::RequestSent => {
                transcript.push_str("***** Request *****\n");
                transcript.push_str(payload);
                transcript.push_str("\n***** End Of request *****\n\n");
            }
            RpcEvent::ResponseReceived => {
                transcript.push_str("***** Server response *****\n");
                transcript.push_str(payload);
                if !payload.ends_with('\n') {
                    transcript.push('\n');
                }
                transcript.push_str("***** End of server response *****\n");
            }
        }
    }
}
