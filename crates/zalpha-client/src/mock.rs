//! Scripted in-memory transport for unit tests.

use std::collections::VecDeque;

use bytes::Bytes;
use zalpha_frame::Frame;
use zalpha_transport::{Endpoint, Transport, TransportError};

use crate::client::Client;
use crate::config::ClientConfig;
use crate::layout::ProtocolGeneration;

pub(crate) enum Scripted {
    Frame(Frame),
    Raw(Vec<u8>),
    Fail(TransportError),
}

#[derive(Default)]
pub(crate) struct MockTransport {
    pub replies: VecDeque<Scripted>,
    pub sent: Vec<Vec<u8>>,
    pub connected: Option<Endpoint>,
    pub disconnects: usize,
    pub fail_connect: bool,
    pub fail_disconnect: bool,
}

impl MockTransport {
    /// The most recent request as a frame.
    pub fn last_request(&self) -> Frame {
        let raw = self.sent.last().expect("no request sent");
        Frame::from_bytes(raw).expect("request is one frame")
    }
}

impl Transport for MockTransport {
    fn connect(&mut self, endpoint: &Endpoint) -> zalpha_transport::Result<()> {
        if self.fail_connect {
            return Err(TransportError::Connect {
                endpoint: endpoint.url(),
                reason: "refused".to_string(),
            });
        }
        self.connected = Some(endpoint.clone());
        Ok(())
    }

    fn disconnect(&mut self, endpoint: &Endpoint) -> zalpha_transport::Result<()> {
        self.connected = None;
        self.disconnects += 1;
        if self.fail_disconnect {
            return Err(TransportError::Disconnect {
                endpoint: endpoint.url(),
                reason: "socket closed".to_string(),
            });
        }
        Ok(())
    }

    fn send(&mut self, message: &[u8]) -> zalpha_transport::Result<()> {
        if self.connected.is_none() {
            return Err(TransportError::NotConnected);
        }
        self.sent.push(message.to_vec());
        Ok(())
    }

    fn recv(&mut self) -> zalpha_transport::Result<Bytes> {
        match self.replies.pop_front() {
            Some(Scripted::Frame(frame)) => Ok(frame.to_bytes()),
            Some(Scripted::Raw(raw)) => Ok(Bytes::from(raw)),
            Some(Scripted::Fail(err)) => Err(err),
            None => Err(TransportError::Receive("no scripted reply".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// A connected v2 client that answers with `replies` in order.
pub(crate) fn connected_client(replies: Vec<Frame>) -> Client<MockTransport> {
    connected_client_for(ProtocolGeneration::V2, replies)
}

pub(crate) fn connected_client_for(
    generation: ProtocolGeneration,
    replies: Vec<Frame>,
) -> Client<MockTransport> {
    let transport = MockTransport {
        replies: replies.into_iter().map(Scripted::Frame).collect(),
        ..MockTransport::default()
    };
    let config = ClientConfig::default().with_generation(generation);
    let mut client = Client::with_transport(transport, config);
    client.connect("agv.local").expect("mock connect");
    client
}

/// A reply echoing `code` with a payload filled in by `fill`.
pub(crate) fn reply_with(code: u16, fill: impl FnOnce(&mut Frame)) -> Frame {
    let mut frame = Frame::with_command(code);
    fill(&mut frame);
    frame
}

/// A reply echoing `code` that carries only `result`.
pub(crate) fn result_reply(code: u16, result: u16) -> Frame {
    reply_with(code, |frame| {
        frame.write(0, result).expect("result fits");
    })
}
