use tracing::{debug, info, warn};
use zalpha_frame::{command, Frame, FRAME_SIZE};
use zalpha_transport::{Endpoint, Transport};
#[cfg(feature = "zmq")]
use zalpha_transport::ZmqTransport;

use crate::config::ClientConfig;
use crate::error::{ClientError, ProtocolViolation, Result};
use crate::layout::{Command, ProtocolGeneration, ProtocolLayout, ResultCode};

/// Client over the default ZeroMQ transport.
#[cfg(feature = "zmq")]
pub type ZmqClient = Client<ZmqTransport>;

/// Connection state of a [`Client`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Request/reply client for one API server.
///
/// Every operation runs one full transaction: build a request, send it,
/// block for the reply, validate it. Operations take `&mut self`, so a
/// client is never shared between concurrent transactions.
pub struct Client<T: Transport> {
    transport: T,
    config: ClientConfig,
    layout: &'static ProtocolLayout,
    endpoint: Option<Endpoint>,
}

#[cfg(feature = "zmq")]
impl Client<ZmqTransport> {
    /// Create a disconnected client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a disconnected client over a ZeroMQ REQ socket.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ZmqTransport::with_config(config.transport.clone())?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> Client<T> {
    /// Create a disconnected client over an explicit transport.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        let layout = config.generation.layout();
        Self {
            transport,
            config,
            layout,
            endpoint: None,
        }
    }

    /// Connect to the API server on `host`.
    pub fn connect(&mut self, host: &str) -> Result<()> {
        if self.endpoint.is_some() {
            return Err(ClientError::AlreadyConnected);
        }
        let endpoint = Endpoint::with_port(host, self.config.port)?;
        self.transport.connect(&endpoint)?;
        info!(
            %endpoint,
            transport = self.transport.name(),
            generation = %self.config.generation,
            "connected to API server"
        );
        self.endpoint = Some(endpoint);
        Ok(())
    }

    /// Disconnect from the API server. Does nothing when not connected.
    ///
    /// The client is disconnected afterwards even if the transport reports
    /// an error while releasing the endpoint.
    pub fn disconnect(&mut self) {
        let Some(endpoint) = self.endpoint.take() else {
            return;
        };
        match self.transport.disconnect(&endpoint) {
            Ok(()) => debug!(%endpoint, "disconnected from API server"),
            Err(err) => warn!(%endpoint, error = %err, "error while disconnecting"),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.endpoint.is_some()
    }

    pub fn state(&self) -> ConnectionState {
        if self.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// The endpoint of the current connection.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn generation(&self) -> ProtocolGeneration {
        self.layout.generation()
    }

    pub fn layout(&self) -> &'static ProtocolLayout {
        self.layout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Send `request` under `code` and return the validated reply.
    ///
    /// The reply must be exactly one frame long and echo `code`; its payload
    /// is not interpreted. A transport failure leaves the client connected.
    pub fn execute_command(&mut self, mut request: Frame, code: u16) -> Result<Frame> {
        if self.endpoint.is_none() {
            return Err(ClientError::NotConnected);
        }
        request.set_command(code);
        debug!(
            command = format_args!("{code:#06X}"),
            category = command::category(code).as_str(),
            "sending request"
        );
        self.transport.send(request.as_bytes())?;

        let raw = self.transport.recv()?;
        if raw.len() != FRAME_SIZE {
            let violation = ProtocolViolation::InvalidLength {
                expected: FRAME_SIZE,
                actual: raw.len(),
            };
            warn!(command = format_args!("{code:#06X}"), %violation, "rejecting reply");
            return Err(violation.into());
        }
        let reply = Frame::from_bytes(&raw)?;
        if reply.command() != code {
            let violation = ProtocolViolation::CommandMismatch {
                expected: code,
                actual: reply.command(),
            };
            warn!(%violation, "rejecting reply");
            return Err(violation.into());
        }
        debug!(command = format_args!("{code:#06X}"), "received reply");
        Ok(reply)
    }

    /// Interpret the result code at payload index 0 of `reply`.
    pub fn check_result(&self, reply: &Frame) -> Result<()> {
        let code = reply.read::<u16, _>(0)?;
        match self.layout.decode_result(code) {
            ResultCode::Ok => Ok(()),
            ResultCode::Rejected(reason) => {
                warn!(
                    command = format_args!("{:#06X}", reply.command()),
                    %reason,
                    "request rejected by device"
                );
                Err(ClientError::DeviceRejected(reason))
            }
            ResultCode::Unknown(code) => {
                warn!(result = format_args!("{code:#06X}"), "unknown result code");
                Err(ClientError::UnknownResult(code))
            }
        }
    }

    /// Resolve `command` through the layout and run one transaction.
    pub(crate) fn transact(&mut self, command: Command, request: Frame) -> Result<Frame> {
        let code = self.layout.code(command).ok_or(ClientError::Unsupported {
            command,
            generation: self.layout.generation(),
        })?;
        debug!(%command, "executing command");
        self.execute_command(request, code)
    }

    /// Run one transaction whose reply carries only a result code.
    pub(crate) fn acknowledge(&mut self, command: Command, request: Frame) -> Result<()> {
        let reply = self.transact(command, request)?;
        self.check_result(&reply)
    }
}

impl<T: Transport> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport.name())
            .field("generation", &self.layout.generation())
            .field("endpoint", &self.endpoint.as_ref().map(Endpoint::url))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use zalpha_frame::command::{RESULT_ERROR_BUSY, RESULT_OK};
    use zalpha_transport::TransportError;

    use super::*;
    use crate::error::{ErrorKind, RejectReason};
    use crate::mock::{connected_client, result_reply, MockTransport, Scripted};

    #[test]
    fn execute_before_connect_fails() {
        let mut client = Client::with_transport(MockTransport::default(), ClientConfig::default());
        assert_eq!(client.state(), ConnectionState::Disconnected);
        let err = client.execute_command(Frame::new(), 0xFA13).unwrap_err();
        assert!(matches!(err, ClientError::NotConnected));
        assert!(client.transport().sent.is_empty());
    }

    #[test]
    fn connect_twice_fails() {
        let mut client = Client::with_transport(MockTransport::default(), ClientConfig::default());
        client.connect("agv.local").unwrap();
        assert_eq!(client.endpoint().unwrap().url(), "tcp://agv.local:17167");
        assert!(matches!(
            client.connect("agv.local"),
            Err(ClientError::AlreadyConnected)
        ));
        assert!(client.is_connected());
    }

    #[test]
    fn connect_uses_configured_port() {
        let config = ClientConfig::default().with_port(5555);
        let mut client = Client::with_transport(MockTransport::default(), config);
        client.connect("10.0.0.2").unwrap();
        assert_eq!(
            client.transport().connected.as_ref().map(Endpoint::url),
            Some("tcp://10.0.0.2:5555".to_string())
        );
    }

    #[test]
    fn connect_failure_stays_disconnected() {
        let mut client = Client::with_transport(
            MockTransport {
                fail_connect: true,
                ..MockTransport::default()
            },
            ClientConfig::default(),
        );
        let err = client.connect("agv.local").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!client.is_connected());
    }

    #[test]
    fn invalid_host_is_rejected() {
        let mut client = Client::with_transport(MockTransport::default(), ClientConfig::default());
        assert!(matches!(
            client.connect(""),
            Err(ClientError::Transport(TransportError::InvalidEndpoint { .. }))
        ));
    }

    #[test]
    fn disconnect_is_idempotent() {
        let mut client = connected_client(vec![]);
        client.disconnect();
        client.disconnect();
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert_eq!(client.transport().disconnects, 1);
        assert!(matches!(
            client.execute_command(Frame::new(), 0xFA00),
            Err(ClientError::NotConnected)
        ));
    }

    #[test]
    fn disconnect_error_still_disconnects() {
        let mut client = connected_client(vec![]);
        client.transport_mut().fail_disconnect = true;
        client.disconnect();
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert_eq!(client.endpoint(), None);
        assert_eq!(client.transport().disconnects, 1);
        assert!(matches!(
            client.execute_command(Frame::new(), 0xFA00),
            Err(ClientError::NotConnected)
        ));
    }

    #[test]
    fn reconnect_after_disconnect() {
        let mut client = connected_client(vec![]);
        client.disconnect();
        client.connect("agv.local").unwrap();
        assert!(client.is_connected());
    }

    #[test]
    fn execute_sets_command_and_returns_reply() {
        let mut client = connected_client(vec![result_reply(0xFA42, RESULT_OK)]);
        let reply = client.execute_command(Frame::with_command(0x0001), 0xFA42).unwrap();
        assert_eq!(reply.command(), 0xFA42);
        let sent = &client.transport().sent[0];
        assert_eq!(sent.len(), FRAME_SIZE);
        assert_eq!(&sent[..2], &[0x42, 0xFA]);
    }

    #[test]
    fn wrong_reply_length_is_protocol_error() {
        for len in [0usize, 71, 73] {
            let mut client = connected_client(vec![]);
            client
                .transport_mut()
                .replies
                .push_back(Scripted::Raw(vec![0; len]));
            let err = client.execute_command(Frame::new(), 0xFA40).unwrap_err();
            assert!(
                matches!(
                    err,
                    ClientError::Protocol(ProtocolViolation::InvalidLength { expected: 72, actual })
                        if actual == len
                ),
                "{err:?}"
            );
        }
    }

    #[test]
    fn mismatched_reply_command_is_protocol_error() {
        let mut client = connected_client(vec![result_reply(0xFA13, RESULT_OK)]);
        let err = client.execute_command(Frame::new(), 0xFA12).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Protocol(ProtocolViolation::CommandMismatch {
                expected: 0xFA12,
                actual: 0xFA13
            })
        ));
        // Protocol errors do not drop the connection.
        assert!(client.is_connected());
    }

    #[test]
    fn transport_errors_propagate() {
        let mut client = connected_client(vec![]);
        client
            .transport_mut()
            .replies
            .push_back(Scripted::Fail(TransportError::Timeout(
                std::time::Duration::from_millis(100),
            )));
        let err = client.execute_command(Frame::new(), 0xFA40).unwrap_err();
        assert!(err.is_timeout());
        assert!(client.is_connected());
    }

    #[test]
    fn check_result_maps_codes() {
        let client = connected_client(vec![]);
        assert!(client.check_result(&result_reply(0xFA12, RESULT_OK)).is_ok());
        assert!(matches!(
            client.check_result(&result_reply(0xFA12, RESULT_ERROR_BUSY)),
            Err(ClientError::DeviceRejected(RejectReason::Busy))
        ));
        assert!(matches!(
            client.check_result(&result_reply(0xFA12, 0x1234)),
            Err(ClientError::UnknownResult(0x1234))
        ));
    }

    #[test]
    fn unsupported_command_is_not_transmitted() {
        let config = ClientConfig::default().with_generation(ProtocolGeneration::V1);
        let mut client = Client::with_transport(MockTransport::default(), config);
        client.connect("agv.local").unwrap();
        let err = client.stop_action().unwrap_err();
        assert!(matches!(
            err,
            ClientError::Unsupported {
                command: Command::StopAction,
                generation: ProtocolGeneration::V1
            }
        ));
        assert!(client.transport().sent.is_empty());
    }

    #[test]
    fn debug_shows_endpoint() {
        let client = connected_client(vec![]);
        let debug = format!("{client:?}");
        assert!(debug.contains("tcp://agv.local:17167"));
        assert!(debug.contains("mock"));
    }
}
