//! Blocking TCP transport
//!
//! Every message is a 4-byte big-endian length followed by a JSON envelope.
//!
//! Requests:
//!
//! ```text
//! {"operation": "get_part", "ticket": "…", "params": {"part_num": "P-100"}}
//! ```
//!
//! Replies:
//!
//! ```text
//! {"status_code": 1000, "status_message": null, "ticket": "…", "result": {…}}
//! ```
//!
//! Status codes:
//! - 1000 -> success
//! - 1001..=1099 -> `InventoryError::Server` (retryable)
//! - 1100..=1199 -> `InventoryError::Authentication`
//! - anything else -> `InventoryError::Status`
//!
//! A read or write that exceeds the request timeout maps to
//! `InventoryError::Timeout`. After any I/O failure the socket is dropped,
//! since the framing can no longer be trusted.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, trace};

use crate::config::SessionConfig;
use crate::connection::{Connection, Connector};
use crate::error::InventoryError;
use crate::protocol::Operation;

/// Status code the backend returns for a successful request
pub const STATUS_SUCCESS: u16 = 1000;

/// Largest reply frame accepted from the backend
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Connector producing [`TcpConnection`] handles
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Connection = TcpConnection;

    fn create(&self, config: &SessionConfig) -> TcpConnection {
        TcpConnection::new(config.address(), config.request_timeout())
    }
}

#[derive(Serialize)]
struct RequestFrame<'a> {
    operation: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticket: Option<&'a str>,
    params: &'a Value,
}

#[derive(Debug, Deserialize)]
struct ReplyFrame {
    status_code: u16,
    #[serde(default)]
    status_message: Option<String>,
    #[serde(default)]
    ticket: Option<String>,
    #[serde(default)]
    result: Value,
}

impl ReplyFrame {
    fn message(&self) -> String {
        self.status_message
            .clone()
            .unwrap_or_else(|| format!("status {}", self.status_code))
    }
}

/// A session over one TCP socket
#[derive(Debug)]
pub struct TcpConnection {
    address: String,
    timeout: Duration,
    stream: Option<TcpStream>,
    ticket: Option<String>,
    last_request: Option<String>,
    last_response: Option<String>,
}

impl TcpConnection {
    /// Creates an unopened handle for `address` (`host:port`)
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
            stream: None,
            ticket: None,
            last_request: None,
            last_response: None,
        }
    }

    /// Address this handle connects to
    pub fn address(&self) -> &str {
        &self.address
    }

    fn connect_stream(&self) -> io::Result<TcpStream> {
        let mut last_error = None;
        for addr in self.address.to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(self.timeout))?;
                    stream.set_write_timeout(Some(self.timeout))?;
                    stream.set_nodelay(true)?;
                    return Ok(stream);
                }
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "address resolved to nothing")
        }))
    }

    fn exchange(&mut self, operation: Operation, params: &Value) -> Result<ReplyFrame, InventoryError> {
        let frame = RequestFrame {
            operation,
            ticket: self.ticket.as_deref(),
            params,
        };
        let body = serde_json::to_vec(&frame).map_err(|e| InventoryError::Encode {
            operation: operation.to_string(),
            message: e.to_string(),
        })?;

        self.last_request = Some(match operation {
            Operation::Login => json!({ "operation": operation, "params": { "password": "<redacted>" } })
                .to_string(),
            _ => String::from_utf8_lossy(&body).into_owned(),
        });
        self.last_response = None;

        let stream = self.stream.as_mut().ok_or(InventoryError::NotConnected)?;
        let reply = write_frame(stream, &body).and_then(|_| read_frame(stream));

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                debug!(operation = %operation, error = %e, "Transport failure, dropping socket");
                self.drop_stream();
                return Err(match e.kind() {
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => InventoryError::Timeout {
                        operation: operation.to_string(),
                        duration_ms: self.timeout.as_millis() as u64,
                    },
                    _ => InventoryError::from(e),
                });
            }
        };

        self.last_response = Some(String::from_utf8_lossy(&reply).into_owned());
        trace!(operation = %operation, bytes = reply.len(), "Received reply frame");

        serde_json::from_slice(&reply).map_err(|e| InventoryError::decode(operation.as_str(), e))
    }

    fn drop_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        self.ticket = None;
    }
}

impl Connection for TcpConnection {
    fn open(&mut self) -> Result<(), InventoryError> {
        self.drop_stream();
        let stream = self.connect_stream()?;
        debug!(address = %self.address, "Opened inventory transport");
        self.stream = Some(stream);
        Ok(())
    }

    fn login(&mut self, username: &str, password: &str) -> Result<(), InventoryError> {
        let params = json!({ "username": username, "password": password });
        let reply = self.exchange(Operation::Login, &params)?;

        if reply.status_code != STATUS_SUCCESS {
            return Err(InventoryError::Authentication(reply.message()));
        }

        self.ticket = reply.ticket.or_else(|| Some(String::new()));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some() && self.ticket.is_some()
    }

    fn call(&mut self, operation: Operation, params: Value) -> Result<Option<Value>, InventoryError> {
        if !self.is_connected() {
            return Err(InventoryError::NotConnected);
        }

        let reply = self.exchange(operation, &params)?;
        if let Some(ticket) = reply.ticket.clone() {
            self.ticket = Some(ticket);
        }

        match reply.status_code {
            STATUS_SUCCESS if reply.result.is_null() => Ok(None),
            STATUS_SUCCESS => Ok(Some(reply.result)),
            code => Err(classify_status(code, reply.message())),
        }
    }

    fn close(&mut self) {
        if self.stream.is_some() {
            debug!(address = %self.address, "Closing inventory transport");
        }
        self.drop_stream();
    }

    fn last_request(&self) -> Option<String> {
        self.last_request.clone()
    }

    fn last_response(&self) -> Option<String> {
        self.last_response.clone()
    }
}

/// Maps a non-success status code onto the error taxonomy
pub fn classify_status(code: u16, message: impl Into<String>) -> InventoryError {
    match code {
        1001..=1099 => InventoryError::server(code, message),
        1100..=1199 => InventoryError::Authentication(message.into()),
        _ => InventoryError::status(code, message),
    }
}

/// Writes one length-prefixed frame
pub fn write_frame<W: Write>(writer: &mut W, body: &[u8]) -> io::Result<()> {
    let len = u32::try_from(body.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "frame too large"))?;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(body)?;
    writer.flush()
}

/// Reads one length-prefixed frame
pub fn read_frame<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut header = [0u8; 4];
    reader.read_exact(&mut header)?;
    let len = u32::from_be_bytes(header) as usize;
    if len > MAX_FRAME_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame of {} bytes exceeds limit", len),
        ));
    }
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_frame_round_trip() {
        let mut buffer = Vec::new();
        write_frame(&mut buffer, br#"{"status_code":1000}"#).unwrap();
        assert_eq!(&buffer[..4], &[0, 0, 0, 20]);

        let body = read_frame(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(body, br#"{"status_code":1000}"#);
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let header = ((MAX_FRAME_LEN + 1) as u32).to_be_bytes();
        let error = read_frame(&mut Cursor::new(header.to_vec())).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_status_classification() {
        assert!(classify_status(1004, "busy").is_retryable());
        assert!(matches!(
            classify_status(1120, "expired"),
            InventoryError::Authentication(_)
        ));
        assert!(!classify_status(2300, "invalid customer").is_retryable());
    }

    #[test]
    fn test_call_without_open_is_not_connected() {
        let mut connection = TcpConnection::new("127.0.0.1:1", Duration::from_secs(1));
        let result = connection.call(Operation::GetCarrierList, json!({}));
        assert_eq!(result, Err(InventoryError::NotConnected));
        assert!(!connection.is_connected());
    }
}
