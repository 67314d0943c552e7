//! Outbound frame representation.
//!
//! The command class hands frames to the transport as structured values; the
//! transport decides how they are framed on the wire. [`OutboundFrame::to_send_data`]
//! renders the serial-API send-data layout used by controller sticks:
//!
//! ```text
//! +------+-----+-------+-----+-----------+------------+
//! | dest | len | class | cmd | params... | tx_options |
//! +------+-----+-------+-----+-----------+------------+
//! ```

use crate::types::{hex_bytes, NodeId, QueueKind};
use bytes::BufMut;
use serde::Serialize;

/// One outbound command addressed to a node instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundFrame {
    /// Short name of the command, for logs.
    pub name: &'static str,
    /// Destination node.
    pub destination: NodeId,
    /// Destination endpoint instance.
    pub instance: u8,
    /// Command class id.
    pub class_id: u8,
    /// Command byte followed by its parameters.
    pub payload: Vec<u8>,
    /// Transmit options to send with.
    pub transmit_options: u8,
    /// Driver queue the frame belongs on.
    pub queue: QueueKind,
}

impl OutboundFrame {
    /// Command byte of the frame.
    pub fn command(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// Command class id followed by the payload.
    pub fn command_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + self.payload.len());
        buf.push(self.class_id);
        buf.extend_from_slice(&self.payload);
        buf
    }

    /// Encode as the serial-API send-data body.
    pub fn to_send_data(&self) -> Vec<u8> {
        let body_len = 1 + self.payload.len();
        let mut buf = Vec::with_capacity(3 + body_len);
        buf.put_u8(self.destination.get());
        buf.put_u8(body_len as u8);
        buf.put_u8(self.class_id);
        buf.put_slice(&self.payload);
        buf.put_u8(self.transmit_options);
        buf
    }

    /// Hex rendering of [`OutboundFrame::command_bytes`].
    pub fn to_hex(&self) -> String {
        hex_bytes(&self.command_bytes())
    }
}
