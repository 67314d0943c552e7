//! Transport collaborator.
//!
//! Submission is fire-and-forget: queuing, retries and acknowledgements
//! belong to the transport. Responses come back later as separate inbound
//! frames.

use crate::frame::OutboundFrame;
use crate::types::QueueKind;
use std::collections::VecDeque;

/// Accepts outbound frames for delivery.
pub trait Transport {
    /// Queue a frame for delivery.
    fn submit_outbound_frame(&mut self, frame: OutboundFrame);
}

/// A [`Transport`] that keeps every submitted frame in order.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    frames: VecDeque<OutboundFrame>,
}

impl RecordingTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames submitted so far, oldest first.
    pub fn frames(&self) -> impl Iterator<Item = &OutboundFrame> {
        self.frames.iter()
    }

    /// Frames submitted to one queue.
    pub fn frames_on(&self, queue: QueueKind) -> impl Iterator<Item = &OutboundFrame> {
        self.frames.iter().filter(move |f| f.queue == queue)
    }

    /// Remove and return the oldest frame.
    pub fn pop(&mut self) -> Option<OutboundFrame> {
        self.frames.pop_front()
    }

    /// Remove and return every frame.
    pub fn drain(&mut self) -> Vec<OutboundFrame> {
        self.frames.drain(..).collect()
    }

    /// Number of frames held.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frames are held.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Transport for RecordingTransport {
    fn submit_outbound_frame(&mut self, frame: OutboundFrame) {
        self.frames.push_back(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::types::NodeId;

    fn frame(queue: QueueKind, cmd: u8) -> OutboundFrame {
        OutboundFrame {
            name: "Test",
            destination: NodeId(3),
            instance: 1,
            class_id: COMMAND_CLASS_ALARM,
            payload: vec![cmd],
            transmit_options: DEFAULT_TRANSMIT_OPTIONS,
            queue,
        }
    }

    #[test]
    fn test_recording_transport_order() {
        let mut transport = RecordingTransport::new();
        transport.submit_outbound_frame(frame(QueueKind::Send, 1));
        transport.submit_outbound_frame(frame(QueueKind::Query, 2));
        transport.submit_outbound_frame(frame(QueueKind::Send, 3));

        assert_eq!(transport.len(), 3);
        assert_eq!(transport.frames_on(QueueKind::Send).count(), 2);
        assert_eq!(transport.pop().unwrap().command(), Some(1));

        let rest = transport.drain();
        assert_eq!(rest.len(), 2);
        assert!(transport.is_empty());
    }
}
