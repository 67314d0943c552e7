//! Requests that can be sent to an Alarm/Notification device.

use crate::constants::*;
use crate::error::{AlarmError, AlarmResult};
use crate::frame::OutboundFrame;
use crate::types::*;

/// Requests the command class can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmRequest {
    /// Untyped GET (v1 only).
    Get,

    /// GET qualified by notification type (v2+).
    GetNotification {
        /// Notification type to query.
        notification_type: NotificationType,
        /// Ask for the first event of the type (v3+ only).
        first_event: bool,
    },

    /// Request the supported notification types (v2+).
    SupportedGet,

    /// Request the supported events of one type (v3+).
    EventSupportedGet {
        /// Notification type to query.
        notification_type: NotificationType,
    },
}

impl AlarmRequest {
    /// Get the command code for this request.
    pub fn command_code(&self) -> u8 {
        match self {
            AlarmRequest::Get | AlarmRequest::GetNotification { .. } => ALARM_CMD_GET,
            AlarmRequest::SupportedGet => ALARM_CMD_SUPPORTED_GET,
            AlarmRequest::EventSupportedGet { .. } => ALARM_CMD_EVENT_SUPPORTED_GET,
        }
    }

    /// Short name used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            AlarmRequest::Get => "Get",
            AlarmRequest::GetNotification { .. } => "GetNotification",
            AlarmRequest::SupportedGet => "SupportedGet",
            AlarmRequest::EventSupportedGet { .. } => "EventSupportedGet",
        }
    }

    /// Versions for which the request is defined.
    pub fn accepts_version(&self, version: u8) -> bool {
        match self {
            AlarmRequest::Get => version == 1,
            AlarmRequest::GetNotification { first_event, .. } => {
                version >= 3 || (version == 2 && !first_event)
            }
            AlarmRequest::SupportedGet => version >= 2,
            AlarmRequest::EventSupportedGet { .. } => version >= 3,
        }
    }

    /// Encode the command byte and its parameters.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4);
        buf.push(self.command_code());

        match self {
            AlarmRequest::Get | AlarmRequest::SupportedGet => {}

            AlarmRequest::GetNotification {
                notification_type,
                first_event,
            } => {
                buf.push(GET_V1_TYPE_ANY);
                buf.push((*notification_type).into());
                if *first_event {
                    buf.push(GET_FIRST_EVENT);
                }
            }

            AlarmRequest::EventSupportedGet { notification_type } => {
                buf.push((*notification_type).into());
            }
        }

        buf
    }
}

/// Builds outbound frames for one node at its negotiated version.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder {
    node: NodeId,
    version: u8,
    transmit_options: u8,
}

impl RequestBuilder {
    /// Create a builder for a node.
    pub fn new(node: NodeId, version: u8, transmit_options: u8) -> Self {
        RequestBuilder {
            node,
            version,
            transmit_options,
        }
    }

    /// Untyped GET for v1 devices.
    pub fn query_legacy_value(&self, instance: u8, queue: QueueKind) -> AlarmResult<OutboundFrame> {
        self.build(AlarmRequest::Get, instance, queue)
    }

    /// Supported-types GET for v2+ devices.
    pub fn query_supported_types(&self, instance: u8, queue: QueueKind) -> AlarmResult<OutboundFrame> {
        self.build(AlarmRequest::SupportedGet, instance, queue)
    }

    /// Supported-events GET for one type, v3+ devices.
    pub fn query_supported_events(
        &self,
        notification_type: NotificationType,
        instance: u8,
        queue: QueueKind,
    ) -> AlarmResult<OutboundFrame> {
        self.build(
            AlarmRequest::EventSupportedGet { notification_type },
            instance,
            queue,
        )
    }

    /// Typed GET for v2+ devices; v3+ devices are asked for the first event.
    pub fn query_value_for_slot(
        &self,
        notification_type: NotificationType,
        instance: u8,
        queue: QueueKind,
    ) -> AlarmResult<OutboundFrame> {
        self.build(
            AlarmRequest::GetNotification {
                notification_type,
                first_event: self.version >= 3,
            },
            instance,
            queue,
        )
    }

    fn build(&self, request: AlarmRequest, instance: u8, queue: QueueKind) -> AlarmResult<OutboundFrame> {
        if !request.accepts_version(self.version) {
            return Err(AlarmError::UnsupportedVersion {
                command: request.name(),
                version: self.version,
            });
        }

        Ok(OutboundFrame {
            name: request.name(),
            destination: self.node,
            instance,
            class_id: COMMAND_CLASS_ALARM,
            payload: request.encode(),
            transmit_options: self.transmit_options,
            queue,
        })
    }
}
