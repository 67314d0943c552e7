//! The Alarm/Notification command class state machine.
//!
//! [`AlarmCommandClass`] turns inbound frames into value slot updates and
//! capability records, and turns state requests into outbound queries. The
//! value registry and transport it works against are passed in per call
//! through a [`NodeContext`].

use crate::capability::{CapabilitySet, CapabilityTracker};
use crate::config::AlarmConfig;
use crate::constants::*;
use crate::error::AlarmResult;
use crate::frame::OutboundFrame;
use crate::registry::{ByteSlotSpec, ValueRegistry};
use crate::reports::{set_bits, AlarmReport, V2Extension, V3Notification};
use crate::requests::RequestBuilder;
use crate::slots::{declared_slot_index, legacy_slot_index, slot_index, type_slots};
use crate::tables::{event_count, event_label};
use crate::telemetry::metric_defs;
use crate::transport::Transport;
use crate::types::*;
use tracing::{debug, info, trace, warn};

/// Collaborators a command class works against while handling one call.
pub struct NodeContext<'a> {
    /// Value slot storage for the node.
    pub registry: &'a mut dyn ValueRegistry,
    /// Outbound frame sink.
    pub transport: &'a mut dyn Transport,
}

impl<'a> NodeContext<'a> {
    /// Bundle a registry and a transport.
    pub fn new(registry: &'a mut dyn ValueRegistry, transport: &'a mut dyn Transport) -> Self {
        NodeContext {
            registry,
            transport,
        }
    }
}

/// Dispatch contract shared by command class handlers.
pub trait CommandClass {
    /// Command class identifier byte.
    fn command_class_id(&self) -> u8;

    /// Request the node's state for the given flags. Returns whether a
    /// request was issued.
    fn request_state(
        &mut self,
        flags: RequestFlags,
        instance: u8,
        queue: QueueKind,
        ctx: &mut NodeContext<'_>,
    ) -> bool;

    /// Request current values. Returns whether a request was issued.
    fn request_value(
        &mut self,
        flags: RequestFlags,
        instance: u8,
        queue: QueueKind,
        ctx: &mut NodeContext<'_>,
    ) -> bool;

    /// Handle an inbound payload (command byte first). Returns whether the
    /// frame belonged to this class.
    fn handle_incoming_frame(&mut self, data: &[u8], instance: u8, ctx: &mut NodeContext<'_>) -> bool;

    /// Create the slots every instance has before discovery.
    fn initialize_slots(&mut self, instance: u8, ctx: &mut NodeContext<'_>);
}

/// Alarm/Notification command class (0x71) for one node.
#[derive(Debug, Clone)]
pub struct AlarmCommandClass {
    node: NodeId,
    version: u8,
    config: AlarmConfig,
    static_request_pending: bool,
    capabilities: CapabilityTracker,
}

impl AlarmCommandClass {
    /// Create the command class for a node at its negotiated version.
    ///
    /// The version is clamped to `1..=MAX_SUPPORTED_VERSION`.
    pub fn new(node: NodeId, version: u8, config: AlarmConfig) -> Self {
        AlarmCommandClass {
            node,
            version: clamp_version(version),
            config,
            static_request_pending: true,
            capabilities: CapabilityTracker::new(),
        }
    }

    /// Node this class belongs to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Negotiated command class version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Update the negotiated version, e.g. after a version report.
    pub fn set_version(&mut self, version: u8) {
        self.version = clamp_version(version);
    }

    /// Active configuration.
    pub fn config(&self) -> &AlarmConfig {
        &self.config
    }

    /// Whether static discovery has not completed yet.
    pub fn static_request_pending(&self) -> bool {
        self.static_request_pending
    }

    /// Capabilities learned so far.
    pub fn capabilities(&self) -> &CapabilityTracker {
        &self.capabilities
    }

    /// Capabilities learned for one instance.
    pub fn instance_capabilities(&self, instance: u8) -> Option<&CapabilitySet> {
        self.capabilities.get(instance)
    }

    fn requests(&self) -> RequestBuilder {
        RequestBuilder::new(self.node, self.version, self.config.transmit_options)
    }

    fn node_label(&self) -> String {
        self.node.get().to_string()
    }

    fn submit(&self, ctx: &mut NodeContext<'_>, frame: AlarmResult<OutboundFrame>) -> bool {
        match frame {
            Ok(frame) => {
                debug!(
                    "Alarm[{}]: Sending {} on {} queue: {}",
                    self.node,
                    frame.name,
                    frame.queue,
                    frame.to_hex()
                );
                let labels = [("node", self.node_label()), ("command", frame.name.to_string())];
                metrics::counter!(metric_defs::QUERIES_SENT.name, &labels).increment(1);
                ctx.transport.submit_outbound_frame(frame);
                true
            }
            Err(e) => {
                warn!("Alarm[{}]: Not sending query: {}", self.node, e);
                false
            }
        }
    }

    fn create_slot(&self, ctx: &mut NodeContext<'_>, instance: u8, index: SlotIndex, label: &str) {
        if ctx.registry.get_slot(instance, COMMAND_CLASS_ALARM, index).is_some() {
            return;
        }
        trace!("Alarm[{}]: Creating slot {} '{}'", self.node, index, label);
        ctx.registry
            .create_byte_slot(instance, COMMAND_CLASS_ALARM, index, ByteSlotSpec::read_only(label));
        metrics::counter!(metric_defs::SLOTS_CREATED.name, "node" => self.node_label()).increment(1);
    }

    fn refresh(&self, ctx: &mut NodeContext<'_>, instance: u8, index: SlotIndex, value: u8) -> bool {
        match ctx.registry.get_slot(instance, COMMAND_CLASS_ALARM, index) {
            Some(handle) => {
                ctx.registry.refresh_slot_value(handle, value);
                true
            }
            None => {
                trace!("Alarm[{}]: No slot {} to refresh", self.node, index);
                false
            }
        }
    }

    fn apply_report(&mut self, report: AlarmReport, instance: u8, ctx: &mut NodeContext<'_>) {
        match report {
            AlarmReport::V1 { alarm_type, level } => {
                info!(
                    "Alarm[{}]: Received Alarm report: type={}, level={}",
                    self.node, alarm_type, level
                );
                self.refresh(ctx, instance, SlotIndex::TYPE, alarm_type);
                self.refresh(ctx, instance, SlotIndex::LEVEL, level);
            }

            AlarmReport::V2 {
                alarm_type,
                level,
                extension,
            } => {
                info!(
                    "Alarm[{}]: Received Alarm report: type={}, level={}",
                    self.node, alarm_type, level
                );
                self.refresh(ctx, instance, SlotIndex::TYPE, alarm_type);
                self.refresh(ctx, instance, SlotIndex::LEVEL, level);
                if let Some(ext) = extension {
                    self.apply_v2_extension(ext, instance, ctx);
                }
            }

            AlarmReport::V3 {
                alarm_type,
                notification,
            } => {
                self.refresh(ctx, instance, SlotIndex::TYPE, alarm_type);
                match notification {
                    Some(n) => self.apply_notification(n, instance, ctx),
                    None => info!(
                        "Alarm[{}]: Received Alarm report without notification: type={}",
                        self.node, alarm_type
                    ),
                }
            }

            AlarmReport::SupportedTypes { v1_alarm, bitmask } => {
                self.apply_supported_types(v1_alarm, &bitmask, instance, ctx);
            }

            AlarmReport::SupportedEvents {
                notification_type,
                bitmask,
            } => {
                self.apply_supported_events(notification_type, &bitmask, instance, ctx);
            }
        }
    }

    fn apply_v2_extension(&self, ext: V2Extension, instance: u8, ctx: &mut NodeContext<'_>) {
        info!(
            "Alarm[{}]: Notification from node {}: {} event {}",
            self.node,
            ext.source_node_id,
            crate::tables::raw_type_name(ext.notification_type),
            ext.event
        );
        self.refresh(ctx, instance, SlotIndex::SOURCE_NODE_ID, ext.source_node_id);
        self.refresh(ctx, instance, legacy_slot_index(ext.notification_type), ext.event);
    }

    fn apply_notification(&self, n: V3Notification, instance: u8, ctx: &mut NodeContext<'_>) {
        self.refresh(ctx, instance, SlotIndex::LEVEL, n.status);

        let Some(t) = n.known_type() else {
            debug!(
                "Alarm[{}]: Ignoring notification of unknown type {}",
                self.node, n.notification_type
            );
            return;
        };

        if n.event.is_sentinel() {
            info!("Alarm[{}]: {} cleared (event {})", self.node, t, n.event.get());
            for index in type_slots(t) {
                self.refresh(ctx, instance, index, 0);
            }
        } else {
            info!(
                "Alarm[{}]: {}: {} (status {})",
                self.node,
                t,
                event_label(t, n.event.get()),
                n.status
            );
            self.refresh(ctx, instance, slot_index(t, n.event.get()), 1);
        }
    }

    fn apply_supported_types(
        &mut self,
        v1_alarm: bool,
        bitmask: &[u8],
        instance: u8,
        ctx: &mut NodeContext<'_>,
    ) {
        self.create_slot(ctx, instance, SlotIndex::SOURCE_NODE_ID, "SourceNodeId");

        let mut supported = Vec::new();
        for bit in set_bits(bitmask) {
            match u8::try_from(bit).ok().map(NotificationType::try_from) {
                Some(Ok(t)) => supported.push(t),
                _ => info!("Alarm[{}]: Unknown alarm type: {}", self.node, bit),
            }
        }

        let caps = self.capabilities.entry(instance);
        caps.set_v1_alarm(v1_alarm);
        for &t in &supported {
            caps.add_type(t);
        }

        debug!(
            "Alarm[{}]: Instance {} supports {} notification types",
            self.node,
            instance,
            supported.len()
        );

        for t in supported {
            if self.version <= 2 {
                self.create_slot(ctx, instance, legacy_slot_index(t.into()), t.name());
            } else {
                let frame = self
                    .requests()
                    .query_supported_events(t, instance, self.config.discovery_queue);
                self.submit(ctx, frame);
            }
        }

        self.static_request_pending = false;
    }

    fn apply_supported_events(
        &mut self,
        notification_type: u8,
        bitmask: &[u8],
        instance: u8,
        ctx: &mut NodeContext<'_>,
    ) {
        let t = match NotificationType::try_from(notification_type) {
            Ok(t) => t,
            Err(e) => {
                warn!("Alarm[{}]: Ignoring supported events: {}", self.node, e);
                return;
            }
        };

        let events: Vec<u8> = set_bits(bitmask)
            .filter_map(|bit| u8::try_from(bit).ok())
            .collect();

        let caps = self.capabilities.entry(instance);
        for &event in &events {
            caps.add_event(t, event);
        }

        debug!("Alarm[{}]: {} supports {} events", self.node, t, events.len());

        for event in events {
            match declared_slot_index(t, event) {
                Some(index) => self.create_slot(ctx, instance, index, event_label(t, event)),
                None => debug!(
                    "Alarm[{}]: {} event {} is outside its {} declared events, no slot",
                    self.node,
                    t,
                    event,
                    event_count(t)
                ),
            }
        }
    }

    /// Types whose value slots are registered for an instance.
    fn registered_types(&self, instance: u8, ctx: &NodeContext<'_>) -> Vec<NotificationType> {
        let exists = |index: SlotIndex| {
            ctx.registry
                .get_slot(instance, COMMAND_CLASS_ALARM, index)
                .is_some()
        };

        NotificationType::ALL
            .into_iter()
            .filter(|&t| {
                if self.version <= 2 {
                    exists(legacy_slot_index(t.into()))
                } else {
                    type_slots(t).any(|index| exists(index))
                }
            })
            .collect()
    }
}

impl CommandClass for AlarmCommandClass {
    fn command_class_id(&self) -> u8 {
        COMMAND_CLASS_ALARM
    }

    fn request_state(
        &mut self,
        flags: RequestFlags,
        instance: u8,
        queue: QueueKind,
        ctx: &mut NodeContext<'_>,
    ) -> bool {
        if flags.contains(RequestFlags::STATIC) && self.static_request_pending && self.version > 1 {
            let frame = self.requests().query_supported_types(instance, queue);
            return self.submit(ctx, frame);
        }

        if flags.contains(RequestFlags::DYNAMIC) {
            return self.request_value(flags, instance, queue, ctx);
        }

        false
    }

    fn request_value(
        &mut self,
        _flags: RequestFlags,
        instance: u8,
        queue: QueueKind,
        ctx: &mut NodeContext<'_>,
    ) -> bool {
        if !self.config.get_supported {
            info!("Alarm[{}]: Get not supported by this device", self.node);
            return false;
        }

        if self.version == 1 {
            let frame = self.requests().query_legacy_value(instance, queue);
            return self.submit(ctx, frame);
        }

        let mut sent = false;
        for t in self.registered_types(instance, ctx) {
            let frame = self.requests().query_value_for_slot(t, instance, queue);
            sent |= self.submit(ctx, frame);
        }
        sent
    }

    fn handle_incoming_frame(&mut self, data: &[u8], instance: u8, ctx: &mut NodeContext<'_>) -> bool {
        if data.is_empty() {
            return false;
        }

        trace!("Alarm[{}]: Inbound frame: {}", self.node, hex_bytes(data));

        let report = match AlarmReport::decode(data, self.version) {
            Ok(report) => report,
            Err(e) if e.is_unhandled() => {
                trace!("Alarm[{}]: {}", self.node, e);
                metrics::counter!(metric_defs::FRAMES_UNHANDLED.name, "node" => self.node_label())
                    .increment(1);
                return false;
            }
            Err(e) => {
                warn!("Alarm[{}]: Dropping frame: {}", self.node, e);
                metrics::counter!(metric_defs::FRAMES_TRUNCATED.name, "node" => self.node_label())
                    .increment(1);
                return true;
            }
        };

        let labels = [("node", self.node_label()), ("kind", report.kind_name().to_string())];
        metrics::counter!(metric_defs::FRAMES_RECEIVED.name, &labels).increment(1);
        if report.is_truncated() {
            debug!(
                "Alarm[{}]: {} without extended fields",
                self.node,
                report.kind_name()
            );
            metrics::counter!(metric_defs::FRAMES_TRUNCATED.name, "node" => self.node_label())
                .increment(1);
        }

        self.apply_report(report, instance, ctx);
        true
    }

    fn initialize_slots(&mut self, instance: u8, ctx: &mut NodeContext<'_>) {
        self.create_slot(ctx, instance, SlotIndex::TYPE, "Alarm Type");
        self.create_slot(ctx, instance, SlotIndex::LEVEL, "Alarm Level");
        self.create_slot(ctx, instance, SlotIndex::SOURCE_NODE_ID, "SourceNodeId");
    }
}

fn clamp_version(version: u8) -> u8 {
    version.clamp(1, MAX_SUPPORTED_VERSION)
}
