//! Runs a scenario against an in-memory node.

use crate::error::{ReplayError, ReplayResult};
use crate::scenario::{parse_hex_frame, Scenario, Step};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};
use zwave_alarm::{
    hex_bytes, AlarmCommandClass, CapabilitySet, CommandClass, InMemoryRegistry, NodeContext,
    OutboundFrame, RecordingTransport,
};

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// Zero-based step index.
    pub index: usize,
    /// Step description.
    pub step: String,
    /// Dispatch result: frame handled, or request issued.
    pub accepted: bool,
    /// Frames submitted while running the step.
    pub frames_sent: usize,
}

/// Final state of one value slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRecord {
    /// Device instance.
    pub instance: u8,
    /// Slot index.
    pub index: u16,
    /// Slot label.
    pub label: String,
    /// Last value.
    pub value: u8,
    /// Number of refreshes received.
    pub refreshes: u32,
}

/// An outbound frame as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    /// Request name.
    pub name: String,
    /// Queue the frame was submitted to.
    pub queue: String,
    /// Command class and payload, hex.
    pub command: String,
    /// Serial-API send-data body, hex.
    pub send_data: String,
}

impl From<&OutboundFrame> for FrameRecord {
    fn from(frame: &OutboundFrame) -> Self {
        FrameRecord {
            name: frame.name.to_string(),
            queue: frame.queue.to_string(),
            command: frame.to_hex(),
            send_data: hex_bytes(&frame.to_send_data()),
        }
    }
}

/// Capabilities learned for one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityRecord {
    /// Device instance.
    pub instance: u8,
    /// Device also reports proprietary v1 alarms.
    pub v1_alarm: bool,
    /// Supported notification type names.
    pub types: Vec<String>,
    /// Supported event codes by type name.
    pub events: BTreeMap<String, Vec<u8>>,
}

impl CapabilityRecord {
    fn new(instance: u8, caps: &CapabilitySet) -> Self {
        CapabilityRecord {
            instance,
            v1_alarm: caps.v1_alarm(),
            types: caps.types().map(|t| t.name().to_string()).collect(),
            events: caps
                .types()
                .map(|t| (t.name().to_string(), caps.events(t).collect::<Vec<u8>>()))
                .filter(|(_, events)| !events.is_empty())
                .collect(),
        }
    }
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Scenario name.
    pub name: String,
    /// Node id.
    pub node: u8,
    /// Effective command class version.
    pub version: u8,
    /// Per-step results.
    pub steps: Vec<StepOutcome>,
    /// Final slot table.
    pub slots: Vec<SlotRecord>,
    /// Outbound frames in submission order.
    pub frames: Vec<FrameRecord>,
    /// Learned capabilities.
    pub capabilities: Vec<CapabilityRecord>,
}

impl ReplayReport {
    /// Look up a slot by instance and index.
    pub fn slot(&self, instance: u8, index: u16) -> Option<&SlotRecord> {
        self.slots
            .iter()
            .find(|s| s.instance == instance && s.index == index)
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> ReplayResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scenario: {} (node {}, v{})", self.name, self.node, self.version)?;

        writeln!(f, "\nSteps:")?;
        for step in &self.steps {
            writeln!(
                f,
                "  [{:>2}] {:<5} {} ({} sent)",
                step.index,
                if step.accepted { "ok" } else { "-" },
                step.step,
                step.frames_sent
            )?;
        }

        writeln!(f, "\nSlots:")?;
        for slot in &self.slots {
            writeln!(
                f,
                "  {}:{:>3}  {:<40} = {:3} ({} refreshes)",
                slot.instance, slot.index, slot.label, slot.value, slot.refreshes
            )?;
        }

        writeln!(f, "\nFrames:")?;
        for frame in &self.frames {
            writeln!(f, "  {:<18} {:<6} {}", frame.name, frame.queue, frame.command)?;
        }

        if !self.capabilities.is_empty() {
            writeln!(f, "\nCapabilities:")?;
            for caps in &self.capabilities {
                writeln!(
                    f,
                    "  instance {}: types [{}]{}",
                    caps.instance,
                    caps.types.join(", "),
                    if caps.v1_alarm { " +v1" } else { "" }
                )?;
                for (name, events) in &caps.events {
                    writeln!(f, "    {}: {:?}", name, events)?;
                }
            }
        }

        Ok(())
    }
}

/// Run every step of a scenario and collect the resulting state.
pub fn run_scenario(scenario: &Scenario) -> ReplayResult<ReplayReport> {
    let mut cc = AlarmCommandClass::new(scenario.node, scenario.version, scenario.config.clone());
    let mut registry = InMemoryRegistry::new();
    let mut transport = RecordingTransport::new();
    let instance = scenario.instance;

    info!(
        "Replay[{}]: {} steps at version {}",
        scenario.display_name(),
        scenario.steps.len(),
        cc.version()
    );

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let before = transport.len();
        let mut ctx = NodeContext::new(&mut registry, &mut transport);

        let accepted = match step {
            Step::Initialize => {
                cc.initialize_slots(instance, &mut ctx);
                true
            }
            Step::RequestState { queue, .. } => {
                cc.request_state(step.flags(), instance, *queue, &mut ctx)
            }
            Step::RequestValue { queue } => {
                cc.request_value(step.flags(), instance, *queue, &mut ctx)
            }
            Step::Inbound(text) => {
                let data = parse_hex_frame(text).map_err(|source| ReplayError::Hex {
                    step: index,
                    frame: text.clone(),
                    source,
                })?;
                cc.handle_incoming_frame(&data, instance, &mut ctx)
            }
        };

        let frames_sent = transport.len() - before;
        debug!(
            "Replay[{}]: step {} '{}' accepted={} sent={}",
            scenario.display_name(),
            index,
            step,
            accepted,
            frames_sent
        );
        steps.push(StepOutcome {
            index,
            step: step.to_string(),
            accepted,
            frames_sent,
        });
    }

    Ok(ReplayReport {
        name: scenario.display_name(),
        node: scenario.node.get(),
        version: cc.version(),
        steps,
        slots: registry
            .slots()
            .map(|(handle, slot)| SlotRecord {
                instance: handle.instance,
                index: handle.index.get(),
                label: slot.spec.label.clone(),
                value: slot.value,
                refreshes: slot.refresh_count,
            })
            .collect(),
        frames: transport.frames().map(FrameRecord::from).collect(),
        capabilities: cc
            .capabilities()
            .instances()
            .map(|(instance, caps)| CapabilityRecord::new(instance, caps))
            .collect(),
    })
}
