//! Metric declarations for the Alarm command class.
//!
//! Metrics are recorded through the [`metrics`] facade. Nothing is collected
//! unless the host installs a recorder.
//!
//! ```rust,ignore
//! use zwave_alarm::telemetry::{describe_metrics, metric_defs};
//!
//! describe_metrics();
//! metrics::counter!(metric_defs::FRAMES_RECEIVED.name, "kind" => "report_v3").increment(1);
//! ```

use metrics::{describe_counter, Unit};

/// A counter declaration with its metadata.
#[derive(Debug, Clone, Copy)]
pub struct Metric {
    /// The metric name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Unit of measurement.
    pub unit: Unit,
    /// Expected label keys.
    pub labels: &'static [&'static str],
}

impl Metric {
    /// Declare a counter counting events.
    pub const fn counter(name: &'static str) -> Self {
        Self {
            name,
            description: "",
            unit: Unit::Count,
            labels: &[],
        }
    }

    /// Set the description.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Set the expected label keys.
    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Register the description with the installed recorder.
    pub fn describe(&self) {
        describe_counter!(self.name, self.unit, self.description);
    }
}

/// All metric definitions for the command class.
pub mod metric_defs {
    use super::Metric;

    /// Inbound frames decoded, by report kind.
    pub const FRAMES_RECEIVED: Metric = Metric::counter("zwave.alarm.frames_received")
        .with_description("Inbound Alarm frames decoded")
        .with_labels(&["node", "kind"]);

    /// Inbound frames with a command byte this class does not handle.
    pub const FRAMES_UNHANDLED: Metric = Metric::counter("zwave.alarm.frames_unhandled")
        .with_description("Inbound frames not recognised by the Alarm command class")
        .with_labels(&["node"]);

    /// Inbound frames too short for their layout.
    pub const FRAMES_TRUNCATED: Metric = Metric::counter("zwave.alarm.frames_truncated")
        .with_description("Inbound Alarm frames missing base or extended fields")
        .with_labels(&["node"]);

    /// Outbound queries submitted, by command.
    pub const QUERIES_SENT: Metric = Metric::counter("zwave.alarm.queries_sent")
        .with_description("Alarm queries submitted to the transport")
        .with_labels(&["node", "command"]);

    /// Value slots created from capability reports.
    pub const SLOTS_CREATED: Metric = Metric::counter("zwave.alarm.slots_created")
        .with_description("Alarm value slots created from capability discovery")
        .with_labels(&["node"]);

    /// Every metric, for bulk registration.
    pub const ALL: &[&Metric] = &[
        &FRAMES_RECEIVED,
        &FRAMES_UNHANDLED,
        &FRAMES_TRUNCATED,
        &QUERIES_SENT,
        &SLOTS_CREATED,
    ];
}

/// Register descriptions for every metric. Call once after installing a recorder.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_definitions() {
        assert_eq!(metric_defs::FRAMES_RECEIVED.name, "zwave.alarm.frames_received");
        assert_eq!(metric_defs::FRAMES_RECEIVED.labels, &["node", "kind"]);
        assert_eq!(metric_defs::QUERIES_SENT.unit, Unit::Count);
        assert_eq!(metric_defs::ALL.len(), 5);
    }

    #[test]
    fn test_describe_without_recorder() {
        describe_metrics();
    }
}
