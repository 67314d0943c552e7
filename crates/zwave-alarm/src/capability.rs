//! Per-instance record of what a device has declared it can report.

use crate::types::NotificationType;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Capabilities one device instance has confirmed.
///
/// Only grows: reports add types and events, nothing removes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilitySet {
    /// Types announced by a supported-types report.
    types: BTreeSet<NotificationType>,
    /// Events announced per type by supported-events reports (v3+).
    events: BTreeMap<NotificationType, BTreeSet<u8>>,
    /// Device also speaks the proprietary v1 alarm format.
    v1_alarm: bool,
}

impl CapabilitySet {
    /// Create an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a supported type. Returns `true` if it was not known before.
    pub fn add_type(&mut self, t: NotificationType) -> bool {
        self.types.insert(t)
    }

    /// Record a supported event. Also records its type.
    ///
    /// Returns `true` if the event was not known before.
    pub fn add_event(&mut self, t: NotificationType, event: u8) -> bool {
        self.types.insert(t);
        self.events.entry(t).or_default().insert(event)
    }

    /// Note that the device declared legacy v1 alarm support.
    pub fn set_v1_alarm(&mut self, supported: bool) {
        self.v1_alarm |= supported;
    }

    /// Whether the device declared legacy v1 alarm support.
    pub fn v1_alarm(&self) -> bool {
        self.v1_alarm
    }

    /// Whether the type was declared.
    pub fn supports_type(&self, t: NotificationType) -> bool {
        self.types.contains(&t)
    }

    /// Declared types in wire order.
    pub fn types(&self) -> impl Iterator<Item = NotificationType> + '_ {
        self.types.iter().copied()
    }

    /// Declared events of one type in code order.
    pub fn events(&self, t: NotificationType) -> impl Iterator<Item = u8> + '_ {
        self.events.get(&t).into_iter().flat_map(|e| e.iter().copied())
    }

    /// Whether nothing has been declared yet.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Capability sets keyed by device instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CapabilityTracker {
    instances: BTreeMap<u8, CapabilitySet>,
}

impl CapabilityTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capabilities of an instance, if any were recorded.
    pub fn get(&self, instance: u8) -> Option<&CapabilitySet> {
        self.instances.get(&instance)
    }

    /// Capabilities of an instance, created empty on first use.
    pub fn entry(&mut self, instance: u8) -> &mut CapabilitySet {
        self.instances.entry(instance).or_default()
    }

    /// All instances with a record.
    pub fn instances(&self) -> impl Iterator<Item = (u8, &CapabilitySet)> {
        self.instances.iter().map(|(i, c)| (*i, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_set_grows() {
        let mut caps = CapabilitySet::new();
        assert!(caps.is_empty());
        assert!(caps.add_type(NotificationType::Smoke));
        assert!(!caps.add_type(NotificationType::Smoke));
        assert!(caps.supports_type(NotificationType::Smoke));
        assert!(!caps.supports_type(NotificationType::Flood));
    }

    #[test]
    fn test_events_imply_type() {
        let mut caps = CapabilitySet::new();
        assert!(caps.add_event(NotificationType::Burglar, 7));
        assert!(!caps.add_event(NotificationType::Burglar, 7));
        caps.add_event(NotificationType::Burglar, 3);
        assert!(caps.supports_type(NotificationType::Burglar));
        assert_eq!(caps.events(NotificationType::Burglar).collect::<Vec<_>>(), vec![3, 7]);
        assert_eq!(caps.events(NotificationType::Smoke).count(), 0);
    }

    #[test]
    fn test_v1_alarm_flag_is_sticky() {
        let mut caps = CapabilitySet::new();
        caps.set_v1_alarm(true);
        caps.set_v1_alarm(false);
        assert!(caps.v1_alarm());
    }

    #[test]
    fn test_tracker_per_instance() {
        let mut tracker = CapabilityTracker::new();
        tracker.entry(1).add_type(NotificationType::Heat);
        tracker.entry(2).add_type(NotificationType::Flood);

        assert!(tracker.get(1).unwrap().supports_type(NotificationType::Heat));
        assert!(!tracker.get(1).unwrap().supports_type(NotificationType::Flood));
        assert!(tracker.get(3).is_none());
        assert_eq!(tracker.instances().count(), 2);
    }
}
