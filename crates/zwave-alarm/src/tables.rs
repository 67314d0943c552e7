//! Code tables for notification types and their events.
//!
//! Everything here is `const` data: the per-type event label tables and the
//! cumulative slot offsets are fixed at compile time, so lookups never race
//! with initialization.

use crate::constants::UNKNOWN_LABEL;
use crate::types::NotificationType;

/// Static description of one notification type.
#[derive(Debug, Clone, Copy)]
pub struct TypeTable {
    /// Display name of the type.
    pub name: &'static str,
    /// Size of the type's event code space (`0..event_count`).
    pub event_count: u8,
    /// Labelled event codes, sorted by code.
    pub labels: &'static [(u8, &'static str)],
}

const GENERAL_EVENTS: &[(u8, &str)] = &[];

const SMOKE_EVENTS: &[(u8, &str)] = &[
    (0x00, "Smoke Alarm Inactive"),
    (0x01, "Smoke"),
    (0x02, "Smoke"),
    (0x03, "Smoke Test"),
    (0x04, "Smoke Replacement Required"),
];

const CARBON_MONOXIDE_EVENTS: &[(u8, &str)] = &[
    (0x00, "Carbon Monoxide Alarm Inactive"),
    (0x01, "Carbon Monoxide"),
    (0x02, "Carbon Monoxide"),
    (0x03, "Carbon Monoxide Test"),
    (0x04, "Carbon Monoxide Replacement Required"),
];

const CARBON_DIOXIDE_EVENTS: &[(u8, &str)] = &[
    (0x00, "Carbon Dioxide Alarm Inactive"),
    (0x01, "Carbon Dioxide"),
    (0x02, "Carbon Dioxide"),
    (0x03, "Carbon Dioxide Test"),
    (0x04, "Carbon Dioxide Replacement Required"),
];

const HEAT_EVENTS: &[(u8, &str)] = &[
    (0x00, "Heat Alarm Inactive"),
    (0x01, "Heat"),
    (0x02, "Heat"),
    (0x03, "Rapid Temperature Rise"),
    (0x04, "Rapid Temperature Rise"),
    (0x05, "Underheat"),
    (0x06, "Underheat"),
];

const FLOOD_EVENTS: &[(u8, &str)] = &[
    (0x00, "Flood Alarm Inactive"),
    (0x01, "Flood"),
    (0x02, "Flood"),
    (0x03, "Water Level Dropped"),
    (0x04, "Water Level Dropped"),
    (0x05, "Replace Water Filter"),
];

// Codes 0x18..=0x3F are unassigned; 0x40.. are the barrier operator events.
const ACCESS_CONTROL_EVENTS: &[(u8, &str)] = &[
    (0x00, "Access Control Inactive"),
    (0x01, "Manual Lock Operation"),
    (0x02, "Manual Unlock Operation"),
    (0x03, "RF Lock Operation"),
    (0x04, "RF Unlock Operation"),
    (0x05, "Keypad Lock Operation"),
    (0x06, "Keypad Unlock Operation"),
    (0x07, "Manual Not Fully Locked Operation"),
    (0x08, "RF Not Fully Locked Operation"),
    (0x09, "Auto Lock Locked Operation"),
    (0x0A, "Auto Lock Not Fully Operation"),
    (0x0B, "Lock Jammed"),
    (0x0C, "All user codes deleted"),
    (0x0D, "Single user code deleted"),
    (0x0E, "New user code added"),
    (0x0F, "New user code not added due to duplicate code"),
    (0x10, "Keypad temporary disabled"),
    (0x11, "Keypad busy"),
    (0x12, "New Program code Entered - Unique code for lock configuration"),
    (0x13, "Manually Enter user Access code exceeds code limit"),
    (0x14, "Unlock By RF with invalid user code"),
    (0x15, "Locked by RF with invalid user codes"),
    (0x16, "Window/Door is open"),
    (0x17, "Window/Door is closed"),
    (0x40, "Barrier performing Initialization process"),
    (0x41, "Barrier operation force has been exceeded."),
    (0x42, "Barrier motor has exceeded manufacturer's operational time limit"),
    (0x43, "Barrier operation has exceeded physical mechanical limits."),
    (0x44, "Barrier unable to perform requested operation due to UL requirements."),
    (0x45, "Barrier Unattended operation has been disabled per UL requirements."),
    (0x46, "Barrier failed to perform Requested operation, device malfunction"),
    (0x47, "Barrier Vacation Mode"),
    (0x48, "Barrier Safety Beam Obstacle"),
    (0x49, "Barrier Sensor Not Detected / Supervisory Error"),
    (0x4A, "Barrier Sensor Low Battery Warning"),
    (0x4B, "Barrier detected short in Wall Station wires"),
    (0x4C, "Barrier associated with non-Z-wave remote control"),
];

const BURGLAR_EVENTS: &[(u8, &str)] = &[
    (0x00, "Burglar Alarm Inactive"),
    (0x01, "Intrusion"),
    (0x02, "Intrusion"),
    (0x03, "Tamper"),
    (0x04, "Tamper Invalid Code"),
    (0x05, "Glass Breakage"),
    (0x06, "Glass Breakage"),
    (0x07, "Motion"),
    (0x08, "Motion"),
];

const POWER_MANAGEMENT_EVENTS: &[(u8, &str)] = &[
    (0x00, "Power Management Alarm Inactive"),
    (0x01, "Power Applied"),
    (0x02, "AC Mains Disconnected"),
    (0x03, "AC Mains re-connected"),
    (0x04, "Surge detected"),
    (0x05, "Voltage Drop/Drift"),
    (0x06, "Over-current detected"),
    (0x07, "Over-voltage detected"),
    (0x08, "Over-load detected"),
    (0x09, "Load error"),
    (0x0A, "Replace battery soon"),
    (0x0B, "Replace battery now"),
    (0x0C, "Battery is charging"),
    (0x0D, "Battery is fully charged"),
    (0x0E, "Charge battery soon"),
    (0x0F, "Charge battery now!"),
];

const SYSTEM_EVENTS: &[(u8, &str)] = &[
    (0x00, "System Alarm Inactive"),
    (0x01, "System Hardware Failure"),
    (0x02, "System Software Failure"),
    (0x03, "System Hardware Failure With manufacturer proprietary failure code"),
    (0x04, "System Software Failure With manufacturer proprietary failure code"),
];

const EMERGENCY_EVENTS: &[(u8, &str)] = &[
    (0x00, "Emergency Alarm Inactive"),
    (0x01, "Contact Police"),
    (0x02, "Contact Fire Service"),
    (0x03, "Contact Medical Service"),
];

const CLOCK_EVENTS: &[(u8, &str)] = &[
    (0x00, "Clock Alarm Inactive"),
    (0x01, "Wake Up Alert"),
    (0x02, "Timer Ended"),
    (0x03, "Time remaining"),
];

const APPLIANCE_EVENTS: &[(u8, &str)] = &[
    (0x00, "Appliance Alarm Inactive"),
    (0x01, "Program started"),
    (0x02, "Program in progress"),
    (0x03, "Program completed"),
    (0x04, "Replace main filter"),
    (0x05, "Failure to set target temperature"),
    (0x06, "Supplying water"),
    (0x07, "Water supply failure"),
    (0x08, "Boiling"),
    (0x09, "Boiling failure"),
    (0x0A, "Washing"),
    (0x0B, "Washing failure"),
    (0x0C, "Rinsing"),
    (0x0D, "Rinsing failure"),
    (0x0E, "Draining"),
    (0x0F, "Draining failure"),
    (0x10, "Spinning"),
    (0x11, "Spinning failure"),
    (0x12, "Drying"),
    (0x13, "Drying failure"),
    (0x14, "Fan failure"),
    (0x15, "Compressor failure"),
];

const HOME_HEALTH_EVENTS: &[(u8, &str)] = &[
    (0x00, "Home Health Alarm Inactive"),
    (0x01, "Leaving Bed"),
    (0x02, "Sitting on bed"),
    (0x03, "Lying on bed"),
    (0x04, "Posture changed"),
    (0x05, "Sitting on edge of bed"),
    (0x06, "Volatile Organic Compound level"),
];

/// Per-type tables, indexed by [`NotificationType::position`].
pub const TYPE_TABLES: [TypeTable; NotificationType::COUNT] = [
    TypeTable { name: "General", event_count: 0, labels: GENERAL_EVENTS },
    TypeTable { name: "Smoke", event_count: 5, labels: SMOKE_EVENTS },
    TypeTable { name: "Carbon Monoxide", event_count: 5, labels: CARBON_MONOXIDE_EVENTS },
    TypeTable { name: "Carbon Dioxide", event_count: 5, labels: CARBON_DIOXIDE_EVENTS },
    TypeTable { name: "Heat", event_count: 7, labels: HEAT_EVENTS },
    TypeTable { name: "Flood", event_count: 6, labels: FLOOD_EVENTS },
    TypeTable { name: "Access Control", event_count: 0x4D, labels: ACCESS_CONTROL_EVENTS },
    TypeTable { name: "Burglar", event_count: 9, labels: BURGLAR_EVENTS },
    TypeTable { name: "Power Management", event_count: 16, labels: POWER_MANAGEMENT_EVENTS },
    TypeTable { name: "System", event_count: 5, labels: SYSTEM_EVENTS },
    TypeTable { name: "Emergency", event_count: 4, labels: EMERGENCY_EVENTS },
    TypeTable { name: "Clock", event_count: 4, labels: CLOCK_EVENTS },
    TypeTable { name: "Appliance", event_count: 22, labels: APPLIANCE_EVENTS },
    TypeTable { name: "HomeHealth", event_count: 7, labels: HOME_HEALTH_EVENTS },
];

const fn compute_offsets() -> [u16; NotificationType::COUNT] {
    let mut offsets = [0u16; NotificationType::COUNT];
    let mut i = 1;
    while i < NotificationType::COUNT {
        offsets[i] = offsets[i - 1] + TYPE_TABLES[i - 1].event_count as u16;
        i += 1;
    }
    offsets
}

/// Sum of the event counts of every type preceding each type.
pub const CUMULATIVE_OFFSETS: [u16; NotificationType::COUNT] = compute_offsets();

/// Total number of per-type event slots across all types.
pub const TOTAL_EVENT_SLOTS: u16 = CUMULATIVE_OFFSETS[NotificationType::COUNT - 1]
    + TYPE_TABLES[NotificationType::COUNT - 1].event_count as u16;

/// Table for one type.
pub fn table(t: NotificationType) -> &'static TypeTable {
    &TYPE_TABLES[t.position()]
}

/// Display name of a type.
pub fn type_name(t: NotificationType) -> &'static str {
    table(t).name
}

/// Display name for a raw type byte, `"Unknown"` outside the table.
pub fn raw_type_name(raw: u8) -> &'static str {
    NotificationType::from_u8(raw).map_or(UNKNOWN_LABEL, type_name)
}

/// Number of event codes the type defines.
pub fn event_count(t: NotificationType) -> u8 {
    table(t).event_count
}

/// Sum of event counts of all types strictly preceding `t`.
pub fn cumulative_offset(t: NotificationType) -> u16 {
    CUMULATIVE_OFFSETS[t.position()]
}

/// Label for an event of a type, `"Unknown"` for unlabelled codes.
pub fn event_label(t: NotificationType, event: u8) -> &'static str {
    let labels = table(t).labels;
    labels
        .binary_search_by_key(&event, |(code, _)| *code)
        .map(|i| labels[i].1)
        .unwrap_or(UNKNOWN_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_offsets_match_counts() {
        for t in NotificationType::ALL {
            let expected: u16 = NotificationType::ALL[..t.position()]
                .iter()
                .map(|p| event_count(*p) as u16)
                .sum();
            assert_eq!(cumulative_offset(t), expected, "offset for {:?}", t);
        }
    }

    #[test]
    fn test_known_offsets() {
        assert_eq!(cumulative_offset(NotificationType::General), 0);
        assert_eq!(cumulative_offset(NotificationType::Smoke), 0);
        assert_eq!(cumulative_offset(NotificationType::CarbonMonoxide), 5);
        assert_eq!(cumulative_offset(NotificationType::Flood), 22);
        assert_eq!(cumulative_offset(NotificationType::Burglar), 105);
        assert_eq!(TOTAL_EVENT_SLOTS, 172);
    }

    #[test]
    fn test_labels_sorted_and_within_count() {
        for t in NotificationType::ALL {
            let tbl = table(t);
            for pair in tbl.labels.windows(2) {
                assert!(pair[0].0 < pair[1].0, "labels of {:?} not sorted", t);
            }
            for (code, _) in tbl.labels {
                assert!(*code < tbl.event_count, "{:?} label 0x{:02X} out of range", t, code);
            }
        }
    }

    #[test]
    fn test_event_labels() {
        assert_eq!(event_label(NotificationType::Smoke, 0), "Smoke Alarm Inactive");
        assert_eq!(event_label(NotificationType::Smoke, 4), "Smoke Replacement Required");
        assert_eq!(event_label(NotificationType::Burglar, 7), "Motion");
        assert_eq!(event_label(NotificationType::AccessControl, 0x4C), "Barrier associated with non-Z-wave remote control");
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(event_label(NotificationType::Smoke, 0xFE), "Unknown");
        assert_eq!(event_label(NotificationType::AccessControl, 0x20), "Unknown");
        assert_eq!(event_label(NotificationType::General, 0), "Unknown");
        assert_eq!(event_label(NotificationType::Clock, 9), "Unknown");
        assert_eq!(raw_type_name(5), "Flood");
        assert_eq!(raw_type_name(200), "Unknown");
    }
}
