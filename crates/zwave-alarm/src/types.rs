//! Data model shared by the decoder, the request builder and the registry.

use crate::constants::*;
use crate::error::AlarmError;
use serde::{Deserialize, Serialize};

/// A node id on the mesh network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u8);

impl NodeId {
    /// Create a new node id.
    pub const fn new(id: u8) -> Self {
        NodeId(id)
    }

    /// Get the raw id.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node {:03}", self.0)
    }
}

/// Notification (alarm) categories, in wire order.
///
/// The order defines the layout of the per-type slot offsets and must not
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NotificationType {
    /// General purpose alarm.
    General = 0,
    /// Smoke alarm.
    Smoke = 1,
    /// Carbon monoxide alarm.
    CarbonMonoxide = 2,
    /// Carbon dioxide alarm.
    CarbonDioxide = 3,
    /// Heat alarm.
    Heat = 4,
    /// Water / flood alarm.
    Flood = 5,
    /// Access control (locks, barriers, doors).
    AccessControl = 6,
    /// Home security / burglar alarm.
    Burglar = 7,
    /// Power management.
    PowerManagement = 8,
    /// System failures.
    System = 9,
    /// Emergency calls.
    Emergency = 10,
    /// Clock / timer alerts.
    Clock = 11,
    /// Appliance program state.
    Appliance = 12,
    /// Home health monitoring.
    HomeHealth = 13,
}

impl NotificationType {
    /// Number of known notification types.
    pub const COUNT: usize = 14;

    /// All known notification types in wire order.
    pub const ALL: [NotificationType; NotificationType::COUNT] = [
        NotificationType::General,
        NotificationType::Smoke,
        NotificationType::CarbonMonoxide,
        NotificationType::CarbonDioxide,
        NotificationType::Heat,
        NotificationType::Flood,
        NotificationType::AccessControl,
        NotificationType::Burglar,
        NotificationType::PowerManagement,
        NotificationType::System,
        NotificationType::Emergency,
        NotificationType::Clock,
        NotificationType::Appliance,
        NotificationType::HomeHealth,
    ];

    /// Position of this type in the fixed order.
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Look up a type from its wire value.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Human-readable type name.
    pub fn name(self) -> &'static str {
        crate::tables::type_name(self)
    }
}

impl TryFrom<u8> for NotificationType {
    type Error = AlarmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        NotificationType::from_u8(value).ok_or(AlarmError::UnknownNotificationType(value))
    }
}

impl From<NotificationType> for u8 {
    fn from(t: NotificationType) -> Self {
        t as u8
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An event code, scoped to one [`NotificationType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCode(pub u8);

impl EventCode {
    /// No event active.
    pub const INACTIVE: EventCode = EventCode(EVENT_INACTIVE);
    /// Unknown event.
    pub const UNKNOWN: EventCode = EventCode(EVENT_UNKNOWN);

    /// Get the raw code.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether this code is one of the reserved "nothing specific" sentinels.
    pub const fn is_sentinel(self) -> bool {
        self.0 == EVENT_INACTIVE || self.0 == EVENT_UNKNOWN
    }
}

impl From<u8> for EventCode {
    fn from(code: u8) -> Self {
        EventCode(code)
    }
}

/// Flat address of a value slot within one device instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotIndex(pub u16);

impl SlotIndex {
    /// Slot holding the v1 alarm type.
    pub const TYPE: SlotIndex = SlotIndex(ALARM_INDEX_TYPE);
    /// Slot holding the alarm level / notification status.
    pub const LEVEL: SlotIndex = SlotIndex(ALARM_INDEX_LEVEL);
    /// Slot holding the sensor source node id.
    pub const SOURCE_NODE_ID: SlotIndex = SlotIndex(ALARM_INDEX_SOURCE_NODE_ID);

    /// Get the raw index.
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Whether this is one of the always-present header slots.
    pub const fn is_header(self) -> bool {
        self.0 < FIXED_HEADER_SLOTS
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dispatch-layer request flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestFlags(pub u8);

impl RequestFlags {
    /// Values that never change (capabilities).
    pub const STATIC: RequestFlags = RequestFlags(0x01);
    /// Values that change at any time.
    pub const DYNAMIC: RequestFlags = RequestFlags(0x04);

    /// No flags set.
    pub const fn empty() -> Self {
        RequestFlags(0)
    }

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: RequestFlags) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

impl std::ops::BitOr for RequestFlags {
    type Output = RequestFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        RequestFlags(self.0 | rhs.0)
    }
}

/// Driver queue an outbound frame is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    /// Commands issued by the application.
    Command,
    /// General send queue.
    #[default]
    Send,
    /// Node interview / capability queries.
    Query,
    /// Periodic polling.
    Poll,
}

impl std::fmt::Display for QueueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueKind::Command => write!(f, "command"),
            QueueKind::Send => write!(f, "send"),
            QueueKind::Query => write!(f, "query"),
            QueueKind::Poll => write!(f, "poll"),
        }
    }
}

/// Render bytes as space-separated upper-case hex, the way frames are logged.
pub fn hex_bytes(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_round_trip_positions() {
        for (i, t) in NotificationType::ALL.iter().enumerate() {
            assert_eq!(t.position(), i);
            assert_eq!(NotificationType::from_u8(i as u8), Some(*t));
        }
        assert_eq!(NotificationType::from_u8(14), None);
    }

    #[test]
    fn test_notification_type_try_from() {
        assert_eq!(NotificationType::try_from(7), Ok(NotificationType::Burglar));
        assert_eq!(
            NotificationType::try_from(0x20),
            Err(AlarmError::UnknownNotificationType(0x20))
        );
    }

    #[test]
    fn test_event_code_sentinels() {
        assert!(EventCode::INACTIVE.is_sentinel());
        assert!(EventCode::UNKNOWN.is_sentinel());
        assert!(!EventCode(0x07).is_sentinel());
    }

    #[test]
    fn test_request_flags() {
        let flags = RequestFlags::STATIC | RequestFlags::DYNAMIC;
        assert!(flags.contains(RequestFlags::STATIC));
        assert!(flags.contains(RequestFlags::DYNAMIC));
        assert!(!flags.contains(RequestFlags(0x02)));
        assert!(!RequestFlags::empty().contains(RequestFlags::empty()));
    }

    #[test]
    fn test_hex_bytes() {
        assert_eq!(hex_bytes(&[0x71, 0x05, 0xfe]), "71 05 FE");
        assert_eq!(hex_bytes(&[]), "");
    }

    #[test]
    fn test_header_slots() {
        assert!(SlotIndex::TYPE.is_header());
        assert!(SlotIndex::SOURCE_NODE_ID.is_header());
        assert!(!SlotIndex(3).is_header());
    }
}
