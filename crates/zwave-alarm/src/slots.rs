//! Mapping from (notification type, event) to flat value slot indices.
//!
//! ```text
//! slot 0        Type
//! slot 1        Level / notification status
//! slot 2        SourceNodeId
//! slot 3 + n    offset(type) + event        (v3+ per-event slots)
//! slot 3 + t    raw type byte               (v1/v2 per-type slots)
//! ```
//!
//! The two per-type schemes share the same index space and can alias.

use crate::constants::FIXED_HEADER_SLOTS;
use crate::tables;
use crate::types::{NotificationType, SlotIndex};

/// Slot carrying one event of one type (v3+ addressing).
///
/// Total over every event byte; indices beyond the type's event count are
/// still produced so device-reported codes can be matched even when the table
/// does not enumerate them.
pub fn slot_index(t: NotificationType, event: u8) -> SlotIndex {
    SlotIndex(tables::cumulative_offset(t) + event as u16 + FIXED_HEADER_SLOTS)
}

/// Like [`slot_index`], but `None` when `event` is outside the type's declared
/// code space.
pub fn declared_slot_index(t: NotificationType, event: u8) -> Option<SlotIndex> {
    (event < tables::event_count(t)).then(|| slot_index(t, event))
}

/// Slot carrying a whole type (v1/v2 addressing): the raw type byte plus the
/// header.
pub fn legacy_slot_index(raw_type: u8) -> SlotIndex {
    SlotIndex(raw_type as u16 + FIXED_HEADER_SLOTS)
}

/// Every declared event slot of a type, in event order.
pub fn type_slots(t: NotificationType) -> impl Iterator<Item = SlotIndex> {
    (0..tables::event_count(t)).map(move |e| slot_index(t, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slot_index_formula() {
        assert_eq!(slot_index(NotificationType::Smoke, 0), SlotIndex(3));
        assert_eq!(slot_index(NotificationType::Smoke, 4), SlotIndex(7));
        assert_eq!(slot_index(NotificationType::CarbonMonoxide, 0), SlotIndex(8));
        assert_eq!(slot_index(NotificationType::Burglar, 7), SlotIndex(115));
    }

    #[test]
    fn test_slot_index_injective_over_declared_domain() {
        let mut seen = HashSet::new();
        for t in NotificationType::ALL {
            for slot in type_slots(t) {
                assert!(!slot.is_header());
                assert!(seen.insert(slot), "duplicate slot {} for {:?}", slot, t);
            }
        }
        assert_eq!(seen.len(), tables::TOTAL_EVENT_SLOTS as usize);
    }

    #[test]
    fn test_slot_index_total_for_any_event() {
        let s = slot_index(NotificationType::HomeHealth, 0xFF);
        assert_eq!(s, SlotIndex(165 + 255 + 3));
    }

    #[test]
    fn test_declared_slot_index() {
        assert_eq!(declared_slot_index(NotificationType::Flood, 5), Some(SlotIndex(30)));
        assert_eq!(declared_slot_index(NotificationType::Flood, 6), None);
        assert_eq!(declared_slot_index(NotificationType::General, 0), None);
    }

    #[test]
    fn test_legacy_slot_index() {
        assert_eq!(legacy_slot_index(0), SlotIndex(3));
        assert_eq!(legacy_slot_index(7), SlotIndex(10));
        assert_eq!(legacy_slot_index(0xFF), SlotIndex(258));
    }
}
