//! Value slot registry.
//!
//! The registry that stores named byte values per device instance lives
//! outside this crate; [`ValueRegistry`] is the contract the command class
//! needs from it. [`InMemoryRegistry`] is a complete implementation used by
//! tests and the replay harness.

use crate::types::SlotIndex;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::trace;

/// Reference to a created value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SlotHandle {
    /// Device instance.
    pub instance: u8,
    /// Command class owning the slot.
    pub class_id: u8,
    /// Slot index within the command class.
    pub index: SlotIndex,
}

/// Description of a byte value slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ByteSlotSpec {
    /// Display label.
    pub label: String,
    /// Units string (empty for none).
    pub units: String,
    /// Value cannot be written by the application.
    pub read_only: bool,
    /// Value cannot be read back.
    pub write_only: bool,
    /// Minimum value.
    pub min: i32,
    /// Maximum value.
    pub max: i32,
}

impl ByteSlotSpec {
    /// A read-only byte slot without units, as every alarm slot is.
    pub fn read_only(label: impl Into<String>) -> Self {
        ByteSlotSpec {
            label: label.into(),
            units: String::new(),
            read_only: true,
            write_only: false,
            min: 0,
            max: 0,
        }
    }
}

/// Operations the command class needs from the value registry.
pub trait ValueRegistry {
    /// Create a byte slot. Creating an existing slot keeps the existing one.
    fn create_byte_slot(
        &mut self,
        instance: u8,
        class_id: u8,
        index: SlotIndex,
        spec: ByteSlotSpec,
    ) -> SlotHandle;

    /// Look up a slot.
    fn get_slot(&self, instance: u8, class_id: u8, index: SlotIndex) -> Option<SlotHandle>;

    /// Store a freshly reported value. Unknown handles are ignored.
    fn refresh_slot_value(&mut self, handle: SlotHandle, value: u8);
}

/// A stored value slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueSlot {
    /// Slot description.
    pub spec: ByteSlotSpec,
    /// Current value.
    pub value: u8,
    /// Number of refreshes received.
    pub refresh_count: u32,
}

/// In-memory [`ValueRegistry`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    slots: BTreeMap<SlotHandle, ValueSlot>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored slot.
    pub fn slot(&self, instance: u8, class_id: u8, index: SlotIndex) -> Option<&ValueSlot> {
        self.slots.get(&SlotHandle {
            instance,
            class_id,
            index,
        })
    }

    /// All slots in (instance, class, index) order.
    pub fn slots(&self) -> impl Iterator<Item = (&SlotHandle, &ValueSlot)> {
        self.slots.iter()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the registry holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl ValueRegistry for InMemoryRegistry {
    fn create_byte_slot(
        &mut self,
        instance: u8,
        class_id: u8,
        index: SlotIndex,
        spec: ByteSlotSpec,
    ) -> SlotHandle {
        let handle = SlotHandle {
            instance,
            class_id,
            index,
        };
        self.slots.entry(handle).or_insert_with(|| {
            trace!("Creating slot {:?} '{}'", handle, spec.label);
            ValueSlot {
                spec,
                value: 0,
                refresh_count: 0,
            }
        });
        handle
    }

    fn get_slot(&self, instance: u8, class_id: u8, index: SlotIndex) -> Option<SlotHandle> {
        let handle = SlotHandle {
            instance,
            class_id,
            index,
        };
        self.slots.contains_key(&handle).then_some(handle)
    }

    fn refresh_slot_value(&mut self, handle: SlotHandle, value: u8) {
        match self.slots.get_mut(&handle) {
            Some(slot) => {
                slot.value = value;
                slot.refresh_count += 1;
            }
            None => trace!("Ignoring refresh of missing slot {:?}", handle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_refresh() {
        let mut registry = InMemoryRegistry::new();
        let handle = registry.create_byte_slot(1, 0x71, SlotIndex(3), ByteSlotSpec::read_only("Smoke"));
        assert_eq!(registry.get_slot(1, 0x71, SlotIndex(3)), Some(handle));

        registry.refresh_slot_value(handle, 0xFF);
        let slot = registry.slot(1, 0x71, SlotIndex(3)).unwrap();
        assert_eq!(slot.value, 0xFF);
        assert_eq!(slot.refresh_count, 1);
        assert!(slot.spec.read_only);
    }

    #[test]
    fn test_create_existing_keeps_slot() {
        let mut registry = InMemoryRegistry::new();
        let first = registry.create_byte_slot(1, 0x71, SlotIndex(4), ByteSlotSpec::read_only("Smoke"));
        registry.refresh_slot_value(first, 9);
        let second = registry.create_byte_slot(1, 0x71, SlotIndex(4), ByteSlotSpec::read_only("Other"));

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        let slot = registry.slot(1, 0x71, SlotIndex(4)).unwrap();
        assert_eq!(slot.spec.label, "Smoke");
        assert_eq!(slot.value, 9);
    }

    #[test]
    fn test_missing_slot_is_noop() {
        let mut registry = InMemoryRegistry::new();
        assert!(registry.get_slot(1, 0x71, SlotIndex(0)).is_none());
        registry.refresh_slot_value(
            SlotHandle {
                instance: 1,
                class_id: 0x71,
                index: SlotIndex(0),
            },
            1,
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_slots_are_scoped_by_instance() {
        let mut registry = InMemoryRegistry::new();
        registry.create_byte_slot(1, 0x71, SlotIndex(0), ByteSlotSpec::read_only("Alarm Type"));
        assert!(registry.get_slot(2, 0x71, SlotIndex(0)).is_none());
        assert!(registry.get_slot(1, 0x20, SlotIndex(0)).is_none());
    }
}
