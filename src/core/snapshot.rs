use crate::domain::model::{LogicalSlot, PhysicalSlotInfo, SlotAssignment, SlotAssignmentSet, SlotKind};
use crate::utils::error::Result;
use crate::utils::validation;

/// Derives the active assignment set from a platform enumeration: one
/// assignment per active port that is bound to a logical slot.
pub fn current_assignments(slots: &[PhysicalSlotInfo]) -> Result<SlotAssignmentSet> {
    validation::validate_device(slots)?;

    let mut assignments = Vec::new();
    for slot in slots {
        for port in &slot.ports {
            if port.active {
                if let Some(logical_slot) = port.logical_slot {
                    assignments.push(SlotAssignment::new(
                        logical_slot,
                        slot.physical_slot(),
                        port.port,
                    ));
                }
            }
        }
    }

    SlotAssignmentSet::new(assignments)
}

/// Logical slot currently hosting an embedded profile: the first embedded
/// slot with an active bound port wins. `None` when no embedded profile is
/// active (including devices with no embedded slot at all).
pub fn find_embedded_active_logical_slot(slots: &[PhysicalSlotInfo]) -> Option<LogicalSlot> {
    slots
        .iter()
        .filter(|slot| slot.kind == SlotKind::Embedded)
        .find_map(|slot| {
            slot.ports
                .iter()
                .find(|port| port.active && port.logical_slot.is_some())
                .and_then(|port| port.logical_slot)
        })
}
