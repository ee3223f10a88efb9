use crate::domain::model::{
    ActivationRequest, PhysicalSlotInfo, SlotAssignment, SlotKind, MAX_LOGICAL_SLOTS,
};
use crate::utils::error::{Result, SlotError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Structural invariants of an assignment set. `assignments` must already be
/// sorted ascending by logical slot.
pub fn validate_assignments(assignments: &[SlotAssignment]) -> Result<()> {
    if assignments.is_empty() {
        return Err(SlotError::InvalidState {
            reason: "assignment set is empty".to_string(),
        });
    }

    if assignments.len() > MAX_LOGICAL_SLOTS {
        return Err(SlotError::InvalidState {
            reason: format!(
                "devices with more than {} logical slots are not supported, found {}",
                MAX_LOGICAL_SLOTS,
                assignments.len()
            ),
        });
    }

    // Bijection: logical slots must be exactly 0..len with no gap or duplicate.
    for (expected, assignment) in assignments.iter().enumerate() {
        if assignment.logical_slot != expected as u32 {
            return Err(SlotError::InvalidState {
                reason: format!(
                    "logical slots must cover 0..{} exactly once, found slot {}",
                    assignments.len(),
                    assignment.logical_slot
                ),
            });
        }
    }

    let mut occupied = HashSet::new();
    for assignment in assignments {
        if !occupied.insert((assignment.physical_slot.index, assignment.port)) {
            return Err(SlotError::InvalidState {
                reason: format!(
                    "physical slot {} port {} is bound twice",
                    assignment.physical_slot.index, assignment.port
                ),
            });
        }
    }

    // Device convention: the removable card, when bound, sits on logical slot 0.
    for assignment in assignments {
        if assignment.physical_slot.is_removable() && assignment.logical_slot != 0 {
            return Err(SlotError::InvalidState {
                reason: format!(
                    "removable slot {} is bound to logical slot {}, expected 0",
                    assignment.physical_slot.index, assignment.logical_slot
                ),
            });
        }
    }

    Ok(())
}

impl Validate for ActivationRequest {
    fn validate(&self) -> Result<()> {
        if self.target_is_removable != self.target_slot.is_removable() {
            return Err(SlotError::ValidationError {
                field: "target_is_removable".to_string(),
                reason: format!(
                    "flag says removable={} but target slot {} is {:?}",
                    self.target_is_removable, self.target_slot.index, self.target_slot.kind
                ),
            });
        }

        if self.target_is_removable && self.target_port != 0 {
            return Err(SlotError::ValidationError {
                field: "target_port".to_string(),
                reason: format!(
                    "removable slots only have port 0, requested port {}",
                    self.target_port
                ),
            });
        }

        Ok(())
    }
}

/// Sanity checks on a platform enumeration before anything is derived from it.
pub fn validate_device(slots: &[PhysicalSlotInfo]) -> Result<()> {
    if slots.is_empty() {
        return Err(SlotError::PlatformError {
            message: "device reports no physical slots".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for slot in slots {
        if !seen.insert(slot.index) {
            return Err(SlotError::PlatformError {
                message: format!("physical slot index {} listed twice", slot.index),
            });
        }

        if slot.ports.is_empty() {
            return Err(SlotError::PlatformError {
                message: format!("physical slot {} has no ports", slot.index),
            });
        }

        let mut ports = HashSet::new();
        for port in &slot.ports {
            if !ports.insert(port.port) {
                return Err(SlotError::PlatformError {
                    message: format!("physical slot {} lists port {} twice", slot.index, port.port),
                });
            }
        }

        if slot.kind == SlotKind::Removable && slot.ports.len() > 1 {
            return Err(SlotError::PlatformError {
                message: format!(
                    "removable slot {} reports {} ports, expected 1",
                    slot.index,
                    slot.ports.len()
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SlotError::ValidationError {
            field: field_name.to_string(),
            reason: "value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
