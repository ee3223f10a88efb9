use crate::domain::model::{ActivationRequest, SlotAssignment, SlotAssignmentSet};
use crate::utils::error::{Result, SlotError};
use crate::utils::validation::Validate;

/// Recomputes the binding between logical slots and physical SIM resources
/// for one activation request.
///
/// Pure and synchronous: a new set is built from `current` plus the request,
/// `current` is never touched, and identical inputs always produce identical
/// output. The caller owns applying the result and feeding the applied set
/// back in on the next call.
///
/// Single-profile mode collapses everything down to logical slot 0 on the
/// requested destination. Multi-profile mode replaces exactly one of the two
/// existing bindings: the one named by the descriptor when present, otherwise
/// the one not already resident on the destination slot. The replaced binding
/// keeps its logical slot, except that a removable destination is pinned to
/// logical slot 0 by swapping logical slots with the kept binding if needed.
pub fn reconcile(
    current: &SlotAssignmentSet,
    request: &ActivationRequest,
) -> Result<SlotAssignmentSet> {
    request.validate()?;

    if !request.multi_profile {
        return SlotAssignmentSet::new(vec![SlotAssignment::new(
            0,
            request.target_slot,
            request.target_port,
        )]);
    }

    let assignments = current.assignments();
    if assignments.len() != 2 {
        return Err(SlotError::InvalidState {
            reason: format!(
                "multi-profile mode needs exactly 2 current assignments, found {}",
                assignments.len()
            ),
        });
    }

    let source_idx = select_source(assignments, request)?;
    let source = assignments[source_idx];
    let mut kept = assignments[1 - source_idx];

    let mut updated = SlotAssignment::new(
        source.logical_slot,
        request.target_slot,
        request.target_port,
    );

    // Firmware convention: a bound removable card lives on logical slot 0.
    // A single swap fixes that up without renumbering anything else.
    if request.target_is_removable && updated.logical_slot != 0 {
        std::mem::swap(&mut updated.logical_slot, &mut kept.logical_slot);
    }

    SlotAssignmentSet::new(vec![kept, updated])
}

/// Picks the one current assignment being replaced. With a descriptor, match
/// on its (logical slot, port); without one, the assignment not already on
/// the destination physical slot is the mover.
fn select_source(assignments: &[SlotAssignment], request: &ActivationRequest) -> Result<usize> {
    let matched: Vec<usize> = match request.descriptor {
        Some(descriptor) => assignments
            .iter()
            .enumerate()
            .filter(|(_, a)| {
                a.logical_slot == descriptor.logical_slot && a.port == descriptor.port
            })
            .map(|(i, _)| i)
            .collect(),
        None => assignments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.physical_slot != request.target_slot)
            .map(|(i, _)| i)
            .collect(),
    };

    match matched.as_slice() {
        [only] => Ok(*only),
        _ => Err(SlotError::AmbiguousSelection {
            matched: matched.len(),
        }),
    }
}
