use crate::utils::error::Result;
use crate::utils::validation;
use serde::{Deserialize, Serialize};

/// Modem instance identifier. The platform binds each logical slot to exactly
/// one physical resource at a time.
pub type LogicalSlot = u32;

/// Sub-index distinguishing concurrently provisioned profiles on an embedded
/// slot. Removable slots always use port 0.
pub type PortIndex = u32;

/// Devices with more than two logical slots have no observed behavior to model.
pub const MAX_LOGICAL_SLOTS: usize = 2;

/// Kind of a physical SIM resource. Fixed per slot index for a given device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Removable,
    Embedded,
}

/// One physical SIM resource: a removable card receptacle or an embedded
/// multi-profile secure element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalSlot {
    pub index: u32,
    pub kind: SlotKind,
}

impl PhysicalSlot {
    pub const fn removable(index: u32) -> Self {
        Self {
            index,
            kind: SlotKind::Removable,
        }
    }

    pub const fn embedded(index: u32) -> Self {
        Self {
            index,
            kind: SlotKind::Embedded,
        }
    }

    pub const fn is_removable(&self) -> bool {
        matches!(self.kind, SlotKind::Removable)
    }
}

/// One (logical slot, physical slot, port) binding. Immutable value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub logical_slot: LogicalSlot,
    pub physical_slot: PhysicalSlot,
    pub port: PortIndex,
}

impl SlotAssignment {
    pub const fn new(logical_slot: LogicalSlot, physical_slot: PhysicalSlot, port: PortIndex) -> Self {
        Self {
            logical_slot,
            physical_slot,
            port,
        }
    }
}

/// Identifies an existing binding by its current (logical slot, port). Used
/// only to disambiguate which binding an activation request intends to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDescriptor {
    pub logical_slot: LogicalSlot,
    pub port: PortIndex,
}

/// The full set of bindings for the device, ordered ascending by logical slot.
///
/// The only constructor validates every structural invariant, so a held value
/// is always well formed: logical slots form a bijection over `0..len`, no two
/// assignments share a (physical slot, port) pair, and a removable assignment
/// sits on logical slot 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignmentSet(Vec<SlotAssignment>);

impl SlotAssignmentSet {
    pub fn new(mut assignments: Vec<SlotAssignment>) -> Result<Self> {
        assignments.sort_by_key(|a| a.logical_slot);
        validation::validate_assignments(&assignments)?;
        Ok(Self(assignments))
    }

    pub fn assignments(&self) -> &[SlotAssignment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SlotAssignment> {
        self.0.iter()
    }

    /// Binding currently held by `logical_slot`, if any.
    pub fn get(&self, logical_slot: LogicalSlot) -> Option<&SlotAssignment> {
        self.0.iter().find(|a| a.logical_slot == logical_slot)
    }
}

/// What the caller wants activated: a (physical slot, port) destination on
/// behalf of one logical slot, in either single- or multi-profile mode.
///
/// `target_is_removable` is carried explicitly because the caller determines
/// it from context; it must agree with `target_slot.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationRequest {
    pub target_slot: PhysicalSlot,
    pub target_port: PortIndex,
    pub target_is_removable: bool,
    pub descriptor: Option<ProfileDescriptor>,
    pub multi_profile: bool,
}

/// Activation state of one port as reported by the platform enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortStatus {
    pub port: PortIndex,
    #[serde(default)]
    pub logical_slot: Option<LogicalSlot>,
    #[serde(default)]
    pub active: bool,
}

/// One physical slot and its ports, as reported by the platform enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalSlotInfo {
    pub index: u32,
    pub kind: SlotKind,
    pub ports: Vec<PortStatus>,
}

impl PhysicalSlotInfo {
    pub fn physical_slot(&self) -> PhysicalSlot {
        PhysicalSlot {
            index: self.index,
            kind: self.kind,
        }
    }
}
