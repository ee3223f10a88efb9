pub mod engine;
pub mod reconciler;
pub mod snapshot;

pub use crate::domain::model::{
    ActivationRequest, LogicalSlot, PhysicalSlot, PhysicalSlotInfo, PortIndex, PortStatus,
    ProfileDescriptor, SlotAssignment, SlotAssignmentSet, SlotKind,
};
pub use crate::domain::ports::{AssignmentApplier, PlatformSlotQuery};
pub use crate::utils::error::Result;
