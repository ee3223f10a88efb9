pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ScenarioConfig;

pub use adapters::FilePlatform;
pub use core::engine::SwitchEngine;
pub use core::reconciler::reconcile;
pub use core::snapshot::{current_assignments, find_embedded_active_logical_slot};
pub use domain::model::{
    ActivationRequest, LogicalSlot, PhysicalSlot, PhysicalSlotInfo, PortIndex, PortStatus,
    ProfileDescriptor, SlotAssignment, SlotAssignmentSet, SlotKind,
};
pub use domain::ports::{AssignmentApplier, PlatformSlotQuery};
pub use utils::error::{Result, SlotError};
