use crate::domain::model::{PhysicalSlotInfo, SlotAssignmentSet};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only view of the device's physical SIM resources and their current
/// activation state.
#[async_trait]
pub trait PlatformSlotQuery: Send + Sync {
    async fn list_physical_slots(&self) -> Result<Vec<PhysicalSlotInfo>>;
}

/// Commits a computed assignment set to the platform. Failure handling and
/// retry live behind this boundary, not in the core.
#[async_trait]
pub trait AssignmentApplier: Send + Sync {
    async fn apply(&self, assignments: &SlotAssignmentSet) -> Result<()>;
}
