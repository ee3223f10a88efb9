use crate::core::{reconciler, snapshot};
use crate::domain::model::{ActivationRequest, SlotAssignmentSet};
use crate::domain::ports::{AssignmentApplier, PlatformSlotQuery};
use crate::utils::error::Result;

/// Orchestrates one activation: enumerate the platform, derive the current
/// mapping, reconcile against the request, hand the result to the applier.
///
/// Invocations must be serialized by the caller so each call sees the set the
/// previous one applied.
pub struct SwitchEngine<Q: PlatformSlotQuery, A: AssignmentApplier> {
    platform: Q,
    applier: A,
}

impl<Q: PlatformSlotQuery, A: AssignmentApplier> SwitchEngine<Q, A> {
    pub fn new(platform: Q, applier: A) -> Self {
        Self { platform, applier }
    }

    /// Computes the new mapping without applying it.
    pub async fn plan(&self, request: &ActivationRequest) -> Result<SlotAssignmentSet> {
        let slots = self.platform.list_physical_slots().await?;
        tracing::debug!("Enumerated {} physical slots", slots.len());

        let current = snapshot::current_assignments(&slots)?;
        tracing::debug!("Current mapping: {:?}", current.assignments());

        reconciler::reconcile(&current, request)
    }

    /// Computes the new mapping and applies it, returning the applied set.
    pub async fn activate(&self, request: &ActivationRequest) -> Result<SlotAssignmentSet> {
        let slots = self.platform.list_physical_slots().await?;
        tracing::debug!("Enumerated {} physical slots", slots.len());

        let current = snapshot::current_assignments(&slots)?;
        let next = reconciler::reconcile(&current, request)?;

        if next == current {
            tracing::info!("Requested mapping already active, nothing to apply");
            return Ok(next);
        }

        tracing::info!("Applying new mapping: {:?}", next.assignments());
        self.applier.apply(&next).await?;

        Ok(next)
    }
}
