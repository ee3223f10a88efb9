// Adapters layer: concrete implementations of the domain ports. The file
// platform stands in for live telephony hardware by keeping the slot
// enumeration in a JSON state file.

use crate::domain::model::{PhysicalSlotInfo, SlotAssignmentSet};
use crate::domain::ports::{AssignmentApplier, PlatformSlotQuery};
use crate::utils::error::{Result, SlotError};
use crate::utils::validation;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FilePlatform {
    path: PathBuf,
}

impl FilePlatform {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a fresh state file describing `slots`, creating parent
    /// directories as needed.
    pub fn seed(&self, slots: &[PhysicalSlotInfo]) -> Result<()> {
        validation::validate_device(slots)?;
        self.store(slots)
    }

    fn load(&self) -> Result<Vec<PhysicalSlotInfo>> {
        let data = fs::read(&self.path)?;
        let slots: Vec<PhysicalSlotInfo> = serde_json::from_slice(&data)?;
        validation::validate_device(&slots)?;
        Ok(slots)
    }

    fn store(&self, slots: &[PhysicalSlotInfo]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(slots)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[async_trait]
impl PlatformSlotQuery for FilePlatform {
    async fn list_physical_slots(&self) -> Result<Vec<PhysicalSlotInfo>> {
        self.load()
    }
}

#[async_trait]
impl AssignmentApplier for FilePlatform {
    async fn apply(&self, assignments: &SlotAssignmentSet) -> Result<()> {
        let mut slots = self.load()?;

        for slot in &mut slots {
            for port in &mut slot.ports {
                port.active = false;
                port.logical_slot = None;
            }
        }

        for assignment in assignments.iter() {
            let slot = slots
                .iter_mut()
                .find(|s| s.index == assignment.physical_slot.index)
                .ok_or_else(|| SlotError::PlatformError {
                    message: format!(
                        "assignment targets physical slot {} which the device does not have",
                        assignment.physical_slot.index
                    ),
                })?;

            if slot.kind != assignment.physical_slot.kind {
                return Err(SlotError::PlatformError {
                    message: format!(
                        "assignment says slot {} is {:?} but the device reports {:?}",
                        assignment.physical_slot.index, assignment.physical_slot.kind, slot.kind
                    ),
                });
            }

            let port = slot
                .ports
                .iter_mut()
                .find(|p| p.port == assignment.port)
                .ok_or_else(|| SlotError::PlatformError {
                    message: format!(
                        "physical slot {} has no port {}",
                        assignment.physical_slot.index, assignment.port
                    ),
                })?;

            port.active = true;
            port.logical_slot = Some(assignment.logical_slot);
        }

        tracing::debug!("Writing applied mapping back to {}", self.path.display());
        self.store(&slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PhysicalSlot, PortStatus, SlotAssignment, SlotKind};
    use tempfile::TempDir;

    fn sample_device() -> Vec<PhysicalSlotInfo> {
        vec![
            PhysicalSlotInfo {
                index: 0,
                kind: SlotKind::Embedded,
                ports: vec![
                    PortStatus {
                        port: 0,
                        logical_slot: Some(1),
                        active: true,
                    },
                    PortStatus {
                        port: 1,
                        logical_slot: None,
                        active: false,
                    },
                ],
            },
            PhysicalSlotInfo {
                index: 1,
                kind: SlotKind::Removable,
                ports: vec![PortStatus {
                    port: 0,
                    logical_slot: Some(0),
                    active: true,
                }],
            },
        ]
    }

    #[tokio::test]
    async fn seed_then_list_round_trips() {
        let dir = TempDir::new().unwrap();
        let platform = FilePlatform::new(dir.path().join("state.json"));

        platform.seed(&sample_device()).unwrap();
        let listed = platform.list_physical_slots().await.unwrap();
        assert_eq!(listed, sample_device());
    }

    #[tokio::test]
    async fn apply_rewrites_port_activation() {
        let dir = TempDir::new().unwrap();
        let platform = FilePlatform::new(dir.path().join("state.json"));
        platform.seed(&sample_device()).unwrap();

        let set = SlotAssignmentSet::new(vec![
            SlotAssignment::new(0, PhysicalSlot::removable(1), 0),
            SlotAssignment::new(1, PhysicalSlot::embedded(0), 1),
        ])
        .unwrap();
        platform.apply(&set).await.unwrap();

        let slots = platform.list_physical_slots().await.unwrap();
        let esim = &slots[0];
        assert!(!esim.ports[0].active);
        assert_eq!(esim.ports[0].logical_slot, None);
        assert!(esim.ports[1].active);
        assert_eq!(esim.ports[1].logical_slot, Some(1));
    }

    #[tokio::test]
    async fn apply_rejects_unknown_port() {
        let dir = TempDir::new().unwrap();
        let platform = FilePlatform::new(dir.path().join("state.json"));
        platform.seed(&sample_device()).unwrap();

        let set = SlotAssignmentSet::new(vec![SlotAssignment::new(
            0,
            PhysicalSlot::embedded(0),
            7,
        )])
        .unwrap();
        let err = platform.apply(&set).await.unwrap_err();
        assert!(matches!(err, SlotError::PlatformError { .. }));
    }

    #[tokio::test]
    async fn list_rejects_corrupt_state_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"not json").unwrap();

        let platform = FilePlatform::new(&path);
        let err = platform.list_physical_slots().await.unwrap_err();
        assert!(matches!(err, SlotError::SerializationError(_)));
    }
}
