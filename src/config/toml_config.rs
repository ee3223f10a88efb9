use crate::domain::model::{
    ActivationRequest, PhysicalSlot, PhysicalSlotInfo, ProfileDescriptor, SlotAssignmentSet,
    SlotKind,
};
use crate::utils::error::{Result, SlotError};
use crate::utils::validation::{validate_device, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A scripted sequence of activations against one device, loaded from TOML.
/// Steps run in order, each against the state the previous step produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioMeta,
    pub device: Vec<PhysicalSlotInfo>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Target physical slot index.
    pub slot: u32,
    #[serde(default)]
    pub port: u32,
    #[serde(default)]
    pub removable: bool,
    pub descriptor: Option<ProfileDescriptor>,
    #[serde(default)]
    pub multi_profile: bool,
    /// Expected mapping after the step, for assertion. Optional.
    pub expect: Option<Vec<ExpectedAssignment>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedAssignment {
    pub logical_slot: u32,
    pub slot: u32,
    #[serde(default)]
    pub port: u32,
}

impl ScenarioConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

impl StepConfig {
    pub fn request(&self) -> ActivationRequest {
        let kind = if self.removable {
            SlotKind::Removable
        } else {
            SlotKind::Embedded
        };
        ActivationRequest {
            target_slot: PhysicalSlot {
                index: self.slot,
                kind,
            },
            target_port: self.port,
            target_is_removable: self.removable,
            descriptor: self.descriptor,
            multi_profile: self.multi_profile,
        }
    }

    /// Checks an applied mapping against this step's `expect` list, if any.
    pub fn check_expectation(&self, applied: &SlotAssignmentSet) -> Result<()> {
        let Some(expected) = &self.expect else {
            return Ok(());
        };

        let matches = applied.len() == expected.len()
            && expected.iter().all(|e| {
                applied.iter().any(|a| {
                    a.logical_slot == e.logical_slot
                        && a.physical_slot.index == e.slot
                        && a.port == e.port
                })
            });

        if matches {
            Ok(())
        } else {
            Err(SlotError::ConfigError {
                message: format!(
                    "step targeting slot {} port {} produced {:?}, expected {:?}",
                    self.slot,
                    self.port,
                    applied.assignments(),
                    expected
                ),
            })
        }
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("scenario.name", &self.scenario.name)?;
        validate_device(&self.device)?;

        for (i, step) in self.steps.iter().enumerate() {
            let slot = self
                .device
                .iter()
                .find(|s| s.index == step.slot)
                .ok_or_else(|| SlotError::ConfigError {
                    message: format!("step {} targets unknown slot {}", i, step.slot),
                })?;

            let expected_kind = if step.removable {
                SlotKind::Removable
            } else {
                SlotKind::Embedded
            };
            if slot.kind != expected_kind {
                return Err(SlotError::ConfigError {
                    message: format!(
                        "step {} says slot {} is {:?} but the device reports {:?}",
                        i, step.slot, expected_kind, slot.kind
                    ),
                });
            }

            if !slot.ports.iter().any(|p| p.port == step.port) {
                return Err(SlotError::ConfigError {
                    message: format!(
                        "step {} targets port {} which slot {} does not have",
                        i, step.port, step.slot
                    ),
                });
            }

            if let Some(expected) = &step.expect {
                for e in expected {
                    if !self.device.iter().any(|s| s.index == e.slot) {
                        return Err(SlotError::ConfigError {
                            message: format!(
                                "step {} expectation references unknown slot {}",
                                i, e.slot
                            ),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
[scenario]
name = "move esim profile to port 1"
description = "Shift the embedded profile across ports while the pSIM stays put"

[[device]]
index = 0
kind = "embedded"
ports = [{ port = 0, logical_slot = 1, active = true }, { port = 1 }]

[[device]]
index = 1
kind = "removable"
ports = [{ port = 0, logical_slot = 0, active = true }]

[[steps]]
slot = 0
port = 1
multi_profile = true
descriptor = { logical_slot = 1, port = 0 }
expect = [
    { logical_slot = 0, slot = 1, port = 0 },
    { logical_slot = 1, slot = 0, port = 1 },
]
"#;

    #[test]
    fn parses_scenario_toml() {
        let config: ScenarioConfig = toml::from_str(SCENARIO).unwrap();
        assert_eq!(config.scenario.name, "move esim profile to port 1");
        assert_eq!(config.device.len(), 2);
        assert_eq!(config.steps.len(), 1);
        assert!(config.steps[0].multi_profile);
        assert_eq!(config.steps[0].expect.as_ref().unwrap().len(), 2);
        config.validate().unwrap();
    }

    #[test]
    fn step_builds_request() {
        let config: ScenarioConfig = toml::from_str(SCENARIO).unwrap();
        let request = config.steps[0].request();
        assert_eq!(request.target_slot, PhysicalSlot::embedded(0));
        assert_eq!(request.target_port, 1);
        assert!(!request.target_is_removable);
        assert!(request.multi_profile);
    }

    #[test]
    fn validate_rejects_unknown_step_slot() {
        let mut config: ScenarioConfig = toml::from_str(SCENARIO).unwrap();
        config.steps[0].slot = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_kind_disagreement() {
        let mut config: ScenarioConfig = toml::from_str(SCENARIO).unwrap();
        config.steps[0].removable = true;
        assert!(config.validate().is_err());
    }
}
