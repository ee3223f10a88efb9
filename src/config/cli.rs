use crate::domain::model::{ActivationRequest, PhysicalSlot, ProfileDescriptor, SlotKind};
use crate::utils::error::{Result, SlotError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "simswitch")]
#[command(about = "Recompute and apply the SIM slot mapping for a profile activation")]
pub struct CliConfig {
    /// Device state file (JSON enumeration of physical slots)
    #[arg(long, default_value = "device-state.json")]
    pub state: String,

    /// Target physical slot index
    #[arg(long)]
    pub slot: u32,

    /// Target port on the physical slot
    #[arg(long, default_value = "0")]
    pub port: u32,

    /// The target is the removable card receptacle
    #[arg(long)]
    pub removable: bool,

    /// Existing binding being moved, written as "logical:port"
    #[arg(long)]
    pub descriptor: Option<String>,

    /// Keep two logical slots bound (dual-SIM)
    #[arg(long)]
    pub multi_profile: bool,

    /// Compute and print the new mapping without writing it back
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Builds the activation request the reconciler consumes. The target kind
    /// follows the --removable flag, matching how the platform names slots.
    pub fn request(&self) -> Result<ActivationRequest> {
        let descriptor = self
            .descriptor
            .as_deref()
            .map(parse_descriptor)
            .transpose()?;

        let kind = if self.removable {
            SlotKind::Removable
        } else {
            SlotKind::Embedded
        };

        Ok(ActivationRequest {
            target_slot: PhysicalSlot {
                index: self.slot,
                kind,
            },
            target_port: self.port,
            target_is_removable: self.removable,
            descriptor,
            multi_profile: self.multi_profile,
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("state", &self.state)?;
        if let Some(raw) = &self.descriptor {
            parse_descriptor(raw)?;
        }
        Ok(())
    }
}

fn parse_descriptor(raw: &str) -> Result<ProfileDescriptor> {
    let invalid = || SlotError::ValidationError {
        field: "descriptor".to_string(),
        reason: format!("expected \"logical:port\", got \"{}\"", raw),
    };

    let (logical, port) = raw.split_once(':').ok_or_else(invalid)?;
    Ok(ProfileDescriptor {
        logical_slot: logical.trim().parse().map_err(|_| invalid())?,
        port: port.trim().parse().map_err(|_| invalid())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_descriptor() {
        let descriptor = parse_descriptor("1:0").unwrap();
        assert_eq!(descriptor.logical_slot, 1);
        assert_eq!(descriptor.port, 0);
    }

    #[test]
    fn rejects_malformed_descriptor() {
        assert!(parse_descriptor("1").is_err());
        assert!(parse_descriptor("a:b").is_err());
        assert!(parse_descriptor("1:").is_err());
    }

    #[test]
    fn request_carries_removable_kind() {
        let config = CliConfig::parse_from([
            "simswitch",
            "--state",
            "state.json",
            "--slot",
            "1",
            "--removable",
        ]);
        let request = config.request().unwrap();
        assert!(request.target_slot.is_removable());
        assert!(request.target_is_removable);
        assert_eq!(request.target_port, 0);
        assert!(request.descriptor.is_none());
    }

    #[test]
    fn request_parses_descriptor_flag() {
        let config = CliConfig::parse_from([
            "simswitch",
            "--slot",
            "0",
            "--port",
            "1",
            "--descriptor",
            "1:0",
            "--multi-profile",
        ]);
        let request = config.request().unwrap();
        assert_eq!(
            request.descriptor,
            Some(ProfileDescriptor {
                logical_slot: 1,
                port: 0
            })
        );
        assert!(request.multi_profile);
    }
}
