use simswitch::{
    find_embedded_active_logical_slot, ActivationRequest, FilePlatform, PhysicalSlot,
    PhysicalSlotInfo, PlatformSlotQuery, PortStatus, ProfileDescriptor, SlotAssignment, SlotKind,
    SwitchEngine,
};
use tempfile::TempDir;

fn port(port: u32, logical_slot: Option<u32>, active: bool) -> PortStatus {
    PortStatus {
        port,
        logical_slot,
        active,
    }
}

/// Two-slot device: MEP-capable embedded element at index 0, removable
/// receptacle at index 1. pSIM and embedded port 0 both active (dual mode).
fn dual_device() -> Vec<PhysicalSlotInfo> {
    vec![
        PhysicalSlotInfo {
            index: 0,
            kind: SlotKind::Embedded,
            ports: vec![port(0, Some(1), true), port(1, None, false)],
        },
        PhysicalSlotInfo {
            index: 1,
            kind: SlotKind::Removable,
            ports: vec![port(0, Some(0), true)],
        },
    ]
}

fn engine_on(dir: &TempDir, device: &[PhysicalSlotInfo]) -> (FilePlatform, SwitchEngine<FilePlatform, FilePlatform>) {
    let platform = FilePlatform::new(dir.path().join("device-state.json"));
    platform.seed(device).unwrap();
    (platform.clone(), SwitchEngine::new(platform.clone(), platform))
}

fn request(
    target_slot: PhysicalSlot,
    target_port: u32,
    descriptor: Option<(u32, u32)>,
    multi_profile: bool,
) -> ActivationRequest {
    ActivationRequest {
        target_slot,
        target_port,
        target_is_removable: target_slot.is_removable(),
        descriptor: descriptor.map(|(logical_slot, port)| ProfileDescriptor { logical_slot, port }),
        multi_profile,
    }
}

#[tokio::test]
async fn moves_embedded_profile_across_ports_end_to_end() {
    let dir = TempDir::new().unwrap();
    let (platform, engine) = engine_on(&dir, &dual_device());

    let applied = engine
        .activate(&request(PhysicalSlot::embedded(0), 1, Some((1, 0)), true))
        .await
        .unwrap();

    assert_eq!(
        applied.assignments(),
        &[
            SlotAssignment::new(0, PhysicalSlot::removable(1), 0),
            SlotAssignment::new(1, PhysicalSlot::embedded(0), 1),
        ]
    );

    // The state file reflects the applied mapping.
    let slots = platform.list_physical_slots().await.unwrap();
    assert!(!slots[0].ports[0].active);
    assert!(slots[0].ports[1].active);
    assert_eq!(slots[0].ports[1].logical_slot, Some(1));
    assert_eq!(find_embedded_active_logical_slot(&slots), Some(1));
}

#[tokio::test]
async fn collapses_to_single_profile_on_the_psim() {
    let dir = TempDir::new().unwrap();
    let (platform, engine) = engine_on(&dir, &dual_device());

    let applied = engine
        .activate(&request(PhysicalSlot::removable(1), 0, None, false))
        .await
        .unwrap();

    assert_eq!(
        applied.assignments(),
        &[SlotAssignment::new(0, PhysicalSlot::removable(1), 0)]
    );

    let slots = platform.list_physical_slots().await.unwrap();
    assert!(slots[0].ports.iter().all(|p| !p.active));
    assert_eq!(find_embedded_active_logical_slot(&slots), None);
}

#[tokio::test]
async fn serialized_steps_chain_through_the_state_file() {
    let dir = TempDir::new().unwrap();
    let (platform, engine) = engine_on(&dir, &dual_device());

    // Step 1: move the pSIM binding onto embedded port 1 (Dual-Ports-B).
    engine
        .activate(&request(PhysicalSlot::embedded(0), 1, Some((0, 0)), true))
        .await
        .unwrap();

    // Step 2: bring the pSIM back, replacing the binding on port 1. The mover
    // held logical slot 0, so no canonicalization swap is needed.
    let applied = engine
        .activate(&request(PhysicalSlot::removable(1), 0, Some((0, 1)), true))
        .await
        .unwrap();

    assert_eq!(
        applied.assignments(),
        &[
            SlotAssignment::new(0, PhysicalSlot::removable(1), 0),
            SlotAssignment::new(1, PhysicalSlot::embedded(0), 0),
        ]
    );

    let slots = platform.list_physical_slots().await.unwrap();
    assert!(slots[1].ports[0].active);
    assert_eq!(slots[1].ports[0].logical_slot, Some(0));
}

#[tokio::test]
async fn swap_lands_removable_on_logical_zero_end_to_end() {
    let dir = TempDir::new().unwrap();

    // Dual-Ports-A: both embedded ports active, pSIM idle.
    let device = vec![
        PhysicalSlotInfo {
            index: 0,
            kind: SlotKind::Embedded,
            ports: vec![port(0, Some(0), true), port(1, Some(1), true)],
        },
        PhysicalSlotInfo {
            index: 1,
            kind: SlotKind::Removable,
            ports: vec![port(0, None, false)],
        },
    ];
    let (platform, engine) = engine_on(&dir, &device);

    // Replace the logical-1 embedded binding with the pSIM; the swap pins the
    // card to logical 0 and the surviving embedded binding takes slot 1.
    let applied = engine
        .activate(&request(PhysicalSlot::removable(1), 0, Some((1, 1)), true))
        .await
        .unwrap();

    assert_eq!(
        applied.assignments(),
        &[
            SlotAssignment::new(0, PhysicalSlot::removable(1), 0),
            SlotAssignment::new(1, PhysicalSlot::embedded(0), 0),
        ]
    );

    let slots = platform.list_physical_slots().await.unwrap();
    assert_eq!(slots[1].ports[0].logical_slot, Some(0));
    assert_eq!(slots[0].ports[0].logical_slot, Some(1));
    assert!(!slots[0].ports[1].active);
}

#[tokio::test]
async fn failed_reconciliation_leaves_the_state_file_untouched() {
    let dir = TempDir::new().unwrap();
    let (platform, engine) = engine_on(&dir, &dual_device());
    let before = platform.list_physical_slots().await.unwrap();

    // Descriptor matches nothing: no change may be computed or applied.
    let result = engine
        .activate(&request(PhysicalSlot::embedded(0), 1, Some((1, 5)), true))
        .await;
    assert!(result.is_err());

    let after = platform.list_physical_slots().await.unwrap();
    assert_eq!(before, after);
}
