use pretty_assertions::assert_eq;
use superh_rs::{Architecture, Branch, BranchKind, BranchTarget, IsaVariant, Reg};

fn info(arch: &Architecture, opcode: u16, addr: u32) -> superh_rs::InstructionInfo {
    arch.info(opcode.to_be_bytes(), addr).unwrap()
}

#[test]
fn bra_forward_and_backward() {
    let arch = Architecture::default();
    let i = info(&arch, 0xA001, 0);
    assert_eq!(i.length, 2);
    assert_eq!(
        i.branches,
        vec![Branch { kind: BranchKind::Unconditional, target: BranchTarget::Address(6), delay_slot: true }]
    );
    // disp -1 lands on the delay slot
    let i = info(&arch, 0xAFFF, 0x1000);
    assert_eq!(i.branches[0].target, BranchTarget::Address(0x1002));
}

#[test]
fn bt_has_taken_and_not_taken_edges() {
    let arch = Architecture::default();
    let i = info(&arch, 0x89FF, 0);
    assert_eq!(
        i.branches,
        vec![
            Branch { kind: BranchKind::True, target: BranchTarget::Address(2), delay_slot: false },
            Branch { kind: BranchKind::False, target: BranchTarget::Address(2), delay_slot: false },
        ]
    );
}

#[test]
fn delayed_conditional_marks_both_edges() {
    let arch = Architecture::with_variant(IsaVariant::Sh2e);
    let i = info(&arch, 0x8D02, 0x100);
    assert_eq!(
        i.branches,
        vec![
            Branch { kind: BranchKind::True, target: BranchTarget::Address(0x108), delay_slot: true },
            Branch { kind: BranchKind::False, target: BranchTarget::Address(0x104), delay_slot: true },
        ]
    );
}

#[test]
fn rts_returns_from_any_address() {
    let arch = Architecture::default();
    for addr in [0, 2, 0x8000_0000, 0xFFFF_FFFE] {
        let i = info(&arch, 0x000B, addr);
        assert_eq!(i.branches.len(), 1);
        let b = i.branches[0];
        assert_eq!(b.kind, BranchKind::Return);
        assert_eq!(b.target.as_u32(), 0);
        assert!(b.delay_slot);
    }
}

#[test]
fn register_transfers() {
    let arch = Architecture::with_variant(IsaVariant::Sh2e);
    assert_eq!(
        info(&arch, 0x432B, 0).branches,
        vec![Branch { kind: BranchKind::Indirect, target: BranchTarget::Register(Reg::Gpr(3)), delay_slot: true }]
    );
    assert_eq!(
        info(&arch, 0x450B, 0).branches,
        vec![Branch { kind: BranchKind::Call, target: BranchTarget::Register(Reg::Gpr(5)), delay_slot: true }]
    );
    assert_eq!(
        info(&arch, 0x0723, 0x200).branches,
        vec![Branch {
            kind: BranchKind::Indirect,
            target: BranchTarget::RegisterRelative { base: 0x204, reg: Reg::Gpr(7) },
            delay_slot: true,
        }]
    );
    assert_eq!(info(&arch, 0x0103, 0x200).branches[0].kind, BranchKind::Call);
}

#[test]
fn register_relative_jump_has_no_static_address() {
    let arch = Architecture::with_variant(IsaVariant::Sh2e);
    let b = info(&arch, 0x0723, 0x200).branches[0];
    assert_eq!(b.kind, BranchKind::Indirect);
    assert_eq!(b.target.address(), None);
    assert_eq!(b.target.as_u32(), 0);
}

#[test]
fn descriptor_counts() {
    let arch = Architecture::with_variant(IsaVariant::Sh2e);
    let cases: [(u16, usize); 12] = [
        (0x8900, 2), // BT
        (0x8B00, 2), // BF
        (0x8D00, 2), // BT/S
        (0x8F00, 2), // BF/S
        (0xA000, 1), // BRA
        (0xB000, 1), // BSR
        (0x0023, 1), // BRAF
        (0x0003, 1), // BSRF
        (0x402B, 1), // JMP
        (0x400B, 1), // JSR
        (0x002B, 1), // RTE
        (0x0009, 0), // NOP
    ];
    for (opcode, n) in cases {
        assert_eq!(info(&arch, opcode, 0x400).branches.len(), n, "{opcode:#06x}");
    }
    assert!(info(&arch, 0x300C, 0).falls_through());
    assert!(!info(&arch, 0x8900, 0).has_delay_slot());
}
