use pretty_assertions::assert_eq;
use superh_rs::instructions::TABLE;
use superh_rs::registers::{CALLING_CONVENTION, STACK_POINTER};
use superh_rs::{ArchError, Architecture, Introduced, IsaVariant, Op, Reg};

#[test]
fn fpu_needs_sh2e() {
    let fadd = [0xF1, 0x20];
    let err = Architecture::with_variant(IsaVariant::Sh1).decode(fadd).unwrap_err();
    assert_eq!(
        err,
        ArchError::IsaMismatch {
            opcode: 0xF120,
            mnemonic: "FADD",
            required: Introduced::Sh2e,
            configured: IsaVariant::Sh1,
        }
    );
    assert!(Architecture::with_variant(IsaVariant::Dsp).decode(fadd).is_err());
    assert_eq!(Architecture::with_variant(IsaVariant::Sh2e).decode(fadd).unwrap().op, Op::Fadd);
}

#[test]
fn fpu_text_info_and_lift_follow_the_gate() {
    let base = Architecture::with_variant(IsaVariant::Sh1);
    let fpu = Architecture::with_variant(IsaVariant::Sh2e);
    for bytes in [[0xF1, 0x20], [0xF2, 0x1E], [0x41, 0x5A], [0xF1, 0x28]] {
        assert!(matches!(base.text(bytes, 0), Err(ArchError::IsaMismatch { .. })), "{bytes:02x?}");
        assert!(matches!(base.info(bytes, 0), Err(ArchError::IsaMismatch { .. })), "{bytes:02x?}");
        assert!(matches!(base.lift(bytes, 0), Err(ArchError::IsaMismatch { .. })), "{bytes:02x?}");

        let (len, tokens) = fpu.text(bytes, 0).unwrap();
        assert_eq!(len, 2);
        assert!(!tokens.is_empty());
        assert!(fpu.info(bytes, 0).unwrap().falls_through());
    }
}

#[test]
fn info_covers_every_catalog_entry() {
    let arch = Architecture::with_variant(IsaVariant::Sh2e);
    for e in TABLE {
        let info = arch
            .info(e.skeleton.to_be_bytes(), 0x1000)
            .unwrap_or_else(|err| panic!("{} {:#06x}: {err}", e.mnemonic, e.skeleton));
        assert_eq!(info.length, 2, "{}", e.mnemonic);
        let expected = match e.op {
            Op::Bt | Op::Bf | Op::BtS | Op::BfS => 2,
            Op::Bra | Op::Bsr | Op::Braf | Op::Bsrf | Op::Jmp | Op::Jsr | Op::Rts | Op::Rte => 1,
            _ => 0,
        };
        assert_eq!(info.branches.len(), expected, "{} {:#06x}", e.mnemonic, e.skeleton);
    }
}

#[test]
fn calling_convention_registers() {
    let cc = CALLING_CONVENTION;
    assert_eq!(cc.int_args, &[Reg::Gpr(4), Reg::Gpr(5), Reg::Gpr(6), Reg::Gpr(7)][..]);
    assert_eq!(cc.float_args.len(), 8);
    assert_eq!(cc.float_args.first(), Some(&Reg::Fr(4)));
    assert_eq!(cc.int_return, Reg::Gpr(0));
    assert_eq!(cc.float_return, Reg::Fr(0));
    assert!(cc.callee_saved.contains(&STACK_POINTER));
    assert!(cc.callee_saved.contains(&Reg::Pr));
    // no register is both caller- and callee-saved
    for r in cc.caller_saved {
        assert!(!cc.callee_saved.contains(r), "{r}");
    }
    for r in cc.int_args {
        assert!(cc.caller_saved.contains(r), "{r}");
    }
}

#[test]
fn sh2_additions_rejected_on_sh1_only() {
    for opcode in [0x0107u16, 0x4110, 0x8D00, 0x8F00, 0x0123, 0x0103, 0x3125, 0x312D, 0x012F] {
        let bytes = opcode.to_be_bytes();
        assert!(
            matches!(
                Architecture::with_variant(IsaVariant::Sh1).decode(bytes),
                Err(ArchError::IsaMismatch { required: Introduced::Sh2, .. })
            ),
            "{opcode:#06x}"
        );
        assert!(Architecture::with_variant(IsaVariant::Dsp).decode(bytes).is_ok(), "{opcode:#06x}");
        assert!(Architecture::with_variant(IsaVariant::Sh2e).decode(bytes).is_ok(), "{opcode:#06x}");
    }
}

#[test]
fn gate_matches_catalog_for_every_variant() {
    for variant in [IsaVariant::Sh1, IsaVariant::Sh2e, IsaVariant::Dsp] {
        let arch = Architecture::with_variant(variant);
        for e in TABLE {
            let ok = arch.decode(e.skeleton.to_be_bytes()).is_ok();
            assert_eq!(ok, e.isa.available_on(variant), "{} {:#06x} on {variant:?}", e.mnemonic, e.skeleton);
        }
    }
}

#[test]
fn register_file_follows_variant() {
    let base = Architecture::with_variant(IsaVariant::Sh1).registers();
    assert_eq!(base.len(), 23);
    assert_eq!(base.last(), Some(&Reg::Pc));
    assert!(!base.iter().any(|r| r.is_fpu()));

    let fpu = Architecture::with_variant(IsaVariant::Sh2e).registers();
    assert_eq!(fpu.len(), 41);
    assert_eq!(fpu[23], Reg::Fr(0));
    assert_eq!(fpu.last(), Some(&Reg::Fpscr));
    assert_eq!(Reg::Fpul.id(), 39);
}
