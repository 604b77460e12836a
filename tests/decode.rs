use pretty_assertions::assert_eq;
use superh_rs::decoder::Decoder;
use superh_rs::instructions::TABLE;
use superh_rs::isa::superh::ShDecoder;
use superh_rs::Op;

#[test]
fn every_catalog_entry_decodes_with_any_operands() {
    let dec = ShDecoder::new();
    for e in TABLE {
        // fill every operand bit the format owns
        let full = e.format.pack(e.skeleton, &e.format.extract(0xFFFF));
        let d = dec.decode(full).unwrap_or_else(|| panic!("{} {full:#06x}", e.mnemonic));
        assert_eq!(d.op, e.op, "{full:#06x}");
        assert_eq!(d.length(), 2);
    }
}

#[test]
fn specific_opcodes() {
    let dec = ShDecoder::new();
    let cases = [
        (0x0009, Op::Nop),
        (0x000B, Op::Rts),
        (0x002B, Op::Rte),
        (0x0029, Op::Movt),
        (0x0F29, Op::Movt),
        (0x0008, Op::Clrt),
        (0x0018, Op::Sett),
        (0x332C, Op::Add),
        (0x7201, Op::AddImm),
        (0x5321, Op::MovLLoadDisp),
        (0x8901, Op::Bt),
        (0x8F01, Op::BfS),
        (0xA001, Op::Bra),
        (0xB7FF, Op::Bsr),
        (0x412B, Op::Jmp),
        (0x410B, Op::Jsr),
        (0x0123, Op::Braf),
        (0xC701, Op::Mova),
        (0xD0FF, Op::MovLLoadPc),
        (0xE3FE, Op::MovImm),
        (0xF21E, Op::Fmac),
        (0x415A, Op::LdsFpul),
    ];
    for (opcode, op) in cases {
        assert_eq!(dec.decode(opcode).map(|d| d.op), Some(op), "{opcode:#06x}");
    }
}

#[test]
fn unassigned_patterns_do_not_decode() {
    let dec = ShDecoder::new();
    for opcode in [0xFFFF, 0x0000, 0x0119, 0x0039, 0x3001, 0x4F0D, 0xF0FD] {
        assert_eq!(dec.decode(opcode), None, "{opcode:#06x}");
    }
}

#[test]
fn bytes_are_big_endian() {
    let dec = ShDecoder::new();
    let d = dec.decode_bytes([0x00, 0x0B]).unwrap();
    assert_eq!(d.op, Op::Rts);
    assert_eq!(dec.decode_bytes([0x0B, 0x00]), None);
}

#[test]
fn single_register_operand_sits_in_bits_11_8() {
    let dec = ShDecoder::new();
    // JMP @R5, LDS R5,PR, STC SR,R5
    for opcode in [0x452B, 0x452A, 0x0502] {
        let d = dec.decode(opcode).unwrap();
        assert_eq!(d.n(), 5, "{opcode:#06x}");
        assert_eq!(d.n(), superh_rs::fields::get_m(opcode));
    }
}
