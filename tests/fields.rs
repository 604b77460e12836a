use pretty_assertions::assert_eq;
use superh_rs::fields::{self, Fields, Format};

#[test]
fn nm_round_trips_every_register_pair() {
    for n in 0..16u8 {
        for m in 0..16u8 {
            let op = fields::set_nm(0x300C, n, m);
            assert_eq!(fields::get_nm(op), (n, m), "{op:#06x}");
        }
    }
}

#[test]
fn format_pack_then_extract() {
    let f = Fields { n: 5, m: 0, disp: 0x7F, imm: 0 };
    let op = Format::ND8.pack(0xD000, &f);
    assert_eq!(op, 0xD57F);
    assert_eq!(Format::ND8.extract(op), f);

    let f = Fields { n: 0, m: 0, disp: 0xABC, imm: 0 };
    assert_eq!(Format::D12.pack(0xA000, &f), 0xAABC);
}

#[test]
fn packing_oversized_field_bleeds() {
    // n = 0x1F spills into the opcode nibble
    assert_eq!(fields::set_n(0x0000, 0x1F), 0x1F00);
    assert_eq!(fields::set_nm(0x6003, 0, 0x10), 0x6103);
}

#[test]
fn single_register_forms_share_bits_11_8() {
    assert_eq!(fields::get_n(0x4A0B), 0xA);
    assert_eq!(fields::get_m(0x4A0B), 0xA);
    assert_eq!(fields::get_md(0x8534), (3, 4));
    assert_eq!(fields::get_nd4(0x8134), (3, 4));
    assert_eq!(fields::get_nmd(0x5321), (3, 2, 1));
}
