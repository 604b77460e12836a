//! Operand field extraction and packing for 16-bit SuperH opcodes.
//!
//! Extraction masks every window. Packing only ORs shifted fields into the
//! skeleton it is given, so the skeleton must already have those bits clear.

use serde::{Deserialize, Serialize};

/// Canonical bit layouts of operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// No operand fields.
    Zero,
    /// n: bits 11-8.
    N,
    /// m: bits 11-8 (single source operand).
    M,
    /// n: bits 11-8, m: bits 7-4.
    NM,
    /// m: bits 7-4, d: bits 3-0.
    MD,
    /// n: bits 7-4, d: bits 3-0.
    ND4,
    /// n: bits 11-8, m: bits 7-4, d: bits 3-0.
    NMD,
    /// d: bits 7-0.
    D,
    /// d: bits 11-0.
    D12,
    /// n: bits 11-8, d: bits 7-0.
    ND8,
    /// i: bits 7-0.
    I,
    /// n: bits 11-8, i: bits 7-0.
    NI,
}

/// Operand fields of one opcode. Fields a format does not carry stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fields {
    pub n: u8,
    pub m: u8,
    pub disp: u16,
    pub imm: u8,
}

#[inline]
fn hi_nibble(op: u16) -> u8 {
    ((op >> 8) & 0xF) as u8
}

#[inline]
fn mid_nibble(op: u16) -> u8 {
    ((op >> 4) & 0xF) as u8
}

#[inline]
fn lo_nibble(op: u16) -> u8 {
    (op & 0xF) as u8
}

#[inline]
fn lo_byte(op: u16) -> u8 {
    (op & 0xFF) as u8
}

pub fn get_n(op: u16) -> u8 {
    hi_nibble(op)
}

pub fn set_n(skel: u16, n: u8) -> u16 {
    skel | ((n as u16) << 8)
}

/// Single-operand register in bits 11-8; same window as [`get_n`], different role.
pub fn get_m(op: u16) -> u8 {
    hi_nibble(op)
}

pub fn set_m(skel: u16, m: u8) -> u16 {
    skel | ((m as u16) << 8)
}

pub fn get_nm(op: u16) -> (u8, u8) {
    (hi_nibble(op), mid_nibble(op))
}

pub fn set_nm(skel: u16, n: u8, m: u8) -> u16 {
    skel | ((n as u16) << 8) | ((m as u16) << 4)
}

pub fn get_md(op: u16) -> (u8, u8) {
    (mid_nibble(op), lo_nibble(op))
}

pub fn set_md(skel: u16, m: u8, d: u8) -> u16 {
    skel | ((m as u16) << 4) | d as u16
}

pub fn get_nd4(op: u16) -> (u8, u8) {
    (mid_nibble(op), lo_nibble(op))
}

pub fn set_nd4(skel: u16, n: u8, d: u8) -> u16 {
    skel | ((n as u16) << 4) | d as u16
}

pub fn get_nmd(op: u16) -> (u8, u8, u8) {
    (hi_nibble(op), mid_nibble(op), lo_nibble(op))
}

pub fn set_nmd(skel: u16, n: u8, m: u8, d: u8) -> u16 {
    skel | ((n as u16) << 8) | ((m as u16) << 4) | d as u16
}

pub fn get_d(op: u16) -> u8 {
    lo_byte(op)
}

pub fn set_d(skel: u16, d: u8) -> u16 {
    skel | d as u16
}

pub fn get_d12(op: u16) -> u16 {
    op & 0x0FFF
}

pub fn set_d12(skel: u16, d: u16) -> u16 {
    skel | d
}

pub fn get_nd8(op: u16) -> (u8, u8) {
    (hi_nibble(op), lo_byte(op))
}

pub fn set_nd8(skel: u16, n: u8, d: u8) -> u16 {
    skel | ((n as u16) << 8) | d as u16
}

pub fn get_i(op: u16) -> u8 {
    lo_byte(op)
}

pub fn set_i(skel: u16, i: u8) -> u16 {
    skel | i as u16
}

pub fn get_ni(op: u16) -> (u8, u8) {
    (hi_nibble(op), lo_byte(op))
}

pub fn set_ni(skel: u16, n: u8, i: u8) -> u16 {
    skel | ((n as u16) << 8) | i as u16
}

impl Format {
    pub fn extract(self, op: u16) -> Fields {
        let mut f = Fields::default();
        match self {
            Format::Zero => {}
            Format::N => f.n = get_n(op),
            Format::M => f.m = get_m(op),
            Format::NM => (f.n, f.m) = get_nm(op),
            Format::MD => {
                let (m, d) = get_md(op);
                f.m = m;
                f.disp = d as u16;
            }
            Format::ND4 => {
                let (n, d) = get_nd4(op);
                f.n = n;
                f.disp = d as u16;
            }
            Format::NMD => {
                let (n, m, d) = get_nmd(op);
                f.n = n;
                f.m = m;
                f.disp = d as u16;
            }
            Format::D => f.disp = get_d(op) as u16,
            Format::D12 => f.disp = get_d12(op),
            Format::ND8 => {
                let (n, d) = get_nd8(op);
                f.n = n;
                f.disp = d as u16;
            }
            Format::I => f.imm = get_i(op),
            Format::NI => (f.n, f.imm) = get_ni(op),
        }
        f
    }

    /// ORs `f` into `skel` using this layout. Out-of-range field values bleed into
    /// neighbouring bits; callers pass fields that fit their windows.
    pub fn pack(self, skel: u16, f: &Fields) -> u16 {
        match self {
            Format::Zero => skel,
            Format::N => set_n(skel, f.n),
            Format::M => set_m(skel, f.m),
            Format::NM => set_nm(skel, f.n, f.m),
            Format::MD => set_md(skel, f.m, f.disp as u8),
            Format::ND4 => set_nd4(skel, f.n, f.disp as u8),
            Format::NMD => set_nmd(skel, f.n, f.m, f.disp as u8),
            Format::D => set_d(skel, f.disp as u8),
            Format::D12 => set_d12(skel, f.disp),
            Format::ND8 => set_nd8(skel, f.n, f.disp as u8),
            Format::I => set_i(skel, f.imm),
            Format::NI => set_ni(skel, f.n, f.imm),
        }
    }
}

/// 8-bit branch displacement: zero-extend when bit 7 is clear, else OR in the high ones.
pub fn sext_disp8(d: u8) -> i32 {
    if d & 0x80 == 0 {
        d as i32
    } else {
        (0xFFFF_FF00u32 | d as u32) as i32
    }
}

/// 12-bit branch displacement, same rule with bit 11.
pub fn sext_disp12(d: u16) -> i32 {
    let d = d & 0x0FFF;
    if d & 0x800 == 0 {
        d as i32
    } else {
        (0xFFFF_F000u32 | d as u32) as i32
    }
}

/// Signed immediate of `#imm` arithmetic and moves.
pub fn sext_imm8(i: u8) -> u32 {
    i as i8 as i32 as u32
}

/// `addr + 4 + (disp << 1)` with wrapping arithmetic.
pub fn branch_target(addr: u32, disp: i32) -> u32 {
    addr.wrapping_add(4).wrapping_add((disp << 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_extension_boundaries() {
        assert_eq!(sext_disp8(0x7F), 127);
        assert_eq!(sext_disp8(0x80), -128);
        assert_eq!(sext_disp8(0xFF), -1);
        assert_eq!(sext_disp12(0x7FF), 2047);
        assert_eq!(sext_disp12(0x800), -2048);
        assert_eq!(sext_disp12(0xFFF), -1);
        assert_eq!(sext_imm8(0xFE), 0xFFFF_FFFE);
    }

    #[test]
    fn branch_target_wraps() {
        assert_eq!(branch_target(0, 1), 6);
        assert_eq!(branch_target(0, -1), 2);
        assert_eq!(branch_target(0, -3), 0xFFFF_FFFE);
    }

    #[test]
    fn extract_masks_but_pack_does_not() {
        assert_eq!(get_nm(0xFFFF), (0xF, 0xF));
        // bits already set in the skeleton survive packing
        assert_eq!(set_nm(0x3F0C, 0x1, 0x2), 0x3F2C);
    }
}
