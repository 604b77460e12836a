use crate::decoder::{Decoded, Decoder, Op};

/// SuperH 16-bit decoder covering SH-1, SH-2 and SH-2E encodings.
///
/// Dispatches on bits 15-12 first, then on the low nibble, then on bits 7-4
/// (or the whole opcode for the operand-less groups).
#[derive(Debug, Default, Clone, Copy)]
pub struct ShDecoder;

impl ShDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for ShDecoder {
    fn decode(&self, opcode: u16) -> Option<Decoded> {
        let op = match opcode >> 12 {
            0x0 => prefix_0000(opcode)?,
            0x1 => Op::MovLStoreDisp,
            0x2 => prefix_0010(opcode)?,
            0x3 => prefix_0011(opcode)?,
            0x4 => prefix_0100(opcode)?,
            0x5 => Op::MovLLoadDisp,
            0x6 => prefix_0110(opcode),
            0x7 => Op::AddImm,
            0x8 => prefix_1000(opcode)?,
            0x9 => Op::MovWLoadPc,
            0xA => Op::Bra,
            0xB => Op::Bsr,
            0xC => prefix_1100(opcode),
            0xD => Op::MovLLoadPc,
            0xE => Op::MovImm,
            _ => prefix_1111(opcode)?,
        };
        Some(Decoded { op, opcode })
    }
}

#[inline]
fn low(opcode: u16) -> u16 {
    opcode & 0xF
}

#[inline]
fn mid(opcode: u16) -> u16 {
    (opcode >> 4) & 0xF
}

#[inline]
fn high(opcode: u16) -> u16 {
    (opcode >> 8) & 0xF
}

fn prefix_0000(opcode: u16) -> Option<Op> {
    let op = match low(opcode) {
        0x2 => match mid(opcode) {
            0x0 => Op::StcSr,
            0x1 => Op::StcGbr,
            0x2 => Op::StcVbr,
            _ => return None,
        },
        0x3 => match mid(opcode) {
            0x0 => Op::Bsrf,
            0x2 => Op::Braf,
            _ => return None,
        },
        0x4 => Op::MovBStoreIndexed,
        0x5 => Op::MovWStoreIndexed,
        0x6 => Op::MovLStoreIndexed,
        0x7 => Op::MulL,
        0x8 => match opcode {
            0x0008 => Op::Clrt,
            0x0018 => Op::Sett,
            0x0028 => Op::Clrmac,
            _ => return None,
        },
        0x9 => match opcode {
            0x0009 => Op::Nop,
            0x0019 => Op::Div0u,
            _ if mid(opcode) == 0x2 => Op::Movt,
            _ => return None,
        },
        0xA => match mid(opcode) {
            0x0 => Op::StsMach,
            0x1 => Op::StsMacl,
            0x2 => Op::StsPr,
            0x5 => Op::StsFpul,
            0x6 => Op::StsFpscr,
            _ => return None,
        },
        0xB => match opcode {
            0x000B => Op::Rts,
            0x001B => Op::Sleep,
            0x002B => Op::Rte,
            _ => return None,
        },
        0xC => Op::MovBLoadIndexed,
        0xD => Op::MovWLoadIndexed,
        0xE => Op::MovLLoadIndexed,
        0xF => Op::MacL,
        _ => return None,
    };
    Some(op)
}

fn prefix_0010(opcode: u16) -> Option<Op> {
    let op = match low(opcode) {
        0x0 => Op::MovBStore,
        0x1 => Op::MovWStore,
        0x2 => Op::MovLStore,
        0x4 => Op::MovBStorePreDec,
        0x5 => Op::MovWStorePreDec,
        0x6 => Op::MovLStorePreDec,
        0x7 => Op::Div0s,
        0x8 => Op::Tst,
        0x9 => Op::And,
        0xA => Op::Xor,
        0xB => Op::Or,
        0xC => Op::CmpStr,
        0xD => Op::Xtrct,
        0xE => Op::MuluW,
        0xF => Op::MulsW,
        _ => return None,
    };
    Some(op)
}

fn prefix_0011(opcode: u16) -> Option<Op> {
    let op = match low(opcode) {
        0x0 => Op::CmpEq,
        0x2 => Op::CmpHs,
        0x3 => Op::CmpGe,
        0x4 => Op::Div1,
        0x5 => Op::DmuluL,
        0x6 => Op::CmpHi,
        0x7 => Op::CmpGt,
        0x8 => Op::Sub,
        0xA => Op::Subc,
        0xB => Op::Subv,
        0xC => Op::Add,
        0xD => Op::DmulsL,
        0xE => Op::Addc,
        0xF => Op::Addv,
        _ => return None,
    };
    Some(op)
}

fn prefix_0100(opcode: u16) -> Option<Op> {
    let sub = mid(opcode);
    let op = match low(opcode) {
        0x0 => match sub {
            0x0 => Op::Shll,
            0x1 => Op::Dt,
            0x2 => Op::Shal,
            _ => return None,
        },
        0x1 => match sub {
            0x0 => Op::Shlr,
            0x1 => Op::CmpPz,
            0x2 => Op::Shar,
            _ => return None,
        },
        0x2 => match sub {
            0x0 => Op::StsLMach,
            0x1 => Op::StsLMacl,
            0x2 => Op::StsLPr,
            0x5 => Op::StsLFpul,
            0x6 => Op::StsLFpscr,
            _ => return None,
        },
        0x3 => match sub {
            0x0 => Op::StcLSr,
            0x1 => Op::StcLGbr,
            0x2 => Op::StcLVbr,
            _ => return None,
        },
        0x4 => match sub {
            0x0 => Op::Rotl,
            0x2 => Op::Rotcl,
            _ => return None,
        },
        0x5 => match sub {
            0x0 => Op::Rotr,
            0x1 => Op::CmpPl,
            0x2 => Op::Rotcr,
            _ => return None,
        },
        0x6 => match sub {
            0x0 => Op::LdsLMach,
            0x1 => Op::LdsLMacl,
            0x2 => Op::LdsLPr,
            0x5 => Op::LdsLFpul,
            0x6 => Op::LdsLFpscr,
            _ => return None,
        },
        0x7 => match sub {
            0x0 => Op::LdcLSr,
            0x1 => Op::LdcLGbr,
            0x2 => Op::LdcLVbr,
            _ => return None,
        },
        0x8 => match sub {
            0x0 => Op::Shll2,
            0x1 => Op::Shll8,
            0x2 => Op::Shll16,
            _ => return None,
        },
        0x9 => match sub {
            0x0 => Op::Shlr2,
            0x1 => Op::Shlr8,
            0x2 => Op::Shlr16,
            _ => return None,
        },
        0xA => match sub {
            0x0 => Op::LdsMach,
            0x1 => Op::LdsMacl,
            0x2 => Op::LdsPr,
            0x5 => Op::LdsFpul,
            0x6 => Op::LdsFpscr,
            _ => return None,
        },
        0xB => match sub {
            0x0 => Op::Jsr,
            0x1 => Op::TasB,
            0x2 => Op::Jmp,
            _ => return None,
        },
        0xE => match sub {
            0x0 => Op::LdcSr,
            0x1 => Op::LdcGbr,
            0x2 => Op::LdcVbr,
            _ => return None,
        },
        0xF => Op::MacW,
        _ => return None,
    };
    Some(op)
}

fn prefix_0110(opcode: u16) -> Op {
    match low(opcode) {
        0x0 => Op::MovBLoad,
        0x1 => Op::MovWLoad,
        0x2 => Op::MovLLoad,
        0x3 => Op::Mov,
        0x4 => Op::MovBLoadPostInc,
        0x5 => Op::MovWLoadPostInc,
        0x6 => Op::MovLLoadPostInc,
        0x7 => Op::Not,
        0x8 => Op::SwapB,
        0x9 => Op::SwapW,
        0xA => Op::Negc,
        0xB => Op::Neg,
        0xC => Op::ExtuB,
        0xD => Op::ExtuW,
        0xE => Op::ExtsB,
        _ => Op::ExtsW,
    }
}

fn prefix_1000(opcode: u16) -> Option<Op> {
    let op = match high(opcode) {
        0x0 => Op::MovBStoreDisp,
        0x1 => Op::MovWStoreDisp,
        0x4 => Op::MovBLoadDisp,
        0x5 => Op::MovWLoadDisp,
        0x8 => Op::CmpEqImm,
        0x9 => Op::Bt,
        0xB => Op::Bf,
        0xD => Op::BtS,
        0xF => Op::BfS,
        _ => return None,
    };
    Some(op)
}

fn prefix_1100(opcode: u16) -> Op {
    match high(opcode) {
        0x0 => Op::MovBStoreGbr,
        0x1 => Op::MovWStoreGbr,
        0x2 => Op::MovLStoreGbr,
        0x3 => Op::Trapa,
        0x4 => Op::MovBLoadGbr,
        0x5 => Op::MovWLoadGbr,
        0x6 => Op::MovLLoadGbr,
        0x7 => Op::Mova,
        0x8 => Op::TstImm,
        0x9 => Op::AndImm,
        0xA => Op::XorImm,
        0xB => Op::OrImm,
        0xC => Op::TstB,
        0xD => Op::AndB,
        0xE => Op::XorB,
        _ => Op::OrB,
    }
}

fn prefix_1111(opcode: u16) -> Option<Op> {
    let op = match low(opcode) {
        0x0 => Op::Fadd,
        0x1 => Op::Fsub,
        0x2 => Op::Fmul,
        0x3 => Op::Fdiv,
        0x4 => Op::FcmpEq,
        0x5 => Op::FcmpGt,
        0x6 => Op::FmovSLoadIndexed,
        0x7 => Op::FmovSStoreIndexed,
        0x8 => Op::FmovSLoad,
        0x9 => Op::FmovSLoadPostInc,
        0xA => Op::FmovSStore,
        0xB => Op::FmovSStorePreDec,
        0xC => Op::Fmov,
        0xD => match mid(opcode) {
            0x0 => Op::Fsts,
            0x1 => Op::Flds,
            0x2 => Op::Float,
            0x3 => Op::Ftrc,
            0x4 => Op::Fneg,
            0x5 => Op::Fabs,
            0x8 => Op::Fldi0,
            0x9 => Op::Fldi1,
            _ => return None,
        },
        0xE => Op::Fmac,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operandless_groups_do_not_fall_through() {
        let dec = ShDecoder::new();
        // 0x0119 and 0x011B sit next to the STS group but match nothing
        assert!(dec.decode(0x0119).is_none());
        assert!(dec.decode(0x003B).is_none());
        assert!(dec.decode(0x0038).is_none());
        assert_eq!(dec.decode(0x0129).map(|d| d.op), Some(Op::Movt));
    }

    #[test]
    fn unassigned_patterns() {
        let dec = ShDecoder::new();
        for op in [0x0000u16, 0x0001, 0x0010, 0x2003, 0x3001, 0x3009, 0x400C, 0x400D, 0x8200, 0xF00F, 0xF0FD] {
            assert!(dec.decode(op).is_none(), "{op:#06x}");
        }
    }
}
