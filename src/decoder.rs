use serde::{Deserialize, Serialize};

use crate::fields;

/// Operand width of a memory access or IL expression, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Width {
    Byte = 1,
    Word = 2,
    Long = 4,
}

impl Width {
    pub fn bytes(self) -> u32 {
        self as u32
    }
}

/// One tag per catalog entry. The discriminant indexes `instructions::TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    // 0000
    StcSr,
    StcGbr,
    StcVbr,
    Bsrf,
    Braf,
    MovBStoreIndexed,
    MovWStoreIndexed,
    MovLStoreIndexed,
    MulL,
    Clrt,
    Sett,
    Clrmac,
    Nop,
    Div0u,
    Movt,
    StsMach,
    StsMacl,
    StsPr,
    StsFpul,
    StsFpscr,
    Rts,
    Sleep,
    Rte,
    MovBLoadIndexed,
    MovWLoadIndexed,
    MovLLoadIndexed,
    MacL,
    // 0001
    MovLStoreDisp,
    // 0010
    MovBStore,
    MovWStore,
    MovLStore,
    MovBStorePreDec,
    MovWStorePreDec,
    MovLStorePreDec,
    Div0s,
    Tst,
    And,
    Xor,
    Or,
    CmpStr,
    Xtrct,
    MuluW,
    MulsW,
    // 0011
    CmpEq,
    CmpHs,
    CmpGe,
    Div1,
    DmuluL,
    CmpHi,
    CmpGt,
    Sub,
    Subc,
    Subv,
    Add,
    DmulsL,
    Addc,
    Addv,
    // 0100
    Shll,
    Dt,
    Shal,
    Shlr,
    CmpPz,
    Shar,
    StsLMach,
    StsLMacl,
    StsLPr,
    StsLFpul,
    StsLFpscr,
    StcLSr,
    StcLGbr,
    StcLVbr,
    Rotl,
    Rotcl,
    Rotr,
    CmpPl,
    Rotcr,
    LdsLMach,
    LdsLMacl,
    LdsLPr,
    LdsLFpul,
    LdsLFpscr,
    LdcLSr,
    LdcLGbr,
    LdcLVbr,
    Shll2,
    Shll8,
    Shll16,
    Shlr2,
    Shlr8,
    Shlr16,
    LdsMach,
    LdsMacl,
    LdsPr,
    LdsFpul,
    LdsFpscr,
    Jsr,
    TasB,
    Jmp,
    LdcSr,
    LdcGbr,
    LdcVbr,
    MacW,
    // 0101
    MovLLoadDisp,
    // 0110
    MovBLoad,
    MovWLoad,
    MovLLoad,
    Mov,
    MovBLoadPostInc,
    MovWLoadPostInc,
    MovLLoadPostInc,
    Not,
    SwapB,
    SwapW,
    Negc,
    Neg,
    ExtuB,
    ExtuW,
    ExtsB,
    ExtsW,
    // 0111
    AddImm,
    // 1000
    MovBStoreDisp,
    MovWStoreDisp,
    MovBLoadDisp,
    MovWLoadDisp,
    CmpEqImm,
    Bt,
    Bf,
    BtS,
    BfS,
    // 1001 - 1011
    MovWLoadPc,
    Bra,
    Bsr,
    // 1100
    MovBStoreGbr,
    MovWStoreGbr,
    MovLStoreGbr,
    Trapa,
    MovBLoadGbr,
    MovWLoadGbr,
    MovLLoadGbr,
    Mova,
    TstImm,
    AndImm,
    XorImm,
    OrImm,
    TstB,
    AndB,
    XorB,
    OrB,
    // 1101 - 1110
    MovLLoadPc,
    MovImm,
    // 1111
    Fadd,
    Fsub,
    Fmul,
    Fdiv,
    FcmpEq,
    FcmpGt,
    FmovSLoadIndexed,
    FmovSStoreIndexed,
    FmovSLoad,
    FmovSLoadPostInc,
    FmovSStore,
    FmovSStorePreDec,
    Fmov,
    Fsts,
    Flds,
    Float,
    Ftrc,
    Fneg,
    Fabs,
    Fldi0,
    Fldi1,
    Fmac,
}

/// A decoded opcode. Operands are re-extracted from `opcode` on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub opcode: u16,
}

impl Decoded {
    /// Bits 11-8.
    pub fn n(&self) -> u8 {
        fields::get_n(self.opcode)
    }

    /// Bits 7-0.
    pub fn d8(&self) -> u8 {
        fields::get_d(self.opcode)
    }

    /// Bits 11-0.
    pub fn d12(&self) -> u16 {
        fields::get_d12(self.opcode)
    }

    /// Bits 7-0 read as an immediate.
    pub fn imm(&self) -> u8 {
        fields::get_i(self.opcode)
    }

    pub fn length(&self) -> u32 {
        2
    }
}

pub trait Decoder {
    /// Structural decode; never consults the ISA variant.
    fn decode(&self, opcode: u16) -> Option<Decoded>;

    /// Decode two bytes as one big-endian opcode.
    fn decode_bytes(&self, bytes: [u8; 2]) -> Option<Decoded> {
        self.decode(u16::from_be_bytes(bytes))
    }
}
