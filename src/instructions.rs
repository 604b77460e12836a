use crate::arch::Introduced;
use crate::decoder::{Op, Width};
use crate::disasm::{RegKind, Template};
use crate::fields::Format;
use crate::registers::Reg;

/// Static behaviour bundle of one catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    /// Opcode with every operand field zero.
    pub skeleton: u16,
    pub format: Format,
    pub isa: Introduced,
    pub template: Template,
}

const fn entry(
    op: Op,
    mnemonic: &'static str,
    skeleton: u16,
    format: Format,
    isa: Introduced,
    template: Template,
) -> InstrDesc {
    InstrDesc { op, mnemonic, skeleton, format, isa, template }
}

/// Indexed by `Op as usize`.
pub const TABLE: &[InstrDesc] = &[
    entry(Op::StcSr, "STC", 0x0002, Format::N, Introduced::Sh1, Template::CtrlToReg(Reg::Sr, RegKind::Gpr)),
    entry(Op::StcGbr, "STC", 0x0012, Format::N, Introduced::Sh1, Template::CtrlToReg(Reg::Gbr, RegKind::Gpr)),
    entry(Op::StcVbr, "STC", 0x0022, Format::N, Introduced::Sh1, Template::CtrlToReg(Reg::Vbr, RegKind::Gpr)),
    entry(Op::Bsrf, "BSRF", 0x0003, Format::M, Introduced::Sh2, Template::Reg(RegKind::Gpr)),
    entry(Op::Braf, "BRAF", 0x0023, Format::M, Introduced::Sh2, Template::Reg(RegKind::Gpr)),
    entry(Op::MovBStoreIndexed, "MOV.B", 0x0004, Format::NM, Introduced::Sh1, Template::RegToIndexed(RegKind::Gpr)),
    entry(Op::MovWStoreIndexed, "MOV.W", 0x0005, Format::NM, Introduced::Sh1, Template::RegToIndexed(RegKind::Gpr)),
    entry(Op::MovLStoreIndexed, "MOV.L", 0x0006, Format::NM, Introduced::Sh1, Template::RegToIndexed(RegKind::Gpr)),
    entry(Op::MulL, "MUL.L", 0x0007, Format::NM, Introduced::Sh2, Template::RegReg(RegKind::Gpr)),
    entry(Op::Clrt, "CLRT", 0x0008, Format::Zero, Introduced::Sh1, Template::Bare),
    entry(Op::Sett, "SETT", 0x0018, Format::Zero, Introduced::Sh1, Template::Bare),
    entry(Op::Clrmac, "CLRMAC", 0x0028, Format::Zero, Introduced::Sh1, Template::Bare),
    entry(Op::Nop, "NOP", 0x0009, Format::Zero, Introduced::Sh1, Template::Bare),
    entry(Op::Div0u, "DIV0U", 0x0019, Format::Zero, Introduced::Sh1, Template::Bare),
    entry(Op::Movt, "MOVT", 0x0029, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::StsMach, "STS", 0x000A, Format::N, Introduced::Sh1, Template::CtrlToReg(Reg::Mach, RegKind::Gpr)),
    entry(Op::StsMacl, "STS", 0x001A, Format::N, Introduced::Sh1, Template::CtrlToReg(Reg::Macl, RegKind::Gpr)),
    entry(Op::StsPr, "STS", 0x002A, Format::N, Introduced::Sh1, Template::CtrlToReg(Reg::Pr, RegKind::Gpr)),
    entry(Op::StsFpul, "STS", 0x005A, Format::N, Introduced::Sh2e, Template::CtrlToReg(Reg::Fpul, RegKind::Gpr)),
    entry(Op::StsFpscr, "STS", 0x006A, Format::N, Introduced::Sh2e, Template::CtrlToReg(Reg::Fpscr, RegKind::Gpr)),
    entry(Op::Rts, "RTS", 0x000B, Format::Zero, Introduced::Sh1, Template::Bare),
    entry(Op::Sleep, "SLEEP", 0x001B, Format::Zero, Introduced::Sh1, Template::Bare),
    entry(Op::Rte, "RTE", 0x002B, Format::Zero, Introduced::Sh1, Template::Bare),
    entry(Op::MovBLoadIndexed, "MOV.B", 0x000C, Format::NM, Introduced::Sh1, Template::IndexedToReg(RegKind::Gpr)),
    entry(Op::MovWLoadIndexed, "MOV.W", 0x000D, Format::NM, Introduced::Sh1, Template::IndexedToReg(RegKind::Gpr)),
    entry(Op::MovLLoadIndexed, "MOV.L", 0x000E, Format::NM, Introduced::Sh1, Template::IndexedToReg(RegKind::Gpr)),
    entry(Op::MacL, "MAC.L", 0x000F, Format::NM, Introduced::Sh2, Template::PostIncPair),
    entry(Op::MovLStoreDisp, "MOV.L", 0x1000, Format::NMD, Introduced::Sh1, Template::RegToDispReg),
    entry(Op::MovBStore, "MOV.B", 0x2000, Format::NM, Introduced::Sh1, Template::RegToIndirect(RegKind::Gpr)),
    entry(Op::MovWStore, "MOV.W", 0x2001, Format::NM, Introduced::Sh1, Template::RegToIndirect(RegKind::Gpr)),
    entry(Op::MovLStore, "MOV.L", 0x2002, Format::NM, Introduced::Sh1, Template::RegToIndirect(RegKind::Gpr)),
    entry(Op::MovBStorePreDec, "MOV.B", 0x2004, Format::NM, Introduced::Sh1, Template::RegToPreDec(RegKind::Gpr)),
    entry(Op::MovWStorePreDec, "MOV.W", 0x2005, Format::NM, Introduced::Sh1, Template::RegToPreDec(RegKind::Gpr)),
    entry(Op::MovLStorePreDec, "MOV.L", 0x2006, Format::NM, Introduced::Sh1, Template::RegToPreDec(RegKind::Gpr)),
    entry(Op::Div0s, "DIV0S", 0x2007, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Tst, "TST", 0x2008, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::And, "AND", 0x2009, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Xor, "XOR", 0x200A, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Or, "OR", 0x200B, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::CmpStr, "CMP/STR", 0x200C, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Xtrct, "XTRCT", 0x200D, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::MuluW, "MULU.W", 0x200E, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::MulsW, "MULS.W", 0x200F, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::CmpEq, "CMP/EQ", 0x3000, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::CmpHs, "CMP/HS", 0x3002, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::CmpGe, "CMP/GE", 0x3003, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Div1, "DIV1", 0x3004, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::DmuluL, "DMULU.L", 0x3005, Format::NM, Introduced::Sh2, Template::RegReg(RegKind::Gpr)),
    entry(Op::CmpHi, "CMP/HI", 0x3006, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::CmpGt, "CMP/GT", 0x3007, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Sub, "SUB", 0x3008, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Subc, "SUBC", 0x300A, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Subv, "SUBV", 0x300B, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Add, "ADD", 0x300C, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::DmulsL, "DMULS.L", 0x300D, Format::NM, Introduced::Sh2, Template::RegReg(RegKind::Gpr)),
    entry(Op::Addc, "ADDC", 0x300E, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Addv, "ADDV", 0x300F, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Shll, "SHLL", 0x4000, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Dt, "DT", 0x4010, Format::N, Introduced::Sh2, Template::Reg(RegKind::Gpr)),
    entry(Op::Shal, "SHAL", 0x4020, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Shlr, "SHLR", 0x4001, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::CmpPz, "CMP/PZ", 0x4011, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Shar, "SHAR", 0x4021, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::StsLMach, "STS.L", 0x4002, Format::N, Introduced::Sh1, Template::CtrlToPreDec(Reg::Mach)),
    entry(Op::StsLMacl, "STS.L", 0x4012, Format::N, Introduced::Sh1, Template::CtrlToPreDec(Reg::Macl)),
    entry(Op::StsLPr, "STS.L", 0x4022, Format::N, Introduced::Sh1, Template::CtrlToPreDec(Reg::Pr)),
    entry(Op::StsLFpul, "STS.L", 0x4052, Format::N, Introduced::Sh2e, Template::CtrlToPreDec(Reg::Fpul)),
    entry(Op::StsLFpscr, "STS.L", 0x4062, Format::N, Introduced::Sh2e, Template::CtrlToPreDec(Reg::Fpscr)),
    entry(Op::StcLSr, "STC.L", 0x4003, Format::N, Introduced::Sh1, Template::CtrlToPreDec(Reg::Sr)),
    entry(Op::StcLGbr, "STC.L", 0x4013, Format::N, Introduced::Sh1, Template::CtrlToPreDec(Reg::Gbr)),
    entry(Op::StcLVbr, "STC.L", 0x4023, Format::N, Introduced::Sh1, Template::CtrlToPreDec(Reg::Vbr)),
    entry(Op::Rotl, "ROTL", 0x4004, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Rotcl, "ROTCL", 0x4024, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Rotr, "ROTR", 0x4005, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::CmpPl, "CMP/PL", 0x4015, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Rotcr, "ROTCR", 0x4025, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::LdsLMach, "LDS.L", 0x4006, Format::M, Introduced::Sh1, Template::PostIncToCtrl(Reg::Mach)),
    entry(Op::LdsLMacl, "LDS.L", 0x4016, Format::M, Introduced::Sh1, Template::PostIncToCtrl(Reg::Macl)),
    entry(Op::LdsLPr, "LDS.L", 0x4026, Format::M, Introduced::Sh1, Template::PostIncToCtrl(Reg::Pr)),
    entry(Op::LdsLFpul, "LDS.L", 0x4056, Format::M, Introduced::Sh2e, Template::PostIncToCtrl(Reg::Fpul)),
    entry(Op::LdsLFpscr, "LDS.L", 0x4066, Format::M, Introduced::Sh2e, Template::PostIncToCtrl(Reg::Fpscr)),
    entry(Op::LdcLSr, "LDC.L", 0x4007, Format::M, Introduced::Sh1, Template::PostIncToCtrl(Reg::Sr)),
    entry(Op::LdcLGbr, "LDC.L", 0x4017, Format::M, Introduced::Sh1, Template::PostIncToCtrl(Reg::Gbr)),
    entry(Op::LdcLVbr, "LDC.L", 0x4027, Format::M, Introduced::Sh1, Template::PostIncToCtrl(Reg::Vbr)),
    entry(Op::Shll2, "SHLL2", 0x4008, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Shll8, "SHLL8", 0x4018, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Shll16, "SHLL16", 0x4028, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Shlr2, "SHLR2", 0x4009, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Shlr8, "SHLR8", 0x4019, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::Shlr16, "SHLR16", 0x4029, Format::N, Introduced::Sh1, Template::Reg(RegKind::Gpr)),
    entry(Op::LdsMach, "LDS", 0x400A, Format::M, Introduced::Sh1, Template::RegToCtrl(Reg::Mach, RegKind::Gpr)),
    entry(Op::LdsMacl, "LDS", 0x401A, Format::M, Introduced::Sh1, Template::RegToCtrl(Reg::Macl, RegKind::Gpr)),
    entry(Op::LdsPr, "LDS", 0x402A, Format::M, Introduced::Sh1, Template::RegToCtrl(Reg::Pr, RegKind::Gpr)),
    entry(Op::LdsFpul, "LDS", 0x405A, Format::M, Introduced::Sh2e, Template::RegToCtrl(Reg::Fpul, RegKind::Gpr)),
    entry(Op::LdsFpscr, "LDS", 0x406A, Format::M, Introduced::Sh2e, Template::RegToCtrl(Reg::Fpscr, RegKind::Gpr)),
    entry(Op::Jsr, "JSR", 0x400B, Format::M, Introduced::Sh1, Template::IndirectReg),
    entry(Op::TasB, "TAS.B", 0x401B, Format::N, Introduced::Sh1, Template::IndirectReg),
    entry(Op::Jmp, "JMP", 0x402B, Format::M, Introduced::Sh1, Template::IndirectReg),
    entry(Op::LdcSr, "LDC", 0x400E, Format::M, Introduced::Sh1, Template::RegToCtrl(Reg::Sr, RegKind::Gpr)),
    entry(Op::LdcGbr, "LDC", 0x401E, Format::M, Introduced::Sh1, Template::RegToCtrl(Reg::Gbr, RegKind::Gpr)),
    entry(Op::LdcVbr, "LDC", 0x402E, Format::M, Introduced::Sh1, Template::RegToCtrl(Reg::Vbr, RegKind::Gpr)),
    entry(Op::MacW, "MAC.W", 0x400F, Format::NM, Introduced::Sh2, Template::PostIncPair),
    entry(Op::MovLLoadDisp, "MOV.L", 0x5000, Format::NMD, Introduced::Sh1, Template::DispRegToReg),
    entry(Op::MovBLoad, "MOV.B", 0x6000, Format::NM, Introduced::Sh1, Template::IndirectToReg(RegKind::Gpr)),
    entry(Op::MovWLoad, "MOV.W", 0x6001, Format::NM, Introduced::Sh1, Template::IndirectToReg(RegKind::Gpr)),
    entry(Op::MovLLoad, "MOV.L", 0x6002, Format::NM, Introduced::Sh1, Template::IndirectToReg(RegKind::Gpr)),
    entry(Op::Mov, "MOV", 0x6003, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::MovBLoadPostInc, "MOV.B", 0x6004, Format::NM, Introduced::Sh1, Template::PostIncToReg(RegKind::Gpr)),
    entry(Op::MovWLoadPostInc, "MOV.W", 0x6005, Format::NM, Introduced::Sh1, Template::PostIncToReg(RegKind::Gpr)),
    entry(Op::MovLLoadPostInc, "MOV.L", 0x6006, Format::NM, Introduced::Sh1, Template::PostIncToReg(RegKind::Gpr)),
    entry(Op::Not, "NOT", 0x6007, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::SwapB, "SWAP.B", 0x6008, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::SwapW, "SWAP.W", 0x6009, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Negc, "NEGC", 0x600A, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::Neg, "NEG", 0x600B, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::ExtuB, "EXTU.B", 0x600C, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::ExtuW, "EXTU.W", 0x600D, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::ExtsB, "EXTS.B", 0x600E, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::ExtsW, "EXTS.W", 0x600F, Format::NM, Introduced::Sh1, Template::RegReg(RegKind::Gpr)),
    entry(Op::AddImm, "ADD", 0x7000, Format::NI, Introduced::Sh1, Template::ImmToReg),
    entry(Op::MovBStoreDisp, "MOV.B", 0x8000, Format::ND4, Introduced::Sh1, Template::R0ToDispReg),
    entry(Op::MovWStoreDisp, "MOV.W", 0x8100, Format::ND4, Introduced::Sh1, Template::R0ToDispReg),
    entry(Op::MovBLoadDisp, "MOV.B", 0x8400, Format::MD, Introduced::Sh1, Template::DispRegToR0),
    entry(Op::MovWLoadDisp, "MOV.W", 0x8500, Format::MD, Introduced::Sh1, Template::DispRegToR0),
    entry(Op::CmpEqImm, "CMP/EQ", 0x8800, Format::I, Introduced::Sh1, Template::ImmToR0),
    entry(Op::Bt, "BT", 0x8900, Format::D, Introduced::Sh1, Template::Branch8),
    entry(Op::Bf, "BF", 0x8B00, Format::D, Introduced::Sh1, Template::Branch8),
    entry(Op::BtS, "BT/S", 0x8D00, Format::D, Introduced::Sh2, Template::Branch8),
    entry(Op::BfS, "BF/S", 0x8F00, Format::D, Introduced::Sh2, Template::Branch8),
    entry(Op::MovWLoadPc, "MOV.W", 0x9000, Format::ND8, Introduced::Sh1, Template::PcRelLoad(Width::Word)),
    entry(Op::Bra, "BRA", 0xA000, Format::D12, Introduced::Sh1, Template::Branch12),
    entry(Op::Bsr, "BSR", 0xB000, Format::D12, Introduced::Sh1, Template::Branch12),
    entry(Op::MovBStoreGbr, "MOV.B", 0xC000, Format::D, Introduced::Sh1, Template::R0ToGbrDisp),
    entry(Op::MovWStoreGbr, "MOV.W", 0xC100, Format::D, Introduced::Sh1, Template::R0ToGbrDisp),
    entry(Op::MovLStoreGbr, "MOV.L", 0xC200, Format::D, Introduced::Sh1, Template::R0ToGbrDisp),
    entry(Op::Trapa, "TRAPA", 0xC300, Format::I, Introduced::Sh1, Template::Imm),
    entry(Op::MovBLoadGbr, "MOV.B", 0xC400, Format::D, Introduced::Sh1, Template::GbrDispToR0),
    entry(Op::MovWLoadGbr, "MOV.W", 0xC500, Format::D, Introduced::Sh1, Template::GbrDispToR0),
    entry(Op::MovLLoadGbr, "MOV.L", 0xC600, Format::D, Introduced::Sh1, Template::GbrDispToR0),
    entry(Op::Mova, "MOVA", 0xC700, Format::D, Introduced::Sh1, Template::PcRelAddress),
    entry(Op::TstImm, "TST", 0xC800, Format::I, Introduced::Sh1, Template::ImmToR0),
    entry(Op::AndImm, "AND", 0xC900, Format::I, Introduced::Sh1, Template::ImmToR0),
    entry(Op::XorImm, "XOR", 0xCA00, Format::I, Introduced::Sh1, Template::ImmToR0),
    entry(Op::OrImm, "OR", 0xCB00, Format::I, Introduced::Sh1, Template::ImmToR0),
    entry(Op::TstB, "TST.B", 0xCC00, Format::I, Introduced::Sh1, Template::ImmToGbrIndexed),
    entry(Op::AndB, "AND.B", 0xCD00, Format::I, Introduced::Sh1, Template::ImmToGbrIndexed),
    entry(Op::XorB, "XOR.B", 0xCE00, Format::I, Introduced::Sh1, Template::ImmToGbrIndexed),
    entry(Op::OrB, "OR.B", 0xCF00, Format::I, Introduced::Sh1, Template::ImmToGbrIndexed),
    entry(Op::MovLLoadPc, "MOV.L", 0xD000, Format::ND8, Introduced::Sh1, Template::PcRelLoad(Width::Long)),
    entry(Op::MovImm, "MOV", 0xE000, Format::NI, Introduced::Sh1, Template::ImmToReg),
    entry(Op::Fadd, "FADD", 0xF000, Format::NM, Introduced::Sh2e, Template::RegReg(RegKind::Fpr)),
    entry(Op::Fsub, "FSUB", 0xF001, Format::NM, Introduced::Sh2e, Template::RegReg(RegKind::Fpr)),
    entry(Op::Fmul, "FMUL", 0xF002, Format::NM, Introduced::Sh2e, Template::RegReg(RegKind::Fpr)),
    entry(Op::Fdiv, "FDIV", 0xF003, Format::NM, Introduced::Sh2e, Template::RegReg(RegKind::Fpr)),
    entry(Op::FcmpEq, "FCMP/EQ", 0xF004, Format::NM, Introduced::Sh2e, Template::RegReg(RegKind::Fpr)),
    entry(Op::FcmpGt, "FCMP/GT", 0xF005, Format::NM, Introduced::Sh2e, Template::RegReg(RegKind::Fpr)),
    entry(Op::FmovSLoadIndexed, "FMOV.S", 0xF006, Format::NM, Introduced::Sh2e, Template::IndexedToReg(RegKind::Fpr)),
    entry(Op::FmovSStoreIndexed, "FMOV.S", 0xF007, Format::NM, Introduced::Sh2e, Template::RegToIndexed(RegKind::Fpr)),
    entry(Op::FmovSLoad, "FMOV.S", 0xF008, Format::NM, Introduced::Sh2e, Template::IndirectToReg(RegKind::Fpr)),
    entry(Op::FmovSLoadPostInc, "FMOV.S", 0xF009, Format::NM, Introduced::Sh2e, Template::PostIncToReg(RegKind::Fpr)),
    entry(Op::FmovSStore, "FMOV.S", 0xF00A, Format::NM, Introduced::Sh2e, Template::RegToIndirect(RegKind::Fpr)),
    entry(Op::FmovSStorePreDec, "FMOV.S", 0xF00B, Format::NM, Introduced::Sh2e, Template::RegToPreDec(RegKind::Fpr)),
    entry(Op::Fmov, "FMOV", 0xF00C, Format::NM, Introduced::Sh2e, Template::RegReg(RegKind::Fpr)),
    entry(Op::Fsts, "FSTS", 0xF00D, Format::N, Introduced::Sh2e, Template::CtrlToReg(Reg::Fpul, RegKind::Fpr)),
    entry(Op::Flds, "FLDS", 0xF01D, Format::M, Introduced::Sh2e, Template::RegToCtrl(Reg::Fpul, RegKind::Fpr)),
    entry(Op::Float, "FLOAT", 0xF02D, Format::N, Introduced::Sh2e, Template::CtrlToReg(Reg::Fpul, RegKind::Fpr)),
    entry(Op::Ftrc, "FTRC", 0xF03D, Format::M, Introduced::Sh2e, Template::RegToCtrl(Reg::Fpul, RegKind::Fpr)),
    entry(Op::Fneg, "FNEG", 0xF04D, Format::N, Introduced::Sh2e, Template::Reg(RegKind::Fpr)),
    entry(Op::Fabs, "FABS", 0xF05D, Format::N, Introduced::Sh2e, Template::Reg(RegKind::Fpr)),
    entry(Op::Fldi0, "FLDI0", 0xF08D, Format::N, Introduced::Sh2e, Template::Reg(RegKind::Fpr)),
    entry(Op::Fldi1, "FLDI1", 0xF09D, Format::N, Introduced::Sh2e, Template::Reg(RegKind::Fpr)),
    entry(Op::Fmac, "FMAC", 0xF00E, Format::NM, Introduced::Sh2e, Template::Fr0RegReg),
];

pub fn desc(op: Op) -> &'static InstrDesc {
    &TABLE[op as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Decoder;
    use crate::isa::superh::ShDecoder;

    #[test]
    fn table_is_indexed_by_op() {
        for (i, d) in TABLE.iter().enumerate() {
            assert_eq!(d.op as usize, i, "{:?} out of place", d.op);
        }
    }

    #[test]
    fn skeletons_decode_to_their_entry() {
        let dec = ShDecoder::new();
        for d in TABLE {
            let got = dec.decode(d.skeleton).map(|x| x.op);
            assert_eq!(got, Some(d.op), "skeleton {:#06x}", d.skeleton);
        }
    }

    #[test]
    fn skeletons_have_clear_operand_fields() {
        for d in TABLE {
            assert_eq!(d.format.extract(d.skeleton), Default::default(), "{:?}", d.op);
        }
    }
}
