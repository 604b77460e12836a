use serde::{Deserialize, Serialize};

use crate::decoder::{Decoded, Width};
use crate::fields::{self, branch_target, sext_disp12, sext_disp8};
use crate::instructions::desc;
use crate::registers::Reg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Instruction,
    Text,
    OperandSeparator,
    Register,
    Integer,
    PossibleAddress,
    BeginMemoryOperand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub value: Option<u32>,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into(), value: None }
    }

    fn valued(kind: TokenKind, text: impl Into<String>, value: u32) -> Self {
        Self { kind, text: text.into(), value: Some(value) }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("unsupported operand size {size:?} for PC-relative load")]
    UnsupportedOperandSize { size: Width },
}

/// Whether a raw 4-bit register field names a general-purpose or an FPU data register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegKind {
    Gpr,
    Fpr,
}

impl RegKind {
    fn reg(self, idx: u8) -> Reg {
        match self {
            RegKind::Gpr => Reg::Gpr(idx),
            RegKind::Fpr => Reg::Fr(idx),
        }
    }
}

/// Shared operand layouts. `n` is bits 11-8 and `m` bits 7-4 unless the
/// variant says otherwise; `kind` applies to data registers only, address
/// registers of memory operands are always general-purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Bare,
    /// `Rn`, register in bits 11-8.
    Reg(RegKind),
    /// `@Rn`, register in bits 11-8.
    IndirectReg,
    /// `CTRL,Rn`
    CtrlToReg(Reg, RegKind),
    /// `Rm,CTRL`, register in bits 11-8.
    RegToCtrl(Reg, RegKind),
    /// `@Rm+,CTRL`, register in bits 11-8.
    PostIncToCtrl(Reg),
    /// `CTRL,@-Rn`
    CtrlToPreDec(Reg),
    /// `Rm,Rn`
    RegReg(RegKind),
    /// `FR0,FRm,FRn`
    Fr0RegReg,
    /// `Rm,@Rn`
    RegToIndirect(RegKind),
    /// `@Rm,Rn`
    IndirectToReg(RegKind),
    /// `@Rm+,Rn`
    PostIncToReg(RegKind),
    /// `Rm,@-Rn`
    RegToPreDec(RegKind),
    /// `Rm,@(R0,Rn)`
    RegToIndexed(RegKind),
    /// `@(R0,Rm),Rn`
    IndexedToReg(RegKind),
    /// `@Rm+,@Rn+`
    PostIncPair,
    /// `@(disp,Rm),R0` with m in bits 7-4.
    DispRegToR0,
    /// `R0,@(disp,Rn)` with n in bits 7-4.
    R0ToDispReg,
    /// `Rm,@(disp,Rn)`
    RegToDispReg,
    /// `@(disp,Rm),Rn`
    DispRegToReg,
    /// `@(disp,GBR),R0`
    GbrDispToR0,
    /// `R0,@(disp,GBR)`
    R0ToGbrDisp,
    /// `#addr,R0` (MOVA)
    PcRelAddress,
    /// `#addr,Rn`
    PcRelLoad(Width),
    /// Bare 8-bit branch target.
    Branch8,
    /// Bare 12-bit branch target.
    Branch12,
    /// `#imm,@(R0,GBR)`
    ImmToGbrIndexed,
    /// `#imm,R0`
    ImmToR0,
    /// `#imm`
    Imm,
    /// `#imm,Rn`
    ImmToReg,
}

/// One memory or register operand; the addressing forms are exclusive.
#[derive(Debug, Clone, Copy)]
enum Operand {
    Reg(Reg),
    Indirect(Reg),
    PreDec(Reg),
    PostInc(Reg),
    Disp { disp: u16, base: Reg },
    Indexed(Reg),
    Imm(u8),
    Address { hash: bool, addr: u32 },
}

struct Emitter {
    out: Vec<Token>,
    operands: usize,
}

impl Emitter {
    fn new(mnemonic: &str) -> Self {
        let out = vec![
            Token::new(TokenKind::Instruction, mnemonic),
            Token::new(TokenKind::Text, " "),
        ];
        Self { out, operands: 0 }
    }

    fn reg(&mut self, r: Reg) {
        self.out.push(Token::valued(TokenKind::Register, r.name(), r.id()));
    }

    fn text(&mut self, s: &str) {
        self.out.push(Token::new(TokenKind::Text, s));
    }

    fn sep(&mut self) {
        self.out.push(Token::new(TokenKind::OperandSeparator, ","));
    }

    fn operand(&mut self, op: Operand) {
        if self.operands > 0 {
            self.sep();
        }
        self.operands += 1;
        match op {
            Operand::Reg(r) => self.reg(r),
            Operand::Indirect(r) => {
                self.out.push(Token::new(TokenKind::BeginMemoryOperand, "@"));
                self.reg(r);
            }
            Operand::PreDec(r) => {
                self.out.push(Token::new(TokenKind::BeginMemoryOperand, "@"));
                self.text("-");
                self.reg(r);
            }
            Operand::PostInc(r) => {
                self.out.push(Token::new(TokenKind::BeginMemoryOperand, "@"));
                self.reg(r);
                self.text("+");
            }
            Operand::Disp { disp, base } => {
                self.out.push(Token::new(TokenKind::BeginMemoryOperand, "@"));
                self.text("(");
                self.out.push(Token::valued(TokenKind::Integer, format!("{disp:#x}"), disp as u32));
                self.sep();
                self.reg(base);
                self.text(")");
            }
            Operand::Indexed(r) => {
                self.out.push(Token::new(TokenKind::BeginMemoryOperand, "@"));
                self.text("(");
                self.reg(Reg::Gpr(0));
                self.sep();
                self.reg(r);
                self.text(")");
            }
            Operand::Imm(i) => {
                self.text("#");
                self.out.push(Token::valued(TokenKind::Integer, format!("{i:#x}"), i as u32));
            }
            Operand::Address { hash, addr } => {
                if hash {
                    self.text("#");
                }
                self.out.push(Token::valued(TokenKind::PossibleAddress, format!("{addr:#x}"), addr));
            }
        }
    }

    fn finish(self) -> Vec<Token> {
        self.out
    }
}

/// Literal address of `MOV.W @(disp,PC),Rn`.
pub fn pc_rel_word_address(disp: u8, addr: u32) -> u32 {
    addr.wrapping_add(4).wrapping_add(disp as u32 * 2)
}

/// Literal address of `MOV.L @(disp,PC),Rn`; the PC is longword aligned first.
pub fn pc_rel_long_address(disp: u8, addr: u32) -> u32 {
    (addr & !3).wrapping_add(4).wrapping_add(disp as u32 * 4)
}

/// Literal-pool address of `MOV.W`/`MOV.L @(disp,PC),Rn`.
pub fn pc_rel_load_address(size: Width, disp: u8, addr: u32) -> Result<u32, RenderError> {
    match size {
        Width::Word => Ok(pc_rel_word_address(disp, addr)),
        Width::Long => Ok(pc_rel_long_address(disp, addr)),
        Width::Byte => Err(RenderError::UnsupportedOperandSize { size }),
    }
}

/// Address computed by `MOVA @(disp,PC),R0`.
pub fn mova_address(disp: u8, addr: u32) -> u32 {
    pc_rel_long_address(disp, addr)
}

pub fn render(d: &Decoded, addr: u32) -> Result<Vec<Token>, RenderError> {
    let entry = desc(d.op);
    let mut e = Emitter::new(entry.mnemonic);
    let (n, m) = fields::get_nm(d.opcode);
    let gpr = Reg::Gpr;
    let r0 = Reg::Gpr(0);
    match entry.template {
        Template::Bare => {
            // no operands, drop the trailing space
            e.out.pop();
        }
        Template::Reg(kind) => e.operand(Operand::Reg(kind.reg(n))),
        Template::IndirectReg => e.operand(Operand::Indirect(gpr(n))),
        Template::CtrlToReg(ctrl, kind) => {
            e.operand(Operand::Reg(ctrl));
            e.operand(Operand::Reg(kind.reg(n)));
        }
        Template::RegToCtrl(ctrl, kind) => {
            e.operand(Operand::Reg(kind.reg(fields::get_m(d.opcode))));
            e.operand(Operand::Reg(ctrl));
        }
        Template::PostIncToCtrl(ctrl) => {
            e.operand(Operand::PostInc(gpr(fields::get_m(d.opcode))));
            e.operand(Operand::Reg(ctrl));
        }
        Template::CtrlToPreDec(ctrl) => {
            e.operand(Operand::Reg(ctrl));
            e.operand(Operand::PreDec(gpr(n)));
        }
        Template::RegReg(kind) => {
            e.operand(Operand::Reg(kind.reg(m)));
            e.operand(Operand::Reg(kind.reg(n)));
        }
        Template::Fr0RegReg => {
            e.operand(Operand::Reg(Reg::Fr(0)));
            e.operand(Operand::Reg(Reg::Fr(m)));
            e.operand(Operand::Reg(Reg::Fr(n)));
        }
        Template::RegToIndirect(kind) => {
            e.operand(Operand::Reg(kind.reg(m)));
            e.operand(Operand::Indirect(gpr(n)));
        }
        Template::IndirectToReg(kind) => {
            e.operand(Operand::Indirect(gpr(m)));
            e.operand(Operand::Reg(kind.reg(n)));
        }
        Template::PostIncToReg(kind) => {
            e.operand(Operand::PostInc(gpr(m)));
            e.operand(Operand::Reg(kind.reg(n)));
        }
        Template::RegToPreDec(kind) => {
            e.operand(Operand::Reg(kind.reg(m)));
            e.operand(Operand::PreDec(gpr(n)));
        }
        Template::RegToIndexed(kind) => {
            e.operand(Operand::Reg(kind.reg(m)));
            e.operand(Operand::Indexed(gpr(n)));
        }
        Template::IndexedToReg(kind) => {
            e.operand(Operand::Indexed(gpr(m)));
            e.operand(Operand::Reg(kind.reg(n)));
        }
        Template::PostIncPair => {
            e.operand(Operand::PostInc(gpr(m)));
            e.operand(Operand::PostInc(gpr(n)));
        }
        Template::DispRegToR0 => {
            let (m, disp) = fields::get_md(d.opcode);
            e.operand(Operand::Disp { disp: disp as u16, base: gpr(m) });
            e.operand(Operand::Reg(r0));
        }
        Template::R0ToDispReg => {
            let (n, disp) = fields::get_nd4(d.opcode);
            e.operand(Operand::Reg(r0));
            e.operand(Operand::Disp { disp: disp as u16, base: gpr(n) });
        }
        Template::RegToDispReg => {
            let (n, m, disp) = fields::get_nmd(d.opcode);
            e.operand(Operand::Reg(gpr(m)));
            e.operand(Operand::Disp { disp: disp as u16, base: gpr(n) });
        }
        Template::DispRegToReg => {
            let (n, m, disp) = fields::get_nmd(d.opcode);
            e.operand(Operand::Disp { disp: disp as u16, base: gpr(m) });
            e.operand(Operand::Reg(gpr(n)));
        }
        Template::GbrDispToR0 => {
            e.operand(Operand::Disp { disp: d.d8() as u16, base: Reg::Gbr });
            e.operand(Operand::Reg(r0));
        }
        Template::R0ToGbrDisp => {
            e.operand(Operand::Reg(r0));
            e.operand(Operand::Disp { disp: d.d8() as u16, base: Reg::Gbr });
        }
        Template::PcRelAddress => {
            e.operand(Operand::Address { hash: true, addr: mova_address(d.d8(), addr) });
            e.operand(Operand::Reg(r0));
        }
        Template::PcRelLoad(size) => {
            let (n, disp) = fields::get_nd8(d.opcode);
            let target = pc_rel_load_address(size, disp, addr)?;
            e.operand(Operand::Address { hash: true, addr: target });
            e.operand(Operand::Reg(gpr(n)));
        }
        Template::Branch8 => {
            let target = branch_target(addr, sext_disp8(d.d8()));
            e.operand(Operand::Address { hash: false, addr: target });
        }
        Template::Branch12 => {
            let target = branch_target(addr, sext_disp12(d.d12()));
            e.operand(Operand::Address { hash: false, addr: target });
        }
        Template::ImmToGbrIndexed => {
            e.operand(Operand::Imm(d.imm()));
            e.operand(Operand::Indexed(Reg::Gbr));
        }
        Template::ImmToR0 => {
            e.operand(Operand::Imm(d.imm()));
            e.operand(Operand::Reg(r0));
        }
        Template::Imm => e.operand(Operand::Imm(d.imm())),
        Template::ImmToReg => {
            let (n, i) = fields::get_ni(d.opcode);
            e.operand(Operand::Imm(i));
            e.operand(Operand::Reg(gpr(n)));
        }
    }
    Ok(e.finish())
}

pub fn tokens_to_string(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Single-line rendering for listings.
pub fn fmt_decoded(d: &Decoded, addr: u32) -> String {
    match render(d, addr) {
        Ok(tokens) => tokens_to_string(&tokens),
        Err(e) => format!(".word {:#06x} ; {e}", d.opcode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pc_relative_load_sizes() {
        assert_eq!(pc_rel_load_address(Width::Word, 1, 0x1002), Ok(0x1008));
        assert_eq!(pc_rel_load_address(Width::Long, 1, 0x1002), Ok(0x1008));
        assert_eq!(pc_rel_load_address(Width::Long, 0, 0x1000), Ok(0x1004));
        assert_eq!(pc_rel_long_address(3, 0x1006), 0x1014);
        assert_eq!(pc_rel_word_address(3, 0x1006), 0x1010);
        assert_eq!(mova_address(3, 0x1006), pc_rel_long_address(3, 0x1006));
        assert_eq!(
            pc_rel_load_address(Width::Byte, 1, 0),
            Err(RenderError::UnsupportedOperandSize { size: Width::Byte })
        );
    }
}
