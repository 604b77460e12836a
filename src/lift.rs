use serde::Serialize;

use crate::arch::Sr as SrFlags;
use crate::decoder::{Decoded, Op, Width};
use crate::disasm::{mova_address, pc_rel_long_address, pc_rel_word_address};
use crate::fields::{self, sext_imm8};
use crate::il::*;
use crate::info::{branch12_target, cond_branch_target, has_delay_slot};
use crate::registers::Reg;

use Width::{Byte, Long, Word};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lifted {
    pub length: u32,
    pub ops: Vec<IrOp>,
}

pub trait Lifter {
    fn lift(&self, d: &Decoded, addr: u32, il: &mut IlBuilder);

    /// Lift a delayed branch fused with the instruction in its slot.
    fn lift_with_slot(&self, d: &Decoded, addr: u32, slot: &Decoded, il: &mut IlBuilder);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ShLifter;

// Scratch registers. ADDC owns 0 and 1, delayed branches capture into 2.
const T_OLD: IlReg = IlReg::Temp(0);
const T_SUM: IlReg = IlReg::Temp(1);
const T_CAPTURE: IlReg = IlReg::Temp(2);

fn r(n: u8) -> Reg {
    Reg::Gpr(n)
}

fn t_bit() -> Expr {
    and(Long, reg(Long, Reg::Sr), konst(Long, SrFlags::T.bits()))
}

fn set_t(il: &mut IlBuilder) {
    il.set_reg(Long, Reg::Sr, or(Long, reg(Long, Reg::Sr), konst(Long, SrFlags::T.bits())));
}

fn clear_t(il: &mut IlBuilder) {
    il.set_reg(Long, Reg::Sr, and(Long, reg(Long, Reg::Sr), konst(Long, !SrFlags::T.bits())));
}

/// Byte and word loads sign-extend into the 32-bit register.
fn load_ext(size: Width, addr: Expr) -> Expr {
    match size {
        Long => load(Long, addr),
        _ => sign_extend(Long, load(size, addr)),
    }
}

fn size_const(size: Width) -> Expr {
    konst(Long, size.bytes())
}

fn cond_jump(il: &mut IlBuilder, cond: Expr, taken: u32, not_taken: u32) {
    let t = il.label();
    let f = il.label();
    il.push(IrOp::If { cond, t, f });
    il.mark(t);
    il.push(IrOp::Jump(const_ptr(taken)));
    il.mark(f);
    il.push(IrOp::Jump(const_ptr(not_taken)));
}

fn store_op(d: &Decoded) -> Option<Width> {
    Some(match d.op {
        Op::MovBStore | Op::MovBStorePreDec | Op::MovBStoreIndexed => Byte,
        Op::MovWStore | Op::MovWStorePreDec | Op::MovWStoreIndexed => Word,
        Op::MovLStore | Op::MovLStorePreDec | Op::MovLStoreIndexed => Long,
        _ => return None,
    })
}

fn load_op(d: &Decoded) -> Option<Width> {
    Some(match d.op {
        Op::MovBLoad | Op::MovBLoadPostInc | Op::MovBLoadIndexed => Byte,
        Op::MovWLoad | Op::MovWLoadPostInc | Op::MovWLoadIndexed => Word,
        Op::MovLLoad | Op::MovLLoadPostInc | Op::MovLLoadIndexed => Long,
        _ => return None,
    })
}

fn ctrl_of(op: Op) -> Option<Reg> {
    Some(match op {
        Op::LdcSr | Op::LdcLSr | Op::StcSr | Op::StcLSr => Reg::Sr,
        Op::LdcGbr | Op::LdcLGbr | Op::StcGbr | Op::StcLGbr => Reg::Gbr,
        Op::LdcVbr | Op::LdcLVbr | Op::StcVbr | Op::StcLVbr => Reg::Vbr,
        Op::LdsMach | Op::LdsLMach | Op::StsMach | Op::StsLMach => Reg::Mach,
        Op::LdsMacl | Op::LdsLMacl | Op::StsMacl | Op::StsLMacl => Reg::Macl,
        Op::LdsPr | Op::LdsLPr | Op::StsPr | Op::StsLPr => Reg::Pr,
        _ => return None,
    })
}

impl ShLifter {
    fn lift_addc(&self, n: u8, m: u8, il: &mut IlBuilder) {
        il.set_reg(Long, T_OLD, reg(Long, r(n)));
        il.set_reg(Long, T_SUM, add(Long, reg(Long, T_OLD), reg(Long, r(m))));
        il.set_reg(Long, r(n), add_carry(Long, reg(Long, T_OLD), reg(Long, r(m)), t_bit()));

        // first carry: Rn + Rm wrapped
        let (c1, nc1, second) = (il.label(), il.label(), il.label());
        il.push(IrOp::If { cond: cmp_ugt(Long, reg(Long, T_OLD), reg(Long, T_SUM)), t: c1, f: nc1 });
        il.mark(c1);
        set_t(il);
        il.push(IrOp::Goto(second));
        il.mark(nc1);
        clear_t(il);
        il.push(IrOp::Goto(second));

        // second carry: adding T wrapped
        il.mark(second);
        let (c2, done) = (il.label(), il.label());
        il.push(IrOp::If { cond: cmp_ugt(Long, reg(Long, T_SUM), reg(Long, r(n))), t: c2, f: done });
        il.mark(c2);
        set_t(il);
        il.mark(done);
    }

    /// Everything a delayed branch does before its slot executes. The
    /// condition or target register is saved to a scratch register so the
    /// slot cannot clobber it.
    fn delayed_prologue(&self, d: &Decoded, addr: u32, il: &mut IlBuilder) {
        let saved = match d.op {
            Op::BtS | Op::BfS => Some(t_bit()),
            Op::Jmp | Op::Jsr | Op::Braf | Op::Bsrf => Some(reg(Long, r(d.n()))),
            Op::Rts => Some(reg(Long, Reg::Pr)),
            _ => None,
        };
        if let Some(v) = saved {
            il.set_reg(Long, T_CAPTURE, v);
        }
        if matches!(d.op, Op::Bsr | Op::Bsrf | Op::Jsr) {
            il.set_reg(Long, Reg::Pr, const_ptr(addr.wrapping_add(4)));
        }
    }

    /// The transfer itself, after the slot, reading the captured value.
    fn delayed_transfer(&self, d: &Decoded, addr: u32, il: &mut IlBuilder) {
        let captured = || reg(Long, T_CAPTURE);
        let after_slot = addr.wrapping_add(4);
        match d.op {
            Op::BtS => {
                let cond = cmp_eq(Long, captured(), konst(Long, 1));
                cond_jump(il, cond, cond_branch_target(d, addr), after_slot);
            }
            Op::BfS => {
                let cond = cmp_eq(Long, captured(), konst(Long, 0));
                cond_jump(il, cond, cond_branch_target(d, addr), after_slot);
            }
            Op::Bra => il.push(IrOp::Jump(const_ptr(branch12_target(d, addr)))),
            Op::Bsr => il.push(IrOp::Call(const_ptr(branch12_target(d, addr)))),
            Op::Jmp => il.push(IrOp::Jump(captured())),
            Op::Jsr => il.push(IrOp::Call(captured())),
            Op::Braf => il.push(IrOp::Jump(add(Long, captured(), const_ptr(after_slot)))),
            Op::Bsrf => il.push(IrOp::Call(add(Long, captured(), const_ptr(after_slot)))),
            Op::Rts => il.push(IrOp::Return(captured())),
            _ => il.push(IrOp::Unimplemented),
        }
    }
}

impl Lifter for ShLifter {
    fn lift(&self, d: &Decoded, addr: u32, il: &mut IlBuilder) {
        let (n, m) = fields::get_nm(d.opcode);

        if let Some(size) = store_op(d) {
            let src = reg(size, r(m));
            match d.op {
                Op::MovBStore | Op::MovWStore | Op::MovLStore => il.store(size, reg(Long, r(n)), src),
                Op::MovBStorePreDec | Op::MovWStorePreDec | Op::MovLStorePreDec => {
                    let dec = sub(Long, reg(Long, r(n)), size_const(size));
                    il.store(size, dec.clone(), src);
                    il.set_reg(Long, r(n), dec);
                }
                _ => il.store(size, add(Long, reg(Long, r(0)), reg(Long, r(n))), src),
            }
            return;
        }

        if let Some(size) = load_op(d) {
            match d.op {
                Op::MovBLoad | Op::MovWLoad | Op::MovLLoad => {
                    il.set_reg(Long, r(n), load_ext(size, reg(Long, r(m))));
                }
                Op::MovBLoadPostInc | Op::MovWLoadPostInc | Op::MovLLoadPostInc => {
                    il.set_reg(Long, r(n), load_ext(size, reg(Long, r(m))));
                    // the loaded value wins when Rm is also the destination
                    if n != m {
                        il.set_reg(Long, r(m), add(Long, reg(Long, r(m)), size_const(size)));
                    }
                }
                _ => {
                    let ea = add(Long, reg(Long, r(0)), reg(Long, r(m)));
                    il.set_reg(Long, r(n), load_ext(size, ea));
                }
            }
            return;
        }

        match d.op {
            Op::Add => il.set_reg(Long, r(n), add(Long, reg(Long, r(n)), reg(Long, r(m)))),
            Op::AddImm => {
                let i = sext_imm8(d.imm());
                il.set_reg(Long, r(n), add(Long, reg(Long, r(n)), konst(Long, i)));
            }
            Op::Addc => self.lift_addc(n, m, il),
            Op::Sub => il.set_reg(Long, r(n), sub(Long, reg(Long, r(n)), reg(Long, r(m)))),
            Op::And => il.set_reg(Long, r(n), and(Long, reg(Long, r(n)), reg(Long, r(m)))),
            Op::Or => il.set_reg(Long, r(n), or(Long, reg(Long, r(n)), reg(Long, r(m)))),
            Op::Xor => il.set_reg(Long, r(n), xor(Long, reg(Long, r(n)), reg(Long, r(m)))),
            Op::AndImm => il.set_reg(Long, r(0), and(Long, reg(Long, r(0)), konst(Long, d.imm() as u32))),
            Op::OrImm => il.set_reg(Long, r(0), or(Long, reg(Long, r(0)), konst(Long, d.imm() as u32))),
            Op::XorImm => il.set_reg(Long, r(0), xor(Long, reg(Long, r(0)), konst(Long, d.imm() as u32))),
            Op::Not => il.set_reg(Long, r(n), not(Long, reg(Long, r(m)))),
            Op::Neg => il.set_reg(Long, r(n), neg(Long, reg(Long, r(m)))),
            Op::ExtuB => il.set_reg(Long, r(n), zero_extend(Long, reg(Byte, r(m)))),
            Op::ExtuW => il.set_reg(Long, r(n), zero_extend(Long, reg(Word, r(m)))),
            Op::ExtsB => il.set_reg(Long, r(n), sign_extend(Long, reg(Byte, r(m)))),
            Op::ExtsW => il.set_reg(Long, r(n), sign_extend(Long, reg(Word, r(m)))),
            Op::Shll2 | Op::Shll8 | Op::Shll16 | Op::Shlr2 | Op::Shlr8 | Op::Shlr16 => {
                let amount = match d.op {
                    Op::Shll2 | Op::Shlr2 => 2,
                    Op::Shll8 | Op::Shlr8 => 8,
                    _ => 16,
                };
                let v = reg(Long, r(n));
                let shifted = if matches!(d.op, Op::Shll2 | Op::Shll8 | Op::Shll16) {
                    shl(Long, v, konst(Byte, amount))
                } else {
                    lsr(Long, v, konst(Byte, amount))
                };
                il.set_reg(Long, r(n), shifted);
            }
            Op::Mov => il.set_reg(Long, r(n), reg(Long, r(m))),
            Op::MovImm => il.set_reg(Long, r(n), konst(Long, sext_imm8(d.imm()))),

            Op::MovLStoreDisp => {
                let (n, m, disp) = fields::get_nmd(d.opcode);
                let ea = add(Long, reg(Long, r(n)), konst(Long, disp as u32 * 4));
                il.store(Long, ea, reg(Long, r(m)));
            }
            Op::MovLLoadDisp => {
                let (n, m, disp) = fields::get_nmd(d.opcode);
                let ea = add(Long, reg(Long, r(m)), konst(Long, disp as u32 * 4));
                il.set_reg(Long, r(n), load(Long, ea));
            }
            Op::MovBStoreDisp | Op::MovWStoreDisp => {
                let size = if d.op == Op::MovBStoreDisp { Byte } else { Word };
                let (n, disp) = fields::get_nd4(d.opcode);
                let ea = add(Long, reg(Long, r(n)), konst(Long, disp as u32 * size.bytes()));
                il.store(size, ea, reg(size, r(0)));
            }
            Op::MovBLoadDisp | Op::MovWLoadDisp => {
                let size = if d.op == Op::MovBLoadDisp { Byte } else { Word };
                let (m, disp) = fields::get_md(d.opcode);
                let ea = add(Long, reg(Long, r(m)), konst(Long, disp as u32 * size.bytes()));
                il.set_reg(Long, r(0), load_ext(size, ea));
            }
            Op::MovBStoreGbr | Op::MovWStoreGbr | Op::MovLStoreGbr => {
                let size = match d.op {
                    Op::MovBStoreGbr => Byte,
                    Op::MovWStoreGbr => Word,
                    _ => Long,
                };
                let ea = add(Long, reg(Long, Reg::Gbr), konst(Long, d.d8() as u32 * size.bytes()));
                il.store(size, ea, reg(size, r(0)));
            }
            Op::MovBLoadGbr | Op::MovWLoadGbr | Op::MovLLoadGbr => {
                let size = match d.op {
                    Op::MovBLoadGbr => Byte,
                    Op::MovWLoadGbr => Word,
                    _ => Long,
                };
                let ea = add(Long, reg(Long, Reg::Gbr), konst(Long, d.d8() as u32 * size.bytes()));
                il.set_reg(Long, r(0), load_ext(size, ea));
            }
            Op::MovWLoadPc | Op::MovLLoadPc => {
                let (n, disp) = fields::get_nd8(d.opcode);
                let (size, ea) = if d.op == Op::MovWLoadPc {
                    (Word, pc_rel_word_address(disp, addr))
                } else {
                    (Long, pc_rel_long_address(disp, addr))
                };
                il.set_reg(Long, r(n), load_ext(size, const_ptr(ea)));
            }
            Op::Mova => il.set_reg(Long, r(0), const_ptr(mova_address(d.d8(), addr))),
            Op::Movt => il.set_reg(Long, r(n), t_bit()),
            Op::Clrt => clear_t(il),
            Op::Sett => set_t(il),
            Op::Nop => il.push(IrOp::Nop),

            Op::Bt => {
                let cond = cmp_eq(Long, t_bit(), konst(Long, 1));
                cond_jump(il, cond, cond_branch_target(d, addr), addr.wrapping_add(2));
            }
            Op::Bf => {
                let cond = cmp_eq(Long, t_bit(), konst(Long, 0));
                cond_jump(il, cond, cond_branch_target(d, addr), addr.wrapping_add(2));
            }
            // delayed branches are only modelled together with their slot
            Op::BtS | Op::BfS | Op::Bra | Op::Bsr | Op::Braf | Op::Bsrf | Op::Jmp | Op::Jsr | Op::Rts => {
                il.push(IrOp::Unimplemented)
            }

            Op::LdcSr | Op::LdcGbr | Op::LdcVbr | Op::LdsMach | Op::LdsMacl | Op::LdsPr => {
                if let Some(ctrl) = ctrl_of(d.op) {
                    il.set_reg(Long, ctrl, reg(Long, r(fields::get_m(d.opcode))));
                }
            }
            Op::StcSr | Op::StcGbr | Op::StcVbr | Op::StsMach | Op::StsMacl | Op::StsPr => {
                if let Some(ctrl) = ctrl_of(d.op) {
                    il.set_reg(Long, r(n), reg(Long, ctrl));
                }
            }
            Op::LdcLSr | Op::LdcLGbr | Op::LdcLVbr | Op::LdsLMach | Op::LdsLMacl | Op::LdsLPr => {
                if let Some(ctrl) = ctrl_of(d.op) {
                    let m = fields::get_m(d.opcode);
                    il.set_reg(Long, ctrl, load(Long, reg(Long, r(m))));
                    il.set_reg(Long, r(m), add(Long, reg(Long, r(m)), size_const(Long)));
                }
            }
            Op::StcLSr | Op::StcLGbr | Op::StcLVbr | Op::StsLMach | Op::StsLMacl | Op::StsLPr => {
                if let Some(ctrl) = ctrl_of(d.op) {
                    let dec = sub(Long, reg(Long, r(n)), size_const(Long));
                    il.store(Long, dec.clone(), reg(Long, ctrl));
                    il.set_reg(Long, r(n), dec);
                }
            }
            _ => il.push(IrOp::Unimplemented),
        }
    }

    fn lift_with_slot(&self, d: &Decoded, addr: u32, slot: &Decoded, il: &mut IlBuilder) {
        if !has_delay_slot(d.op) {
            self.lift(d, addr, il);
            return;
        }
        self.delayed_prologue(d, addr, il);
        self.lift(slot, addr.wrapping_add(2), il);
        // RTE falls through to an unmodelled transfer after its slot
        self.delayed_transfer(d, addr, il);
    }
}
