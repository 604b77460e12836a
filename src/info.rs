//! Control-flow facts for CFG construction.

use serde::Serialize;

use crate::decoder::{Decoded, Op};
use crate::fields::{branch_target, sext_disp12, sext_disp8};
use crate::registers::Reg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BranchKind {
    /// Taken edge of a conditional branch.
    True,
    /// Not-taken edge of a conditional branch.
    False,
    Unconditional,
    Call,
    Indirect,
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BranchTarget {
    Address(u32),
    /// Contents of a register.
    Register(Reg),
    /// `base + reg`, as computed by BRAF and BSRF.
    RegisterRelative { base: u32, reg: Reg },
    Unresolved,
}

impl BranchTarget {
    pub fn address(self) -> Option<u32> {
        match self {
            BranchTarget::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Host-style numeric target; 0 when not statically known.
    pub fn as_u32(self) -> u32 {
        self.address().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub kind: BranchKind,
    pub target: BranchTarget,
    pub delay_slot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionInfo {
    pub length: u32,
    pub branches: Vec<Branch>,
}

impl InstructionInfo {
    fn branch(&mut self, kind: BranchKind, target: BranchTarget, delay_slot: bool) {
        self.branches.push(Branch { kind, target, delay_slot });
    }

    pub fn falls_through(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn has_delay_slot(&self) -> bool {
        self.branches.iter().any(|b| b.delay_slot)
    }
}

pub fn has_delay_slot(op: Op) -> bool {
    matches!(
        op,
        Op::BtS | Op::BfS | Op::Bra | Op::Bsr | Op::Braf | Op::Bsrf | Op::Jmp | Op::Jsr | Op::Rts | Op::Rte
    )
}

/// Taken target of BT, BF, BT/S and BF/S.
pub fn cond_branch_target(d: &Decoded, addr: u32) -> u32 {
    branch_target(addr, sext_disp8(d.d8()))
}

/// Target of BRA and BSR.
pub fn branch12_target(d: &Decoded, addr: u32) -> u32 {
    branch_target(addr, sext_disp12(d.d12()))
}

pub fn info(d: &Decoded, addr: u32) -> InstructionInfo {
    use BranchKind::*;
    use BranchTarget::*;

    let mut res = InstructionInfo { length: d.length(), branches: Vec::new() };
    let rm = Reg::Gpr(d.n());
    match d.op {
        Op::Bt | Op::Bf => {
            res.branch(True, Address(cond_branch_target(d, addr)), false);
            res.branch(False, Address(addr.wrapping_add(res.length)), false);
        }
        Op::BtS | Op::BfS => {
            res.branch(True, Address(cond_branch_target(d, addr)), true);
            res.branch(False, Address(addr.wrapping_add(2 * res.length)), true);
        }
        Op::Bra => res.branch(Unconditional, Address(branch12_target(d, addr)), true),
        Op::Bsr => res.branch(Call, Address(branch12_target(d, addr)), true),
        Op::Braf => {
            let base = addr.wrapping_add(4);
            res.branch(Indirect, RegisterRelative { base, reg: rm }, true);
        }
        Op::Bsrf => {
            let base = addr.wrapping_add(4);
            res.branch(Call, RegisterRelative { base, reg: rm }, true);
        }
        Op::Jmp => res.branch(Indirect, Register(rm), true),
        Op::Jsr => res.branch(Call, Register(rm), true),
        Op::Rts | Op::Rte => res.branch(Return, Unresolved, true),
        _ => {}
    }
    res
}
