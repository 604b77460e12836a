//! Width-tagged register-transfer IL emitted by the lifter.

use serde::Serialize;

use crate::decoder::Width;
use crate::registers::Reg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IlReg {
    Arch(Reg),
    /// IL-only scratch register.
    Temp(u8),
}

impl From<Reg> for IlReg {
    fn from(r: Reg) -> Self {
        IlReg::Arch(r)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    And,
    Or,
    Xor,
    Shl,
    Lsr,
    CmpEq,
    /// Unsigned greater-than.
    CmpUgt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnOp {
    Not,
    Neg,
    /// Sign-extend the operand to the expression width.
    SignExtend,
    ZeroExtend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    Reg { size: Width, reg: IlReg },
    Const { size: Width, value: u32 },
    ConstPtr { value: u32 },
    Load { size: Width, addr: Box<Expr> },
    Binary { op: BinOp, size: Width, lhs: Box<Expr>, rhs: Box<Expr> },
    AddCarry { size: Width, lhs: Box<Expr>, rhs: Box<Expr>, carry: Box<Expr> },
    Unary { op: UnOp, size: Width, arg: Box<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Label(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IrOp {
    SetReg { size: Width, reg: IlReg, value: Expr },
    Store { size: Width, addr: Expr, value: Expr },
    If { cond: Expr, t: Label, f: Label },
    Goto(Label),
    Label(Label),
    Jump(Expr),
    Call(Expr),
    Return(Expr),
    Nop,
    /// Recognized instruction whose semantics are not modelled.
    Unimplemented,
}

pub fn reg(size: Width, r: impl Into<IlReg>) -> Expr {
    Expr::Reg { size, reg: r.into() }
}

pub fn konst(size: Width, value: u32) -> Expr {
    Expr::Const { size, value }
}

pub fn const_ptr(value: u32) -> Expr {
    Expr::ConstPtr { value }
}

pub fn load(size: Width, addr: Expr) -> Expr {
    Expr::Load { size, addr: Box::new(addr) }
}

fn binary(op: BinOp, size: Width, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary { op, size, lhs: Box::new(lhs), rhs: Box::new(rhs) }
}

fn unary(op: UnOp, size: Width, arg: Expr) -> Expr {
    Expr::Unary { op, size, arg: Box::new(arg) }
}

pub fn add(size: Width, lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Add, size, lhs, rhs)
}

pub fn add_carry(size: Width, lhs: Expr, rhs: Expr, carry: Expr) -> Expr {
    Expr::AddCarry { size, lhs: Box::new(lhs), rhs: Box::new(rhs), carry: Box::new(carry) }
}

pub fn sub(size: Width, lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Sub, size, lhs, rhs)
}

pub fn and(size: Width, lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::And, size, lhs, rhs)
}

pub fn or(size: Width, lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Or, size, lhs, rhs)
}

pub fn xor(size: Width, lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Xor, size, lhs, rhs)
}

pub fn shl(size: Width, lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Shl, size, lhs, rhs)
}

pub fn lsr(size: Width, lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Lsr, size, lhs, rhs)
}

pub fn cmp_eq(size: Width, lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::CmpEq, size, lhs, rhs)
}

pub fn cmp_ugt(size: Width, lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::CmpUgt, size, lhs, rhs)
}

pub fn not(size: Width, arg: Expr) -> Expr {
    unary(UnOp::Not, size, arg)
}

pub fn neg(size: Width, arg: Expr) -> Expr {
    unary(UnOp::Neg, size, arg)
}

pub fn sign_extend(size: Width, arg: Expr) -> Expr {
    unary(UnOp::SignExtend, size, arg)
}

pub fn zero_extend(size: Width, arg: Expr) -> Expr {
    unary(UnOp::ZeroExtend, size, arg)
}

/// Accumulates IL for one lift call and hands out unique labels.
#[derive(Debug, Default)]
pub struct IlBuilder {
    ops: Vec<IrOp>,
    next_label: u32,
}

impl IlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: IrOp) {
        self.ops.push(op);
    }

    pub fn set_reg(&mut self, size: Width, r: impl Into<IlReg>, value: Expr) {
        self.push(IrOp::SetReg { size, reg: r.into(), value });
    }

    pub fn store(&mut self, size: Width, addr: Expr, value: Expr) {
        self.push(IrOp::Store { size, addr, value });
    }

    pub fn label(&mut self) -> Label {
        let l = Label(self.next_label);
        self.next_label += 1;
        l
    }

    pub fn mark(&mut self, l: Label) {
        self.push(IrOp::Label(l));
    }

    pub fn ops(&self) -> &[IrOp] {
        &self.ops
    }

    pub fn finish(self) -> Vec<IrOp> {
        self.ops
    }
}
