pub mod arch;
pub mod decoder;
pub mod disasm;
pub mod fields;
pub mod il;
pub mod info;
pub mod instructions;
pub mod lift;
pub mod registers;

pub mod isa {
    pub mod superh; // SH-1 / SH-2 / SH-2E encodings
}

pub use arch::{ArchConfig, ArchError, Architecture, Introduced, IsaVariant};
pub use decoder::{Decoded, Decoder, Op, Width};
pub use disasm::{Token, TokenKind};
pub use info::{Branch, BranchKind, BranchTarget, InstructionInfo};
pub use lift::Lifted;
pub use registers::Reg;
