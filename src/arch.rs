use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::decoder::{Decoded, Decoder};
use crate::disasm::{self, RenderError, Token};
use crate::info::{self, InstructionInfo};
use crate::instructions::desc;
use crate::isa::superh::ShDecoder;
use crate::lift::{Lifted, Lifter, ShLifter};
use crate::il::IlBuilder;
use crate::registers::{self, Reg};

/// Variant a decoder instance is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum IsaVariant {
    /// SH-1 base integer ISA.
    #[default]
    Sh1,
    /// SH-2 additions plus the single-precision FPU.
    Sh2e,
    /// Reserved; accepts the integer ISA only.
    Dsp,
}

/// Variant an instruction first appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Introduced {
    Sh1,
    Sh2,
    Sh2e,
}

impl Introduced {
    pub fn available_on(self, variant: IsaVariant) -> bool {
        match self {
            Introduced::Sh1 => true,
            Introduced::Sh2 => !matches!(variant, IsaVariant::Sh1),
            Introduced::Sh2e => matches!(variant, IsaVariant::Sh2e),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ArchConfig {
    pub variant: IsaVariant,
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sr: u32 {
const T = 1 << 0; // test/carry
const S = 1 << 1; // MAC saturation
const Q = 1 << 8;
const M = 1 << 9;
}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArchError {
    #[error("unrecognized opcode {opcode:#06x}")]
    Unrecognized { opcode: u16 },
    #[error("{mnemonic} ({opcode:#06x}) requires {required:?}, decoder is configured for {configured:?}")]
    IsaMismatch {
        opcode: u16,
        mnemonic: &'static str,
        required: Introduced,
        configured: IsaVariant,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Entry point for hosts: decode, control-flow info, text and IL for one
/// configured ISA variant. Holds no mutable state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Architecture {
    cfg: ArchConfig,
    dec: ShDecoder,
    lifter: ShLifter,
}

impl Architecture {
    pub fn new(cfg: ArchConfig) -> Self {
        Self { cfg, dec: ShDecoder::new(), lifter: ShLifter }
    }

    pub fn with_variant(variant: IsaVariant) -> Self {
        Self::new(ArchConfig { variant })
    }

    pub fn config(&self) -> ArchConfig {
        self.cfg
    }

    /// Decode and apply the ISA gate.
    pub fn decode(&self, bytes: [u8; 2]) -> Result<Decoded, ArchError> {
        let opcode = u16::from_be_bytes(bytes);
        let Some(d) = self.dec.decode(opcode) else {
            debug!(opcode = format_args!("{opcode:#06x}"), "unrecognized opcode");
            return Err(ArchError::Unrecognized { opcode });
        };
        let entry = desc(d.op);
        if !entry.isa.available_on(self.cfg.variant) {
            debug!(
                opcode = format_args!("{opcode:#06x}"),
                mnemonic = entry.mnemonic,
                variant = ?self.cfg.variant,
                "instruction not available on configured variant"
            );
            return Err(ArchError::IsaMismatch {
                opcode,
                mnemonic: entry.mnemonic,
                required: entry.isa,
                configured: self.cfg.variant,
            });
        }
        trace!(opcode = format_args!("{opcode:#06x}"), op = ?d.op, "decoded");
        Ok(d)
    }

    pub fn info(&self, bytes: [u8; 2], addr: u32) -> Result<InstructionInfo, ArchError> {
        let d = self.decode(bytes)?;
        Ok(info::info(&d, addr))
    }

    /// Returns the consumed length and the token stream.
    pub fn text(&self, bytes: [u8; 2], addr: u32) -> Result<(u32, Vec<Token>), ArchError> {
        let d = self.decode(bytes)?;
        let tokens = disasm::render(&d, addr)?;
        Ok((d.length(), tokens))
    }

    pub fn lift(&self, bytes: [u8; 2], addr: u32) -> Result<Lifted, ArchError> {
        let d = self.decode(bytes)?;
        let mut il = IlBuilder::new();
        self.lifter.lift(&d, addr, &mut il);
        Ok(Lifted { length: d.length(), ops: il.finish() })
    }

    /// Lift a delayed branch together with the instruction in its slot at
    /// `addr + 2`. Falls back to [`Architecture::lift`] when the branch has no
    /// delay slot or the slot cannot be fused.
    pub fn lift_with_slot(&self, bytes: [u8; 2], next: [u8; 2], addr: u32) -> Result<Lifted, ArchError> {
        let d = self.decode(bytes)?;
        if !info::has_delay_slot(d.op) {
            return self.lift(bytes, addr);
        }
        let slot_addr = addr.wrapping_add(2);
        let slot = match self.decode(next) {
            Ok(s) if info::info(&s, slot_addr).branches.is_empty() => s,
            Ok(s) => {
                debug!(addr = format_args!("{addr:#010x}"), slot = ?s.op, "branch in delay slot, lifting alone");
                return self.lift(bytes, addr);
            }
            Err(e) => {
                debug!(addr = format_args!("{addr:#010x}"), error = %e, "delay slot not decodable, lifting alone");
                return self.lift(bytes, addr);
            }
        };
        let mut il = IlBuilder::new();
        self.lifter.lift_with_slot(&d, addr, &slot, &mut il);
        Ok(Lifted { length: d.length() + slot.length(), ops: il.finish() })
    }

    pub fn registers(&self) -> Vec<Reg> {
        registers::registers(self.cfg.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn introduced_gating_matrix() {
        assert!(Introduced::Sh1.available_on(IsaVariant::Sh1));
        assert!(!Introduced::Sh2.available_on(IsaVariant::Sh1));
        assert!(Introduced::Sh2.available_on(IsaVariant::Sh2e));
        assert!(Introduced::Sh2.available_on(IsaVariant::Dsp));
        assert!(!Introduced::Sh2e.available_on(IsaVariant::Dsp));
        assert!(Introduced::Sh2e.available_on(IsaVariant::Sh2e));
    }

    #[test]
    fn config_json() {
        let cfg: ArchConfig = serde_json::from_str(r#"{"variant":"Sh2e"}"#).unwrap();
        assert_eq!(cfg.variant, IsaVariant::Sh2e);
        assert_eq!(ArchConfig::default().variant, IsaVariant::Sh1);
    }

    #[test]
    fn t_flag_is_bit_zero() {
        assert_eq!(Sr::T.bits(), 1);
    }
}
