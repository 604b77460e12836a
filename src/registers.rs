use serde::{Deserialize, Serialize};

use crate::arch::IsaVariant;

/// Architectural registers. Ids are dense and stable: R0-R15 are 0-15, the
/// control and system registers follow, then FR0-FR15, FPUL and FPSCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Reg {
    Gpr(u8),
    Sr,
    Gbr,
    Vbr,
    Mach,
    Macl,
    Pr,
    Pc,
    Fr(u8),
    Fpul,
    Fpscr,
}

const NAMES: [&str; 41] = [
    "R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7", "R8", "R9", "R10", "R11", "R12", "R13", "R14",
    "R15", "SR", "GBR", "VBR", "MACH", "MACL", "PR", "PC", "FR0", "FR1", "FR2", "FR3", "FR4",
    "FR5", "FR6", "FR7", "FR8", "FR9", "FR10", "FR11", "FR12", "FR13", "FR14", "FR15", "FPUL",
    "FPSCR",
];

/// Highest id present on every variant (PC).
const BASE_LAST_ID: u32 = 22;
const EXT_LAST_ID: u32 = 40;

pub const STACK_POINTER: Reg = Reg::Gpr(15);

impl Reg {
    pub fn id(self) -> u32 {
        match self {
            Reg::Gpr(n) => (n & 0xF) as u32,
            Reg::Sr => 16,
            Reg::Gbr => 17,
            Reg::Vbr => 18,
            Reg::Mach => 19,
            Reg::Macl => 20,
            Reg::Pr => 21,
            Reg::Pc => 22,
            Reg::Fr(n) => 23 + (n & 0xF) as u32,
            Reg::Fpul => 39,
            Reg::Fpscr => 40,
        }
    }

    pub fn from_id(id: u32) -> Option<Reg> {
        Some(match id {
            0..=15 => Reg::Gpr(id as u8),
            16 => Reg::Sr,
            17 => Reg::Gbr,
            18 => Reg::Vbr,
            19 => Reg::Mach,
            20 => Reg::Macl,
            21 => Reg::Pr,
            22 => Reg::Pc,
            23..=38 => Reg::Fr((id - 23) as u8),
            39 => Reg::Fpul,
            40 => Reg::Fpscr,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        NAMES[self.id() as usize]
    }

    /// Width in bytes. Every SuperH register is 32 bits.
    pub fn width(self) -> u32 {
        4
    }

    pub fn is_fpu(self) -> bool {
        matches!(self, Reg::Fr(_) | Reg::Fpul | Reg::Fpscr)
    }
}

impl std::fmt::Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Registers exposed by `variant`, ascending by id.
pub fn registers(variant: IsaVariant) -> Vec<Reg> {
    let last = match variant {
        IsaVariant::Sh2e => EXT_LAST_ID,
        IsaVariant::Sh1 | IsaVariant::Dsp => BASE_LAST_ID,
    };
    (0..=last).filter_map(Reg::from_id).collect()
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CallingConvention {
    pub int_args: &'static [Reg],
    pub float_args: &'static [Reg],
    pub int_return: Reg,
    pub float_return: Reg,
    pub callee_saved: &'static [Reg],
    pub caller_saved: &'static [Reg],
}

pub const CALLING_CONVENTION: CallingConvention = CallingConvention {
    int_args: &[Reg::Gpr(4), Reg::Gpr(5), Reg::Gpr(6), Reg::Gpr(7)],
    float_args: &[
        Reg::Fr(4),
        Reg::Fr(5),
        Reg::Fr(6),
        Reg::Fr(7),
        Reg::Fr(8),
        Reg::Fr(9),
        Reg::Fr(10),
        Reg::Fr(11),
    ],
    int_return: Reg::Gpr(0),
    float_return: Reg::Fr(0),
    callee_saved: &[
        Reg::Gpr(8),
        Reg::Gpr(9),
        Reg::Gpr(10),
        Reg::Gpr(11),
        Reg::Gpr(12),
        Reg::Gpr(13),
        Reg::Gpr(14),
        Reg::Gpr(15),
        Reg::Mach,
        Reg::Macl,
        Reg::Pr,
        Reg::Fr(12),
        Reg::Fr(13),
        Reg::Fr(14),
        Reg::Fr(15),
    ],
    caller_saved: &[
        Reg::Gpr(0),
        Reg::Gpr(1),
        Reg::Gpr(2),
        Reg::Gpr(3),
        Reg::Gpr(4),
        Reg::Gpr(5),
        Reg::Gpr(6),
        Reg::Gpr(7),
        Reg::Fr(0),
        Reg::Fr(1),
        Reg::Fr(2),
        Reg::Fr(3),
        Reg::Fr(4),
        Reg::Fr(5),
        Reg::Fr(6),
        Reg::Fr(7),
        Reg::Fr(8),
        Reg::Fr(9),
        Reg::Fr(10),
        Reg::Fr(11),
        Reg::Fpul,
        Reg::Fpscr,
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_and_name() {
        for id in 0..=EXT_LAST_ID {
            let r = Reg::from_id(id).unwrap();
            assert_eq!(r.id(), id);
            assert_eq!(r.width(), 4);
        }
        assert!(Reg::from_id(41).is_none());
        assert_eq!(Reg::Fr(15).name(), "FR15");
        assert_eq!(Reg::Fpscr.name(), "FPSCR");
        assert_eq!(STACK_POINTER.name(), "R15");
    }

    #[test]
    fn variant_register_sets() {
        assert_eq!(registers(IsaVariant::Sh1).len(), 23);
        assert_eq!(registers(IsaVariant::Sh2e).len(), 41);
        assert!(!registers(IsaVariant::Sh1).iter().any(|r| r.is_fpu()));
    }
}
