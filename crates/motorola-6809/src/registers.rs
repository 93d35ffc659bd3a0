//! 6809 register file.

use crate::flags::{ConditionCodes, F, I};

/// 8-bit registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg8 {
    /// Accumulator A, high half of D.
    A,
    /// Accumulator B, low half of D.
    B,
    /// Condition codes.
    Cc,
    /// Direct page: high byte of direct-mode addresses.
    Dp,
}

/// 16-bit registers. `D` is the A:B pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg16 {
    /// A:B accumulator pair.
    D,
    /// Index register X.
    X,
    /// Index register Y.
    Y,
    /// User stack pointer.
    U,
    /// Hardware stack pointer, used by interrupts and subroutine calls.
    S,
    /// Program counter.
    Pc,
}

/// A register named by an EXG/TFR postbyte nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Nibbles 0-5.
    Word(Reg16),
    /// Nibbles 8-B.
    Byte(Reg8),
}

impl Register {
    /// Decode one nibble of an EXG/TFR postbyte.
    #[must_use]
    pub const fn from_nibble(nibble: u8) -> Option<Self> {
        Some(match nibble & 0x0F {
            0x0 => Self::Word(Reg16::D),
            0x1 => Self::Word(Reg16::X),
            0x2 => Self::Word(Reg16::Y),
            0x3 => Self::Word(Reg16::U),
            0x4 => Self::Word(Reg16::S),
            0x5 => Self::Word(Reg16::Pc),
            0x8 => Self::Byte(Reg8::A),
            0x9 => Self::Byte(Reg8::B),
            0xA => Self::Byte(Reg8::Cc),
            0xB => Self::Byte(Reg8::Dp),
            _ => return None,
        })
    }

    /// Decode an EXG/TFR postbyte into (source, destination).
    ///
    /// Returns `None` for undefined nibbles or a byte/word mix.
    #[must_use]
    pub const fn pair(postbyte: u8) -> Option<(Self, Self)> {
        let (Some(src), Some(dst)) = (Self::from_nibble(postbyte >> 4), Self::from_nibble(postbyte))
        else {
            return None;
        };
        match (src, dst) {
            (Self::Word(_), Self::Word(_)) | (Self::Byte(_), Self::Byte(_)) => Some((src, dst)),
            _ => None,
        }
    }
}

/// Programmer-visible registers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub dp: u8,
    pub x: u16,
    pub y: u16,
    /// User stack pointer.
    pub u: u16,
    /// Hardware stack pointer.
    pub s: u16,
    pub pc: u16,
    pub cc: ConditionCodes,
}

impl Registers {
    /// Power-on state: both interrupt masks set, everything else zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cc: ConditionCodes(I | F),
            ..Self::default()
        }
    }

    /// The D accumulator (A high, B low).
    #[must_use]
    pub fn d(&self) -> u16 {
        u16::from_be_bytes([self.a, self.b])
    }

    pub fn set_d(&mut self, value: u16) {
        [self.a, self.b] = value.to_be_bytes();
    }

    /// Read an 8-bit register.
    #[must_use]
    pub fn get8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.a,
            Reg8::B => self.b,
            Reg8::Cc => self.cc.0,
            Reg8::Dp => self.dp,
        }
    }

    /// Write an 8-bit register.
    pub fn set8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::A => self.a = value,
            Reg8::B => self.b = value,
            Reg8::Cc => self.cc.0 = value,
            Reg8::Dp => self.dp = value,
        }
    }

    /// Read a 16-bit register. `D` is assembled from A and B.
    #[must_use]
    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::D => self.d(),
            Reg16::X => self.x,
            Reg16::Y => self.y,
            Reg16::U => self.u,
            Reg16::S => self.s,
            Reg16::Pc => self.pc,
        }
    }

    /// Write a 16-bit register. Writing `D` splits into A and B.
    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::D => self.set_d(value),
            Reg16::X => self.x = value,
            Reg16::Y => self.y = value,
            Reg16::U => self.u = value,
            Reg16::S => self.s = value,
            Reg16::Pc => self.pc = value,
        }
    }

    #[must_use]
    pub fn get(&self, reg: Register) -> u16 {
        match reg {
            Register::Word(r) => self.get16(r),
            Register::Byte(r) => u16::from(self.get8(r)),
        }
    }

    pub fn set(&mut self, reg: Register, value: u16) {
        match reg {
            Register::Word(r) => self.set16(r, value),
            Register::Byte(r) => self.set8(r, value as u8),
        }
    }
}
