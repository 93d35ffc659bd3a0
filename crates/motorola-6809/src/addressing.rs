//! Operand resolution for the six addressing modes.

use emu_core::Bus;

use crate::cpu::Mc6809;
use crate::error::{Error, OperandKind};
use crate::opcodes::{AddressingMode, Width};
use crate::registers::Reg16;

/// Where an instruction's operand lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    /// Immediate data or a branch displacement.
    Value(u16),
    /// Effective address. The operation reads or writes it as needed.
    Address(u16),
}

impl Operand {
    /// The effective address (immediate data is returned as-is).
    ///
    /// Only inherent instructions resolve to `None`, and none of them use
    /// an operand.
    #[must_use]
    pub fn address(self) -> u16 {
        match self {
            Self::Address(ea) | Self::Value(ea) => ea,
            Self::None => unreachable!("inherent instruction has no operand"),
        }
    }
}

/// Result of resolving one instruction's operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,
    /// Bytes consumed after the opcode, postbyte included.
    pub bytes: u8,
}

/// Indexed sub-modes selected by the postbyte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMode {
    /// 5-bit signed constant offset, encoded in the postbyte itself.
    Offset5(i8),
    /// `,R+`
    PostInc1,
    /// `,R++`
    PostInc2,
    /// `,-R`
    PreDec1,
    /// `,--R`
    PreDec2,
    /// `,R`
    NoOffset,
    /// `B,R`
    AccB,
    /// `A,R`
    AccA,
    /// `n8,R`
    Offset8,
    /// `n16,R`
    Offset16,
    /// `D,R`
    AccD,
    /// `n8,PCR`
    Pc8,
    /// `n16,PCR`
    Pc16,
    /// `[n16]`
    ExtendedIndirect,
}

/// Decoded indexed-addressing postbyte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedPostbyte {
    pub mode: IndexMode,
    pub register: Reg16,
    pub indirect: bool,
}

impl IndexedPostbyte {
    /// Decode a postbyte. Returns `None` for the undefined encodings.
    #[must_use]
    pub const fn decode(postbyte: u8) -> Option<Self> {
        let register = match (postbyte >> 5) & 0x03 {
            0 => Reg16::X,
            1 => Reg16::Y,
            2 => Reg16::U,
            _ => Reg16::S,
        };

        if postbyte & 0x80 == 0 {
            let offset = ((postbyte << 3) as i8) >> 3;
            return Some(Self {
                mode: IndexMode::Offset5(offset),
                register,
                indirect: false,
            });
        }

        let indirect = postbyte & 0x10 != 0;
        let mode = match postbyte & 0x0F {
            0x0 if !indirect => IndexMode::PostInc1,
            0x1 => IndexMode::PostInc2,
            0x2 if !indirect => IndexMode::PreDec1,
            0x3 => IndexMode::PreDec2,
            0x4 => IndexMode::NoOffset,
            0x5 => IndexMode::AccB,
            0x6 => IndexMode::AccA,
            0x8 => IndexMode::Offset8,
            0x9 => IndexMode::Offset16,
            0xB => IndexMode::AccD,
            0xC => IndexMode::Pc8,
            0xD => IndexMode::Pc16,
            0xF if indirect => IndexMode::ExtendedIndirect,
            _ => return None,
        };
        Some(Self {
            mode,
            register,
            indirect,
        })
    }

    /// Offset or address bytes that follow the postbyte.
    #[must_use]
    pub const fn extra_bytes(&self) -> u8 {
        match self.mode {
            IndexMode::Offset8 | IndexMode::Pc8 => 1,
            IndexMode::Offset16 | IndexMode::Pc16 | IndexMode::ExtendedIndirect => 2,
            _ => 0,
        }
    }
}

impl Mc6809 {
    pub(crate) fn fetch_byte<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let hi = self.fetch_byte(bus);
        let lo = self.fetch_byte(bus);
        u16::from_be_bytes([hi, lo])
    }

    /// Resolve the operand for `mode`, leaving PC past the operand bytes.
    pub(crate) fn resolve<B: Bus>(
        &mut self,
        bus: &mut B,
        mode: AddressingMode,
        width: Width,
    ) -> Result<Resolved, Error> {
        let (operand, bytes) = match mode {
            AddressingMode::Inherent => (Operand::None, 0),
            AddressingMode::Immediate | AddressingMode::Relative => match width {
                Width::Byte => (Operand::Value(u16::from(self.fetch_byte(bus))), 1),
                Width::Word => (Operand::Value(self.fetch_word(bus)), 2),
            },
            AddressingMode::Direct => {
                let lo = self.fetch_byte(bus);
                (Operand::Address(u16::from_be_bytes([self.regs.dp, lo])), 1)
            }
            AddressingMode::Extended => (Operand::Address(self.fetch_word(bus)), 2),
            AddressingMode::Indexed => {
                let (ea, bytes) = self.indexed(bus)?;
                (Operand::Address(ea), bytes)
            }
        };
        Ok(Resolved { operand, bytes })
    }

    /// Decode an indexed postbyte and compute the effective address.
    ///
    /// Post-increment hands back the register value from before the update;
    /// pre-decrement updates first. Nothing changes for an undefined postbyte.
    fn indexed<B: Bus>(&mut self, bus: &mut B) -> Result<(u16, u8), Error> {
        let postbyte = self.fetch_byte(bus);
        let Some(decoded) = IndexedPostbyte::decode(postbyte) else {
            return Err(Error::MalformedOperand {
                kind: OperandKind::Indexed,
                postbyte,
                pc: self.instruction_pc,
            });
        };

        let reg = decoded.register;
        let base = self.regs.get16(reg);
        let mut ea = match decoded.mode {
            IndexMode::Offset5(offset) => base.wrapping_add_signed(i16::from(offset)),
            IndexMode::PostInc1 => {
                self.regs.set16(reg, base.wrapping_add(1));
                base
            }
            IndexMode::PostInc2 => {
                self.regs.set16(reg, base.wrapping_add(2));
                base
            }
            IndexMode::PreDec1 => {
                let ea = base.wrapping_sub(1);
                self.regs.set16(reg, ea);
                ea
            }
            IndexMode::PreDec2 => {
                let ea = base.wrapping_sub(2);
                self.regs.set16(reg, ea);
                ea
            }
            IndexMode::NoOffset => base,
            IndexMode::AccB => base.wrapping_add_signed(i16::from(self.regs.b as i8)),
            IndexMode::AccA => base.wrapping_add_signed(i16::from(self.regs.a as i8)),
            IndexMode::Offset8 => {
                let offset = self.fetch_byte(bus) as i8;
                base.wrapping_add_signed(i16::from(offset))
            }
            IndexMode::Offset16 => base.wrapping_add(self.fetch_word(bus)),
            IndexMode::AccD => base.wrapping_add(self.regs.d()),
            IndexMode::Pc8 => {
                let offset = self.fetch_byte(bus) as i8;
                self.regs.pc.wrapping_add_signed(i16::from(offset))
            }
            IndexMode::Pc16 => {
                let offset = self.fetch_word(bus);
                self.regs.pc.wrapping_add(offset)
            }
            IndexMode::ExtendedIndirect => self.fetch_word(bus),
        };

        if decoded.indirect {
            ea = bus.read_word(ea);
        }
        Ok((ea, 1 + decoded.extra_bytes()))
    }
}
