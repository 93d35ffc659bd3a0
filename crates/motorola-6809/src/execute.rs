//! Operation bodies, one handler per operation shape.
//!
//! Each handler returns the ticks it adds on top of the descriptor's base
//! count.

use emu_core::Bus;

use crate::addressing::Operand;
use crate::alu::{self, AluResult};
use crate::cpu::{Mc6809, WaitState};
use crate::error::{Error, OperandKind};
use crate::flags::{C, E, F, I, Z};
use crate::interrupts::vectors;
use crate::opcodes::{
    BranchKind, ByteOp, Condition, ControlOp, Instruction, Operation, StackOp, Target, UnaryOp,
    Width, WordOp,
};
use crate::registers::{Reg16, Reg8, Register};

/// Extra tick for a taken conditional long branch.
const LONG_BRANCH_TAKEN_TICKS: u32 = 1;

/// Extra ticks for RTI when the entire state is pulled.
const RTI_ENTIRE_TICKS: u32 = 9;

impl Mc6809 {
    pub(crate) fn run<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
        operand: Operand,
    ) -> Result<u32, Error> {
        match instruction.operation {
            Operation::ByteAlu(op, target) => {
                self.byte_alu(bus, op, target, operand);
                Ok(0)
            }
            Operation::ByteReg(op, reg) => {
                self.byte_reg(bus, op, reg, operand);
                Ok(0)
            }
            Operation::WordReg(op, reg) => {
                self.word_reg(bus, op, reg, operand);
                Ok(0)
            }
            Operation::Branch(condition, kind) => {
                Ok(self.branch(bus, condition, kind, instruction.width, operand))
            }
            Operation::Stack(op, stack) => {
                let mask = operand.address() as u8;
                Ok(match op {
                    StackOp::Push => self.push_registers(bus, stack, mask),
                    StackOp::Pull => self.pull_registers(bus, stack, mask),
                })
            }
            Operation::Control(op) => self.control(bus, op, operand),
        }
    }

    fn set_cc(&mut self, cc: u8) {
        self.regs.cc.0 = cc;
    }

    fn byte_alu<B: Bus>(&mut self, bus: &mut B, op: UnaryOp, target: Target, operand: Operand) {
        let cc = self.regs.cc.0;
        match target {
            Target::A => {
                let AluResult { value, cc } = alu::unary(op, cc, self.regs.a);
                self.regs.a = value;
                self.set_cc(cc);
            }
            Target::B => {
                let AluResult { value, cc } = alu::unary(op, cc, self.regs.b);
                self.regs.b = value;
                self.set_cc(cc);
            }
            Target::Memory => {
                let ea = operand.address();
                let AluResult { value, cc } = alu::unary(op, cc, bus.read(ea));
                if op != UnaryOp::Tst {
                    bus.write(ea, value);
                }
                self.set_cc(cc);
            }
        }
    }

    fn read_byte_operand<B: Bus>(bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Address(ea) => bus.read(ea),
            Operand::Value(value) => value as u8,
            Operand::None => unreachable!("inherent instruction has no operand"),
        }
    }

    fn read_word_operand<B: Bus>(bus: &mut B, operand: Operand) -> u16 {
        match operand {
            Operand::Address(ea) => bus.read_word(ea),
            Operand::Value(value) => value,
            Operand::None => unreachable!("inherent instruction has no operand"),
        }
    }

    fn byte_reg<B: Bus>(&mut self, bus: &mut B, op: ByteOp, reg: Reg8, operand: Operand) {
        let cc = self.regs.cc.0;
        let r = self.regs.get8(reg);

        if reg == Reg8::Cc {
            let m = Self::read_byte_operand(bus, operand);
            match op {
                ByteOp::And => self.set_cc(cc & m),
                ByteOp::Or => self.set_cc(cc | m),
                _ => {}
            }
            return;
        }

        let carry = cc & C != 0;
        let result = match op {
            ByteOp::St => {
                bus.write(operand.address(), r);
                self.set_cc(alu::tst(cc, r).cc);
                return;
            }
            ByteOp::Daa => alu::daa(cc, r),
            ByteOp::Ld => alu::tst(cc, Self::read_byte_operand(bus, operand)),
            ByteOp::And => alu::tst(cc, r & Self::read_byte_operand(bus, operand)),
            ByteOp::Or => alu::tst(cc, r | Self::read_byte_operand(bus, operand)),
            ByteOp::Eor => alu::tst(cc, r ^ Self::read_byte_operand(bus, operand)),
            ByteOp::Add => alu::add8(cc, r, Self::read_byte_operand(bus, operand), false),
            ByteOp::Adc => alu::add8(cc, r, Self::read_byte_operand(bus, operand), carry),
            ByteOp::Sub | ByteOp::Cmp => {
                alu::sub8(cc, r, Self::read_byte_operand(bus, operand), false)
            }
            ByteOp::Sbc => alu::sub8(cc, r, Self::read_byte_operand(bus, operand), carry),
            ByteOp::Bit => {
                let m = Self::read_byte_operand(bus, operand);
                self.set_cc(alu::tst(cc, r & m).cc);
                return;
            }
        };

        if op != ByteOp::Cmp {
            self.regs.set8(reg, result.value);
        }
        self.set_cc(result.cc);
    }

    fn word_reg<B: Bus>(&mut self, bus: &mut B, op: WordOp, reg: Reg16, operand: Operand) {
        let cc = self.regs.cc.0;
        let r = self.regs.get16(reg);
        match op {
            WordOp::Ld => {
                let result = alu::tst16(cc, Self::read_word_operand(bus, operand));
                self.regs.set16(reg, result.value);
                self.set_cc(result.cc);
            }
            WordOp::St => {
                bus.write_word(operand.address(), r);
                self.set_cc(alu::tst16(cc, r).cc);
            }
            WordOp::Add => {
                let result = alu::add16(cc, r, Self::read_word_operand(bus, operand));
                self.regs.set16(reg, result.value);
                self.set_cc(result.cc);
            }
            WordOp::Sub => {
                let result = alu::sub16(cc, r, Self::read_word_operand(bus, operand));
                self.regs.set16(reg, result.value);
                self.set_cc(result.cc);
            }
            WordOp::Cmp => {
                let result = alu::sub16(cc, r, Self::read_word_operand(bus, operand));
                self.set_cc(result.cc);
            }
            WordOp::Lea => {
                let ea = operand.address();
                self.regs.set16(reg, ea);
                if matches!(reg, Reg16::X | Reg16::Y) {
                    self.regs.cc.set_if(Z, ea == 0);
                }
            }
        }
    }

    fn branch<B: Bus>(
        &mut self,
        bus: &mut B,
        condition: Condition,
        kind: BranchKind,
        width: Width,
        operand: Operand,
    ) -> u32 {
        let displacement = match (width, operand) {
            (Width::Byte, Operand::Value(v)) => i16::from(v as u8 as i8),
            (Width::Word, Operand::Value(v)) => v as i16,
            _ => 0,
        };
        let target = self.regs.pc.wrapping_add_signed(displacement);

        if kind == BranchKind::Subroutine {
            self.push_word(bus, Reg16::S, self.regs.pc);
            self.regs.pc = target;
            return 0;
        }

        if !condition.holds(self.regs.cc) {
            return 0;
        }
        self.regs.pc = target;
        if width == Width::Word && condition != Condition::Always {
            LONG_BRANCH_TAKEN_TICKS
        } else {
            0
        }
    }

    fn control<B: Bus>(
        &mut self,
        bus: &mut B,
        op: ControlOp,
        operand: Operand,
    ) -> Result<u32, Error> {
        match op {
            ControlOp::Nop => {}
            ControlOp::Sync => self.wait = WaitState::Sync,
            ControlOp::Jmp => self.regs.pc = operand.address(),
            ControlOp::Jsr => {
                self.push_word(bus, Reg16::S, self.regs.pc);
                self.regs.pc = operand.address();
            }
            ControlOp::Rts => self.regs.pc = self.pull_word(bus, Reg16::S),
            ControlOp::Rti => {
                let cc = self.pull_byte(bus, Reg16::S);
                self.set_cc(cc);
                if cc & E != 0 {
                    // A, B, DP, X, Y, U then PC
                    self.pull_registers(bus, Reg16::S, 0xFE);
                    return Ok(RTI_ENTIRE_TICKS);
                }
                self.regs.pc = self.pull_word(bus, Reg16::S);
            }
            ControlOp::Swi => self.software_interrupt(bus, vectors::SWI, true),
            ControlOp::Swi2 => self.software_interrupt(bus, vectors::SWI2, false),
            ControlOp::Swi3 => self.software_interrupt(bus, vectors::SWI3, false),
            ControlOp::Cwai => {
                let mask = operand.address() as u8;
                self.regs.cc.0 &= mask;
                self.regs.cc.set(E);
                self.push_registers(bus, Reg16::S, 0xFF);
                self.wait = WaitState::Cwai;
            }
            ControlOp::Exg | ControlOp::Tfr => {
                let postbyte = operand.address() as u8;
                let Some((src, dst)) = Register::pair(postbyte) else {
                    return Err(Error::MalformedOperand {
                        kind: OperandKind::RegisterPair,
                        postbyte,
                        pc: self.instruction_pc,
                    });
                };
                if src != dst {
                    let value = self.regs.get(src);
                    if op == ControlOp::Exg {
                        let other = self.regs.get(dst);
                        self.regs.set(src, other);
                    }
                    self.regs.set(dst, value);
                }
            }
            ControlOp::Abx => self.regs.x = self.regs.x.wrapping_add(u16::from(self.regs.b)),
            ControlOp::Mul => {
                let result = alu::mul(self.regs.cc.0, self.regs.a, self.regs.b);
                self.regs.set_d(result.value);
                self.set_cc(result.cc);
            }
            ControlOp::Sex => {
                let result = alu::sex(self.regs.cc.0, self.regs.b);
                self.regs.set_d(result.value);
                self.set_cc(result.cc);
            }
        }
        Ok(0)
    }

    fn software_interrupt<B: Bus>(&mut self, bus: &mut B, vector: u16, set_masks: bool) {
        self.regs.cc.set(E);
        self.push_registers(bus, Reg16::S, 0xFF);
        if set_masks {
            self.regs.cc.set(I | F);
        }
        self.regs.pc = bus.read_word(vector);
    }

    pub(crate) fn push_byte<B: Bus>(&mut self, bus: &mut B, stack: Reg16, value: u8) {
        let sp = self.regs.get16(stack).wrapping_sub(1);
        self.regs.set16(stack, sp);
        bus.write(sp, value);
    }

    /// Low byte pushed first, so the word sits high byte first in memory.
    pub(crate) fn push_word<B: Bus>(&mut self, bus: &mut B, stack: Reg16, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.push_byte(bus, stack, lo);
        self.push_byte(bus, stack, hi);
    }

    pub(crate) fn pull_byte<B: Bus>(&mut self, bus: &mut B, stack: Reg16) -> u8 {
        let sp = self.regs.get16(stack);
        self.regs.set16(stack, sp.wrapping_add(1));
        bus.read(sp)
    }

    pub(crate) fn pull_word<B: Bus>(&mut self, bus: &mut B, stack: Reg16) -> u16 {
        let hi = self.pull_byte(bus, stack);
        let lo = self.pull_byte(bus, stack);
        u16::from_be_bytes([hi, lo])
    }

    /// Push the registers selected by a PSH postbyte. Returns bytes pushed.
    ///
    /// Bit 6 names the other stack pointer: U when pushing on S, S when
    /// pushing on U.
    pub(crate) fn push_registers<B: Bus>(&mut self, bus: &mut B, stack: Reg16, mask: u8) -> u32 {
        let other = if stack == Reg16::S { Reg16::U } else { Reg16::S };
        let mut bytes = 0;
        if mask & 0x80 != 0 {
            self.push_word(bus, stack, self.regs.pc);
            bytes += 2;
        }
        if mask & 0x40 != 0 {
            self.push_word(bus, stack, self.regs.get16(other));
            bytes += 2;
        }
        if mask & 0x20 != 0 {
            self.push_word(bus, stack, self.regs.y);
            bytes += 2;
        }
        if mask & 0x10 != 0 {
            self.push_word(bus, stack, self.regs.x);
            bytes += 2;
        }
        if mask & 0x08 != 0 {
            self.push_byte(bus, stack, self.regs.dp);
            bytes += 1;
        }
        if mask & 0x04 != 0 {
            self.push_byte(bus, stack, self.regs.b);
            bytes += 1;
        }
        if mask & 0x02 != 0 {
            self.push_byte(bus, stack, self.regs.a);
            bytes += 1;
        }
        if mask & 0x01 != 0 {
            self.push_byte(bus, stack, self.regs.cc.0);
            bytes += 1;
        }
        bytes
    }

    /// Pull the registers selected by a PUL postbyte. Returns bytes pulled.
    pub(crate) fn pull_registers<B: Bus>(&mut self, bus: &mut B, stack: Reg16, mask: u8) -> u32 {
        let other = if stack == Reg16::S { Reg16::U } else { Reg16::S };
        let mut bytes = 0;
        if mask & 0x01 != 0 {
            self.regs.cc.0 = self.pull_byte(bus, stack);
            bytes += 1;
        }
        if mask & 0x02 != 0 {
            self.regs.a = self.pull_byte(bus, stack);
            bytes += 1;
        }
        if mask & 0x04 != 0 {
            self.regs.b = self.pull_byte(bus, stack);
            bytes += 1;
        }
        if mask & 0x08 != 0 {
            self.regs.dp = self.pull_byte(bus, stack);
            bytes += 1;
        }
        if mask & 0x10 != 0 {
            self.regs.x = self.pull_word(bus, stack);
            bytes += 2;
        }
        if mask & 0x20 != 0 {
            self.regs.y = self.pull_word(bus, stack);
            bytes += 2;
        }
        if mask & 0x40 != 0 {
            let value = self.pull_word(bus, stack);
            self.regs.set16(other, value);
            bytes += 2;
        }
        if mask & 0x80 != 0 {
            self.regs.pc = self.pull_word(bus, stack);
            bytes += 2;
        }
        bytes
    }
}
