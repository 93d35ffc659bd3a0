//! Instruction descriptor table.
//!
//! `INSTRUCTIONS` lists every documented opcode once. The three 256-entry
//! page tables (unprefixed, 0x10 and 0x11) are filled from it at compile
//! time.

use std::fmt;

use crate::flags::{ConditionCodes, C, N, V, Z};
use crate::registers::{Reg16, Reg8};

/// How an instruction finds its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Inherent,
    Immediate,
    Direct,
    Indexed,
    Extended,
    Relative,
}

impl AddressingMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inherent => "inherent",
            Self::Immediate => "immediate",
            Self::Direct => "direct",
            Self::Indexed => "indexed",
            Self::Extended => "extended",
            Self::Relative => "relative",
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operand width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
}

/// Read-modify-write byte operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Com,
    Lsr,
    Ror,
    Asr,
    Asl,
    Rol,
    Dec,
    Inc,
    Tst,
    Clr,
}

/// Where a unary operation reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Accumulator A (NEGA, COMA, ...).
    A,
    /// Accumulator B (NEGB, COMB, ...).
    B,
    /// Read-modify-write at the effective address.
    Memory,
}

/// Byte operations against an 8-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOp {
    /// LDx: register = M.
    Ld,
    /// STx: M = register.
    St,
    /// ANDx, and ANDCC when the register is CC.
    And,
    /// ORx, and ORCC when the register is CC.
    Or,
    /// EORx.
    Eor,
    /// ADDx.
    Add,
    /// ADCx: add with carry in.
    Adc,
    /// SUBx.
    Sub,
    /// SBCx: subtract with borrow in.
    Sbc,
    /// CMPx: subtract for flags only.
    Cmp,
    /// BITx: AND for flags only.
    Bit,
    /// DAA: decimal adjust A, no operand.
    Daa,
}

/// Word operations against a 16-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOp {
    /// LDD, LDX, LDY, LDU, LDS.
    Ld,
    /// STD, STX, STY, STU, STS.
    St,
    /// ADDD.
    Add,
    /// SUBD.
    Sub,
    /// CMPD, CMPX, CMPY, CMPU, CMPS.
    Cmp,
    /// LEAX, LEAY, LEAU, LEAS: register = effective address.
    Lea,
}

/// Branch predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    Never,
    Hi,
    Ls,
    CarryClear,
    CarrySet,
    Ne,
    Eq,
    OverflowClear,
    OverflowSet,
    Pl,
    Mi,
    Ge,
    Lt,
    Gt,
    Le,
}

impl Condition {
    /// Evaluate against the current flags.
    #[must_use]
    pub const fn holds(self, cc: ConditionCodes) -> bool {
        let c = cc.is_set(C);
        let v = cc.is_set(V);
        let z = cc.is_set(Z);
        let n = cc.is_set(N);
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Hi => !(c || z),
            Self::Ls => c || z,
            Self::CarryClear => !c,
            Self::CarrySet => c,
            Self::Ne => !z,
            Self::Eq => z,
            Self::OverflowClear => !v,
            Self::OverflowSet => v,
            Self::Pl => !n,
            Self::Mi => n,
            Self::Ge => n == v,
            Self::Lt => n != v,
            Self::Gt => !z && n == v,
            Self::Le => z || n != v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Jump,
    Subroutine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    Push,
    Pull,
}

/// Control flow and the remaining inherent register operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOp {
    Nop,
    Sync,
    Jmp,
    Jsr,
    Rts,
    Rti,
    Swi,
    Swi2,
    Swi3,
    Cwai,
    Exg,
    Tfr,
    Abx,
    Mul,
    Sex,
}

/// What an instruction does, one variant per operation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ByteAlu(UnaryOp, Target),
    ByteReg(ByteOp, Reg8),
    WordReg(WordOp, Reg16),
    Branch(Condition, BranchKind),
    /// Push or pull on the S or U stack.
    Stack(StackOp, Reg16),
    Control(ControlOp),
}

/// Immutable description of one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Opcode; values above 0xFF carry the 0x10/0x11 prefix in the high byte.
    pub opcode: u16,
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    pub width: Width,
    /// Base tick count, before indexed and operation surcharges.
    pub ticks: u8,
    pub operation: Operation,
}

const fn ins(
    opcode: u16,
    mnemonic: &'static str,
    mode: AddressingMode,
    width: Width,
    ticks: u8,
    operation: Operation,
) -> Instruction {
    Instruction {
        opcode,
        mnemonic,
        mode,
        width,
        ticks,
        operation,
    }
}

use self::AddressingMode::{
    Direct as DIR, Extended as EXT, Immediate as IMM, Indexed as IDX, Inherent as INH,
    Relative as REL,
};
use self::BranchKind::{Jump, Subroutine};
use self::Operation::{Branch, ByteAlu, ByteReg, Control, Stack, WordReg};
use self::Width::{Byte as B8, Word as W16};

/// Every documented opcode.
pub const INSTRUCTIONS: &[Instruction] = &[
    // Memory read-modify-write: direct
    ins(0x00, "NEG", DIR, B8, 6, ByteAlu(UnaryOp::Neg, Target::Memory)),
    ins(0x03, "COM", DIR, B8, 6, ByteAlu(UnaryOp::Com, Target::Memory)),
    ins(0x04, "LSR", DIR, B8, 6, ByteAlu(UnaryOp::Lsr, Target::Memory)),
    ins(0x06, "ROR", DIR, B8, 6, ByteAlu(UnaryOp::Ror, Target::Memory)),
    ins(0x07, "ASR", DIR, B8, 6, ByteAlu(UnaryOp::Asr, Target::Memory)),
    ins(0x08, "ASL", DIR, B8, 6, ByteAlu(UnaryOp::Asl, Target::Memory)),
    ins(0x09, "ROL", DIR, B8, 6, ByteAlu(UnaryOp::Rol, Target::Memory)),
    ins(0x0A, "DEC", DIR, B8, 6, ByteAlu(UnaryOp::Dec, Target::Memory)),
    ins(0x0C, "INC", DIR, B8, 6, ByteAlu(UnaryOp::Inc, Target::Memory)),
    ins(0x0D, "TST", DIR, B8, 6, ByteAlu(UnaryOp::Tst, Target::Memory)),
    ins(0x0E, "JMP", DIR, W16, 3, Control(ControlOp::Jmp)),
    ins(0x0F, "CLR", DIR, B8, 6, ByteAlu(UnaryOp::Clr, Target::Memory)),
    // Miscellaneous
    ins(0x12, "NOP", INH, B8, 2, Control(ControlOp::Nop)),
    ins(0x13, "SYNC", INH, B8, 4, Control(ControlOp::Sync)),
    ins(0x16, "LBRA", REL, W16, 5, Branch(Condition::Always, Jump)),
    ins(0x17, "LBSR", REL, W16, 9, Branch(Condition::Always, Subroutine)),
    ins(0x19, "DAA", INH, B8, 2, ByteReg(ByteOp::Daa, Reg8::A)),
    ins(0x1A, "ORCC", IMM, B8, 3, ByteReg(ByteOp::Or, Reg8::Cc)),
    ins(0x1C, "ANDCC", IMM, B8, 3, ByteReg(ByteOp::And, Reg8::Cc)),
    ins(0x1D, "SEX", INH, B8, 2, Control(ControlOp::Sex)),
    ins(0x1E, "EXG", IMM, B8, 8, Control(ControlOp::Exg)),
    ins(0x1F, "TFR", IMM, B8, 6, Control(ControlOp::Tfr)),
    // Short branches
    ins(0x20, "BRA", REL, B8, 3, Branch(Condition::Always, Jump)),
    ins(0x21, "BRN", REL, B8, 3, Branch(Condition::Never, Jump)),
    ins(0x22, "BHI", REL, B8, 3, Branch(Condition::Hi, Jump)),
    ins(0x23, "BLS", REL, B8, 3, Branch(Condition::Ls, Jump)),
    ins(0x24, "BCC", REL, B8, 3, Branch(Condition::CarryClear, Jump)),
    ins(0x25, "BCS", REL, B8, 3, Branch(Condition::CarrySet, Jump)),
    ins(0x26, "BNE", REL, B8, 3, Branch(Condition::Ne, Jump)),
    ins(0x27, "BEQ", REL, B8, 3, Branch(Condition::Eq, Jump)),
    ins(0x28, "BVC", REL, B8, 3, Branch(Condition::OverflowClear, Jump)),
    ins(0x29, "BVS", REL, B8, 3, Branch(Condition::OverflowSet, Jump)),
    ins(0x2A, "BPL", REL, B8, 3, Branch(Condition::Pl, Jump)),
    ins(0x2B, "BMI", REL, B8, 3, Branch(Condition::Mi, Jump)),
    ins(0x2C, "BGE", REL, B8, 3, Branch(Condition::Ge, Jump)),
    ins(0x2D, "BLT", REL, B8, 3, Branch(Condition::Lt, Jump)),
    ins(0x2E, "BGT", REL, B8, 3, Branch(Condition::Gt, Jump)),
    ins(0x2F, "BLE", REL, B8, 3, Branch(Condition::Le, Jump)),
    // LEA, stacks, returns
    ins(0x30, "LEAX", IDX, W16, 4, WordReg(WordOp::Lea, Reg16::X)),
    ins(0x31, "LEAY", IDX, W16, 4, WordReg(WordOp::Lea, Reg16::Y)),
    ins(0x32, "LEAS", IDX, W16, 4, WordReg(WordOp::Lea, Reg16::S)),
    ins(0x33, "LEAU", IDX, W16, 4, WordReg(WordOp::Lea, Reg16::U)),
    ins(0x34, "PSHS", IMM, B8, 5, Stack(StackOp::Push, Reg16::S)),
    ins(0x35, "PULS", IMM, B8, 5, Stack(StackOp::Pull, Reg16::S)),
    ins(0x36, "PSHU", IMM, B8, 5, Stack(StackOp::Push, Reg16::U)),
    ins(0x37, "PULU", IMM, B8, 5, Stack(StackOp::Pull, Reg16::U)),
    ins(0x39, "RTS", INH, B8, 5, Control(ControlOp::Rts)),
    ins(0x3A, "ABX", INH, B8, 3, Control(ControlOp::Abx)),
    ins(0x3B, "RTI", INH, B8, 6, Control(ControlOp::Rti)),
    ins(0x3C, "CWAI", IMM, B8, 20, Control(ControlOp::Cwai)),
    ins(0x3D, "MUL", INH, B8, 11, Control(ControlOp::Mul)),
    ins(0x3F, "SWI", INH, B8, 19, Control(ControlOp::Swi)),
    // Accumulator A read-modify-write
    ins(0x40, "NEGA", INH, B8, 2, ByteAlu(UnaryOp::Neg, Target::A)),
    ins(0x43, "COMA", INH, B8, 2, ByteAlu(UnaryOp::Com, Target::A)),
    ins(0x44, "LSRA", INH, B8, 2, ByteAlu(UnaryOp::Lsr, Target::A)),
    ins(0x46, "RORA", INH, B8, 2, ByteAlu(UnaryOp::Ror, Target::A)),
    ins(0x47, "ASRA", INH, B8, 2, ByteAlu(UnaryOp::Asr, Target::A)),
    ins(0x48, "ASLA", INH, B8, 2, ByteAlu(UnaryOp::Asl, Target::A)),
    ins(0x49, "ROLA", INH, B8, 2, ByteAlu(UnaryOp::Rol, Target::A)),
    ins(0x4A, "DECA", INH, B8, 2, ByteAlu(UnaryOp::Dec, Target::A)),
    ins(0x4C, "INCA", INH, B8, 2, ByteAlu(UnaryOp::Inc, Target::A)),
    ins(0x4D, "TSTA", INH, B8, 2, ByteAlu(UnaryOp::Tst, Target::A)),
    ins(0x4F, "CLRA", INH, B8, 2, ByteAlu(UnaryOp::Clr, Target::A)),
    // Accumulator B read-modify-write
    ins(0x50, "NEGB", INH, B8, 2, ByteAlu(UnaryOp::Neg, Target::B)),
    ins(0x53, "COMB", INH, B8, 2, ByteAlu(UnaryOp::Com, Target::B)),
    ins(0x54, "LSRB", INH, B8, 2, ByteAlu(UnaryOp::Lsr, Target::B)),
    ins(0x56, "RORB", INH, B8, 2, ByteAlu(UnaryOp::Ror, Target::B)),
    ins(0x57, "ASRB", INH, B8, 2, ByteAlu(UnaryOp::Asr, Target::B)),
    ins(0x58, "ASLB", INH, B8, 2, ByteAlu(UnaryOp::Asl, Target::B)),
    ins(0x59, "ROLB", INH, B8, 2, ByteAlu(UnaryOp::Rol, Target::B)),
    ins(0x5A, "DECB", INH, B8, 2, ByteAlu(UnaryOp::Dec, Target::B)),
    ins(0x5C, "INCB", INH, B8, 2, ByteAlu(UnaryOp::Inc, Target::B)),
    ins(0x5D, "TSTB", INH, B8, 2, ByteAlu(UnaryOp::Tst, Target::B)),
    ins(0x5F, "CLRB", INH, B8, 2, ByteAlu(UnaryOp::Clr, Target::B)),
    // Memory read-modify-write: indexed
    ins(0x60, "NEG", IDX, B8, 6, ByteAlu(UnaryOp::Neg, Target::Memory)),
    ins(0x63, "COM", IDX, B8, 6, ByteAlu(UnaryOp::Com, Target::Memory)),
    ins(0x64, "LSR", IDX, B8, 6, ByteAlu(UnaryOp::Lsr, Target::Memory)),
    ins(0x66, "ROR", IDX, B8, 6, ByteAlu(UnaryOp::Ror, Target::Memory)),
    ins(0x67, "ASR", IDX, B8, 6, ByteAlu(UnaryOp::Asr, Target::Memory)),
    ins(0x68, "ASL", IDX, B8, 6, ByteAlu(UnaryOp::Asl, Target::Memory)),
    ins(0x69, "ROL", IDX, B8, 6, ByteAlu(UnaryOp::Rol, Target::Memory)),
    ins(0x6A, "DEC", IDX, B8, 6, ByteAlu(UnaryOp::Dec, Target::Memory)),
    ins(0x6C, "INC", IDX, B8, 6, ByteAlu(UnaryOp::Inc, Target::Memory)),
    ins(0x6D, "TST", IDX, B8, 6, ByteAlu(UnaryOp::Tst, Target::Memory)),
    ins(0x6E, "JMP", IDX, W16, 3, Control(ControlOp::Jmp)),
    ins(0x6F, "CLR", IDX, B8, 6, ByteAlu(UnaryOp::Clr, Target::Memory)),
    // Memory read-modify-write: extended
    ins(0x70, "NEG", EXT, B8, 7, ByteAlu(UnaryOp::Neg, Target::Memory)),
    ins(0x73, "COM", EXT, B8, 7, ByteAlu(UnaryOp::Com, Target::Memory)),
    ins(0x74, "LSR", EXT, B8, 7, ByteAlu(UnaryOp::Lsr, Target::Memory)),
    ins(0x76, "ROR", EXT, B8, 7, ByteAlu(UnaryOp::Ror, Target::Memory)),
    ins(0x77, "ASR", EXT, B8, 7, ByteAlu(UnaryOp::Asr, Target::Memory)),
    ins(0x78, "ASL", EXT, B8, 7, ByteAlu(UnaryOp::Asl, Target::Memory)),
    ins(0x79, "ROL", EXT, B8, 7, ByteAlu(UnaryOp::Rol, Target::Memory)),
    ins(0x7A, "DEC", EXT, B8, 7, ByteAlu(UnaryOp::Dec, Target::Memory)),
    ins(0x7C, "INC", EXT, B8, 7, ByteAlu(UnaryOp::Inc, Target::Memory)),
    ins(0x7D, "TST", EXT, B8, 7, ByteAlu(UnaryOp::Tst, Target::Memory)),
    ins(0x7E, "JMP", EXT, W16, 4, Control(ControlOp::Jmp)),
    ins(0x7F, "CLR", EXT, B8, 7, ByteAlu(UnaryOp::Clr, Target::Memory)),
    // Accumulator A and X: immediate
    ins(0x80, "SUBA", IMM, B8, 2, ByteReg(ByteOp::Sub, Reg8::A)),
    ins(0x81, "CMPA", IMM, B8, 2, ByteReg(ByteOp::Cmp, Reg8::A)),
    ins(0x82, "SBCA", IMM, B8, 2, ByteReg(ByteOp::Sbc, Reg8::A)),
    ins(0x83, "SUBD", IMM, W16, 4, WordReg(WordOp::Sub, Reg16::D)),
    ins(0x84, "ANDA", IMM, B8, 2, ByteReg(ByteOp::And, Reg8::A)),
    ins(0x85, "BITA", IMM, B8, 2, ByteReg(ByteOp::Bit, Reg8::A)),
    ins(0x86, "LDA", IMM, B8, 2, ByteReg(ByteOp::Ld, Reg8::A)),
    ins(0x88, "EORA", IMM, B8, 2, ByteReg(ByteOp::Eor, Reg8::A)),
    ins(0x89, "ADCA", IMM, B8, 2, ByteReg(ByteOp::Adc, Reg8::A)),
    ins(0x8A, "ORA", IMM, B8, 2, ByteReg(ByteOp::Or, Reg8::A)),
    ins(0x8B, "ADDA", IMM, B8, 2, ByteReg(ByteOp::Add, Reg8::A)),
    ins(0x8C, "CMPX", IMM, W16, 4, WordReg(WordOp::Cmp, Reg16::X)),
    ins(0x8D, "BSR", REL, B8, 7, Branch(Condition::Always, Subroutine)),
    ins(0x8E, "LDX", IMM, W16, 3, WordReg(WordOp::Ld, Reg16::X)),
    // Accumulator A and X: direct
    ins(0x90, "SUBA", DIR, B8, 4, ByteReg(ByteOp::Sub, Reg8::A)),
    ins(0x91, "CMPA", DIR, B8, 4, ByteReg(ByteOp::Cmp, Reg8::A)),
    ins(0x92, "SBCA", DIR, B8, 4, ByteReg(ByteOp::Sbc, Reg8::A)),
    ins(0x93, "SUBD", DIR, W16, 6, WordReg(WordOp::Sub, Reg16::D)),
    ins(0x94, "ANDA", DIR, B8, 4, ByteReg(ByteOp::And, Reg8::A)),
    ins(0x95, "BITA", DIR, B8, 4, ByteReg(ByteOp::Bit, Reg8::A)),
    ins(0x96, "LDA", DIR, B8, 4, ByteReg(ByteOp::Ld, Reg8::A)),
    ins(0x97, "STA", DIR, B8, 4, ByteReg(ByteOp::St, Reg8::A)),
    ins(0x98, "EORA", DIR, B8, 4, ByteReg(ByteOp::Eor, Reg8::A)),
    ins(0x99, "ADCA", DIR, B8, 4, ByteReg(ByteOp::Adc, Reg8::A)),
    ins(0x9A, "ORA", DIR, B8, 4, ByteReg(ByteOp::Or, Reg8::A)),
    ins(0x9B, "ADDA", DIR, B8, 4, ByteReg(ByteOp::Add, Reg8::A)),
    ins(0x9C, "CMPX", DIR, W16, 6, WordReg(WordOp::Cmp, Reg16::X)),
    ins(0x9D, "JSR", DIR, W16, 7, Control(ControlOp::Jsr)),
    ins(0x9E, "LDX", DIR, W16, 5, WordReg(WordOp::Ld, Reg16::X)),
    ins(0x9F, "STX", DIR, W16, 5, WordReg(WordOp::St, Reg16::X)),
    // Accumulator A and X: indexed
    ins(0xA0, "SUBA", IDX, B8, 4, ByteReg(ByteOp::Sub, Reg8::A)),
    ins(0xA1, "CMPA", IDX, B8, 4, ByteReg(ByteOp::Cmp, Reg8::A)),
    ins(0xA2, "SBCA", IDX, B8, 4, ByteReg(ByteOp::Sbc, Reg8::A)),
    ins(0xA3, "SUBD", IDX, W16, 6, WordReg(WordOp::Sub, Reg16::D)),
    ins(0xA4, "ANDA", IDX, B8, 4, ByteReg(ByteOp::And, Reg8::A)),
    ins(0xA5, "BITA", IDX, B8, 4, ByteReg(ByteOp::Bit, Reg8::A)),
    ins(0xA6, "LDA", IDX, B8, 4, ByteReg(ByteOp::Ld, Reg8::A)),
    ins(0xA7, "STA", IDX, B8, 4, ByteReg(ByteOp::St, Reg8::A)),
    ins(0xA8, "EORA", IDX, B8, 4, ByteReg(ByteOp::Eor, Reg8::A)),
    ins(0xA9, "ADCA", IDX, B8, 4, ByteReg(ByteOp::Adc, Reg8::A)),
    ins(0xAA, "ORA", IDX, B8, 4, ByteReg(ByteOp::Or, Reg8::A)),
    ins(0xAB, "ADDA", IDX, B8, 4, ByteReg(ByteOp::Add, Reg8::A)),
    ins(0xAC, "CMPX", IDX, W16, 6, WordReg(WordOp::Cmp, Reg16::X)),
    ins(0xAD, "JSR", IDX, W16, 7, Control(ControlOp::Jsr)),
    ins(0xAE, "LDX", IDX, W16, 5, WordReg(WordOp::Ld, Reg16::X)),
    ins(0xAF, "STX", IDX, W16, 5, WordReg(WordOp::St, Reg16::X)),
    // Accumulator A and X: extended
    ins(0xB0, "SUBA", EXT, B8, 5, ByteReg(ByteOp::Sub, Reg8::A)),
    ins(0xB1, "CMPA", EXT, B8, 5, ByteReg(ByteOp::Cmp, Reg8::A)),
    ins(0xB2, "SBCA", EXT, B8, 5, ByteReg(ByteOp::Sbc, Reg8::A)),
    ins(0xB3, "SUBD", EXT, W16, 7, WordReg(WordOp::Sub, Reg16::D)),
    ins(0xB4, "ANDA", EXT, B8, 5, ByteReg(ByteOp::And, Reg8::A)),
    ins(0xB5, "BITA", EXT, B8, 5, ByteReg(ByteOp::Bit, Reg8::A)),
    ins(0xB6, "LDA", EXT, B8, 5, ByteReg(ByteOp::Ld, Reg8::A)),
    ins(0xB7, "STA", EXT, B8, 5, ByteReg(ByteOp::St, Reg8::A)),
    ins(0xB8, "EORA", EXT, B8, 5, ByteReg(ByteOp::Eor, Reg8::A)),
    ins(0xB9, "ADCA", EXT, B8, 5, ByteReg(ByteOp::Adc, Reg8::A)),
    ins(0xBA, "ORA", EXT, B8, 5, ByteReg(ByteOp::Or, Reg8::A)),
    ins(0xBB, "ADDA", EXT, B8, 5, ByteReg(ByteOp::Add, Reg8::A)),
    ins(0xBC, "CMPX", EXT, W16, 7, WordReg(WordOp::Cmp, Reg16::X)),
    ins(0xBD, "JSR", EXT, W16, 8, Control(ControlOp::Jsr)),
    ins(0xBE, "LDX", EXT, W16, 6, WordReg(WordOp::Ld, Reg16::X)),
    ins(0xBF, "STX", EXT, W16, 6, WordReg(WordOp::St, Reg16::X)),
    // Accumulator B, D and U: immediate
    ins(0xC0, "SUBB", IMM, B8, 2, ByteReg(ByteOp::Sub, Reg8::B)),
    ins(0xC1, "CMPB", IMM, B8, 2, ByteReg(ByteOp::Cmp, Reg8::B)),
    ins(0xC2, "SBCB", IMM, B8, 2, ByteReg(ByteOp::Sbc, Reg8::B)),
    ins(0xC3, "ADDD", IMM, W16, 4, WordReg(WordOp::Add, Reg16::D)),
    ins(0xC4, "ANDB", IMM, B8, 2, ByteReg(ByteOp::And, Reg8::B)),
    ins(0xC5, "BITB", IMM, B8, 2, ByteReg(ByteOp::Bit, Reg8::B)),
    ins(0xC6, "LDB", IMM, B8, 2, ByteReg(ByteOp::Ld, Reg8::B)),
    ins(0xC8, "EORB", IMM, B8, 2, ByteReg(ByteOp::Eor, Reg8::B)),
    ins(0xC9, "ADCB", IMM, B8, 2, ByteReg(ByteOp::Adc, Reg8::B)),
    ins(0xCA, "ORB", IMM, B8, 2, ByteReg(ByteOp::Or, Reg8::B)),
    ins(0xCB, "ADDB", IMM, B8, 2, ByteReg(ByteOp::Add, Reg8::B)),
    ins(0xCC, "LDD", IMM, W16, 3, WordReg(WordOp::Ld, Reg16::D)),
    ins(0xCE, "LDU", IMM, W16, 3, WordReg(WordOp::Ld, Reg16::U)),
    // Accumulator B, D and U: direct
    ins(0xD0, "SUBB", DIR, B8, 4, ByteReg(ByteOp::Sub, Reg8::B)),
    ins(0xD1, "CMPB", DIR, B8, 4, ByteReg(ByteOp::Cmp, Reg8::B)),
    ins(0xD2, "SBCB", DIR, B8, 4, ByteReg(ByteOp::Sbc, Reg8::B)),
    ins(0xD3, "ADDD", DIR, W16, 6, WordReg(WordOp::Add, Reg16::D)),
    ins(0xD4, "ANDB", DIR, B8, 4, ByteReg(ByteOp::And, Reg8::B)),
    ins(0xD5, "BITB", DIR, B8, 4, ByteReg(ByteOp::Bit, Reg8::B)),
    ins(0xD6, "LDB", DIR, B8, 4, ByteReg(ByteOp::Ld, Reg8::B)),
    ins(0xD7, "STB", DIR, B8, 4, ByteReg(ByteOp::St, Reg8::B)),
    ins(0xD8, "EORB", DIR, B8, 4, ByteReg(ByteOp::Eor, Reg8::B)),
    ins(0xD9, "ADCB", DIR, B8, 4, ByteReg(ByteOp::Adc, Reg8::B)),
    ins(0xDA, "ORB", DIR, B8, 4, ByteReg(ByteOp::Or, Reg8::B)),
    ins(0xDB, "ADDB", DIR, B8, 4, ByteReg(ByteOp::Add, Reg8::B)),
    ins(0xDC, "LDD", DIR, W16, 5, WordReg(WordOp::Ld, Reg16::D)),
    ins(0xDD, "STD", DIR, W16, 5, WordReg(WordOp::St, Reg16::D)),
    ins(0xDE, "LDU", DIR, W16, 5, WordReg(WordOp::Ld, Reg16::U)),
    ins(0xDF, "STU", DIR, W16, 5, WordReg(WordOp::St, Reg16::U)),
    // Accumulator B, D and U: indexed
    ins(0xE0, "SUBB", IDX, B8, 4, ByteReg(ByteOp::Sub, Reg8::B)),
    ins(0xE1, "CMPB", IDX, B8, 4, ByteReg(ByteOp::Cmp, Reg8::B)),
    ins(0xE2, "SBCB", IDX, B8, 4, ByteReg(ByteOp::Sbc, Reg8::B)),
    ins(0xE3, "ADDD", IDX, W16, 6, WordReg(WordOp::Add, Reg16::D)),
    ins(0xE4, "ANDB", IDX, B8, 4, ByteReg(ByteOp::And, Reg8::B)),
    ins(0xE5, "BITB", IDX, B8, 4, ByteReg(ByteOp::Bit, Reg8::B)),
    ins(0xE6, "LDB", IDX, B8, 4, ByteReg(ByteOp::Ld, Reg8::B)),
    ins(0xE7, "STB", IDX, B8, 4, ByteReg(ByteOp::St, Reg8::B)),
    ins(0xE8, "EORB", IDX, B8, 4, ByteReg(ByteOp::Eor, Reg8::B)),
    ins(0xE9, "ADCB", IDX, B8, 4, ByteReg(ByteOp::Adc, Reg8::B)),
    ins(0xEA, "ORB", IDX, B8, 4, ByteReg(ByteOp::Or, Reg8::B)),
    ins(0xEB, "ADDB", IDX, B8, 4, ByteReg(ByteOp::Add, Reg8::B)),
    ins(0xEC, "LDD", IDX, W16, 5, WordReg(WordOp::Ld, Reg16::D)),
    ins(0xED, "STD", IDX, W16, 5, WordReg(WordOp::St, Reg16::D)),
    ins(0xEE, "LDU", IDX, W16, 5, WordReg(WordOp::Ld, Reg16::U)),
    ins(0xEF, "STU", IDX, W16, 5, WordReg(WordOp::St, Reg16::U)),
    // Accumulator B, D and U: extended
    ins(0xF0, "SUBB", EXT, B8, 5, ByteReg(ByteOp::Sub, Reg8::B)),
    ins(0xF1, "CMPB", EXT, B8, 5, ByteReg(ByteOp::Cmp, Reg8::B)),
    ins(0xF2, "SBCB", EXT, B8, 5, ByteReg(ByteOp::Sbc, Reg8::B)),
    ins(0xF3, "ADDD", EXT, W16, 7, WordReg(WordOp::Add, Reg16::D)),
    ins(0xF4, "ANDB", EXT, B8, 5, ByteReg(ByteOp::And, Reg8::B)),
    ins(0xF5, "BITB", EXT, B8, 5, ByteReg(ByteOp::Bit, Reg8::B)),
    ins(0xF6, "LDB", EXT, B8, 5, ByteReg(ByteOp::Ld, Reg8::B)),
    ins(0xF7, "STB", EXT, B8, 5, ByteReg(ByteOp::St, Reg8::B)),
    ins(0xF8, "EORB", EXT, B8, 5, ByteReg(ByteOp::Eor, Reg8::B)),
    ins(0xF9, "ADCB", EXT, B8, 5, ByteReg(ByteOp::Adc, Reg8::B)),
    ins(0xFA, "ORB", EXT, B8, 5, ByteReg(ByteOp::Or, Reg8::B)),
    ins(0xFB, "ADDB", EXT, B8, 5, ByteReg(ByteOp::Add, Reg8::B)),
    ins(0xFC, "LDD", EXT, W16, 6, WordReg(WordOp::Ld, Reg16::D)),
    ins(0xFD, "STD", EXT, W16, 6, WordReg(WordOp::St, Reg16::D)),
    ins(0xFE, "LDU", EXT, W16, 6, WordReg(WordOp::Ld, Reg16::U)),
    ins(0xFF, "STU", EXT, W16, 6, WordReg(WordOp::St, Reg16::U)),
    // Page 2: long conditional branches
    ins(0x1021, "LBRN", REL, W16, 5, Branch(Condition::Never, Jump)),
    ins(0x1022, "LBHI", REL, W16, 5, Branch(Condition::Hi, Jump)),
    ins(0x1023, "LBLS", REL, W16, 5, Branch(Condition::Ls, Jump)),
    ins(0x1024, "LBCC", REL, W16, 5, Branch(Condition::CarryClear, Jump)),
    ins(0x1025, "LBCS", REL, W16, 5, Branch(Condition::CarrySet, Jump)),
    ins(0x1026, "LBNE", REL, W16, 5, Branch(Condition::Ne, Jump)),
    ins(0x1027, "LBEQ", REL, W16, 5, Branch(Condition::Eq, Jump)),
    ins(0x1028, "LBVC", REL, W16, 5, Branch(Condition::OverflowClear, Jump)),
    ins(0x1029, "LBVS", REL, W16, 5, Branch(Condition::OverflowSet, Jump)),
    ins(0x102A, "LBPL", REL, W16, 5, Branch(Condition::Pl, Jump)),
    ins(0x102B, "LBMI", REL, W16, 5, Branch(Condition::Mi, Jump)),
    ins(0x102C, "LBGE", REL, W16, 5, Branch(Condition::Ge, Jump)),
    ins(0x102D, "LBLT", REL, W16, 5, Branch(Condition::Lt, Jump)),
    ins(0x102E, "LBGT", REL, W16, 5, Branch(Condition::Gt, Jump)),
    ins(0x102F, "LBLE", REL, W16, 5, Branch(Condition::Le, Jump)),
    ins(0x103F, "SWI2", INH, B8, 20, Control(ControlOp::Swi2)),
    // Page 2: D, Y and S
    ins(0x1083, "CMPD", IMM, W16, 5, WordReg(WordOp::Cmp, Reg16::D)),
    ins(0x108C, "CMPY", IMM, W16, 5, WordReg(WordOp::Cmp, Reg16::Y)),
    ins(0x108E, "LDY", IMM, W16, 4, WordReg(WordOp::Ld, Reg16::Y)),
    ins(0x1093, "CMPD", DIR, W16, 7, WordReg(WordOp::Cmp, Reg16::D)),
    ins(0x109C, "CMPY", DIR, W16, 7, WordReg(WordOp::Cmp, Reg16::Y)),
    ins(0x109E, "LDY", DIR, W16, 6, WordReg(WordOp::Ld, Reg16::Y)),
    ins(0x109F, "STY", DIR, W16, 6, WordReg(WordOp::St, Reg16::Y)),
    ins(0x10A3, "CMPD", IDX, W16, 7, WordReg(WordOp::Cmp, Reg16::D)),
    ins(0x10AC, "CMPY", IDX, W16, 7, WordReg(WordOp::Cmp, Reg16::Y)),
    ins(0x10AE, "LDY", IDX, W16, 6, WordReg(WordOp::Ld, Reg16::Y)),
    ins(0x10AF, "STY", IDX, W16, 6, WordReg(WordOp::St, Reg16::Y)),
    ins(0x10B3, "CMPD", EXT, W16, 8, WordReg(WordOp::Cmp, Reg16::D)),
    ins(0x10BC, "CMPY", EXT, W16, 8, WordReg(WordOp::Cmp, Reg16::Y)),
    ins(0x10BE, "LDY", EXT, W16, 7, WordReg(WordOp::Ld, Reg16::Y)),
    ins(0x10BF, "STY", EXT, W16, 7, WordReg(WordOp::St, Reg16::Y)),
    ins(0x10CE, "LDS", IMM, W16, 4, WordReg(WordOp::Ld, Reg16::S)),
    ins(0x10DE, "LDS", DIR, W16, 6, WordReg(WordOp::Ld, Reg16::S)),
    ins(0x10DF, "STS", DIR, W16, 6, WordReg(WordOp::St, Reg16::S)),
    ins(0x10EE, "LDS", IDX, W16, 6, WordReg(WordOp::Ld, Reg16::S)),
    ins(0x10EF, "STS", IDX, W16, 6, WordReg(WordOp::St, Reg16::S)),
    ins(0x10FE, "LDS", EXT, W16, 7, WordReg(WordOp::Ld, Reg16::S)),
    ins(0x10FF, "STS", EXT, W16, 7, WordReg(WordOp::St, Reg16::S)),
    // Page 3: U and S compares
    ins(0x113F, "SWI3", INH, B8, 20, Control(ControlOp::Swi3)),
    ins(0x1183, "CMPU", IMM, W16, 5, WordReg(WordOp::Cmp, Reg16::U)),
    ins(0x118C, "CMPS", IMM, W16, 5, WordReg(WordOp::Cmp, Reg16::S)),
    ins(0x1193, "CMPU", DIR, W16, 7, WordReg(WordOp::Cmp, Reg16::U)),
    ins(0x119C, "CMPS", DIR, W16, 7, WordReg(WordOp::Cmp, Reg16::S)),
    ins(0x11A3, "CMPU", IDX, W16, 7, WordReg(WordOp::Cmp, Reg16::U)),
    ins(0x11AC, "CMPS", IDX, W16, 7, WordReg(WordOp::Cmp, Reg16::S)),
    ins(0x11B3, "CMPU", EXT, W16, 8, WordReg(WordOp::Cmp, Reg16::U)),
    ins(0x11BC, "CMPS", EXT, W16, 8, WordReg(WordOp::Cmp, Reg16::S)),
];

type Page = [Option<Instruction>; 256];

const fn build_page(prefix: u16) -> Page {
    const EMPTY: Option<Instruction> = None;
    let mut page = [EMPTY; 256];
    let mut i = 0;
    while i < INSTRUCTIONS.len() {
        let instruction = INSTRUCTIONS[i];
        if instruction.opcode >> 8 == prefix {
            page[(instruction.opcode & 0xFF) as usize] = Some(instruction);
        }
        i += 1;
    }
    page
}

static PAGE0: Page = build_page(0x00);
static PAGE2: Page = build_page(0x10);
static PAGE3: Page = build_page(0x11);

/// True for the two page-prefix bytes.
#[must_use]
pub const fn is_prefix(byte: u8) -> bool {
    byte == 0x10 || byte == 0x11
}

/// Find the descriptor for an opcode (prefix in the high byte).
#[must_use]
pub fn lookup(opcode: u16) -> Option<&'static Instruction> {
    let page = match opcode >> 8 {
        0x00 => &PAGE0,
        0x10 => &PAGE2,
        0x11 => &PAGE3,
        _ => return None,
    };
    page[usize::from(opcode as u8)].as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn opcodes_are_unique() {
        let mut seen = HashSet::new();
        for instruction in INSTRUCTIONS {
            assert!(
                seen.insert(instruction.opcode),
                "duplicate opcode ${:04X}",
                instruction.opcode
            );
        }
    }

    #[test]
    fn every_entry_reaches_its_page() {
        for instruction in INSTRUCTIONS {
            assert_eq!(lookup(instruction.opcode), Some(instruction));
        }
        let filled = [&PAGE0, &PAGE2, &PAGE3]
            .iter()
            .map(|page| page.iter().filter(|slot| slot.is_some()).count())
            .sum::<usize>();
        assert_eq!(filled, INSTRUCTIONS.len());
    }

    #[test]
    fn prefixes_and_gaps_are_undefined() {
        assert!(lookup(0x10).is_none());
        assert!(lookup(0x11).is_none());
        assert!(lookup(0x01).is_none());
        assert!(lookup(0x87).is_none());
        assert!(lookup(0x1086).is_none());
        assert!(lookup(0x1200).is_none());
    }

    #[test]
    fn descriptors_for_known_opcodes() {
        let lda = lookup(0x86).unwrap();
        assert_eq!(lda.mnemonic, "LDA");
        assert_eq!(lda.mode, AddressingMode::Immediate);
        assert_eq!(lda.ticks, 2);

        let cmpd = lookup(0x10A3).unwrap();
        assert_eq!(cmpd.mnemonic, "CMPD");
        assert_eq!(cmpd.mode, AddressingMode::Indexed);
        assert_eq!(cmpd.width, Width::Word);

        let swi3 = lookup(0x113F).unwrap();
        assert_eq!(swi3.operation, Operation::Control(ControlOp::Swi3));
    }

    #[test]
    fn inherent_entries_never_take_an_operand() {
        for instruction in INSTRUCTIONS {
            if instruction.mode != AddressingMode::Inherent {
                continue;
            }
            let ok = match instruction.operation {
                Operation::ByteAlu(_, target) => target != Target::Memory,
                Operation::ByteReg(op, _) => op == ByteOp::Daa,
                Operation::Control(op) => matches!(
                    op,
                    ControlOp::Nop
                        | ControlOp::Sync
                        | ControlOp::Rts
                        | ControlOp::Rti
                        | ControlOp::Swi
                        | ControlOp::Swi2
                        | ControlOp::Swi3
                        | ControlOp::Abx
                        | ControlOp::Mul
                        | ControlOp::Sex
                ),
                _ => false,
            };
            assert!(ok, "{} needs an operand", instruction.mnemonic);
        }
    }

    #[test]
    fn signed_conditions_use_n_xor_v() {
        let nv = ConditionCodes(N | V);
        let n = ConditionCodes(N);
        assert!(Condition::Ge.holds(nv));
        assert!(!Condition::Ge.holds(n));
        assert!(Condition::Lt.holds(n));
        assert!(Condition::Le.holds(ConditionCodes(Z)));
        assert!(!Condition::Gt.holds(ConditionCodes(Z)));
        assert!(Condition::Hi.holds(ConditionCodes(0)));
        assert!(!Condition::Hi.holds(ConditionCodes(C)));
    }
}
