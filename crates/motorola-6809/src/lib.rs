//! Motorola 6809 CPU emulator.
//!
//! Executes one whole instruction per `step()` and returns its tick count.
//! Memory is reached only through [`emu_core::Bus`], so the same core runs
//! against a flat test RAM or a banked MMU.
//!
//! ```text
//! fetch (0x10/0x11 prefix) -> lookup descriptor -> resolve operand
//!   -> run operation -> service IRQ, FIRQ, NMI
//! ```

mod addressing;
mod alu;
mod cpu;
mod error;
mod execute;
pub mod flags;
mod interrupts;
pub mod opcodes;
mod registers;

pub use addressing::{IndexMode, IndexedPostbyte, Operand, Resolved};
pub use cpu::{
    Mc6809, Trace, WaitState, CWAI_SERVICE_TICKS, FIRQ_TICKS, IRQ_TICKS, WAIT_TICKS,
};
pub use error::{Error, OperandKind};
pub use flags::ConditionCodes;
pub use interrupts::{vectors, Interrupt, InterruptHandle};
pub use opcodes::{lookup, AddressingMode, Instruction, Operation, Width};
pub use registers::{Reg16, Reg8, Register, Registers};
