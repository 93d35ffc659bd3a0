//! Motorola 6809 CPU.
//!
//! Instruction-stepped: each `step()` fetches, decodes and executes one
//! whole instruction, then services any pending interrupts, and reports
//! the ticks taken.

use std::sync::Arc;

use emu_core::{Bus, Cpu, Observable, Value};
use log::{debug, trace, warn};

use crate::error::Error;
use crate::flags::{C, E, F, H, I, N, V, Z};
use crate::interrupts::{vectors, Interrupt, InterruptHandle, Latches};
use crate::opcodes::{self, AddressingMode};
use crate::registers::{Reg16, Registers};

/// Ticks to service IRQ or NMI (entire state stacked).
pub const IRQ_TICKS: u32 = 19;
/// Ticks to service FIRQ (PC and CC stacked).
pub const FIRQ_TICKS: u32 = 10;
/// Ticks to service any interrupt after CWAI has already stacked the state.
pub const CWAI_SERVICE_TICKS: u32 = 7;
/// Ticks consumed by a step while waiting in SYNC or CWAI.
pub const WAIT_TICKS: u32 = 1;

/// Why the CPU is not executing instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    /// Fetching and executing instructions.
    Running,
    /// SYNC: resumes on any interrupt request, masked or not.
    Sync,
    /// CWAI: entire state already stacked, resumes on service.
    Cwai,
}

/// The last instruction decoded by `step()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trace {
    pub pc: u16,
    pub opcode: u16,
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
}

/// Motorola 6809 CPU.
#[derive(Debug)]
pub struct Mc6809 {
    /// Programmer-visible registers.
    pub regs: Registers,
    pub(crate) wait: WaitState,
    /// Address of the instruction being executed.
    pub(crate) instruction_pc: u16,
    latches: Arc<Latches>,
    trace: Option<Trace>,
}

impl Default for Mc6809 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mc6809 {
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            wait: WaitState::Running,
            instruction_pc: 0,
            latches: Arc::new(Latches::default()),
            trace: None,
        }
    }

    /// Handle for raising interrupts, possibly from another thread.
    #[must_use]
    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle::new(Arc::clone(&self.latches))
    }

    pub fn schedule(&self, line: Interrupt) {
        self.latches.raise(line);
    }

    #[must_use]
    pub fn is_pending(&self, line: Interrupt) -> bool {
        self.latches.is_pending(line)
    }

    #[must_use]
    pub fn wait_state(&self) -> WaitState {
        self.wait
    }

    /// True while parked in SYNC or CWAI.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.wait != WaitState::Running
    }

    /// Last decoded instruction, if any since reset.
    #[must_use]
    pub fn trace(&self) -> Option<Trace> {
        self.trace
    }

    /// Reset: masks set, DP cleared, latches dropped, PC from the reset vector.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.regs.cc.0 = I | F;
        self.regs.dp = 0;
        self.wait = WaitState::Running;
        self.trace = None;
        self.latches.clear_all();
        self.regs.pc = bus.read_word(vectors::RESET);
        debug!("6809 reset, PC=${:04X}", self.regs.pc);
    }

    /// Execute one instruction (or one wait tick) and service interrupts.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Error> {
        match self.wait {
            WaitState::Running => {}
            WaitState::Sync => {
                if !self.latches.any_pending() {
                    return Ok(WAIT_TICKS);
                }
                self.wait = WaitState::Running;
                let ticks = self.service_interrupts(bus);
                return Ok(ticks.max(WAIT_TICKS));
            }
            WaitState::Cwai => {
                let ticks = self.service_interrupts(bus);
                return Ok(ticks.max(WAIT_TICKS));
            }
        }

        let start = self.regs.pc;
        self.instruction_pc = start;
        match self.execute(bus) {
            Ok(ticks) => Ok(ticks + self.service_interrupts(bus)),
            Err(err) => {
                self.regs.pc = start;
                warn!("{err}");
                Err(err)
            }
        }
    }

    fn execute<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Error> {
        let first = self.fetch_byte(bus);
        let opcode = if opcodes::is_prefix(first) {
            u16::from_be_bytes([first, self.fetch_byte(bus)])
        } else {
            u16::from(first)
        };

        let Some(instruction) = opcodes::lookup(opcode) else {
            return Err(Error::Decode {
                opcode,
                pc: self.instruction_pc,
            });
        };

        trace!(
            "{:04X}: {} ({:?})",
            self.instruction_pc,
            instruction.mnemonic,
            instruction.mode
        );
        self.trace = Some(Trace {
            pc: self.instruction_pc,
            opcode,
            mnemonic: instruction.mnemonic,
            mode: instruction.mode,
        });

        let resolved = self.resolve(bus, instruction.mode, instruction.width)?;
        let surcharge = self.run(bus, instruction, resolved.operand)?;

        let mut ticks = u32::from(instruction.ticks) + surcharge;
        if instruction.mode == AddressingMode::Indexed {
            ticks += u32::from(resolved.bytes);
        }
        Ok(ticks)
    }

    /// Service pending interrupts in IRQ, FIRQ, NMI order.
    ///
    /// Each line is checked independently, so more than one can be taken in
    /// a single boundary. Masked lines stay latched.
    fn service_interrupts<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let mut ticks = 0;
        for line in Interrupt::SERVICE_ORDER {
            let masked = line.mask().is_some_and(|mask| self.regs.cc.is_set(mask));
            if !masked && self.latches.take(line) {
                ticks += self.service(bus, line);
            }
        }
        ticks
    }

    fn service<B: Bus>(&mut self, bus: &mut B, line: Interrupt) -> u32 {
        let already_stacked = self.wait == WaitState::Cwai;
        self.wait = WaitState::Running;

        let ticks = if already_stacked {
            CWAI_SERVICE_TICKS
        } else if line.stacks_entire_state() {
            self.regs.cc.set(E);
            self.push_registers(bus, Reg16::S, 0xFF);
            IRQ_TICKS
        } else {
            self.regs.cc.clear(E);
            self.push_registers(bus, Reg16::S, 0x81);
            FIRQ_TICKS
        };

        self.regs.cc.set(line.masks_on_entry());
        self.regs.pc = bus.read_word(line.vector());
        debug!("{line:?} serviced, vector ${:04X}", self.regs.pc);
        ticks
    }
}

impl<B: Bus> Cpu<B> for Mc6809 {
    type Error = Error;

    fn step(&mut self, bus: &mut B) -> Result<u32, Error> {
        Mc6809::step(self, bus)
    }

    fn reset(&mut self, bus: &mut B) {
        Mc6809::reset(self, bus);
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn is_halted(&self) -> bool {
        Mc6809::is_halted(self)
    }
}

const QUERY_PATHS: &[&str] = &[
    "pc",
    "a",
    "b",
    "d",
    "x",
    "y",
    "u",
    "s",
    "dp",
    "cc",
    "flags.e",
    "flags.f",
    "flags.h",
    "flags.i",
    "flags.n",
    "flags.z",
    "flags.v",
    "flags.c",
    "halted",
    "opcode",
    "mnemonic",
    "mode",
];

impl Observable for Mc6809 {
    fn query(&self, path: &str) -> Option<Value> {
        let regs = &self.regs;
        let value = match path {
            "pc" => regs.pc.into(),
            "a" => regs.a.into(),
            "b" => regs.b.into(),
            "d" => regs.d().into(),
            "x" => regs.x.into(),
            "y" => regs.y.into(),
            "u" => regs.u.into(),
            "s" => regs.s.into(),
            "dp" => regs.dp.into(),
            "cc" => regs.cc.0.into(),
            "halted" => self.is_halted().into(),
            "opcode" => self.trace?.opcode.into(),
            "mnemonic" => self.trace?.mnemonic.into(),
            "mode" => self.trace?.mode.name().into(),
            _ => {
                let flag = match path.strip_prefix("flags.")? {
                    "e" => E,
                    "f" => F,
                    "h" => H,
                    "i" => I,
                    "n" => N,
                    "z" => Z,
                    "v" => V,
                    "c" => C,
                    _ => return None,
                };
                regs.cc.is_set(flag).into()
            }
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
