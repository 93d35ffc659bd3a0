//! Top-level CoCo 3 system.
//!
//! There is no master clock here: the CPU runs whole instructions and the
//! tick count each one reports is folded into a running total. Hosts pace
//! their peripherals against that total with `run_for` or `run_frame`.

use emu_core::{Bus, ClockRate, Observable, Ticks, Value};
use log::debug;
use motorola_6809::{Interrupt, InterruptHandle, Mc6809, Trace};
use tandy_gime::{IoDevice, Memory, MemoryConfig, NoDevices};

use crate::error::Error;

/// Vertical refresh used to size `run_frame` (NTSC).
pub const FRAMES_PER_SECOND: u64 = 60;

/// CoCo 3 system.
pub struct Coco3<D: IoDevice = NoDevices> {
    cpu: Mc6809,
    memory: Memory<D>,
    ticks: Ticks,
    frame_count: u64,
}

impl Coco3<NoDevices> {
    /// System with nothing behind the I/O window.
    pub fn without_devices(config: &MemoryConfig) -> Result<Self, Error> {
        Self::new(config, NoDevices)
    }
}

impl<D: IoDevice> Coco3<D> {
    /// Build the system and reset it.
    pub fn new(config: &MemoryConfig, devices: D) -> Result<Self, Error> {
        let memory = Memory::new(config, devices)?;
        let mut coco = Self {
            cpu: Mc6809::new(),
            memory,
            ticks: Ticks::ZERO,
            frame_count: 0,
        };
        coco.reset();
        Ok(coco)
    }

    /// Reset the GIME first so the CPU fetches its vector from ROM mode 2.
    pub fn reset(&mut self) {
        self.memory.reset();
        self.cpu.reset(&mut self.memory);
        debug!("CoCo 3 reset, PC=${:04X}", self.cpu.regs.pc);
    }

    /// Execute one instruction, including any interrupt service it leads
    /// into, and return the ticks it took.
    pub fn step(&mut self) -> Result<u32, Error> {
        let ticks = self.cpu.step(&mut self.memory)?;
        self.ticks += ticks;
        Ok(ticks)
    }

    /// Step until at least `budget` ticks have elapsed.
    ///
    /// Returns the ticks actually run, which overshoots the budget by at
    /// most one instruction.
    pub fn run_for(&mut self, budget: Ticks) -> Result<Ticks, Error> {
        let start = self.ticks;
        while self.ticks.since(start) < budget {
            self.step()?;
        }
        Ok(self.ticks.since(start))
    }

    /// Run one video frame's worth of ticks at the current CPU speed.
    ///
    /// A frame that stops on an error is not counted.
    pub fn run_frame(&mut self) -> Result<Ticks, Error> {
        let budget = self.clock_rate().ticks_per_frame(FRAMES_PER_SECOND);
        let ran = self.run_for(budget)?;
        self.frame_count += 1;
        Ok(ran)
    }

    pub fn read_byte(&mut self, address: u16) -> u8 {
        self.memory.read(address)
    }

    pub fn write_byte(&mut self, address: u16, value: u8) {
        self.memory.write(address, value);
    }

    /// Big-endian: high byte at `address`.
    pub fn read_word(&mut self, address: u16) -> u16 {
        self.memory.read_word(address)
    }

    pub fn write_word(&mut self, address: u16, value: u16) {
        self.memory.write_word(address, value);
    }

    pub fn schedule_irq(&self) {
        self.cpu.schedule(Interrupt::Irq);
    }

    pub fn schedule_firq(&self) {
        self.cpu.schedule(Interrupt::Firq);
    }

    pub fn schedule_nmi(&self) {
        self.cpu.schedule(Interrupt::Nmi);
    }

    /// Handle for raising interrupts from device threads.
    #[must_use]
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.cpu.interrupt_handle()
    }

    /// Last decoded instruction.
    #[must_use]
    pub fn trace(&self) -> Option<Trace> {
        self.cpu.trace()
    }

    #[must_use]
    pub fn cpu(&self) -> &Mc6809 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Mc6809 {
        &mut self.cpu
    }

    #[must_use]
    pub fn memory(&self) -> &Memory<D> {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory<D> {
        &mut self.memory
    }

    /// Total ticks since construction.
    #[must_use]
    pub fn ticks(&self) -> Ticks {
        self.ticks
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[must_use]
    pub fn clock_rate(&self) -> ClockRate {
        self.memory.clock_rate()
    }
}

const QUERY_PATHS: &[&str] = &["cpu.<6809_paths>", "gime.<gime_paths>", "ticks", "frames"];

impl<D: IoDevice> Observable for Coco3<D> {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("cpu.") {
            self.cpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("gime.") {
            self.memory.query(rest)
        } else {
            match path {
                "ticks" => Some(self.ticks.get().into()),
                "frames" => Some(self.frame_count.into()),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
