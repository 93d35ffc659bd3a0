//! CPU core trait.

use crate::Bus;

/// A CPU that executes whole instructions.
///
/// The bus is passed in, not owned, so the memory system can be inspected
/// and driven by other components between steps.
pub trait Cpu<B: Bus> {
    /// Failure raised by a step that could not complete.
    type Error;

    /// Execute one instruction (plus any interrupt service that follows it).
    /// Returns the ticks consumed.
    fn step(&mut self, bus: &mut B) -> Result<u32, Self::Error>;

    /// Reset the CPU and load the program counter from the reset vector.
    fn reset(&mut self, bus: &mut B);

    /// Current program counter.
    fn pc(&self) -> u16;

    /// True while the CPU is parked waiting for an interrupt.
    fn is_halted(&self) -> bool;
}
