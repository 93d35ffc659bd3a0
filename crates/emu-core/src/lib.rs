//! Core traits and types for instruction-stepped emulation.
//!
//! A CPU executes one whole instruction per `step()` and reports how many
//! clock ticks it took. Hosts accumulate those ticks to pace peripherals.

mod bus;
mod clock;
mod cpu;
mod observable;
mod ticks;

pub use bus::{Bus, SimpleBus};
pub use clock::ClockRate;
pub use cpu::Cpu;
pub use observable::{Observable, Value};
pub use ticks::Ticks;
