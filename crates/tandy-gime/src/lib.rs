//! Tandy GIME memory system.
//!
//! The GIME sits between the CPU and 128K or 512K of RAM. It pages the
//! 64K CPU space in 8K slots, overlays the top four physical pages with
//! the internal or cartridge ROM, and decodes its own control registers in
//! the $FFxx I/O window. Everything else in that window goes to an
//! [`IoDevice`].
//!
//! ```text
//! CPU address ─┬─ $FFF0-$FFFF ──────────────> ROM vectors
//!              ├─ $FF00-$FFEF ─┬─ GIME/SAM registers
//!              │               └─ IoDevice
//!              └─ PAR[addr >> 13] ─┬─ page $3C-$3F ─> ROM / cartridge
//!                                  └─ otherwise ────> RAM
//! ```

mod config;
mod device;
mod memory;
mod mmu;

pub use config::{ConfigError, CpuSpeed, MemoryConfig, RamSize, ROM_LIMIT};
pub use device::{IoDevice, NoDevices};
pub use memory::{Location, Memory, FIRST_ROM_PAGE};
pub use mmu::{physical, Mmu, RomMode, CONSTANT_PAGE, DEFAULT_PARS, PAGE_SIZE};
