//! Memory configuration.
//!
//! Describes how much RAM is fitted and which ROM images are present.
//! Validated when the memory system is built.

use emu_core::ClockRate;
use thiserror::Error;

/// Largest internal ROM or cartridge image (four 8K pages).
pub const ROM_LIMIT: usize = 0x8000;

/// Installed RAM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RamSize {
    /// 128K: physical pages mirror every 16 pages.
    K128,
    /// 512K: all 64 physical pages are distinct.
    #[default]
    K512,
}

impl RamSize {
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::K128 => 128 * 1024,
            Self::K512 => 512 * 1024,
        }
    }
}

/// CPU clock selected through the SAM rate registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CpuSpeed {
    /// 0.89 MHz, selected by a write to $FFD8.
    #[default]
    Normal,
    /// 1.79 MHz, selected by a write to $FFD9.
    Fast,
}

impl CpuSpeed {
    #[must_use]
    pub const fn clock_rate(self) -> ClockRate {
        match self {
            Self::Normal => ClockRate::new(894_886),
            Self::Fast => ClockRate::new(1_789_772),
        }
    }
}

/// Memory system configuration.
#[derive(Clone, Debug, Default)]
pub struct MemoryConfig {
    pub ram: RamSize,
    /// Internal (system) ROM image, up to 32K.
    pub rom: Vec<u8>,
    /// Cartridge ROM image, up to 32K. Empty when no cartridge is inserted.
    pub cartridge: Vec<u8>,
}

impl MemoryConfig {
    #[must_use]
    pub fn new(rom: Vec<u8>) -> Self {
        Self {
            rom,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ram(mut self, ram: RamSize) -> Self {
        self.ram = ram;
        self
    }

    #[must_use]
    pub fn with_cartridge(mut self, cartridge: Vec<u8>) -> Self {
        self.cartridge = cartridge;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rom.len() > ROM_LIMIT {
            return Err(ConfigError::RomTooLarge {
                size: self.rom.len(),
            });
        }
        if self.cartridge.len() > ROM_LIMIT {
            return Err(ConfigError::CartridgeTooLarge {
                size: self.cartridge.len(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("internal ROM is {size} bytes, limit is 32768")]
    RomTooLarge { size: usize },
    #[error("cartridge ROM is {size} bytes, limit is 32768")]
    CartridgeTooLarge { size: usize },
}
