//! GIME memory management unit.
//!
//! The 64K CPU space is cut into eight 8K slots. Each slot is mapped to one
//! of 64 physical 8K pages by a page address register (PAR). There are two
//! PAR sets, executive and task; INIT1 picks which one is live. With the MMU
//! disabled a fixed set maps the CPU space onto the top 64K.
//!
//! Registers:
//! - $FF90 INIT0: bit 6 MMU enable, bit 3 constant page, bits 1-0 ROM mode
//! - $FF91 INIT1: bit 0 task set select
//! - $FFA0-$FFA7: executive PARs
//! - $FFA8-$FFAF: task PARs

use log::debug;

/// Size of one page and of one CPU slot.
pub const PAGE_SIZE: u32 = 0x2000;

/// Physical pages used when the MMU is disabled.
pub const DEFAULT_PARS: [u8; 8] = [0x38, 0x39, 0x3A, 0x3B, 0x3C, 0x3D, 0x3E, 0x3F];

/// Page that $FE00-$FEFF is pinned to in constant-page mode.
pub const CONSTANT_PAGE: u8 = 0x3F;

pub const INIT0: u16 = 0xFF90;
pub const INIT1: u16 = 0xFF91;
pub const PAR_BASE: u16 = 0xFFA0;

const INIT0_MMU_ENABLE: u8 = 0x40;
const INIT0_CONSTANT_PAGE: u8 = 0x08;
const INIT0_ROM_MODE: u8 = 0x03;
const INIT1_TASK: u8 = 0x01;

/// Value INIT0 takes on reset: MMU off, 32K internal ROM.
const INIT0_RESET: u8 = 0x02;

/// Physical address for a page number and a CPU address.
#[must_use]
pub const fn physical(page: u8, address: u16) -> u32 {
    ((page as u32 & 0x3F) << 13) | (address as u32 & 0x1FFF)
}

/// Which images back the ROM pages ($3C-$3F).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RomMode {
    /// Modes 0 and 1: 16K internal in $3C-$3D, 16K cartridge in $3E-$3F.
    Split,
    /// Mode 2: 32K internal.
    Internal,
    /// Mode 3: 32K cartridge.
    Cartridge,
}

impl RomMode {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & INIT0_ROM_MODE {
            0 | 1 => Self::Split,
            2 => Self::Internal,
            _ => Self::Cartridge,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mmu {
    init0: u8,
    init1: u8,
    executive: [u8; 8],
    task: [u8; 8],
}

impl Default for Mmu {
    fn default() -> Self {
        Self::new()
    }
}

impl Mmu {
    #[must_use]
    pub fn new() -> Self {
        Self {
            init0: INIT0_RESET,
            init1: 0,
            executive: DEFAULT_PARS,
            task: DEFAULT_PARS,
        }
    }

    /// MMU off, executive set, ROM mode 2. PAR contents are left alone.
    pub fn reset(&mut self) {
        self.init0 = INIT0_RESET;
        self.init1 = 0;
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.init0 & INIT0_MMU_ENABLE != 0
    }

    #[must_use]
    pub fn constant_page(&self) -> bool {
        self.init0 & INIT0_CONSTANT_PAGE != 0
    }

    #[must_use]
    pub fn rom_mode(&self) -> RomMode {
        RomMode::from_bits(self.init0)
    }

    /// True when the task set is live.
    #[must_use]
    pub fn task_selected(&self) -> bool {
        self.init1 & INIT1_TASK != 0
    }

    #[must_use]
    pub fn init0(&self) -> u8 {
        self.init0
    }

    #[must_use]
    pub fn init1(&self) -> u8 {
        self.init1
    }

    #[must_use]
    pub fn executive_pars(&self) -> &[u8; 8] {
        &self.executive
    }

    #[must_use]
    pub fn task_pars(&self) -> &[u8; 8] {
        &self.task
    }

    /// The PAR set currently used for translation.
    #[must_use]
    pub fn active_pars(&self) -> &[u8; 8] {
        if !self.enabled() {
            &DEFAULT_PARS
        } else if self.task_selected() {
            &self.task
        } else {
            &self.executive
        }
    }

    /// Physical page backing a CPU address.
    #[must_use]
    pub fn page(&self, address: u16) -> u8 {
        self.active_pars()[usize::from(address >> 13)] & 0x3F
    }

    /// Translate a CPU address to a 19-bit physical address.
    #[must_use]
    pub fn translate(&self, address: u16) -> u32 {
        physical(self.page(address), address)
    }

    /// True for addresses this unit decodes itself.
    #[must_use]
    pub fn owns(address: u16) -> bool {
        matches!(address, INIT0 | INIT1 | 0xFFA0..=0xFFAF)
    }

    /// Read a register. PARs read back as 6 bits.
    #[must_use]
    pub fn read_register(&self, address: u16) -> u8 {
        match address {
            INIT0 => self.init0,
            INIT1 => self.init1,
            0xFFA0..=0xFFA7 => self.executive[usize::from(address - PAR_BASE)] & 0x3F,
            0xFFA8..=0xFFAF => self.task[usize::from(address - PAR_BASE - 8)] & 0x3F,
            _ => 0xFF,
        }
    }

    pub fn write_register(&mut self, address: u16, value: u8) {
        match address {
            INIT0 => {
                self.init0 = value;
                debug!(
                    "GIME INIT0=${value:02X}: mmu={} constant_page={} rom={:?}",
                    self.enabled(),
                    self.constant_page(),
                    self.rom_mode()
                );
            }
            INIT1 => {
                self.init1 = value;
                debug!("GIME INIT1=${value:02X}: task={}", self.task_selected());
            }
            0xFFA0..=0xFFA7 => {
                let slot = usize::from(address - PAR_BASE);
                self.executive[slot] = value & 0x3F;
                debug!("GIME executive PAR{slot}=${:02X}", value & 0x3F);
            }
            0xFFA8..=0xFFAF => {
                let slot = usize::from(address - PAR_BASE - 8);
                self.task[slot] = value & 0x3F;
                debug!("GIME task PAR{slot}=${:02X}", value & 0x3F);
            }
            _ => {}
        }
    }
}
