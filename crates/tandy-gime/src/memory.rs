//! Physical memory behind the GIME.
//!
//! Owns RAM, the internal ROM, the cartridge ROM and the MMU, and routes
//! every CPU access:
//!
//! - $FFF0-$FFFF reads always come from ROM (the vector window)
//! - $FF00-$FFEF is the I/O window: GIME and SAM registers, else devices
//! - $FE00-$FEFF goes to page $3F when constant-page mode is on
//! - everything else is translated through the PARs; pages $3C-$3F are
//!   ROM unless all-RAM mode is on

use emu_core::{Bus, ClockRate, Observable, Value};
use log::debug;

use crate::config::{ConfigError, CpuSpeed, MemoryConfig, ROM_LIMIT};
use crate::device::{IoDevice, NoDevices};
use crate::mmu::{self, Mmu, RomMode, CONSTANT_PAGE, PAGE_SIZE};

/// First physical page overlaid by ROM.
pub const FIRST_ROM_PAGE: u8 = 0x3C;

const IO_START: u16 = 0xFF00;
const IO_END: u16 = 0xFFEF;
const VECTOR_START: u16 = 0xFFF0;
/// Offset of the vectors within a ROM image: the top of its first 16K.
const VECTOR_OFFSET: usize = 0x3FF0;

const SAM_SLOW: u16 = 0xFFD8;
const SAM_FAST: u16 = 0xFFD9;
const SAM_ROM_MODE: u16 = 0xFFDE;
const SAM_ALL_RAM: u16 = 0xFFDF;

/// Where a CPU address lands after translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    /// Physical RAM address (before mirroring into smaller RAM).
    Ram(u32),
    /// Offset into the internal ROM.
    Rom(usize),
    /// Offset into the cartridge ROM.
    Cartridge(usize),
}

pub struct Memory<D: IoDevice = NoDevices> {
    ram: Vec<u8>,
    rom: Vec<u8>,
    cartridge: Vec<u8>,
    mmu: Mmu,
    all_ram: bool,
    speed: CpuSpeed,
    devices: D,
}

impl Memory<NoDevices> {
    /// Memory with an empty I/O window.
    pub fn without_devices(config: &MemoryConfig) -> Result<Self, ConfigError> {
        Self::new(config, NoDevices)
    }
}

impl<D: IoDevice> Memory<D> {
    pub fn new(config: &MemoryConfig, devices: D) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ram: vec![0; config.ram.bytes()],
            rom: pad_rom(&config.rom),
            cartridge: pad_rom(&config.cartridge),
            mmu: Mmu::new(),
            all_ram: false,
            speed: CpuSpeed::Normal,
            devices,
        })
    }

    /// Reset the MMU and SAM bits. RAM contents survive.
    pub fn reset(&mut self) {
        self.mmu.reset();
        self.all_ram = false;
        self.speed = CpuSpeed::Normal;
        debug!("GIME reset");
    }

    #[must_use]
    pub fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    #[must_use]
    pub fn all_ram(&self) -> bool {
        self.all_ram
    }

    #[must_use]
    pub fn speed(&self) -> CpuSpeed {
        self.speed
    }

    #[must_use]
    pub fn clock_rate(&self) -> ClockRate {
        self.speed.clock_rate()
    }

    #[must_use]
    pub fn devices(&self) -> &D {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut D {
        &mut self.devices
    }

    #[must_use]
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// Copy bytes into RAM at a physical address, mirroring like the CPU does.
    pub fn load_ram(&mut self, physical: u32, data: &[u8]) {
        for (addr, &byte) in (physical..).zip(data) {
            let index = self.ram_index(addr);
            self.ram[index] = byte;
        }
    }

    /// Read a physical RAM byte.
    #[must_use]
    pub fn peek_ram(&self, physical: u32) -> u8 {
        self.ram[self.ram_index(physical)]
    }

    /// Resolve a CPU address outside the I/O and vector windows.
    #[must_use]
    pub fn locate(&self, address: u16) -> Location {
        if self.mmu.constant_page() && address & 0xFF00 == 0xFE00 {
            return Location::Ram(mmu::physical(CONSTANT_PAGE, address));
        }

        let page = self.mmu.page(address);
        let physical = mmu::physical(page, address);
        if self.all_ram || page < FIRST_ROM_PAGE {
            return Location::Ram(physical);
        }

        let offset = (physical - u32::from(FIRST_ROM_PAGE) * PAGE_SIZE) as usize;
        match self.mmu.rom_mode() {
            RomMode::Split if offset < 0x4000 => Location::Rom(offset),
            RomMode::Split => Location::Cartridge(offset - 0x4000),
            RomMode::Internal => Location::Rom(offset),
            RomMode::Cartridge => Location::Cartridge(offset),
        }
    }

    fn ram_index(&self, physical: u32) -> usize {
        physical as usize % self.ram.len()
    }

    fn read_vector(&self, address: u16) -> u8 {
        let offset = VECTOR_OFFSET + usize::from(address - VECTOR_START);
        match self.mmu.rom_mode() {
            RomMode::Cartridge => self.cartridge[offset],
            RomMode::Split | RomMode::Internal => self.rom[offset],
        }
    }

    fn read_io(&mut self, address: u16) -> u8 {
        if Mmu::owns(address) {
            self.mmu.read_register(address)
        } else {
            self.devices.read(address)
        }
    }

    fn write_io(&mut self, address: u16, value: u8) {
        match address {
            _ if Mmu::owns(address) => self.mmu.write_register(address, value),
            SAM_ROM_MODE => {
                self.all_ram = false;
                debug!("SAM: ROM mode");
            }
            SAM_ALL_RAM => {
                self.all_ram = true;
                debug!("SAM: all-RAM mode");
            }
            SAM_SLOW => {
                self.speed = CpuSpeed::Normal;
                debug!("SAM: normal speed");
            }
            SAM_FAST => {
                self.speed = CpuSpeed::Fast;
                debug!("SAM: fast speed");
            }
            _ => self.devices.write(address, value),
        }
    }
}

impl<D: IoDevice> Bus for Memory<D> {
    fn read(&mut self, address: u16) -> u8 {
        match address {
            VECTOR_START..=0xFFFF => self.read_vector(address),
            IO_START..=IO_END => self.read_io(address),
            _ => match self.locate(address) {
                Location::Ram(physical) => self.peek_ram(physical),
                Location::Rom(offset) => self.rom[offset],
                Location::Cartridge(offset) => self.cartridge[offset],
            },
        }
    }

    fn write(&mut self, address: u16, value: u8) {
        if (IO_START..=IO_END).contains(&address) {
            self.write_io(address, value);
            return;
        }
        // ROM pages swallow writes; the vector window writes through to RAM.
        if let Location::Ram(physical) = self.locate(address) {
            let index = self.ram_index(physical);
            self.ram[index] = value;
        }
    }
}

const QUERY_PATHS: &[&str] = &[
    "mmu.enabled",
    "mmu.task",
    "mmu.constant_page",
    "mmu.rom_mode",
    "mmu.init0",
    "mmu.init1",
    "mmu.executive.0",
    "mmu.executive.1",
    "mmu.executive.2",
    "mmu.executive.3",
    "mmu.executive.4",
    "mmu.executive.5",
    "mmu.executive.6",
    "mmu.executive.7",
    "mmu.task.0",
    "mmu.task.1",
    "mmu.task.2",
    "mmu.task.3",
    "mmu.task.4",
    "mmu.task.5",
    "mmu.task.6",
    "mmu.task.7",
    "all_ram",
    "speed",
];

impl<D: IoDevice> Observable for Memory<D> {
    fn query(&self, path: &str) -> Option<Value> {
        let mmu = &self.mmu;
        let value = match path {
            "mmu.enabled" => mmu.enabled().into(),
            "mmu.task" => mmu.task_selected().into(),
            "mmu.constant_page" => mmu.constant_page().into(),
            "mmu.rom_mode" => (mmu.init0() & 0x03).into(),
            "mmu.init0" => mmu.init0().into(),
            "mmu.init1" => mmu.init1().into(),
            "all_ram" => self.all_ram.into(),
            "speed" => match self.speed {
                CpuSpeed::Normal => "normal".into(),
                CpuSpeed::Fast => "fast".into(),
            },
            _ => {
                let (set, slot) = if let Some(slot) = path.strip_prefix("mmu.executive.") {
                    (mmu.executive_pars(), slot)
                } else {
                    (mmu.task_pars(), path.strip_prefix("mmu.task.")?)
                };
                let slot: usize = slot.parse().ok()?;
                (*set.get(slot)?).into()
            }
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}

/// Pad an image to 32K with $FF so every ROM offset is readable.
fn pad_rom(image: &[u8]) -> Vec<u8> {
    let mut rom = vec![0xFF; ROM_LIMIT];
    rom[..image.len()].copy_from_slice(image);
    rom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RamSize;

    /// 32K ROM where every byte holds its page number, with vectors marked.
    fn marked_rom(base: u8) -> Vec<u8> {
        let mut rom: Vec<u8> = (0..ROM_LIMIT)
            .map(|offset| base + (offset / PAGE_SIZE as usize) as u8)
            .collect();
        for i in 0..16 {
            rom[VECTOR_OFFSET + i] = 0xE0 + i as u8;
        }
        rom
    }

    fn memory() -> Memory {
        let config = MemoryConfig::new(marked_rom(0x10)).with_cartridge(marked_rom(0x20));
        Memory::without_devices(&config).expect("valid config")
    }

    #[test]
    fn reset_state_reads_internal_rom_up_top() {
        let mut mem = memory();
        assert_eq!(mem.read(0x8000), 0x10);
        assert_eq!(mem.read(0xA000), 0x11);
        assert_eq!(mem.read(0xC000), 0x12);
        assert_eq!(mem.read(0xE000), 0x13);
        // Low 32K is RAM on pages $38-$3B.
        mem.write(0x1234, 0x5A);
        assert_eq!(mem.peek_ram(0x71234), 0x5A);
    }

    #[test]
    fn rom_pages_discard_writes() {
        let mut mem = memory();
        mem.write(0x8000, 0x00);
        assert_eq!(mem.read(0x8000), 0x10);
        assert_eq!(mem.peek_ram(0x78000), 0x00);
    }

    #[test]
    fn all_ram_mode_exposes_ram_under_rom() {
        let mut mem = memory();
        mem.write(0xFFDF, 0);
        assert!(mem.all_ram());
        mem.write(0x8000, 0x77);
        assert_eq!(mem.read(0x8000), 0x77);

        mem.write(0xFFDE, 0);
        assert_eq!(mem.read(0x8000), 0x10);
    }

    #[test]
    fn split_rom_mode_puts_cartridge_on_top() {
        let mut mem = memory();
        mem.write(0xFF90, 0x00);
        assert_eq!(mem.read(0x8000), 0x10);
        assert_eq!(mem.read(0xA000), 0x11);
        assert_eq!(mem.read(0xC000), 0x20);
        assert_eq!(mem.read(0xE000), 0x21);

        mem.write(0xFF90, 0x01);
        assert_eq!(mem.read(0xC000), 0x20);
    }

    #[test]
    fn cartridge_rom_mode() {
        let mut mem = memory();
        mem.write(0xFF90, 0x03);
        assert_eq!(mem.read(0x8000), 0x20);
        assert_eq!(mem.read(0xE000), 0x23);
        assert_eq!(mem.read(0xFFF0), 0xE0);
    }

    #[test]
    fn vector_window_ignores_paging_and_all_ram() {
        let mut mem = memory();
        assert_eq!(mem.read(0xFFFE), 0xEE);
        assert_eq!(mem.read(0xFFFF), 0xEF);

        mem.write(0xFFDF, 0);
        mem.write(0xFF90, 0x40);
        mem.write(0xFFA7, 0x00);
        assert_eq!(mem.read(0xFFF2), 0xE2);
        assert_eq!(mem.read_word(0xFFFE), 0xEEEF);
    }

    #[test]
    fn enabled_mmu_maps_ram_pages() {
        let mut mem = memory();
        mem.load_ram(0x0A000, &[0x42]);
        mem.write(0xFF90, 0x42);
        mem.write(0xFFA0, 0x05);
        assert_eq!(mem.read(0x0000), 0x42);

        mem.write(0x0001, 0x43);
        assert_eq!(mem.peek_ram(0x0A001), 0x43);
    }

    #[test]
    fn rom_overlay_follows_the_physical_page() {
        let mut mem = memory();
        mem.write(0xFF90, 0x42);
        mem.write(0xFFA0, 0x3D);
        assert_eq!(mem.read(0x0000), 0x11);
        mem.write(0x0000, 0x99);
        assert_eq!(mem.read(0x0000), 0x11);
    }

    #[test]
    fn constant_page_pins_fexx() {
        let mut mem = memory();
        mem.write(0xFF90, 0x4A);
        mem.write(0xFFA7, 0x00);
        mem.write(0xFE10, 0x55);
        assert_eq!(mem.peek_ram(0x7FE10), 0x55);
        assert_eq!(mem.read(0xFE10), 0x55);
        // Rest of the slot follows the PAR.
        mem.write(0xFD00, 0x66);
        assert_eq!(mem.peek_ram(0x01D00), 0x66);
    }

    #[test]
    fn small_ram_mirrors() {
        let config = MemoryConfig::new(Vec::new()).with_ram(RamSize::K128);
        let mut mem = Memory::without_devices(&config).expect("valid config");
        mem.write(0x0000, 0xAB);
        // $70000 folds onto $10000 in 128K.
        assert_eq!(mem.peek_ram(0x10000), 0xAB);
        assert_eq!(mem.ram().len(), 0x20000);
    }

    #[test]
    fn empty_rom_reads_high() {
        let mut mem = Memory::without_devices(&MemoryConfig::default()).expect("valid config");
        assert_eq!(mem.read(0x8000), 0xFF);
        assert_eq!(mem.read_word(0xFFFE), 0xFFFF);
    }

    #[test]
    fn sam_rate_bits() {
        let mut mem = memory();
        mem.write(0xFFD9, 0);
        assert_eq!(mem.speed(), CpuSpeed::Fast);
        mem.write(0xFFD8, 0);
        assert_eq!(mem.speed(), CpuSpeed::Normal);
    }

    #[test]
    fn reset_restores_power_on_mapping() {
        let mut mem = memory();
        mem.write(0x1000, 0x12);
        mem.write(0xFF90, 0x43);
        mem.write(0xFFDF, 0);
        mem.write(0xFFD9, 0);
        mem.reset();
        assert!(!mem.mmu().enabled());
        assert!(!mem.all_ram());
        assert_eq!(mem.speed(), CpuSpeed::Normal);
        assert_eq!(mem.read(0x8000), 0x10);
        assert_eq!(mem.read(0x1000), 0x12);
    }

    #[test]
    fn queries() {
        let mut mem = memory();
        mem.write(0xFF90, 0x42);
        mem.write(0xFFA9, 0x21);
        assert_eq!(mem.query("mmu.enabled"), Some(Value::Bool(true)));
        assert_eq!(mem.query("mmu.rom_mode"), Some(Value::U8(2)));
        assert_eq!(mem.query("mmu.task.1"), Some(Value::U8(0x21)));
        assert_eq!(mem.query("mmu.executive.0"), Some(Value::U8(0x38)));
        assert_eq!(mem.query("mmu.task.8"), None);
        assert_eq!(mem.query("bogus"), None);
        for path in mem.query_paths() {
            assert!(mem.query(path).is_some(), "{path}");
        }
    }
}
