//! Memory and I/O bus interface.

/// Memory and I/O bus interface.
///
/// CPUs access memory and memory-mapped peripherals through this trait. The
/// bus handles address translation and routing to the appropriate device.
/// There is no bus error: unmapped reads return whatever the implementation
/// chooses and writes to read-only space are dropped.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Read a big-endian word: high byte at `address`, low byte after it.
    fn read_word(&mut self, address: u16) -> u16 {
        let high = self.read(address);
        let low = self.read(address.wrapping_add(1));
        u16::from_be_bytes([high, low])
    }

    /// Write a big-endian word, high byte first.
    fn write_word(&mut self, address: u16, value: u16) {
        let [high, low] = value.to_be_bytes();
        self.write(address, high);
        self.write(address.wrapping_add(1), low);
    }
}

/// Flat 64K RAM with no devices, for tests and bring-up.
pub struct SimpleBus {
    memory: Vec<u8>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: vec![0; 0x10000],
        }
    }

    /// Copy `data` into memory starting at `address`, wrapping at the top.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let mut addr = address;
        for &byte in data {
            self.memory[usize::from(addr)] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Read without going through the `Bus` trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[usize::from(address)] = value;
    }
}
