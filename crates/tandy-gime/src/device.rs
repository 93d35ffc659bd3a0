//! Memory-mapped I/O collaborator.

/// Devices behind the I/O window ($FF00-$FFEF).
///
/// Addresses the GIME handles itself (INIT0/1, PARs, SAM RAM/ROM and
/// rate bits) never reach the device.
pub trait IoDevice {
    fn read(&mut self, address: u16) -> u8;
    fn write(&mut self, address: u16, value: u8);
}

/// Empty I/O window: reads float high, writes vanish.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDevices;

impl IoDevice for NoDevices {
    fn read(&mut self, _address: u16) -> u8 {
        0xFF
    }

    fn write(&mut self, _address: u16, _value: u8) {}
}
