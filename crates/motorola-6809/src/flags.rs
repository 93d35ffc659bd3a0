//! 6809 condition code register (CC).
//!
//! Bit layout, high to low: E F H I N Z V C.

/// Carry - set on unsigned carry out of, or borrow into, the top bit.
pub const C: u8 = 0x01;

/// Overflow - set on two's complement overflow.
pub const V: u8 = 0x02;

/// Zero - set if the result is zero.
pub const Z: u8 = 0x04;

/// Negative - copy of the result's top bit.
pub const N: u8 = 0x08;

/// IRQ mask - when set, IRQ is held off.
pub const I: u8 = 0x10;

/// Half carry - carry out of bit 3 on 8-bit addition (used by DAA).
pub const H: u8 = 0x20;

/// FIRQ mask - when set, FIRQ is held off.
pub const F: u8 = 0x40;

/// Entire - set when the whole register file was stacked.
pub const E: u8 = 0x80;

/// Processor condition code register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionCodes(pub u8);

impl ConditionCodes {
    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set a flag.
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Clear a flag.
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    /// Set or clear a flag based on condition.
    pub fn set_if(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    /// Replace the flags in `defined` with the matching bits of `flags`.
    ///
    /// Bits outside `defined` are left exactly as they were.
    pub fn assign(&mut self, defined: u8, flags: u8) {
        self.0 = (self.0 & !defined) | (flags & defined);
    }
}

/// N and Z bits for an 8-bit result.
#[must_use]
pub const fn nz8(value: u8) -> u8 {
    let mut flags = 0;
    if value == 0 {
        flags |= Z;
    }
    if value & 0x80 != 0 {
        flags |= N;
    }
    flags
}

/// N and Z bits for a 16-bit result.
#[must_use]
pub const fn nz16(value: u16) -> u8 {
    let mut flags = 0;
    if value == 0 {
        flags |= Z;
    }
    if value & 0x8000 != 0 {
        flags |= N;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_only_touches_defined_bits() {
        let mut cc = ConditionCodes(E | I | C);
        cc.assign(N | Z | V | C, N | H);

        // C cleared, N set, H ignored because it is not in the defined set
        assert_eq!(cc.0, E | I | N);
    }

    #[test]
    fn nz_helpers() {
        assert_eq!(nz8(0), Z);
        assert_eq!(nz8(0x80), N);
        assert_eq!(nz8(0x7F), 0);
        assert_eq!(nz16(0), Z);
        assert_eq!(nz16(0x8000), N);
        assert_eq!(nz16(0x0080), 0);
    }
}
