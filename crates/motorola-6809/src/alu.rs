//! ALU operations for the 6809.
//!
//! Every function takes the current CC byte and returns the result together
//! with the updated CC. Flags an operation does not define pass through
//! unchanged.

use crate::flags::{nz16, nz8, C, H, N, V, Z};
use crate::opcodes::UnaryOp;

/// Result of an ALU operation with the updated condition codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult<T = u8> {
    pub value: T,
    pub cc: u8,
}

const NZVC: u8 = N | Z | V | C;
const NZV: u8 = N | Z | V;

fn result<T>(value: T, cc: u8, defined: u8, flags: u8) -> AluResult<T> {
    AluResult {
        value,
        cc: (cc & !defined) | (flags & defined),
    }
}

/// Run one of the read-modify-write byte operations.
#[must_use]
pub fn unary(op: UnaryOp, cc: u8, value: u8) -> AluResult {
    match op {
        UnaryOp::Neg => neg(cc, value),
        UnaryOp::Com => com(cc, value),
        UnaryOp::Lsr => lsr(cc, value),
        UnaryOp::Ror => ror(cc, value),
        UnaryOp::Asr => asr(cc, value),
        UnaryOp::Asl => asl(cc, value),
        UnaryOp::Rol => rol(cc, value),
        UnaryOp::Dec => dec(cc, value),
        UnaryOp::Inc => inc(cc, value),
        UnaryOp::Tst => tst(cc, value),
        UnaryOp::Clr => result(0, cc, NZVC, Z),
    }
}

/// Two's complement negate. 0x80 is a fixed point and sets V.
#[must_use]
pub fn neg(cc: u8, value: u8) -> AluResult {
    let r = value.wrapping_neg();
    let mut flags = nz8(r);
    if value == 0x80 {
        flags |= V;
    }
    if value != 0 {
        flags |= C;
    }
    result(r, cc, NZVC, flags)
}

#[must_use]
pub fn com(cc: u8, value: u8) -> AluResult {
    let r = !value;
    result(r, cc, NZVC, nz8(r) | C)
}

#[must_use]
pub fn lsr(cc: u8, value: u8) -> AluResult {
    let r = value >> 1;
    let mut flags = nz8(r);
    if value & 0x01 != 0 {
        flags |= C;
    }
    result(r, cc, N | Z | C, flags)
}

#[must_use]
pub fn ror(cc: u8, value: u8) -> AluResult {
    let r = (value >> 1) | ((cc & C) << 7);
    let mut flags = nz8(r);
    if value & 0x01 != 0 {
        flags |= C;
    }
    result(r, cc, N | Z | C, flags)
}

#[must_use]
pub fn asr(cc: u8, value: u8) -> AluResult {
    let r = (value >> 1) | (value & 0x80);
    let mut flags = nz8(r);
    if value & 0x01 != 0 {
        flags |= C;
    }
    result(r, cc, N | Z | C, flags)
}

/// Shared by ASL and ROL: V is bit 7 XOR bit 6 of the operand.
fn shift_left(cc: u8, value: u8, carry_in: u8) -> AluResult {
    let r = (value << 1) | carry_in;
    let mut flags = nz8(r);
    if value & 0x80 != 0 {
        flags |= C;
    }
    if (value ^ (value << 1)) & 0x80 != 0 {
        flags |= V;
    }
    result(r, cc, NZVC, flags)
}

#[must_use]
pub fn asl(cc: u8, value: u8) -> AluResult {
    shift_left(cc, value, 0)
}

#[must_use]
pub fn rol(cc: u8, value: u8) -> AluResult {
    shift_left(cc, value, cc & C)
}

#[must_use]
pub fn dec(cc: u8, value: u8) -> AluResult {
    let r = value.wrapping_sub(1);
    let mut flags = nz8(r);
    if value == 0x80 {
        flags |= V;
    }
    result(r, cc, NZV, flags)
}

#[must_use]
pub fn inc(cc: u8, value: u8) -> AluResult {
    let r = value.wrapping_add(1);
    let mut flags = nz8(r);
    if value == 0x7F {
        flags |= V;
    }
    result(r, cc, NZV, flags)
}

/// N and Z from the value, V cleared. Also the flag rule for loads, stores
/// and the logical operations.
#[must_use]
pub fn tst(cc: u8, value: u8) -> AluResult {
    result(value, cc, NZV, nz8(value))
}

/// 8-bit add with optional carry in. Sets H from bit 3.
#[must_use]
pub fn add8(cc: u8, a: u8, m: u8, carry: bool) -> AluResult {
    let c = u8::from(carry);
    let sum = u16::from(a) + u16::from(m) + u16::from(c);
    let r = sum as u8;

    let mut flags = nz8(r);
    if (a & 0x0F) + (m & 0x0F) + c > 0x0F {
        flags |= H;
    }
    if !(a ^ m) & (a ^ r) & 0x80 != 0 {
        flags |= V;
    }
    if sum > 0xFF {
        flags |= C;
    }
    result(r, cc, H | NZVC, flags)
}

/// 8-bit subtract with optional borrow in.
///
/// Computed as `a + !m + !borrow`; C reports a borrow, i.e. the inverse of
/// the carry out of that addition.
#[must_use]
pub fn sub8(cc: u8, a: u8, m: u8, borrow: bool) -> AluResult {
    let sum = u16::from(a) + u16::from(!m) + u16::from(!borrow);
    let r = sum as u8;

    let mut flags = nz8(r);
    if (a ^ m) & (a ^ r) & 0x80 != 0 {
        flags |= V;
    }
    if sum & 0x100 == 0 {
        flags |= C;
    }
    result(r, cc, NZVC, flags)
}

/// Decimal adjust A after a BCD addition.
#[must_use]
pub fn daa(cc: u8, a: u8) -> AluResult {
    let low = a & 0x0F;
    let high = a >> 4;
    let mut correction = 0u8;
    let mut carry = cc & C != 0;

    if cc & H != 0 || low > 9 {
        correction |= 0x06;
    }
    if carry || high > 9 || (high > 8 && low > 9) {
        correction |= 0x60;
        carry = true;
    }

    let r = a.wrapping_add(correction);
    let mut flags = nz8(r);
    if carry {
        flags |= C;
    }
    result(r, cc, N | Z | C, flags)
}

#[must_use]
pub fn add16(cc: u8, a: u16, m: u16) -> AluResult<u16> {
    let sum = u32::from(a) + u32::from(m);
    let r = sum as u16;

    let mut flags = nz16(r);
    if !(a ^ m) & (a ^ r) & 0x8000 != 0 {
        flags |= V;
    }
    if sum > 0xFFFF {
        flags |= C;
    }
    result(r, cc, NZVC, flags)
}

#[must_use]
pub fn sub16(cc: u8, a: u16, m: u16) -> AluResult<u16> {
    let r = a.wrapping_sub(m);

    let mut flags = nz16(r);
    if (a ^ m) & (a ^ r) & 0x8000 != 0 {
        flags |= V;
    }
    if m > a {
        flags |= C;
    }
    result(r, cc, NZVC, flags)
}

/// 16-bit load/store flag rule.
#[must_use]
pub fn tst16(cc: u8, value: u16) -> AluResult<u16> {
    result(value, cc, NZV, nz16(value))
}

/// Unsigned A * B. Z from the product, C from bit 7 of the low byte.
#[must_use]
pub fn mul(cc: u8, a: u8, b: u8) -> AluResult<u16> {
    let r = u16::from(a) * u16::from(b);
    let mut flags = 0;
    if r == 0 {
        flags |= Z;
    }
    if r & 0x0080 != 0 {
        flags |= C;
    }
    result(r, cc, Z | C, flags)
}

/// Sign-extend B into D. V is not affected.
#[must_use]
pub fn sex(cc: u8, b: u8) -> AluResult<u16> {
    let r = i16::from(b as i8) as u16;
    result(r, cc, N | Z, nz16(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negate_twice_is_identity_except_0x80() {
        for v in 0..=255u8 {
            let once = neg(0, v);
            let twice = neg(0, once.value);
            assert_eq!(twice.value, v, "neg(neg({v:02X}))");
        }

        let r = neg(0, 0x80);
        assert_eq!(r.value, 0x80);
        assert_eq!(r.cc & (N | V | C), N | V | C);
    }

    #[test]
    fn neg_zero_clears_carry() {
        let r = neg(C, 0);
        assert_eq!(r.value, 0);
        assert_eq!(r.cc, Z);
    }

    #[test]
    fn z_and_n_track_result_for_every_byte_op() {
        let ops = [
            UnaryOp::Neg,
            UnaryOp::Com,
            UnaryOp::Lsr,
            UnaryOp::Ror,
            UnaryOp::Asr,
            UnaryOp::Asl,
            UnaryOp::Rol,
            UnaryOp::Dec,
            UnaryOp::Inc,
            UnaryOp::Tst,
            UnaryOp::Clr,
        ];
        for op in ops {
            for v in 0..=255u8 {
                for cc in [0, C] {
                    let r = unary(op, cc, v);
                    assert_eq!(r.cc & Z != 0, r.value == 0, "{op:?} {v:02X} Z");
                    assert_eq!(r.cc & N != 0, r.value & 0x80 != 0, "{op:?} {v:02X} N");
                }
            }
        }

        for a in 0..=255u8 {
            for m in [0x00, 0x01, 0x7F, 0x80, 0xFF, a, !a] {
                for carry in [false, true] {
                    let results = [
                        ("ADD", add8(0, a, m, carry)),
                        ("SUB", sub8(0, a, m, carry)),
                        ("AND", tst(0, a & m)),
                        ("OR", tst(0, a | m)),
                        ("EOR", tst(0, a ^ m)),
                        ("LD", tst(0, m)),
                    ];
                    for (name, r) in results {
                        assert_eq!(r.cc & Z != 0, r.value == 0, "{name} {a:02X} {m:02X} Z");
                        assert_eq!(
                            r.cc & N != 0,
                            r.value & 0x80 != 0,
                            "{name} {a:02X} {m:02X} N"
                        );
                    }
                }
            }

            for cc in [0, H, C, H | C] {
                let r = daa(cc, a);
                assert_eq!(r.cc & Z != 0, r.value == 0, "DAA {a:02X} cc={cc:02X} Z");
                assert_eq!(r.cc & N != 0, r.value & 0x80 != 0, "DAA {a:02X} cc={cc:02X} N");
            }
        }
    }

    #[test]
    fn inc_and_dec_overflow_boundaries() {
        let r = inc(0, 0x7F);
        assert_eq!(r.value, 0x80);
        assert_eq!(r.cc, N | V);

        let r = dec(0, 0x80);
        assert_eq!(r.value, 0x7F);
        assert_eq!(r.cc, V);

        // Carry untouched
        assert_eq!(inc(C, 0xFF).cc, Z | C);
        assert_eq!(dec(C, 0x00).cc, N | C);
    }

    #[test]
    fn add_sets_half_carry_and_overflow() {
        let r = add8(0, 0x0F, 0x01, false);
        assert_eq!(r.value, 0x10);
        assert_eq!(r.cc, H);

        let r = add8(0, 0x7F, 0x01, false);
        assert_eq!(r.cc, H | N | V);

        let r = add8(0, 0xFF, 0x01, false);
        assert_eq!(r.value, 0);
        assert_eq!(r.cc, H | Z | C);

        let r = add8(0, 0x10, 0x10, true);
        assert_eq!(r.value, 0x21);
        assert_eq!(r.cc, 0);
    }

    #[test]
    fn sub_reports_borrow() {
        let r = sub8(0, 0x03, 0x05, false);
        assert_eq!(r.value, 0xFE);
        assert_eq!(r.cc, N | C);

        let r = sub8(0, 0x05, 0x03, false);
        assert_eq!(r.value, 0x02);
        assert_eq!(r.cc, 0);

        let r = sub8(0, 0x80, 0x01, false);
        assert_eq!(r.value, 0x7F);
        assert_eq!(r.cc, V);

        // SBC with borrow in
        let r = sub8(0, 0x00, 0xFF, true);
        assert_eq!(r.value, 0x00);
        assert_eq!(r.cc, Z | C);

        // H is not defined by subtraction
        assert_eq!(sub8(H, 0x05, 0x03, false).cc, H);
    }

    #[test]
    fn shifts_and_rotates() {
        let r = lsr(N, 0x81);
        assert_eq!(r.value, 0x40);
        assert_eq!(r.cc, C);

        let r = asr(0, 0x81);
        assert_eq!(r.value, 0xC0);
        assert_eq!(r.cc, N | C);

        let r = ror(C, 0x02);
        assert_eq!(r.value, 0x81);
        assert_eq!(r.cc, N);

        let r = rol(C, 0x40);
        assert_eq!(r.value, 0x81);
        assert_eq!(r.cc, N | V);

        let r = asl(0, 0x80);
        assert_eq!(r.value, 0x00);
        assert_eq!(r.cc, Z | V | C);

        // V is untouched by right shifts
        assert_eq!(lsr(V, 0x02).cc, V);
    }

    #[test]
    fn com_always_sets_carry() {
        let r = com(V, 0xFF);
        assert_eq!(r.value, 0x00);
        assert_eq!(r.cc, Z | C);
    }

    #[test]
    fn daa_corrects_bcd_sums() {
        // 0x19 + 0x28 = 0x41 with half carry, should read 47
        let sum = add8(0, 0x19, 0x28, false);
        let r = daa(sum.cc, sum.value);
        assert_eq!(r.value, 0x47);
        assert_eq!(r.cc & C, 0);

        // 0x99 + 0x01 = 0x9A, adjusts to 00 with carry
        let sum = add8(0, 0x99, 0x01, false);
        let r = daa(sum.cc, sum.value);
        assert_eq!(r.value, 0x00);
        assert_eq!(r.cc & (Z | C), Z | C);
    }

    #[test]
    fn word_arithmetic() {
        let r = add16(0, 0xFFFF, 0x0001);
        assert_eq!(r.value, 0);
        assert_eq!(r.cc, Z | C);

        let r = add16(0, 0x7FFF, 0x0001);
        assert_eq!(r.cc, N | V);

        let r = sub16(0, 0x0000, 0x0001);
        assert_eq!(r.value, 0xFFFF);
        assert_eq!(r.cc, N | C);

        let r = sub16(0, 0x8000, 0x0001);
        assert_eq!(r.cc, V);
    }

    #[test]
    fn mul_and_sex() {
        let r = mul(0, 0x0C, 0x64);
        assert_eq!(r.value, 0x04B0);
        assert_eq!(r.cc, C);

        let r = mul(N, 0, 0x10);
        assert_eq!(r.value, 0);
        assert_eq!(r.cc, N | Z);

        let r = sex(V, 0x80);
        assert_eq!(r.value, 0xFF80);
        assert_eq!(r.cc, N | V);

        assert_eq!(sex(0, 0x00).cc, Z);
    }
}
