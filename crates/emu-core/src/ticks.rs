//! Elapsed CPU time.

/// A running count of CPU ticks.
///
/// Each instruction step reports a `u32` tick count; hosts fold those into a
/// `Ticks` total to compare against frame budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticks(pub u64);

impl Ticks {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Ticks elapsed since an earlier reading (zero if `earlier` is later).
    #[must_use]
    pub const fn since(self, earlier: Self) -> Self {
        Self(self.0.saturating_sub(earlier.0))
    }
}

impl core::ops::AddAssign<u32> for Ticks {
    fn add_assign(&mut self, rhs: u32) {
        self.0 += u64::from(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_step_counts() {
        let mut total = Ticks::ZERO;
        total += 5;
        total += 19;
        assert_eq!(total.get(), 24);
        assert_eq!(total.since(Ticks::new(4)), Ticks::new(20));
        assert_eq!(Ticks::new(4).since(total), Ticks::ZERO);
    }
}
