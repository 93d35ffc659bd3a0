//! CPU clock rate.

use crate::Ticks;

/// Rate at which CPU ticks elapse.
///
/// Hosts use this to convert a frame period into a tick budget for
/// `step()` loops. Machines that can change speed at runtime report a new
/// rate rather than rescaling ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockRate {
    /// Ticks per second (e.g. `894_886` for a 0.89 MHz E clock).
    pub hz: u64,
}

impl ClockRate {
    #[must_use]
    pub const fn new(hz: u64) -> Self {
        Self { hz }
    }

    /// Ticks per frame at the given frame rate (integer division).
    #[must_use]
    pub const fn ticks_per_frame(&self, frames_per_second: u64) -> Ticks {
        Ticks::new(self.hz / frames_per_second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_budget_at_60_hz() {
        let rate = ClockRate::new(894_886);
        assert_eq!(rate.ticks_per_frame(60), Ticks::new(14_914));
    }
}
