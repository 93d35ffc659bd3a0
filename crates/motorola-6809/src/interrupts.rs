//! Interrupt request latches.
//!
//! Requests can be raised from any thread. The CPU consumes them only at
//! instruction boundaries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::flags::{F, I};

/// Interrupt vector addresses.
pub mod vectors {
    pub const SWI3: u16 = 0xFFF2;
    pub const SWI2: u16 = 0xFFF4;
    pub const FIRQ: u16 = 0xFFF6;
    pub const IRQ: u16 = 0xFFF8;
    pub const SWI: u16 = 0xFFFA;
    pub const NMI: u16 = 0xFFFC;
    pub const RESET: u16 = 0xFFFE;
}

/// Hardware interrupt lines, in service order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Irq,
    Firq,
    Nmi,
}

impl Interrupt {
    pub const SERVICE_ORDER: [Self; 3] = [Self::Irq, Self::Firq, Self::Nmi];

    #[must_use]
    pub const fn vector(self) -> u16 {
        match self {
            Self::Irq => vectors::IRQ,
            Self::Firq => vectors::FIRQ,
            Self::Nmi => vectors::NMI,
        }
    }

    /// CC bit that holds this line off, if any.
    #[must_use]
    pub const fn mask(self) -> Option<u8> {
        match self {
            Self::Irq => Some(I),
            Self::Firq => Some(F),
            Self::Nmi => None,
        }
    }

    /// CC bits set on entry to the handler.
    #[must_use]
    pub const fn masks_on_entry(self) -> u8 {
        match self {
            Self::Irq => I,
            Self::Firq | Self::Nmi => I | F,
        }
    }

    /// FIRQ stacks only PC and CC; the others stack everything.
    #[must_use]
    pub const fn stacks_entire_state(self) -> bool {
        !matches!(self, Self::Firq)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Latches {
    irq: AtomicBool,
    firq: AtomicBool,
    nmi: AtomicBool,
}

impl Latches {
    fn line(&self, line: Interrupt) -> &AtomicBool {
        match line {
            Interrupt::Irq => &self.irq,
            Interrupt::Firq => &self.firq,
            Interrupt::Nmi => &self.nmi,
        }
    }

    pub(crate) fn raise(&self, line: Interrupt) {
        self.line(line).store(true, Ordering::Release);
    }

    pub(crate) fn is_pending(&self, line: Interrupt) -> bool {
        self.line(line).load(Ordering::Acquire)
    }

    pub(crate) fn any_pending(&self) -> bool {
        Interrupt::SERVICE_ORDER
            .iter()
            .any(|&line| self.is_pending(line))
    }

    /// Clear the latch, returning whether it was set.
    pub(crate) fn take(&self, line: Interrupt) -> bool {
        self.line(line).swap(false, Ordering::AcqRel)
    }

    pub(crate) fn clear_all(&self) {
        for line in Interrupt::SERVICE_ORDER {
            self.line(line).store(false, Ordering::Release);
        }
    }
}

/// Cloneable handle for raising interrupts on a CPU from elsewhere.
///
/// Each call sets a latch; the request is serviced after the instruction
/// that is executing when it arrives, or stays pending while masked.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    latches: Arc<Latches>,
}

impl InterruptHandle {
    pub(crate) fn new(latches: Arc<Latches>) -> Self {
        Self { latches }
    }

    pub fn schedule(&self, line: Interrupt) {
        self.latches.raise(line);
    }

    pub fn schedule_irq(&self) {
        self.schedule(Interrupt::Irq);
    }

    pub fn schedule_firq(&self) {
        self.schedule(Interrupt::Firq);
    }

    pub fn schedule_nmi(&self) {
        self.schedule(Interrupt::Nmi);
    }

    #[must_use]
    pub fn is_pending(&self, line: Interrupt) -> bool {
        self.latches.is_pending(line)
    }
}
