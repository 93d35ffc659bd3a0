//! Tandy Color Computer 3 execution context.
//!
//! Owns one 6809 and one GIME memory system. Video, sound, keyboard and
//! disk hardware live behind the [`IoDevice`] handed to [`Coco3::new`].

mod coco3;
mod error;

pub use coco3::{Coco3, FRAMES_PER_SECOND};
pub use error::Error;

pub use motorola_6809::{Interrupt, InterruptHandle, Trace};
pub use tandy_gime::{CpuSpeed, IoDevice, MemoryConfig, NoDevices, RamSize};
