//! Device abstractions for a Pico board that animates a WS2812 strip and scans a
//! two-bank input bus.
//!
//! - [`led_strip`]: LED strip with a PIO-timed waveform encoder.
//! - [`scanner`]: select/clock/sample scanner over two banks of inputs.
//! - [`animation`] and [`supervisor`]: the rainbow loop and the LED-off cleanup.
//!
//! # Glossary
//!
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):**
//!   small state machines with cycle-exact timing. The LED waveform runs on one.
//! - **DMA ([Direct Memory Access](https://en.wikipedia.org/wiki/Direct_memory_access)):**
//!   feeds LED words into the PIO without the CPU.
//! - **Settle delay:** wait after every line change on the scanner so the latch
//!   and the bus are stable before the next step.
//! - **Reset hold:** low time after a frame that makes the LEDs latch it.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time check: an architecture must be selected (unless testing with host feature)
#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the architecture feature 'arm'");

pub mod animation;
pub mod color;
mod error;
pub mod led_strip;
pub mod pixel_buffer;
pub mod scanner;
pub mod supervisor;
pub mod waveform;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
