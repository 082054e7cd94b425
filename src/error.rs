//! Crate-wide error type.

use derive_more::{Display, Error, From};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors reported by the LED and scanner device abstractions.
///
/// Contract violations (an out-of-range pixel index, a zero-length strip) are not
/// represented here: they panic, because they are programming errors upstream.
#[derive(Debug, Display, Error, From)]
#[non_exhaustive]
pub enum Error {
    /// A timing slot was zero or longer than the PIO delay field allows.
    #[display("timing slot T{slot} = {units} is outside 1..={max}")]
    #[from(ignore)]
    TimingSlotOutOfRange {
        /// Which slot (1, 2 or 3).
        slot: u8,
        /// Requested length in sub-bit units.
        units: u8,
        /// Longest slot the PIO program can express.
        max: u8,
    },

    /// The sub-bit clock is too slow to time a bit.
    #[display("sub-bit clock {sub_bit_hz} Hz is below {min} Hz")]
    #[from(ignore)]
    SubBitClockTooSlow {
        /// Requested sub-bit clock.
        sub_bit_hz: u32,
        /// Slowest clock accepted.
        min: u32,
    },

    /// The sub-bit clock cannot be derived from the system clock.
    #[display("sub-bit clock {sub_bit_hz} Hz is not reachable from {sys_hz} Hz")]
    #[from(ignore)]
    ClockUnreachable {
        /// Requested sub-bit clock.
        sub_bit_hz: u32,
        /// System clock the divider was computed from.
        sys_hz: u32,
    },

    /// A select, clock or input line reported a failure.
    #[display("pin error: {_0:?}")]
    Pin(#[error(not(source))] embedded_hal::digital::ErrorKind),

    /// The embassy executor could not spawn a task.
    #[cfg(not(feature = "host"))]
    #[display("task spawn failed: {_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),
}
