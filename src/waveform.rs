//! Timing and program generation for the self-clocking WS2812 waveform.
//!
//! Every bit on the data line lasts `T1 + T2 + T3` sub-bit units. The line goes
//! high for `T1`, stays high for `T2` more only if the bit is `1`, and is low for
//! the rest of the period:
//!
//! ```text
//!          T1    T2     T3
//! "1"   ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|____
//! "0"   ‾‾‾‾‾|______________
//! ```
//!
//! The bits are produced by a PIO state machine running [`ws2812_program`] with
//! one PIO cycle per sub-bit unit (see [`LedTiming::clock_divider`]). The CPU
//! only feeds words into the TX FIFO, so executor scheduling can never stretch a
//! bit. [`LineImage`] models the same waveform on the host.

use embassy_time::Duration;
use fixed::types::U24F8;
use pio::{
    Assembler, JmpCondition, OutDestination, Program, RP2040_MAX_PROGRAM_SIZE, SideSet,
};

use crate::{Error, Result};

/// Bits sent per LED.
pub const BITS_PER_LED: u32 = 24;

/// Longest timing slot the PIO program can encode. With one side-set bit, four
/// bits of the delay field remain, so a single instruction lasts at most 16 cycles.
pub const MAX_SLOT_UNITS: u8 = 16;

/// Slowest sub-bit clock accepted. The divider is computed in whole kHz.
pub const MIN_SUB_BIT_HZ: u32 = 1_000;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Per-bit slot lengths, sub-bit clock and reset hold for one LED part.
///
/// [`LedTiming::WS2812`] matches the common 800 kHz parts. Tune the slots with
/// [`LedTiming::new`] for other parts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LedTiming {
    t1: u8,
    t2: u8,
    t3: u8,
    sub_bit_hz: u32,
    reset_hold: Duration,
}

impl LedTiming {
    /// 2:5:3 slots at 8 MHz (1.25 µs per bit), 10 ms hold after each frame.
    pub const WS2812: Self = Self {
        t1: 2,
        t2: 5,
        t3: 3,
        sub_bit_hz: 8_000_000,
        reset_hold: Duration::from_millis(10),
    };

    /// Creates a timing with custom slot lengths, keeping the WS2812 sub-bit clock
    /// and reset hold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimingSlotOutOfRange`] if any slot is 0 or longer than
    /// [`MAX_SLOT_UNITS`].
    pub const fn new(t1: u8, t2: u8, t3: u8) -> Result<Self> {
        let slots = [t1, t2, t3];
        let mut slot: u8 = 1;
        while slot as usize <= slots.len() {
            let units = slots[slot as usize - 1];
            if units == 0 || units > MAX_SLOT_UNITS {
                return Err(Error::TimingSlotOutOfRange {
                    slot,
                    units,
                    max: MAX_SLOT_UNITS,
                });
            }
            slot += 1;
        }
        Ok(Self {
            t1,
            t2,
            t3,
            ..Self::WS2812
        })
    }

    /// Replaces the sub-bit clock (one PIO cycle per unit).
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubBitClockTooSlow`] if `sub_bit_hz` is below
    /// [`MIN_SUB_BIT_HZ`].
    pub const fn with_sub_bit_hz(self, sub_bit_hz: u32) -> Result<Self> {
        if sub_bit_hz < MIN_SUB_BIT_HZ {
            return Err(Error::SubBitClockTooSlow {
                sub_bit_hz,
                min: MIN_SUB_BIT_HZ,
            });
        }
        Ok(Self { sub_bit_hz, ..self })
    }

    /// Replaces the low time held after each frame.
    #[must_use]
    pub const fn with_reset_hold(self, reset_hold: Duration) -> Self {
        Self { reset_hold, ..self }
    }

    /// Start slot: high for every bit.
    #[must_use]
    pub const fn t1(&self) -> u8 {
        self.t1
    }

    /// Data slot: high for a `1`, low for a `0`.
    #[must_use]
    pub const fn t2(&self) -> u8 {
        self.t2
    }

    /// Stop slot: low for every bit.
    #[must_use]
    pub const fn t3(&self) -> u8 {
        self.t3
    }

    /// Sub-bit clock in Hz.
    #[must_use]
    pub const fn sub_bit_hz(&self) -> u32 {
        self.sub_bit_hz
    }

    /// Minimum low time after a frame before the next one may start.
    #[must_use]
    pub const fn reset_hold(&self) -> Duration {
        self.reset_hold
    }

    /// Length of one bit in sub-bit units. Independent of the bit value.
    #[must_use]
    pub const fn bit_units(&self) -> u32 {
        self.t1 as u32 + self.t2 as u32 + self.t3 as u32
    }

    /// The high/low split for one bit.
    #[must_use]
    pub const fn pulse(&self, bit: bool) -> Pulse {
        if bit {
            Pulse {
                high: self.t1 + self.t2,
                low: self.t3,
            }
        } else {
            Pulse {
                high: self.t1,
                low: self.t2 + self.t3,
            }
        }
    }

    /// Converts sub-bit units to nanoseconds, rounding up.
    #[must_use]
    pub const fn units_to_nanos(&self, units: u64) -> u64 {
        units
            .saturating_mul(NANOS_PER_SECOND)
            .div_ceil(self.sub_bit_hz as u64)
    }

    /// Time the line needs to shift out `led_count` LEDs, excluding the reset hold.
    #[must_use]
    pub const fn frame_duration(&self, led_count: usize) -> Duration {
        let units = (led_count as u64)
            .saturating_mul(BITS_PER_LED as u64)
            .saturating_mul(self.bit_units() as u64);
        Duration::from_micros(self.units_to_nanos(units).div_ceil(1_000))
    }

    /// PIO clock divider that makes one state-machine cycle last one sub-bit unit.
    ///
    /// Computed in kHz, as the divider's 24-bit integer part cannot hold the
    /// system clock in Hz.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockUnreachable`] if the divider would be below 1 or not
    /// representable.
    pub fn clock_divider(&self, sys_hz: u32) -> Result<U24F8> {
        let unreachable = Error::ClockUnreachable {
            sub_bit_hz: self.sub_bit_hz,
            sys_hz,
        };
        let sys_khz = U24F8::checked_from_num(sys_hz / 1_000);
        let sub_bit_khz = U24F8::checked_from_num(self.sub_bit_hz / 1_000);
        let (Some(sys_khz), Some(sub_bit_khz)) = (sys_khz, sub_bit_khz) else {
            return Err(unreachable);
        };
        match sys_khz.checked_div(sub_bit_khz) {
            Some(divider) if divider >= U24F8::ONE => Ok(divider),
            _ => Err(unreachable),
        }
    }
}

impl Default for LedTiming {
    fn default() -> Self {
        Self::WS2812
    }
}

/// High then low time of one bit, in sub-bit units.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pulse {
    /// Units the line is high at the start of the bit.
    pub high: u8,
    /// Units the line is low for the rest of the bit.
    pub low: u8,
}

impl Pulse {
    /// Total length of the bit.
    #[must_use]
    pub const fn units(&self) -> u32 {
        self.high as u32 + self.low as u32
    }
}

/// Assembles the side-set PIO program that shifts out one bit per loop.
///
/// The state machine must be configured with autopull at 24 bits, shifting left,
/// and a clock divider from [`LedTiming::clock_divider`]. The output pin idles
/// low while the FIFO is empty because the stalled `out` drives side-set 0.
#[must_use]
pub fn ws2812_program(timing: &LedTiming) -> Program<RP2040_MAX_PROGRAM_SIZE> {
    let side_set = SideSet::new(false, 1, false);
    let mut assembler: Assembler<RP2040_MAX_PROGRAM_SIZE> =
        Assembler::new_with_side_set(side_set);

    let mut wrap_target = assembler.label();
    let mut wrap_source = assembler.label();
    let mut do_zero = assembler.label();

    assembler.bind(&mut wrap_target);
    // Stop slot of the previous bit while the next bit is shifted into X.
    assembler.out_with_delay_and_side_set(OutDestination::X, 1, timing.t3 - 1, 0);
    // Start slot.
    assembler.jmp_with_delay_and_side_set(JmpCondition::XIsZero, &mut do_zero, timing.t1 - 1, 1);
    // Data slot for a 1.
    assembler.jmp_with_delay_and_side_set(JmpCondition::Always, &mut wrap_target, timing.t2 - 1, 1);
    assembler.bind(&mut do_zero);
    // Data slot for a 0.
    assembler.nop_with_delay_and_side_set(timing.t2 - 1, 0);
    assembler.bind(&mut wrap_source);

    assembler.assemble_with_wrap(wrap_source, wrap_target)
}

/// Host-side model of the data line for one refresh.
///
/// ```
/// use pico_led_scan::waveform::{LedTiming, LineImage};
///
/// let words = [0x00FF_0000];
/// let image = LineImage::of(&words, LedTiming::WS2812);
/// assert_eq!(image.frame_units(), 24 * 10);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LineImage<'a> {
    words: &'a [u32],
    timing: LedTiming,
}

impl<'a> LineImage<'a> {
    /// Models sending `words` with `timing`.
    #[must_use]
    pub const fn of(words: &'a [u32], timing: LedTiming) -> Self {
        Self { words, timing }
    }

    /// One pulse per bit, MSB first within each word, words in LED order.
    pub fn pulses(&self) -> impl Iterator<Item = Pulse> + 'a {
        let timing = self.timing;
        self.words.iter().flat_map(move |&word| {
            (0..BITS_PER_LED).map(move |bit_index| {
                let bit = (word >> (31 - bit_index)) & 1 == 1;
                timing.pulse(bit)
            })
        })
    }

    /// Number of bits on the line.
    #[must_use]
    pub fn bit_count(&self) -> usize {
        self.words.len().saturating_mul(BITS_PER_LED as usize)
    }

    /// Length of the bitstream in sub-bit units.
    #[must_use]
    pub fn frame_units(&self) -> u64 {
        self.pulses().map(|pulse| u64::from(pulse.units())).sum()
    }

    /// Bitstream plus reset hold, in nanoseconds.
    #[must_use]
    pub fn total_nanos(&self) -> u64 {
        let hold_nanos = self.timing.reset_hold.as_micros().saturating_mul(1_000);
        self.timing
            .units_to_nanos(self.frame_units())
            .saturating_add(hold_nanos)
    }
}
