//! A device abstraction for a two-bank input bus behind a select/clock latch.
//!
//! The bus is `W` parallel inputs. A select line chooses bank A (low) or bank B
//! (high), and a pulse on the clock line latches the chosen bank onto the bus.
//! See [`InputScanner`] for the exact phase sequence.
//!
//! See the [`scan_watch`] module for running the scanner in a background loop.

use embassy_time::Duration;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::{Error, Result};

pub mod scan_watch;

// ============================================================================
// Configuration
// ============================================================================

/// Default wait after every select, clock and sample step.
pub const SETTLE_DEFAULT: Duration = Duration::from_millis(20);

/// Timing configuration for [`InputScanner`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScanConfig {
    /// Wait after every line change and every sample. Eight waits per scan.
    ///
    /// Waits up to about 71 minutes keep microsecond resolution; longer ones
    /// are rounded down to whole milliseconds and capped at `u32::MAX` ms
    /// (about 49 days).
    pub settle: Duration,
}

impl ScanConfig {
    /// [`SETTLE_DEFAULT`] between steps (160 ms per scan).
    pub const DEFAULT: Self = Self {
        settle: SETTLE_DEFAULT,
    };

    /// Uses `settle` between steps.
    #[must_use]
    pub const fn with_settle(settle: Duration) -> Self {
        Self { settle }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// ScanSample - one bank's inputs in logical order
// ============================================================================

/// The state of every input line of one bank, in logical order.
///
/// Logical index 0 is the highest-numbered physical input: the physical read
/// order is reversed. Consumers index by logical position, so this ordering is
/// part of the contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanSample<const W: usize>([bool; W]);

impl<const W: usize> ScanSample<W> {
    /// Builds a sample from inputs read in physical pin order.
    #[must_use]
    pub fn from_physical(mut physical: [bool; W]) -> Self {
        physical.reverse();
        Self(physical)
    }

    /// The levels in logical order.
    #[must_use]
    pub const fn levels(&self) -> &[bool; W] {
        &self.0
    }

    /// Level at logical position `index`, or `None` past the bus width.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    /// Packs the sample into an integer, logical index 0 in bit 0.
    #[must_use]
    pub fn bits(&self) -> u32 {
        const { assert!(W <= 32, "bits() supports buses up to 32 lines") };
        self.0
            .iter()
            .rev()
            .fold(0, |bits, &level| (bits << 1) | u32::from(level))
    }
}

impl<const W: usize> From<ScanSample<W>> for [bool; W] {
    fn from(sample: ScanSample<W>) -> Self {
        sample.0
    }
}

/// Both banks from one scan.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanCycle<const W: usize> {
    /// Sampled with select low.
    pub bank_a: ScanSample<W>,
    /// Sampled with select high.
    pub bank_b: ScanSample<W>,
}

// ============================================================================
// InputScanner
// ============================================================================

/// Drives the select and clock lines and samples the input bus, one bank at a time.
///
/// Each [`scan`](Self::scan) runs these steps strictly in order, waiting
/// [`ScanConfig::settle`] after every one of them:
///
/// 1. select low (bank A)
/// 2. clock high
/// 3. clock low
/// 4. sample the bus into bank A
/// 5. select high (bank B)
/// 6. clock high
/// 7. clock low
/// 8. sample the bus into bank B
///
/// Step 1 forces select low, so a scan never depends on how the previous one
/// ended. Levels are taken as read: there is no debouncing and no retry, and a
/// floating input reports whatever it happens to read.
///
/// The waits go through `D`, so on an embassy executor (with
/// [`embassy_time::Delay`]) every settle is a suspension point for other tasks.
///
/// # Example
///
/// ```rust,ignore
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// use embassy_rp::gpio::{Input, Level, Output, Pull};
/// use embassy_time::Delay;
/// use pico_led_scan::scanner::{InputScanner, ScanConfig};
///
/// async fn example(p: embassy_rp::Peripherals) -> pico_led_scan::Result<()> {
///     let inputs = [
///         Input::new(p.PIN_0, Pull::None),
///         Input::new(p.PIN_1, Pull::None),
///         Input::new(p.PIN_2, Pull::None),
///         Input::new(p.PIN_3, Pull::None),
///         Input::new(p.PIN_4, Pull::None),
///         Input::new(p.PIN_5, Pull::None),
///         Input::new(p.PIN_6, Pull::None),
///         Input::new(p.PIN_7, Pull::None),
///     ];
///     let mut scanner = InputScanner::new(
///         Output::new(p.PIN_8, Level::Low),
///         Output::new(p.PIN_18, Level::Low),
///         inputs,
///         Delay,
///         ScanConfig::DEFAULT,
///     );
///
///     let cycle = scanner.scan().await?;
///     defmt::info!("A={} B={}", cycle.bank_a, cycle.bank_b);
///     Ok(())
/// }
/// ```
pub struct InputScanner<S, C, I, D, const W: usize> {
    select: S,
    clock: C,
    inputs: [I; W],
    delay: D,
    config: ScanConfig,
}

impl<S, C, I, D, const W: usize> InputScanner<S, C, I, D, W>
where
    S: OutputPin,
    C: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    /// Creates a scanner. The lines are not touched until the first scan.
    #[must_use]
    pub const fn new(select: S, clock: C, inputs: [I; W], delay: D, config: ScanConfig) -> Self {
        Self {
            select,
            clock,
            inputs,
            delay,
            config,
        }
    }

    /// The timing in use.
    #[must_use]
    pub const fn config(&self) -> ScanConfig {
        self.config
    }

    /// Runs one full select/clock/sample sequence over both banks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if any line reports a failure. The sequence stops at
    /// the failing step.
    pub async fn scan(&mut self) -> Result<ScanCycle<W>> {
        self.select.set_low().map_err(pin_error)?;
        self.settle().await;
        let bank_a = self.clock_and_sample().await?;

        self.select.set_high().map_err(pin_error)?;
        self.settle().await;
        let bank_b = self.clock_and_sample().await?;

        Ok(ScanCycle {
            bank_a: ScanSample::from_physical(bank_a),
            bank_b: ScanSample::from_physical(bank_b),
        })
    }

    /// Gives the lines and the delay back.
    pub fn release(self) -> (S, C, [I; W], D) {
        (self.select, self.clock, self.inputs, self.delay)
    }

    async fn clock_and_sample(&mut self) -> Result<[bool; W]> {
        self.clock.set_high().map_err(pin_error)?;
        self.settle().await;
        self.clock.set_low().map_err(pin_error)?;
        self.settle().await;
        let physical = self.sample()?;
        self.settle().await;
        Ok(physical)
    }

    fn sample(&mut self) -> Result<[bool; W]> {
        let mut physical = [false; W];
        for (level, input) in physical.iter_mut().zip(self.inputs.iter_mut()) {
            *level = input.is_high().map_err(pin_error)?;
        }
        Ok(physical)
    }

    async fn settle(&mut self) {
        let settle = self.config.settle;
        if let Ok(micros) = u32::try_from(settle.as_micros()) {
            self.delay.delay_us(micros).await;
        } else {
            let millis = u32::try_from(settle.as_millis()).unwrap_or(u32::MAX);
            self.delay.delay_ms(millis).await;
        }
    }
}

fn pin_error(error: impl embedded_hal::digital::Error) -> Error {
    Error::Pin(error.kind())
}
