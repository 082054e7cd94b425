//! Continuous scanning with the latest result published through a signal.
//!
//! Run [`scan_loop`] in its own task (or `select` it against other work) and read
//! reports with [`ScanWatch::wait`]. Publishing never blocks: if nobody reads a
//! report before the next scan finishes, it is replaced.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Instant;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use portable_atomic::{AtomicU32, Ordering};

use super::{InputScanner, ScanSample};
use crate::Result;

/// One scan with the time it completed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanReport<const W: usize> {
    /// Uptime when bank B had been sampled and settled.
    pub timestamp: Instant,
    /// Sampled with select low.
    pub bank_a: ScanSample<W>,
    /// Sampled with select high.
    pub bank_b: ScanSample<W>,
}

// ============================================================================
// ScanWatchStatic - Static resources for scan reporting
// ============================================================================

/// Static resources shared by [`scan_loop`] and its [`ScanWatch`] readers.
///
/// ```
/// use pico_led_scan::scanner::scan_watch::{ScanWatch, ScanWatchStatic};
///
/// static SCAN_WATCH_STATIC: ScanWatchStatic<8> = ScanWatchStatic::new();
/// let scan_watch = ScanWatch::new(&SCAN_WATCH_STATIC);
/// assert_eq!(scan_watch.cycles(), 0);
/// ```
pub struct ScanWatchStatic<const W: usize> {
    signal: Signal<CriticalSectionRawMutex, ScanReport<W>>,
    cycles: AtomicU32,
}

impl<const W: usize> ScanWatchStatic<W> {
    /// Creates the static resources.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
            cycles: AtomicU32::new(0),
        }
    }

    fn publish(&self, report: ScanReport<W>) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
        self.signal.signal(report);
    }
}

impl<const W: usize> Default for ScanWatchStatic<W> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ScanWatch - Handle for reading scan reports
// ============================================================================

/// Reader side of a running [`scan_loop`].
#[derive(Clone, Copy)]
pub struct ScanWatch<const W: usize> {
    scan_watch_static: &'static ScanWatchStatic<W>,
}

impl<const W: usize> ScanWatch<W> {
    /// Creates a reader for the loop publishing into `scan_watch_static`.
    #[must_use]
    pub const fn new(scan_watch_static: &'static ScanWatchStatic<W>) -> Self {
        Self { scan_watch_static }
    }

    /// Waits for the next report that has not been read yet.
    pub async fn wait(&self) -> ScanReport<W> {
        self.scan_watch_static.signal.wait().await
    }

    /// Number of scans completed so far, including ones nobody read.
    #[must_use]
    pub fn cycles(&self) -> u32 {
        self.scan_watch_static.cycles.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Background loop
// ============================================================================

/// Scans forever, publishing every result into `scan_watch_static`.
///
/// The pace is set by the scanner's settle delays alone; slow readers do not
/// hold it back.
///
/// # Errors
///
/// Returns the first pin error. It never returns otherwise.
pub async fn scan_loop<S, C, I, D, const W: usize>(
    scanner: &mut InputScanner<S, C, I, D, W>,
    scan_watch_static: &ScanWatchStatic<W>,
) -> Result<Infallible>
where
    S: OutputPin,
    C: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    #[cfg(feature = "defmt")]
    defmt::info!(
        "scan_loop: {} inputs, settle {} ms",
        W,
        scanner.config().settle.as_millis()
    );
    loop {
        let cycle = scanner.scan().await?;
        let report = ScanReport {
            timestamp: Instant::now(),
            bank_a: cycle.bank_a,
            bank_b: cycle.bank_b,
        };
        #[cfg(feature = "defmt")]
        defmt::trace!("scan_loop: {}", report);
        scan_watch_static.publish(report);
    }
}
