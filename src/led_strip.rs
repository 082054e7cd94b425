//! A device abstraction for a NeoPixel-style (WS2812) LED strip.
//!
//! [`LedStrip`] owns a [`PixelBuffer`] and a [`WaveformEncoder`]. Pixels are
//! written with [`set`](LedStrip::set) and pushed to the LEDs with
//! [`show`](LedStrip::show). On the board the encoder is
//! [`PioWaveformEncoder`](pio_encoder::PioWaveformEncoder), which generates the bit
//! timing on a PIO state machine.
//!
//! # Example: Light the First LED Red
//!
//! ```rust,ignore
//! # #![no_std]
//! # #![no_main]
//! # use panic_probe as _;
//! use embassy_rp::bind_interrupts;
//! use embassy_rp::peripherals::PIO0;
//! use embassy_rp::pio::{InterruptHandler, Pio};
//! use pico_led_scan::led_strip::{LedStrip, colors, pio_encoder::PioWaveformEncoder};
//! use pico_led_scan::waveform::LedTiming;
//!
//! bind_interrupts!(struct Irqs {
//!     PIO0_IRQ_0 => InterruptHandler<PIO0>;
//! });
//!
//! async fn example(p: embassy_rp::Peripherals) -> pico_led_scan::Result<()> {
//!     let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
//!     let encoder =
//!         PioWaveformEncoder::new(&mut common, sm0, p.DMA_CH0, p.PIN_16, LedTiming::WS2812)?;
//!     let mut led_strip = LedStrip::<_, 1>::new(encoder);
//!
//!     led_strip.set(0, colors::RED);
//!     led_strip.show().await;
//!     Ok(())
//! }
//! ```

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use crate::color::colors;

use embassy_time::{Duration, Instant, Timer};

use crate::color::{OFF, Rgb};
use crate::pixel_buffer::PixelBuffer;

#[cfg(not(feature = "host"))]
pub mod pio_encoder;

/// Sends a frame of packed pixel words down the data line.
///
/// Implementations must produce every bit with hardware timing and must not
/// return until the line has been held low for the part's reset time, so that
/// back-to-back calls never merge two frames.
///
/// A `send` may be dropped part-way (for example when it loses a `select`).
/// The next `send` must still wait out whatever is left of the previous frame
/// and its reset hold before it starts; [`LineIdle`] tracks that deadline.
pub trait WaveformEncoder<const N: usize> {
    /// Emits all `N` words, 24 bits each, MSB first, then holds the reset time.
    async fn send(&mut self, words: &[u32; N]);
}

/// When the data line is next free to start a frame.
///
/// Claim the line with [`claim`](Self::claim) before the first word goes out,
/// so the deadline is recorded even if the sending future is dropped before it
/// finishes. Every frame starts with [`wait`](Self::wait).
///
/// ```
/// use embassy_time::{Duration, Instant};
/// use pico_led_scan::led_strip::LineIdle;
///
/// let mut line_idle = LineIdle::new();
/// assert!(line_idle.idle_at() <= Instant::now());
/// let idle_at = line_idle.claim(Duration::from_millis(10));
/// assert_eq!(line_idle.idle_at(), idle_at);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LineIdle {
    idle_at: Instant,
}

impl LineIdle {
    /// A line that has never been driven: free immediately.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            idle_at: Instant::MIN,
        }
    }

    /// Waits until the previous frame and its reset hold are over.
    pub async fn wait(&self) {
        Timer::at(self.idle_at).await;
    }

    /// Marks the line busy for `busy` from now and returns the new deadline.
    pub fn claim(&mut self, busy: Duration) -> Instant {
        self.idle_at = Instant::now() + busy;
        self.idle_at
    }

    /// The deadline set by the last [`claim`](Self::claim).
    #[must_use]
    pub const fn idle_at(&self) -> Instant {
        self.idle_at
    }
}

impl Default for LineIdle {
    fn default() -> Self {
        Self::new()
    }
}

/// A strip of `N` LEDs driven through a [`WaveformEncoder`].
///
/// See the [module documentation](mod@crate::led_strip) for usage.
pub struct LedStrip<E, const N: usize> {
    encoder: E,
    buffer: PixelBuffer<N>,
}

impl<E, const N: usize> LedStrip<E, N>
where
    E: WaveformEncoder<N>,
{
    /// Number of LEDs on the strip.
    pub const LEN: usize = N;

    /// Creates a strip with every LED off. Nothing is sent until [`show`](Self::show).
    #[must_use]
    pub const fn new(encoder: E) -> Self {
        Self {
            encoder,
            buffer: PixelBuffer::new(),
        }
    }

    /// Writes the color of one LED into the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn set(&mut self, index: usize, color: Rgb) {
        self.buffer.set(index, color);
    }

    /// Reads back the buffered color of one LED.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[must_use]
    pub fn get(&self, index: usize) -> Rgb {
        self.buffer.get(index)
    }

    /// The buffered pixels.
    #[must_use]
    pub const fn buffer(&self) -> &PixelBuffer<N> {
        &self.buffer
    }

    /// Mutable access to the buffered pixels.
    pub const fn buffer_mut(&mut self) -> &mut PixelBuffer<N> {
        &mut self.buffer
    }

    /// The encoder this strip writes through.
    #[must_use]
    pub const fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Sends the buffer to the LEDs. Returns after the reset hold, so the next
    /// call can start immediately.
    pub async fn show(&mut self) {
        self.encoder.send(self.buffer.words()).await;
    }

    /// Turns every LED off and shows the result.
    ///
    /// Safe to call at any point, including right after an animation was
    /// dropped mid-frame: it overwrites the whole buffer first, and the encoder
    /// holds the new frame back until the line has reset.
    pub async fn blank(&mut self) {
        self.buffer.fill(OFF);
        self.show().await;
    }
}
