//! Rainbow animation for an [`LedStrip`].
//!
//! See [`animation_loop`] for the loop and [`RainbowCycle`] for the per-frame math.

use core::convert::Infallible;

use embassy_time::{Duration, Timer};

use crate::color::wheel;
use crate::led_strip::{LedStrip, WaveformEncoder};
use crate::pixel_buffer::PixelBuffer;

/// Default wait between animation frames.
pub const TICK_DEFAULT: Duration = Duration::from_millis(10);

/// Timing configuration for [`animation_loop`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnimationConfig {
    /// Wait after each frame has been shown.
    pub tick: Duration,
}

impl AnimationConfig {
    /// [`TICK_DEFAULT`] between frames.
    pub const DEFAULT: Self = Self { tick: TICK_DEFAULT };

    /// Uses `tick` between frames.
    #[must_use]
    pub const fn with_tick(tick: Duration) -> Self {
        Self { tick }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Position on the color wheel, advanced once per frame.
///
/// The position runs `0..255` and wraps, so it never reaches 255. Pixel `i` of an
/// `N`-pixel strip is offset by `i * 256 / N` around the wheel; a single pixel
/// shows `wheel(position)` directly.
///
/// ```
/// use pico_led_scan::animation::RainbowCycle;
/// use pico_led_scan::color::{Rgb, wheel};
/// use pico_led_scan::pixel_buffer::PixelBuffer;
///
/// let mut rainbow = RainbowCycle::new();
/// let mut buffer = PixelBuffer::<1>::new();
/// rainbow.advance();
/// rainbow.render(&mut buffer);
/// assert_eq!(buffer.get(0), wheel(1));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RainbowCycle {
    position: u8,
}

impl RainbowCycle {
    /// Number of distinct positions before the cycle repeats.
    pub const PERIOD: u8 = 255;

    /// Starts at position 0 (red).
    #[must_use]
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> u8 {
        self.position
    }

    /// Moves one step around the wheel.
    pub const fn advance(&mut self) {
        self.position = if self.position + 1 >= Self::PERIOD {
            0
        } else {
            self.position + 1
        };
    }

    /// Writes the colors for the current position into `buffer`.
    pub fn render<const N: usize>(&self, buffer: &mut PixelBuffer<N>) {
        for index in 0..N {
            buffer.set(index, wheel(self.hue(index, N)));
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "result is reduced modulo 256"
    )]
    fn hue(&self, index: usize, len: usize) -> i32 {
        let offset = index.saturating_mul(256) / len;
        (offset.wrapping_add(usize::from(self.position)) % 256) as i32
    }
}

/// Shows rainbow frames on `led_strip` forever.
///
/// Each tick renders the next [`RainbowCycle`] position, shows it, then waits
/// [`AnimationConfig::tick`]. Cancel it by dropping the future (for example by
/// losing a `select`).
pub async fn animation_loop<E, const N: usize>(
    led_strip: &mut LedStrip<E, N>,
    config: AnimationConfig,
) -> Infallible
where
    E: WaveformEncoder<N>,
{
    #[cfg(feature = "defmt")]
    defmt::info!(
        "animation_loop: {} LEDs, tick {} ms",
        N,
        config.tick.as_millis()
    );
    let mut rainbow = RainbowCycle::new();
    loop {
        rainbow.render(led_strip.buffer_mut());
        led_strip.show().await;
        rainbow.advance();
        Timer::after(config.tick).await;
    }
}
