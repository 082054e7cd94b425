//! Per-LED color state in the wire format the waveform encoder consumes.
//!
//! See [`PixelBuffer`] for usage.

use crate::color::{OFF, Rgb, pack_grb, unpack_grb};

/// One packed GRB word per LED, in strip order.
///
/// Words are stored already packed (see [`pack_grb`](crate::color::pack_grb)) so
/// that a refresh can hand the buffer straight to DMA. The length is the LED
/// count and is fixed at compile time; a zero-length buffer does not compile.
///
/// ```
/// use pico_led_scan::color::Rgb;
/// use pico_led_scan::pixel_buffer::PixelBuffer;
///
/// let mut buffer = PixelBuffer::<2>::new();
/// buffer.set(1, Rgb::new(255, 0, 0));
/// assert_eq!(buffer.word(1), 0x00FF_0000);
/// assert_eq!(buffer.get(1), Rgb::new(255, 0, 0));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PixelBuffer<const N: usize> {
    words: [u32; N],
}

impl<const N: usize> PixelBuffer<N> {
    /// Number of LEDs in this buffer.
    pub const LEN: usize = N;

    /// Creates a buffer with every LED off.
    #[must_use]
    pub const fn new() -> Self {
        const { assert!(N > 0, "LED count must be at least 1") };
        Self { words: [0; N] }
    }

    /// Writes the color of the LED at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn set(&mut self, index: usize, color: Rgb) {
        assert!(index < N, "pixel index {index} out of range for {N} LEDs");
        if let Some(word) = self.words.get_mut(index) {
            *word = pack_grb(color);
        }
    }

    /// Reads back the color of the LED at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[must_use]
    pub fn get(&self, index: usize) -> Rgb {
        unpack_grb(self.word(index))
    }

    /// The packed word of the LED at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[must_use]
    pub fn word(&self, index: usize) -> u32 {
        assert!(index < N, "pixel index {index} out of range for {N} LEDs");
        self.words.get(index).copied().unwrap_or_default()
    }

    /// Sets every LED to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.words = [pack_grb(color); N];
    }

    /// Turns every LED off.
    pub fn clear(&mut self) {
        self.fill(OFF);
    }

    /// The packed words, in strip order.
    #[must_use]
    pub const fn words(&self) -> &[u32; N] {
        &self.words
    }
}

impl<const N: usize> Default for PixelBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

