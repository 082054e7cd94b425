//! Colors, the GRB wire packing, and the rainbow color wheel.

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`, `CYAN`, `MAGENTA`, `ORANGE`, `PURPLE`.
#[doc(inline)]
pub use smart_leds::colors;

use smart_leds::RGB8;

/// RGB color representation re-exported from the `smart_leds` crate.
pub type Rgb = RGB8;

/// All channels off.
pub const OFF: Rgb = Rgb::new(0, 0, 0);

/// Packs a color into a left-aligned pixel word: green in bits 31..24, red in
/// 23..16, blue in 15..8. The low byte is never shifted out by the encoder.
#[must_use]
pub const fn pack_grb(color: Rgb) -> u32 {
    ((color.g as u32) << 24) | ((color.r as u32) << 16) | ((color.b as u32) << 8)
}

/// Inverse of [`pack_grb`]. The low byte is ignored.
#[must_use]
#[expect(clippy::cast_possible_truncation, reason = "each channel is masked to 8 bits")]
pub const fn unpack_grb(word: u32) -> Rgb {
    Rgb::new(
        ((word >> 16) & 0xFF) as u8,
        ((word >> 24) & 0xFF) as u8,
        ((word >> 8) & 0xFF) as u8,
    )
}

/// Width of one hue band on the wheel.
const BAND: i32 = 85;

/// Maps a position on a 256-step color wheel to a color.
///
/// The wheel runs red → green → blue → red in three 85-step bands, fading one
/// channel down while the next fades up. Positions outside `0..=255` are off.
///
/// ```
/// use pico_led_scan::color::{Rgb, wheel};
///
/// assert_eq!(wheel(0), Rgb::new(255, 0, 0));
/// assert_eq!(wheel(85), Rgb::new(0, 255, 0));
/// assert_eq!(wheel(170), Rgb::new(0, 0, 255));
/// assert_eq!(wheel(-1), Rgb::new(0, 0, 0));
/// ```
#[must_use]
pub const fn wheel(position: i32) -> Rgb {
    if position < 0 || position > 255 {
        return OFF;
    }
    if position < BAND {
        let rise = ramp(position);
        return Rgb::new(255 - rise, rise, 0);
    }
    if position < 2 * BAND {
        let rise = ramp(position - BAND);
        return Rgb::new(0, 255 - rise, rise);
    }
    let rise = ramp(position - 2 * BAND);
    Rgb::new(rise, 0, 255 - rise)
}

// Offset within a band scaled to 0..=255. Position 255 lands on offset 85 of
// the last band, which still scales to exactly 255.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "offset is in 0..=85 so offset * 3 fits in u8"
)]
const fn ramp(offset: i32) -> u8 {
    (offset * 3) as u8
}
