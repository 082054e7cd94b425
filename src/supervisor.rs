//! Runs the animation next to other work and blanks the strip when anything fails.

use core::convert::Infallible;
use core::future::Future;

use embassy_futures::select::{Either, select};

use crate::Error;
use crate::animation::{AnimationConfig, animation_loop};
use crate::led_strip::{LedStrip, WaveformEncoder};

/// Animates `led_strip` while `work` runs, until `work` fails.
///
/// When `work` returns its error, the animation is dropped wherever it was, every
/// LED is set to off with one final [`show`](LedStrip::show), and the error is
/// handed back. The cleanup has no failure path of its own.
///
/// Nothing here survives a panic (the firmware aborts) or a power loss; the
/// LEDs keep whatever frame they last latched.
pub async fn run_until_failure<E, F, const N: usize>(
    led_strip: &mut LedStrip<E, N>,
    config: AnimationConfig,
    work: F,
) -> Error
where
    E: WaveformEncoder<N>,
    F: Future<Output = Result<Infallible, Error>>,
{
    let error = match select(animation_loop(led_strip, config), work).await {
        Either::First(never) | Either::Second(Ok(never)) => match never {},
        Either::Second(Err(error)) => error,
    };

    #[cfg(feature = "defmt")]
    defmt::warn!(
        "run_until_failure: {}; turning LEDs off",
        defmt::Display2Format(&error)
    );
    led_strip.blank().await;
    error
}
