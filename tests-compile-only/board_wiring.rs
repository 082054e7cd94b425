#![allow(missing_docs)]
#![no_std]
#![no_main]
#![allow(dead_code, reason = "compile-only checks")]
//! Compile-only checks that the board peripherals plug into the device abstractions.

use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_time::Delay;
use panic_probe as _;
use pico_led_scan::led_strip::{LedStrip, WaveformEncoder, pio_encoder::PioWaveformEncoder};
use pico_led_scan::scanner::InputScanner;

const fn assert_encoder<E: WaveformEncoder<N>, const N: usize>() {}

// The PIO encoder works for any strip length, on any PIO and state machine.
const _: () = assert_encoder::<PioWaveformEncoder<'static, PIO0, 0>, 1>();
const _: () = assert_encoder::<PioWaveformEncoder<'static, PIO0, 3>, 96>();
const _: () = assert_encoder::<PioWaveformEncoder<'static, PIO1, 2>, 8>();

type BoardStrip = LedStrip<PioWaveformEncoder<'static, PIO0, 0>, 1>;
type BoardScanner = InputScanner<Output<'static>, Output<'static>, Input<'static>, Delay, 8>;

async fn scan_once(scanner: &mut BoardScanner) -> pico_led_scan::Result<u32> {
    let cycle = scanner.scan().await?;
    Ok(cycle.bank_a.bits() | (cycle.bank_b.bits() << 8))
}

async fn blank(led_strip: &mut BoardStrip) {
    led_strip.blank().await;
}

fn main() {}
