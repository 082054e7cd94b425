//! Rainbow on one WS2812 LED while scanning two banks of eight inputs.
//!
//! Wiring: LED data on GPIO16, select on GPIO8, clock on GPIO18, input bus on
//! GPIO0..GPIO7. Each scan is logged over RTT.
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;
use core::panic;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_time::Delay;
use pico_led_scan::{
    Error, Result,
    animation::AnimationConfig,
    led_strip::{LedStrip, pio_encoder::PioWaveformEncoder},
    scanner::{
        InputScanner, ScanConfig,
        scan_watch::{ScanWatch, ScanWatchStatic, scan_loop},
    },
    supervisor::run_until_failure,
    waveform::LedTiming,
};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

const LED_COUNT: usize = 1;
const INPUT_COUNT: usize = 8;

static SCAN_WATCH_STATIC: ScanWatchStatic<INPUT_COUNT> = ScanWatchStatic::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let encoder =
        PioWaveformEncoder::new(&mut common, sm0, p.DMA_CH0, p.PIN_16, LedTiming::WS2812)?;
    let mut led_strip = LedStrip::<_, LED_COUNT>::new(encoder);

    // Bus pins in physical order; the scanner reverses them into logical order.
    let inputs = [
        Input::new(p.PIN_0, Pull::None),
        Input::new(p.PIN_1, Pull::None),
        Input::new(p.PIN_2, Pull::None),
        Input::new(p.PIN_3, Pull::None),
        Input::new(p.PIN_4, Pull::None),
        Input::new(p.PIN_5, Pull::None),
        Input::new(p.PIN_6, Pull::None),
        Input::new(p.PIN_7, Pull::None),
    ];
    let mut scanner = InputScanner::new(
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_18, Level::Low),
        inputs,
        Delay,
        ScanConfig::DEFAULT,
    );

    let token = report_task(ScanWatch::new(&SCAN_WATCH_STATIC));
    spawner.spawn(token).map_err(Error::TaskSpawn)?;

    // The scan lines and the LED line are disjoint, so the two loops share nothing.
    let error = run_until_failure(
        &mut led_strip,
        AnimationConfig::DEFAULT,
        scan_loop(&mut scanner, &SCAN_WATCH_STATIC),
    )
    .await;
    Err(error)
}

#[embassy_executor::task]
async fn report_task(scan_watch: ScanWatch<INPUT_COUNT>) -> ! {
    loop {
        let report = scan_watch.wait().await;
        info!(
            "{} ms #{}: A={} B={}",
            report.timestamp.as_millis(),
            scan_watch.cycles(),
            report.bank_a.levels(),
            report.bank_b.levels()
        );
    }
}
