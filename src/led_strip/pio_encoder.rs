//! PIO + DMA implementation of [`WaveformEncoder`].

use defmt::info;
use embassy_rp::Peri;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::dma::{AnyChannel, Channel};
use embassy_rp::pio::{
    Common, Config, Direction, FifoJoin, Instance, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_time::Timer;

use super::{LineIdle, WaveformEncoder};
use crate::Result;
use crate::waveform::{BITS_PER_LED, LedTiming, ws2812_program};

/// Drives the LED data pin from a PIO state machine.
///
/// The state machine runs [`ws2812_program`] with one cycle per sub-bit unit.
/// Frames are pushed into its TX FIFO by DMA, so neither the executor nor
/// interrupts can disturb the bit timing once a frame has started.
pub struct PioWaveformEncoder<'d, PIO: Instance, const SM: usize> {
    state_machine: StateMachine<'d, PIO, SM>,
    dma: Peri<'d, AnyChannel>,
    timing: LedTiming,
    line_idle: LineIdle,
}

impl<'d, PIO: Instance, const SM: usize> PioWaveformEncoder<'d, PIO, SM> {
    /// Loads the waveform program for `timing` and starts the state machine on `pin`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockUnreachable`](crate::Error::ClockUnreachable) if the
    /// sub-bit clock cannot be divided down from the system clock.
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut state_machine: StateMachine<'d, PIO, SM>,
        dma: Peri<'d, impl Channel>,
        pin: Peri<'d, impl PioPin>,
        timing: LedTiming,
    ) -> Result<Self> {
        let sys_hz = clk_sys_freq();
        let clock_divider = timing.clock_divider(sys_hz)?;

        let program = ws2812_program(&timing);
        let loaded_program = common.load_program(&program);
        let out_pin = common.make_pio_pin(pin);

        let mut config = Config::default();
        config.use_program(&loaded_program, &[&out_pin]);
        config.clock_divider = clock_divider;
        config.fifo_join = FifoJoin::TxOnly;
        config.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: BITS_PER_LED as u8,
            direction: ShiftDirection::Left,
        };

        state_machine.set_config(&config);
        state_machine.set_pin_dirs(Direction::Out, &[&out_pin]);
        state_machine.set_enable(true);

        info!(
            "PioWaveformEncoder: T1={} T2={} T3={} at {} Hz (sys {} Hz)",
            timing.t1(),
            timing.t2(),
            timing.t3(),
            timing.sub_bit_hz(),
            sys_hz
        );

        Ok(Self {
            state_machine,
            dma: dma.into(),
            timing,
            line_idle: LineIdle::new(),
        })
    }
}

impl<PIO: Instance, const SM: usize, const N: usize> WaveformEncoder<N>
    for PioWaveformEncoder<'_, PIO, SM>
{
    async fn send(&mut self, words: &[u32; N]) {
        // A dropped send may have left a frame or its hold on the line.
        self.line_idle.wait().await;
        let idle_at = self
            .line_idle
            .claim(self.timing.frame_duration(N) + self.timing.reset_hold());
        self.state_machine
            .tx()
            .dma_push(self.dma.reborrow(), words, false)
            .await;
        // DMA completes once the last word is in the FIFO; wait for it to drain too.
        Timer::at(idle_at).await;
    }
}
