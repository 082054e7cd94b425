#![allow(missing_docs)]
//! Host-level tests for the two-bank input scanner, using recording mock pins.

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use embassy_futures::block_on;
use embassy_futures::select::{Either, select};
use embassy_time::Duration;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use pico_led_scan::Error;
use pico_led_scan::scanner::scan_watch::{ScanWatch, ScanWatchStatic, scan_loop};
use pico_led_scan::scanner::{InputScanner, ScanConfig, ScanSample};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Event {
    Select(bool),
    Clock(bool),
    Read(usize),
    Settle(u32),
}

/// Two banks behind a latch: reads return whichever bank select currently chooses.
#[derive(Default)]
struct Bus {
    select: bool,
    bank_a: [bool; 8],
    bank_b: [bool; 8],
    events: Vec<Event>,
}

type SharedBus = Rc<RefCell<Bus>>;

fn shared_bus(bank_a: [bool; 8], bank_b: [bool; 8]) -> SharedBus {
    Rc::new(RefCell::new(Bus {
        bank_a,
        bank_b,
        ..Bus::default()
    }))
}

struct SelectLine(SharedBus);

impl ErrorType for SelectLine {
    type Error = Infallible;
}

impl OutputPin for SelectLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut bus = self.0.borrow_mut();
        bus.select = false;
        bus.events.push(Event::Select(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut bus = self.0.borrow_mut();
        bus.select = true;
        bus.events.push(Event::Select(true));
        Ok(())
    }
}

struct ClockLine(SharedBus);

impl ErrorType for ClockLine {
    type Error = Infallible;
}

impl OutputPin for ClockLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().events.push(Event::Clock(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().events.push(Event::Clock(true));
        Ok(())
    }
}

struct BusInput {
    bus: SharedBus,
    index: usize,
}

impl ErrorType for BusInput {
    type Error = Infallible;
}

impl InputPin for BusInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut bus = self.bus.borrow_mut();
        bus.events.push(Event::Read(self.index));
        let bank = if bus.select { bus.bank_b } else { bus.bank_a };
        Ok(bank[self.index])
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

struct BrokenInput;

impl ErrorType for BrokenInput {
    type Error = ErrorKind;
}

impl InputPin for BrokenInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// Records each wait and yields once, so `select` can poll its other branch.
struct RecordingDelay(SharedBus);

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().events.push(Event::Settle(ns));
        embassy_futures::yield_now().await;
    }
}

type MockScanner = InputScanner<SelectLine, ClockLine, BusInput, RecordingDelay, 8>;

fn mock_scanner(bus: &SharedBus, config: ScanConfig) -> MockScanner {
    let inputs = core::array::from_fn(|index| BusInput {
        bus: Rc::clone(bus),
        index,
    });
    InputScanner::new(
        SelectLine(Rc::clone(bus)),
        ClockLine(Rc::clone(bus)),
        inputs,
        RecordingDelay(Rc::clone(bus)),
        config,
    )
}

const SETTLE_NS: u32 = 20_000_000;

#[test]
fn scan_runs_eight_phases_in_order() {
    let bus = shared_bus([false; 8], [false; 8]);
    let mut scanner = mock_scanner(&bus, ScanConfig::DEFAULT);
    block_on(scanner.scan()).expect("mock pins never fail");

    let reads = (0..8).map(Event::Read);
    let mut expected = vec![
        Event::Select(false),
        Event::Settle(SETTLE_NS),
        Event::Clock(true),
        Event::Settle(SETTLE_NS),
        Event::Clock(false),
        Event::Settle(SETTLE_NS),
    ];
    expected.extend(reads.clone());
    expected.extend([
        Event::Settle(SETTLE_NS),
        Event::Select(true),
        Event::Settle(SETTLE_NS),
        Event::Clock(true),
        Event::Settle(SETTLE_NS),
        Event::Clock(false),
        Event::Settle(SETTLE_NS),
    ]);
    expected.extend(reads);
    expected.push(Event::Settle(SETTLE_NS));

    assert_eq!(bus.borrow().events, expected);
}

#[test]
fn each_scan_waits_eight_times() {
    let bus = shared_bus([false; 8], [false; 8]);
    let mut scanner = mock_scanner(&bus, ScanConfig::with_settle(Duration::from_millis(3)));
    block_on(scanner.scan()).expect("mock pins never fail");
    block_on(scanner.scan()).expect("mock pins never fail");

    let bus = bus.borrow();
    let settles: Vec<u32> = bus
        .events
        .iter()
        .filter_map(|event| match event {
            Event::Settle(ns) => Some(*ns),
            _ => None,
        })
        .collect();
    assert_eq!(settles, vec![3_000_000; 16]);

    let rising = bus
        .events
        .iter()
        .filter(|&&event| event == Event::Clock(true))
        .count();
    assert_eq!(rising, 4);
}

#[test]
fn physical_order_is_reversed() {
    let mut bank_a = [false; 8];
    bank_a[0] = true;
    let bus = shared_bus(bank_a, [false; 8]);
    let mut scanner = mock_scanner(&bus, ScanConfig::DEFAULT);
    let cycle = block_on(scanner.scan()).expect("mock pins never fail");

    assert_eq!(
        cycle.bank_a.levels(),
        &[false, false, false, false, false, false, false, true]
    );
    assert_eq!(cycle.bank_b.levels(), &[false; 8]);
    assert_eq!(cycle.bank_a.get(7), Some(true));
    assert_eq!(cycle.bank_a.get(8), None);
}

#[test]
fn banks_follow_select() {
    let bank_a = [true, true, false, false, false, false, false, false];
    let bus = shared_bus(bank_a, [true; 8]);
    let mut scanner = mock_scanner(&bus, ScanConfig::DEFAULT);
    let cycle = block_on(scanner.scan()).expect("mock pins never fail");

    assert_eq!(cycle.bank_a.bits(), 0b1100_0000);
    assert_eq!(cycle.bank_b.levels(), &[true; 8]);
    assert_eq!(cycle.bank_b.bits(), 0xFF);
}

#[test]
fn all_lines_high_reads_all_true_in_both_banks() {
    let bus = shared_bus([true; 8], [true; 8]);
    let mut scanner = mock_scanner(&bus, ScanConfig::DEFAULT);
    let cycle = block_on(scanner.scan()).expect("mock pins never fail");

    assert_eq!(cycle.bank_a.levels(), &[true; 8]);
    assert_eq!(cycle.bank_b.levels(), &[true; 8]);
}

#[test]
fn long_settle_is_not_truncated() {
    // Two hours: more microseconds than fit in a u32.
    let settle = Duration::from_secs(2 * 60 * 60);
    let bus = shared_bus([false; 8], [false; 8]);
    let mut scanner = mock_scanner(&bus, ScanConfig::with_settle(settle));
    block_on(scanner.scan()).expect("mock pins never fail");

    let total_ns: u64 = bus
        .borrow()
        .events
        .iter()
        .filter_map(|event| match event {
            Event::Settle(ns) => Some(u64::from(*ns)),
            _ => None,
        })
        .sum();
    assert_eq!(total_ns, 8 * settle.as_micros() * 1_000);
}

#[test]
fn sample_bits_put_logical_zero_in_bit_zero() {
    let sample = ScanSample::from_physical([false, false, false, false, false, false, false, true]);
    assert!(sample.levels()[0]);
    assert_eq!(sample.bits(), 1);
    let levels: [bool; 8] = sample.into();
    assert!(levels[0]);
}

#[test]
fn pin_failure_stops_the_scan() {
    let bus = shared_bus([false; 8], [false; 8]);
    let inputs = core::array::from_fn(|_| BrokenInput);
    let mut scanner: InputScanner<_, _, _, _, 8> = InputScanner::new(
        SelectLine(Rc::clone(&bus)),
        ClockLine(Rc::clone(&bus)),
        inputs,
        RecordingDelay(Rc::clone(&bus)),
        ScanConfig::DEFAULT,
    );

    let result = block_on(scanner.scan());
    assert!(matches!(result, Err(Error::Pin(ErrorKind::Other))));
    assert!(
        !bus.borrow().events.contains(&Event::Select(true)),
        "bank B must not be selected after a failure"
    );
}

#[test]
fn scan_loop_publishes_reports() {
    static SCAN_WATCH_STATIC: ScanWatchStatic<8> = ScanWatchStatic::new();
    let scan_watch = ScanWatch::new(&SCAN_WATCH_STATIC);

    let mut bank_b = [false; 8];
    bank_b[7] = true;
    let bus = shared_bus([false; 8], bank_b);
    let mut scanner = mock_scanner(&bus, ScanConfig::DEFAULT);

    let report = match block_on(select(
        scan_loop(&mut scanner, &SCAN_WATCH_STATIC),
        scan_watch.wait(),
    )) {
        Either::First(Ok(never)) => match never {},
        Either::First(Err(error)) => panic!("scan_loop failed: {error}"),
        Either::Second(report) => report,
    };

    assert_eq!(report.bank_a.levels(), &[false; 8]);
    assert_eq!(report.bank_b.get(0), Some(true));
    assert!(scan_watch.cycles() >= 1);
}

#[test]
fn scan_loop_returns_the_first_pin_error() {
    static SCAN_WATCH_STATIC: ScanWatchStatic<8> = ScanWatchStatic::new();
    let bus = shared_bus([false; 8], [false; 8]);
    let inputs = core::array::from_fn(|_| BrokenInput);
    let mut scanner: InputScanner<_, _, _, _, 8> = InputScanner::new(
        SelectLine(Rc::clone(&bus)),
        ClockLine(Rc::clone(&bus)),
        inputs,
        RecordingDelay(Rc::clone(&bus)),
        ScanConfig::DEFAULT,
    );

    let result = block_on(scan_loop(&mut scanner, &SCAN_WATCH_STATIC));
    assert!(matches!(result, Err(Error::Pin(ErrorKind::Other))));
    assert_eq!(ScanWatch::new(&SCAN_WATCH_STATIC).cycles(), 0);
}
