#![allow(missing_docs)]
//! Host-level tests for pixel packing and the pixel buffer.

use pico_led_scan::color::{Rgb, colors, pack_grb, unpack_grb};
use pico_led_scan::pixel_buffer::PixelBuffer;

#[test]
fn words_are_green_red_blue_left_aligned() {
    assert_eq!(pack_grb(Rgb::new(255, 0, 0)), 0x00FF_0000);
    assert_eq!(pack_grb(Rgb::new(0, 255, 0)), 0xFF00_0000);
    assert_eq!(pack_grb(Rgb::new(0, 0, 255)), 0x0000_FF00);
    assert_eq!(pack_grb(Rgb::new(0x12, 0x34, 0x56)), 0x3412_5600);
}

#[test]
fn unpack_ignores_low_byte() {
    assert_eq!(unpack_grb(0x3412_56FF), Rgb::new(0x12, 0x34, 0x56));
}

#[test]
fn set_then_get_round_trips() {
    let mut buffer = PixelBuffer::<4>::new();
    let samples = [
        Rgb::new(0, 0, 0),
        Rgb::new(255, 255, 255),
        Rgb::new(1, 2, 3),
        Rgb::new(200, 100, 50),
    ];
    for (index, color) in samples.into_iter().enumerate() {
        buffer.set(index, color);
    }
    for (index, color) in samples.into_iter().enumerate() {
        assert_eq!(buffer.get(index), color);
        assert_eq!(buffer.word(index), pack_grb(color));
    }
}

#[test]
fn set_overwrites_in_place() {
    let mut buffer = PixelBuffer::<2>::new();
    buffer.set(0, colors::RED);
    buffer.set(0, colors::BLUE);
    assert_eq!(buffer.get(0), colors::BLUE);
    assert_eq!(buffer.get(1), Rgb::new(0, 0, 0));
}

#[test]
fn new_buffer_is_off() {
    let buffer = PixelBuffer::<3>::default();
    assert_eq!(buffer.words(), &[0, 0, 0]);
    assert_eq!(PixelBuffer::<3>::LEN, 3);
}

#[test]
fn fill_and_clear() {
    let mut buffer = PixelBuffer::<3>::new();
    buffer.fill(Rgb::new(0, 255, 0));
    assert_eq!(buffer.words(), &[0xFF00_0000; 3]);
    buffer.clear();
    assert_eq!(buffer.words(), &[0; 3]);
}

#[test]
#[should_panic(expected = "out of range")]
fn set_past_end_panics() {
    let mut buffer = PixelBuffer::<1>::new();
    buffer.set(1, colors::RED);
}

#[test]
#[should_panic(expected = "out of range")]
fn get_past_end_panics() {
    let buffer = PixelBuffer::<2>::new();
    let _ = buffer.get(2);
}
