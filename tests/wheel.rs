#![allow(missing_docs)]
//! Host-level tests for the color wheel.

use pico_led_scan::color::{OFF, Rgb, wheel};

#[test]
fn anchors_are_pure_primaries() {
    assert_eq!(wheel(0), Rgb::new(255, 0, 0));
    assert_eq!(wheel(85), Rgb::new(0, 255, 0));
    assert_eq!(wheel(170), Rgb::new(0, 0, 255));
}

#[test]
fn last_position_returns_to_red() {
    assert_eq!(wheel(255), Rgb::new(255, 0, 0));
}

#[test]
fn out_of_range_is_off() {
    for position in [-1, 256, 1_000, i32::MIN, i32::MAX] {
        assert_eq!(wheel(position), OFF, "position {position}");
    }
}

#[test]
fn every_position_splits_full_intensity_between_two_channels() {
    for position in 0..=255 {
        let color = wheel(position);
        let total = u16::from(color.r) + u16::from(color.g) + u16::from(color.b);
        assert_eq!(total, 255, "position {position}: {color:?}");
        let lit = [color.r, color.g, color.b]
            .iter()
            .filter(|&&channel| channel > 0)
            .count();
        assert!(lit <= 2, "position {position}: {color:?}");
    }
}

#[test]
fn bands_interpolate_linearly() {
    assert_eq!(wheel(1), Rgb::new(252, 3, 0));
    assert_eq!(wheel(84), Rgb::new(3, 252, 0));
    assert_eq!(wheel(86), Rgb::new(0, 252, 3));
    assert_eq!(wheel(171), Rgb::new(3, 0, 252));
}

#[test]
fn same_input_same_output() {
    for position in [-5, 0, 42, 128, 200, 255, 300] {
        assert_eq!(wheel(position), wheel(position));
    }
}
