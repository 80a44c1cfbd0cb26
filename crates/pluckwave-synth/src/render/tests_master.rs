//! Tests for overlap-add accumulation and peak normalization.

use super::*;

#[test]
fn test_add_at_sums_overlaps() {
    let mut master = MasterBuffer::new(6);
    assert_eq!(master.add_at(0, &[1.0, 1.0, 1.0]), 0);
    assert_eq!(master.add_at(2, &[0.5, 0.5]), 0);
    assert_eq!(master.samples(), &[1.0, 1.0, 1.5, 0.5, 0.0, 0.0]);
}

#[test]
fn test_add_at_drops_past_end() {
    let mut master = MasterBuffer::new(4);
    assert_eq!(master.add_at(2, &[1.0, 2.0, 3.0, 4.0]), 2);
    assert_eq!(master.samples(), &[0.0, 0.0, 1.0, 2.0]);

    // Entirely out of range.
    assert_eq!(master.add_at(10, &[1.0, 1.0]), 2);
    assert_eq!(master.samples(), &[0.0, 0.0, 1.0, 2.0]);
}

#[test]
fn test_normalize_peak() {
    let mut master = MasterBuffer::new(3);
    master.add_at(0, &[0.5, -2.0, 1.0]);

    assert_eq!(master.normalize_peak(), 2.0);
    assert_eq!(master.samples(), &[0.25, -1.0, 0.5]);
    assert_eq!(master.peak(), 1.0);
}

#[test]
fn test_normalize_silent_buffer() {
    let mut master = MasterBuffer::new(4);
    assert_eq!(master.normalize_peak(), 0.0);
    // Silent audio should remain silent (no division by zero)
    assert!(master.samples().iter().all(|&s| s == 0.0));
}

#[test]
fn test_peak_of_empty_slice() {
    assert_eq!(peak(&[]), 0.0);
    assert_eq!(peak(&[-3.0, 2.0]), 3.0);
}
