// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for the moving average series.

use super::*;
use proptest::prelude::*;

#[test]
fn test_new_series_is_empty() {
    let avg = MovingAverage::new(4);
    assert!(avg.is_empty());
    assert_eq!(avg.capacity(), 4);
    assert_eq!(avg.average(), 0.0);
    assert_eq!(avg.latest(), None);
}

#[test]
fn test_zero_capacity_clamped() {
    let avg = MovingAverage::new(0);
    assert_eq!(avg.capacity(), 1);
}

#[test]
fn test_update_evicts_oldest() {
    let mut avg = MovingAverage::new(3);
    for sample in [1.0, 2.0, 3.0, 4.0] {
        avg.update(sample);
    }
    assert_eq!(avg.samples().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
    assert_eq!(avg.average(), 3.0);
    assert_eq!(avg.latest(), Some(4.0));
}

#[test]
fn test_accepts_zero_and_negative_samples() {
    let mut avg = MovingAverage::new(4);
    avg.update(0.0);
    avg.update(-2.0);
    assert_eq!(avg.len(), 2);
    assert_eq!(avg.average(), -1.0);
}

#[test]
fn test_serialized_field_names() {
    let mut avg = MovingAverage::new(2);
    avg.update(1.0);
    let json = serde_json::to_string(&avg).unwrap();
    assert_eq!(json, r#"{"series":[1.0],"seriesMax":2,"lastAverage":1.0}"#);
}

#[test]
fn test_validate_rejects_over_capacity() {
    let avg: MovingAverage =
        serde_json::from_str(r#"{"series":[1,2,3],"seriesMax":2,"lastAverage":2}"#).unwrap();
    assert!(matches!(
        avg.validate("loadTime"),
        Err(HistoryFormatError::OverCapacity { len: 3, max: 2, .. })
    ));
}

#[test]
fn test_non_numeric_series_rejected_by_serde() {
    let parsed: Result<MovingAverage, _> =
        serde_json::from_str(r#"{"series":[1,"x"],"seriesMax":4,"lastAverage":1}"#);
    assert!(parsed.is_err());
}

proptest! {
    #[test]
    fn prop_length_bounded_and_mean_exact(
        capacity in 1usize..32,
        samples in proptest::collection::vec(-1.0e6f64..1.0e6, 0..100),
    ) {
        let mut avg = MovingAverage::new(capacity);
        for sample in samples {
            avg.update(sample);
            prop_assert!(avg.len() <= avg.capacity());
            let expected = avg.samples().sum::<f64>() / avg.len() as f64;
            prop_assert!((avg.average() - expected).abs() <= 1e-6 * expected.abs().max(1.0));
        }
    }
}
