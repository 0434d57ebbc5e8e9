// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for problem descriptions.

use std::collections::HashSet;

use super::*;
use crate::history::LOAD_HISTORY_CAPACITY;

fn series(samples: &[f64], capacity: usize) -> MovingAverage {
    let mut avg = MovingAverage::new(capacity);
    for &s in samples {
        avg.update(s);
    }
    avg
}

fn load_text(samples: &[f64]) -> String {
    load_success_description(LoadRecord::from_series(&series(samples, LOAD_HISTORY_CAPACITY)))
}

#[test]
fn test_load_record_summary() {
    let record = LoadRecord::from_series(&series(&[1.0, 0.0, 1.0, 0.0], 4));
    assert_eq!(
        record,
        LoadRecord {
            attempts: 4,
            failures: 2,
            window_full: true,
            latest_failed: true,
        }
    );
}

#[test]
fn test_load_descriptions_pairwise_distinct() {
    let texts = [
        load_text(&[1.0, 1.0, 1.0, 0.0]),
        load_text(&[0.0, 0.0, 0.0, 0.0]),
        load_text(&[1.0, 1.0, 0.0, 0.0]),
        load_text(&[0.0, 0.0, 1.0, 1.0]),
        load_text(&[0.0]),
        load_text(&[1.0, 0.0]),
        load_text(&[0.0, 1.0]),
        load_text(&[1.0, 0.0, 0.0]),
    ];
    let unique: HashSet<&String> = texts.iter().collect();
    assert_eq!(unique.len(), texts.len());
}

#[test]
fn test_load_description_mentions_counts() {
    let text = load_text(&[1.0, 0.0, 1.0]);
    assert!(text.contains("1 of 3"));
}

#[test]
fn test_single_failure_uses_singular() {
    assert!(load_text(&[0.0]).contains("1 failed attempt)"));
}

#[test]
fn test_performance_description_undeterminable_input() {
    let input = series(&[], 20);
    let output = series(&[4.0, 6.0], 20);
    let text = performance_description(&input, &output);
    assert!(text.contains("an undeterminable rate"));
    assert!(text.contains("5.0 tokens per second"));
}

#[test]
fn test_shortfall_descriptions_vary() {
    let texts = [
        shortfall_description(Capacity::Memory, 5.2, Some(4.0), false),
        shortfall_description(Capacity::Memory, 5.2, Some(4.0), true),
        shortfall_description(Capacity::Memory, 5.2, None, false),
        shortfall_description(Capacity::Memory, 5.2, None, true),
        shortfall_description(Capacity::Storage, 5.2, Some(4.0), false),
    ];
    let unique: HashSet<&String> = texts.iter().collect();
    assert_eq!(unique.len(), texts.len());
    assert!(texts[0].contains("5.2 GB"));
    assert!(texts[0].contains("4.0 GB"));
}
