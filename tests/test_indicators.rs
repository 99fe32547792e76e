//! Integration tests for the indicator calculators.

mod fixtures;

use chart_overlays::core::{DerivedSeries, ExtremumPoint, InterpolationMode, TrendDirection};
use chart_overlays::indicators::{
    bollinger_bands, build_trend_lines, find_all_lows, find_all_peaks, find_best_lows,
    find_best_peaks, interpolate_path, obv, percentage_bands, rolling_mean, rolling_std,
    TrendSegment,
};

use crate::fixtures::{assert_near, load_daily_series, same_value, series_from_closes};

const TOLERANCE: f64 = 1e-9;
const WINDOW_DATA: [f64; 10] = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0, 10.0, 12.0];

#[test]
fn test_rolling_mean_correctness() {
    let result = rolling_mean(&WINDOW_DATA, 3).unwrap();
    assert_eq!(result.len(), 10);

    // i + 1 < window
    assert!(result[0].is_nan());
    assert!(result[1].is_nan());

    let expected = [
        10.0 / 3.0,
        4.0,
        13.0 / 3.0,
        14.0 / 3.0,
        17.0 / 3.0,
        7.0,
        26.0 / 3.0,
        31.0 / 3.0,
    ];
    for (i, &e) in expected.iter().enumerate() {
        assert_near(result[i + 2], e, TOLERANCE, &format!("mean at {}", i + 2));
    }
}

#[test]
fn test_rolling_std_correctness() {
    let result = rolling_std(&WINDOW_DATA, 3).unwrap();
    assert!(result[0].is_nan());
    assert!(result[1].is_nan());

    // [2, 4, 4]: sum of squares 24/9 over n - 1 = 2
    assert_near(result[2], (4.0f64 / 3.0).sqrt(), TOLERANCE, "std at 2");
    // [4, 4, 4]
    assert_near(result[3], 0.0, TOLERANCE, "std at 3");
    // [5, 7, 9]
    assert_near(result[7], 2.0, TOLERANCE, "std at 7");
    // [9, 10, 12]
    assert_near(result[9], (21.0f64 / 9.0).sqrt(), TOLERANCE, "std at 9");
}

#[test]
fn test_rolling_window_larger_than_data() {
    let result = rolling_mean(&[1.0, 2.0], 3).unwrap();
    assert!(result.iter().all(|v| v.is_nan()));
    assert!(rolling_std(&[1.0, 2.0], 0).is_err());
}

#[test]
fn test_peaks_and_lows_disjoint() {
    let series = load_daily_series();
    let peaks = find_all_peaks(&series);
    let lows = find_all_lows(&series);
    assert!(!peaks.is_empty());
    assert!(!lows.is_empty());

    let last = series.len() - 1;
    for p in &peaks {
        assert!(p.index != 0 && p.index != last);
        assert!(lows.iter().all(|l| l.index != p.index));
    }
    for l in &lows {
        assert!(l.index != 0 && l.index != last);
    }
}

fn is_chronological(points: &[ExtremumPoint]) -> bool {
    points.windows(2).all(|w| w[0].date < w[1].date)
}

#[test]
fn test_best_peaks_win_their_window() {
    let series = load_daily_series();
    let significance = 10;
    let peaks = find_all_peaks(&series);
    let best = find_best_peaks(&peaks, significance);

    assert!(!best.is_empty());
    assert!(is_chronological(&best));
    assert!(best.iter().all(|b| peaks.contains(b)));

    let radius = i64::from(significance);
    for b in &best {
        for p in &peaks {
            if (p.date - b.date).num_days().abs() <= radius {
                assert!(p.price <= b.price, "{p:?} beats best {b:?}");
            }
        }
    }

    // Dropped peaks have a strictly higher neighbour in range
    for p in peaks.iter().filter(|p| !best.contains(p)) {
        assert!(peaks
            .iter()
            .any(|q| (q.date - p.date).num_days().abs() <= radius && q.price > p.price));
    }
}

#[test]
fn test_best_lows_win_their_window() {
    let series = load_daily_series();
    let significance = 10;
    let lows = find_all_lows(&series);
    let best = find_best_lows(&lows, significance);

    assert!(!best.is_empty());
    assert!(is_chronological(&best));

    let radius = i64::from(significance);
    for b in &best {
        assert!(lows
            .iter()
            .filter(|l| (l.date - b.date).num_days().abs() <= radius)
            .all(|l| l.price >= b.price));
    }
}

#[test]
fn test_trend_segments_respect_constraints() {
    let series = load_daily_series();
    let best_peaks = find_best_peaks(&find_all_peaks(&series), 5);
    let best_lows = find_best_lows(&find_all_lows(&series), 5);

    let lines = build_trend_lines(&series, &best_peaks, &best_lows, InterpolationMode::Linear);
    for line in &lines {
        let TrendSegment {
            start,
            end,
            direction,
            ..
        } = line.segment;
        assert!(start.date < end.date);

        let start_idx = start.index;
        assert!(line.path.values[..start_idx].iter().all(|v| v.is_nan()));
        assert_near(line.path.values[start_idx], start.price, TOLERANCE, "path origin");

        let defined: Vec<f64> = line.path.values[start_idx..]
            .iter()
            .copied()
            .take_while(|v| !v.is_nan())
            .collect();

        match direction {
            TrendDirection::Ascending => {
                assert!(best_lows.contains(&start));
                assert!(best_peaks.contains(&end));
                assert!(start.price < end.price);
                assert!(defined.windows(2).all(|w| w[1] >= w[0]));
            }
            TrendDirection::Descending => {
                assert!(best_peaks.contains(&start));
                assert!(best_lows.contains(&end));
                assert!(start.price > end.price);
                assert!(defined.windows(2).all(|w| w[1] <= w[0]));
            }
        }

        // Clipped for good: nothing defined after the first gap
        let resumed = line.path.values[start_idx + defined.len()..]
            .iter()
            .any(|v| !v.is_nan());
        assert!(!resumed);
    }
}

#[test]
fn test_linear_path_steps_and_clips() {
    let mut closes = vec![100.0; 20];
    closes[10] = 110.0;
    closes[15] = 112.0;
    let series = series_from_closes(&closes);

    let point = |i: usize| ExtremumPoint {
        index: i,
        date: series.dates()[i],
        price: closes[i],
    };
    let segment = TrendSegment {
        start: point(1),
        end: point(10),
        direction: TrendDirection::Ascending,
        mode: InterpolationMode::Linear,
    };

    let path = interpolate_path(&segment, &series).unwrap();
    assert_eq!(path.len(), 20);
    assert!(path.values[0].is_nan());
    for i in 1..=13 {
        assert_near(path.values[i], 99.0 + i as f64, TOLERANCE, &format!("bar {i}"));
    }
    // 113 would exceed the highest close
    assert!(path.values[14..].iter().all(|v| v.is_nan()));
}

#[test]
fn test_logarithmic_paths_stay_in_range() {
    let series = load_daily_series();
    let best_peaks = find_best_peaks(&find_all_peaks(&series), 5);
    let best_lows = find_best_lows(&find_all_lows(&series), 5);
    let max_close = series.max_close().unwrap();
    let min_close = series.min_close().unwrap();

    let lines =
        build_trend_lines(&series, &best_peaks, &best_lows, InterpolationMode::Logarithmic);
    for line in &lines {
        assert_eq!(line.segment.mode, InterpolationMode::Logarithmic);
        for &v in line.path.values.iter().filter(|v| !v.is_nan()) {
            assert!(v > 0.0);
            match line.segment.direction {
                TrendDirection::Ascending => assert!(v <= max_close),
                TrendDirection::Descending => assert!(v >= min_close),
            }
        }
    }
}

#[test]
fn test_obv_reference_example() {
    let close = [10.0, 12.0, 11.0, 11.0, 13.0];
    let volume = [0.0, 5.0, 3.0, 3.0, 7.0];
    assert_eq!(obv(&close, &volume).unwrap(), vec![0.0, 5.0, 2.0, 2.0, 9.0]);
}

#[test]
fn test_percentage_bands_offset() {
    let series = load_daily_series();
    let bands = percentage_bands(series.close(), 21, 3.0).unwrap();
    let mav = rolling_mean(series.close(), 21).unwrap();

    for i in 0..series.len() {
        if mav[i].is_nan() {
            assert!(bands.upper[i].is_nan() && bands.lower[i].is_nan());
            continue;
        }
        assert_near(bands.upper[i], mav[i] * 1.03, 1e-9, "upper band");
        assert_near(bands.lower[i], mav[i] * 0.97, 1e-9, "lower band");
    }
}

#[test]
fn test_bollinger_bands_symmetry() {
    let series = load_daily_series();
    let bands = bollinger_bands(series.close(), 20).unwrap();
    let std = rolling_std(series.close(), 20).unwrap();

    assert!(bands.middle[18].is_nan());
    for i in 19..series.len() {
        assert_near(bands.upper[i] - bands.middle[i], 2.0 * std[i], 1e-9, "upper width");
        assert_near(bands.middle[i] - bands.lower[i], 2.0 * std[i], 1e-9, "lower width");
    }
}

#[test]
fn test_reindex_against_source_dates() {
    let series = load_daily_series();
    let upper = bollinger_bands(series.close(), 20).unwrap().upper;
    let derived = DerivedSeries::new(series.dates().to_vec(), upper);

    let realigned = derived.reindex(series.dates());
    assert_eq!(realigned.len(), series.len());
    assert_eq!(realigned.dates, series.dates());
    assert!(realigned
        .values
        .iter()
        .zip(&derived.values)
        .all(|(&a, &b)| same_value(a, b)));
}
