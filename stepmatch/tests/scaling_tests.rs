use chrono::{Duration, TimeZone, Utc};

use stepmatch::{
    Atr, AtrReference, AtrStepSource, CandidateMap, CandidateSource, DEFAULT_LADDER, DataError,
    Indicator, SBar, TimeframeMinutes, estimate_atr,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9
}

fn bars(count: usize) -> Vec<SBar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
    (0..count)
        .map(|i| SBar {
            datetime: start + Duration::minutes(i as i64 * 60),
            open_price: 100.0,
            high_price: 101.0,
            low_price: 99.0,
            close_price: 100.0,
            volume: 10.0,
        })
        .collect()
}

#[test]
fn atr_scales_with_square_root_of_time() {
    assert!(approx(estimate_atr(10.0, 60.0, 240.0), 20.0));
    assert!(approx(estimate_atr(10.0, 60.0, 15.0), 5.0));
    assert!(approx(estimate_atr(10.0, 60.0, 60.0), 10.0));
}

#[test]
fn unchecked_law_propagates_ieee_values() {
    assert!(estimate_atr(10.0, 0.0, 60.0).is_infinite());
    assert!(estimate_atr(10.0, -60.0, 60.0).is_nan());
}

#[test]
fn reference_rejects_non_positive_inputs() {
    assert!(matches!(
        AtrReference::new(0.0, 10.0),
        Err(DataError::InvalidAtrReference { .. })
    ));
    assert!(AtrReference::new(60.0, 0.0).is_err());
    assert!(AtrReference::new(60.0, f64::NAN).is_err());

    let reference = AtrReference::new(60.0, 10.0).expect("reference");
    let at = TimeframeMinutes::new(960.0).expect("minutes");
    assert!(approx(reference.estimate_at(at), 40.0));
}

#[test]
fn reference_from_bars_uses_wilder_atr() {
    let reference = AtrReference::from_bars(&bars(30), 14, 60.0).expect("reference");
    assert!(approx(reference.atr(), 2.0));
    assert_eq!(reference.minutes().get(), 60.0);

    assert!(AtrReference::from_bars(&[], 14, 60.0).is_err());
}

#[test]
fn atr_indicator_smooths_true_range() {
    let mut atr = Atr::new(2);
    let mut input = bars(2);
    input[1].high_price = 104.0;
    input[1].low_price = 100.0;

    assert_eq!(atr.update(&input[0]), Some(2.0));
    // tr = max(4, |104 - 100|, |100 - 100|) = 4, smoothed (2 + 4) / 2
    assert_eq!(atr.update(&input[1]), Some(3.0));

    let filled = atr.backfill(&[101.0, 104.0], &[99.0, 100.0], &[100.0, 100.0]);
    assert_eq!(filled, vec![Some(2.0), Some(3.0)]);
    assert_eq!(atr.name(), "atr_2");
}

#[test]
fn atr_ladder_is_tripled_and_monotonic() {
    let reference = AtrReference::new(60.0, 10.0).expect("reference");
    let source = AtrStepSource {
        reference,
        multiple: 3.0,
    };
    let ladder = CandidateMap::ladder(&source, &DEFAULT_LADDER);

    assert_eq!(ladder.len(), DEFAULT_LADDER.len());
    assert!(ladder.is_monotonic());
    assert!(approx(ladder.get("H1").expect("H1").value, 30.0));
    assert!(approx(ladder.get("H4").expect("H4").value, 60.0));
    assert!(approx(
        source.value_at(TimeframeMinutes::new(15.0).expect("minutes")),
        15.0
    ));
}
