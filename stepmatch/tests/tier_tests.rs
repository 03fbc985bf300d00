use stepmatch::{FractalTier, PercentageCurve, percentage_from_minutes, timeframe_to_tier};

#[test]
fn minutes_map_to_smallest_covering_tier() {
    let cases = [
        (0.5, FractalTier::M1),
        (1.0, FractalTier::M1),
        (3.0, FractalTier::M5),
        (15.0, FractalTier::M15),
        (16.0, FractalTier::M15),
        (17.0, FractalTier::M30),
        (45.0, FractalTier::H1),
        (240.0, FractalTier::H4),
        (241.0, FractalTier::D1),
        (1440.0, FractalTier::D1),
        (2000.0, FractalTier::W1),
        (20000.0, FractalTier::MN1),
        (100000.0, FractalTier::MN1),
    ];
    for (minutes, tier) in cases {
        assert_eq!(timeframe_to_tier(minutes), Some(tier), "minutes={minutes}");
    }
    assert_eq!(timeframe_to_tier(0.0), None);
    assert_eq!(timeframe_to_tier(f64::NAN), None);
}

#[test]
fn percentages_double_per_tier() {
    assert_eq!(FractalTier::M1.percentage(), 0.02);
    assert_eq!(FractalTier::MN1.percentage(), 5.12);
    for pair in FractalTier::ALL.windows(2) {
        let ratio = pair[1].percentage() / pair[0].percentage();
        assert!((ratio - 2.0).abs() < 1e-12, "{:?}", pair);
    }
}

#[test]
fn unmapped_minutes_fall_back_to_hour_tier() {
    assert_eq!(percentage_from_minutes(0.0), 0.32);
    assert_eq!(percentage_from_minutes(-5.0), 0.32);
    assert_eq!(percentage_from_minutes(f64::INFINITY), 0.32);
}

#[test]
fn stepped_curve_is_non_decreasing_over_integer_minutes() {
    let mut prev = percentage_from_minutes(1.0);
    for minutes in 2..=50_000 {
        let next = percentage_from_minutes(minutes as f64);
        assert!(next >= prev, "minutes={minutes}");
        prev = next;
    }
}

#[test]
fn interpolated_curve_hits_anchors_and_rises_between() {
    let curve = PercentageCurve::Interpolated;
    for tier in FractalTier::ALL {
        let at = curve.percentage(tier.upper_bound_minutes());
        assert!((at - tier.percentage()).abs() < 1e-9, "{tier:?}");
    }

    let mut prev = curve.percentage(0.25);
    assert!(prev < 0.02);
    let mut minutes = 0.5;
    while minutes < 100_000.0 {
        let next = curve.percentage(minutes);
        assert!(next > prev, "minutes={minutes}");
        prev = next;
        minutes *= 1.37;
    }
    assert!(curve.percentage(86_400.0) > 5.12);
}

#[test]
fn tier_labels_parse() {
    assert_eq!(FractalTier::parse("h4").expect("tier"), FractalTier::H4);
    assert_eq!(FractalTier::parse("MN1").expect("tier"), FractalTier::MN1);
    assert!(FractalTier::parse("H2").is_err());
}
