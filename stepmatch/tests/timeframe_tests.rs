use stepmatch::TimeframeMinutes;

fn tf(minutes: f64) -> TimeframeMinutes {
    TimeframeMinutes::new(minutes).expect("positive minutes")
}

#[test]
fn rejects_non_positive_minutes() {
    assert!(TimeframeMinutes::new(0.0).is_none());
    assert!(TimeframeMinutes::new(-1.0).is_none());
    assert!(TimeframeMinutes::new(f64::NAN).is_none());
}

#[test]
fn compound_labels() {
    assert_eq!(tf(90.0).compound_label(), "1H30m");
    assert_eq!(tf(120.0).compound_label(), "2H");
    assert_eq!(tf(45.0).compound_label(), "45m");
    assert_eq!(tf(59.6).compound_label(), "1H");
    assert_eq!(tf(37.5).to_string(), "38m");
}

#[test]
fn exact_labels_keep_fractional_minutes() {
    assert_eq!(tf(90.5).exact_label(), "1H30.5m");
    assert_eq!(tf(0.25).exact_label(), "0.25m");
    assert_eq!(tf(120.0).exact_label(), "2H");
    assert_eq!(tf(37.5).exact_label(), "37.5m");
}

#[test]
fn parses_tier_and_compound_labels() {
    let cases = [
        ("M5", 5.0),
        ("H4", 240.0),
        ("D1", 1440.0),
        ("W1", 10080.0),
        ("MN1", 43200.0),
        ("1H30m", 90.0),
        ("2H", 120.0),
        ("45m", 45.0),
        ("90", 90.0),
        ("3H58.5m", 238.5),
    ];
    for (label, minutes) in cases {
        let parsed = TimeframeMinutes::parse_label(label).expect(label);
        assert!((parsed.get() - minutes).abs() < 1e-9, "{label}");
    }
}

#[test]
fn rejects_malformed_labels() {
    for label in ["", "X5", "M0", "1H30", "H1x", "-5m"] {
        assert!(TimeframeMinutes::parse_label(label).is_err(), "{label}");
    }
}

#[test]
fn compound_label_round_trips_whole_minutes() {
    for minutes in [1.0, 7.0, 60.0, 61.0, 135.0, 1440.0, 1441.0] {
        let label = tf(minutes).compound_label();
        let parsed = TimeframeMinutes::parse_label(&label).expect("label");
        assert_eq!(parsed.get(), minutes, "{label}");
    }
}
