use std::fs;

use replay::{LegRow, load_legs, run};
use stepmatch::{MatchConfig, RecordingSink, Symbol};

#[test]
fn run_reports_all_three_matchers_per_leg() {
    let symbol = Symbol::with_tick_size("TEST", 0.01);
    let rows = vec![
        LegRow {
            leg: 0.20,
            price: 100.0,
            atr_minutes: Some(60.0),
            atr_value: Some(0.10),
        },
        LegRow {
            leg: 0.32,
            price: 100.0,
            atr_minutes: None,
            atr_value: None,
        },
    ];
    let sink = RecordingSink::default();

    let reports = run(&symbol, &MatchConfig::default(), &rows, &sink);

    assert_eq!(reports.len(), 2);
    assert!((reports[0].leg_pips - 20.0).abs() < 1e-9);
    assert_eq!(reports[0].percent_label, "M30");
    assert_ne!(reports[0].atr_label, "-");
    assert_eq!(reports[1].percent_label, "H1");
    assert_eq!(reports[1].percent_residual, 0.0);
    // no reference and an empty ladder
    assert_eq!(reports[1].atr_label, "-");
    assert!(!sink.events().is_empty());
}

#[test]
fn legs_load_from_csv_with_aliases() {
    let dir = std::env::temp_dir().join(format!("replay-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("legs.csv");
    fs::write(&path, "leg_price,close,atr_minutes,atr_value\n0.2,100,60,0.1\n0.3,101,,\n")
        .expect("write csv");

    let rows = load_legs(&path).expect("rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].atr_minutes, Some(60.0));
    assert_eq!(rows[1].price, 101.0);
    assert_eq!(rows[1].atr_value, None);
}
