use stepmatch::{
    FractalLevels, StepLevel, Symbol, calculate_th, calculate_th_points, long_step, pattern_atr,
    short_step, trigger_atr,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9
}

#[test]
fn th_normalizes_price_by_digits() {
    assert!(approx(calculate_th(1.2345, 4, 0.32), 3.9504));
    assert!(approx(calculate_th(1.23456, 5, 0.32), 3.950592));
    assert!(approx(calculate_th(150.0, 2, 0.64), 9.6));
    assert!(approx(calculate_th(150.123, 3, 0.64), 0.9607872));
    assert!(approx(calculate_th(5000.0, 0, 1.28), 6.4));
    assert!(approx(calculate_th(25.5, 1, 0.16), 0.0408));
    assert!(approx(calculate_th(0.012345, 6, 0.08), 0.09876));
    assert!(approx(calculate_th(0.0012345, 7, 0.08), 0.09876));
}

#[test]
fn th_is_zero_for_non_positive_inputs() {
    assert_eq!(calculate_th(0.0, 4, 0.32), 0.0);
    assert_eq!(calculate_th(-1.0, 4, 0.32), 0.0);
    assert_eq!(calculate_th(1.2, 4, 0.0), 0.0);
    assert_eq!(calculate_th(1.2, 4, -0.5), 0.0);
}

#[test]
fn th_points_divide_by_ten_then_tick() {
    let symbol = Symbol::with_tick_size("ES", 0.01);
    assert!(approx(calculate_th_points(&symbol, 150.0, 0.64), 96.0));

    let fx = Symbol::with_tick_size("TEST", 0.0001);
    assert!(approx(calculate_th_points(&fx, 1.2, 0.32), 3840.0));
}

#[test]
fn th_points_zero_on_bad_tick_or_price() {
    let no_tick = Symbol::with_tick_size("ES", 0.0);
    assert_eq!(calculate_th_points(&no_tick, 150.0, 0.64), 0.0);

    let symbol = Symbol::with_tick_size("ES", 0.01);
    assert_eq!(calculate_th_points(&symbol, 0.0, 0.64), 0.0);
}

#[test]
fn short_and_long_step_identity_when_pattern_is_half_structure() {
    for structure in [0.5, 1.0, 7.25, 120.0, 3840.0] {
        let levels = FractalLevels::from_structure(structure);
        assert!(approx(levels.pattern, structure / 2.0));
        assert!(approx(levels.trigger, structure / 4.0));
        assert!((levels.short_step - 1.5 * structure).abs() <= f64::EPSILON * structure * 4.0);
        assert!((levels.long_step - 2.0 * structure).abs() <= f64::EPSILON * structure * 4.0);
    }
}

#[test]
fn steps_use_supplied_pattern() {
    assert!(approx(short_step(10.0, 4.0), 16.0));
    assert!(approx(long_step(10.0, 4.0), 22.0));

    let levels = FractalLevels::from_structure_pattern(10.0, 4.0);
    assert!(approx(levels.trigger, 2.0));
    assert!(approx(levels.level(StepLevel::ShortStep), 16.0));
    assert!(approx(levels.level(StepLevel::LongStep), 22.0));
    assert!(approx(levels.level(StepLevel::Structure), 10.0));
    assert!(approx(levels.level(StepLevel::Pattern), 4.0));
}

#[test]
fn atr_levels_scale_by_root_of_duration() {
    assert!(approx(pattern_atr(8.0), 4.0));
    assert!(approx(trigger_atr(8.0), 2.0));
}
