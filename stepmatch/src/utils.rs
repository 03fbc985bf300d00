pub(crate) fn approx_eq_f64(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_keeps_requested_decimals() {
        assert!(approx_eq_f64(round_to(1.26, 1), 1.3));
        assert!(approx_eq_f64(round_to(0.666_666, 2), 0.67));
        assert!(round_to(f64::INFINITY, 1).is_infinite());
    }
}
