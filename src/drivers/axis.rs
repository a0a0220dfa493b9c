/// Axis exponents inside this closed range print as plain decimals.
pub const SCI_POWER_LIMITS: (i32, i32) = (-2, 2);
/// Decimal exponent of the largest magnitude on an axis spanning `min..=max`.
pub fn order_of_magnitude(min: f64, max: f64) -> i32 {
    let largest = min.abs().max(max.abs());
    if largest == 0.0 || !largest.is_finite() {
        return 0;
    }
    largest.log10().floor() as i32
}
pub fn uses_scientific(oom: i32) -> bool {
    oom <= SCI_POWER_LIMITS.0 || oom >= SCI_POWER_LIMITS.1
}
/// Tick label for `value` on an axis spanning `min..=max`. Every tick of a
/// scientific axis shares the axis exponent, e.g. `2.5e-3`.
pub fn format_tick(value: f64, min: f64, max: f64) -> String {
    let oom = order_of_magnitude(min, max);
    if uses_scientific(oom) {
        let mantissa = value / 10f64.powi(oom);
        let mantissa = trim_decimals(format!("{mantissa:.3}"));
        if mantissa == "0" {
            return mantissa;
        }
        format!("{mantissa}e{oom}")
    } else {
        trim_decimals(format!("{value:.3}"))
    }
}
fn trim_decimals(text: String) -> String {
    let trimmed = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn plain_inside_power_limits() {
        assert_eq!(format_tick(0.5, 0.0, 1.0), "0.5");
        assert_eq!(format_tick(50.0, 0.0, 99.0), "50");
        assert_eq!(format_tick(-1.25, -2.0, 2.0), "-1.25");
        assert_eq!(format_tick(0.0, 0.0, 1.0), "0");
    }
    #[test]
    fn scientific_for_small_axes() {
        assert_eq!(format_tick(0.0015, 0.0, 0.002), "1.5e-3");
        assert_eq!(format_tick(2e-6, 0.0, 3e-6), "2e-6");
        assert_eq!(format_tick(0.0, 0.0, 3e-6), "0");
        // 10^-2 is already outside the plain range
        assert_eq!(format_tick(0.05, 0.0, 0.09), "5e-2");
    }
    #[test]
    fn scientific_for_large_axes() {
        assert_eq!(format_tick(2500.0, 0.0, 5000.0), "2.5e3");
        assert_eq!(format_tick(-300.0, -400.0, 100.0), "-3e2");
    }
    #[test]
    fn degenerate_ranges_stay_plain() {
        assert_eq!(order_of_magnitude(0.0, 0.0), 0);
        assert_eq!(order_of_magnitude(f64::NEG_INFINITY, 1.0), 0);
        assert!(!uses_scientific(1));
        assert!(uses_scientific(-2));
    }
}
