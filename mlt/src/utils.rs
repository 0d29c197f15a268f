/// Formats a float as the shortest string that round-trips, like Python's `repr`.
///
/// Fixed notation is used between `1e-4` and `1e16`; outside that range the exponent carries a
/// sign and at least two digits.
///
/// # Examples
///
/// ```
/// use mlt::format_float;
///
/// assert_eq!("0.33333", format_float(0.33333));
/// assert_eq!("40.0", format_float(40.0));
/// assert_eq!("5e-05", format_float(5e-5));
/// ```
pub fn format_float(x: f64) -> String {
    let s = format!("{x:?}");
    let Some((mantissa, exp)) = s.split_once('e') else {
        return s;
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exp),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float_fixed() {
        assert_eq!("0.0", format_float(0.0));
        assert_eq!("1.0", format_float(1.0));
        assert_eq!("0.99995", format_float(0.99995));
        assert_eq!("0.0001", format_float(0.0001));
        assert_eq!("0.04000000000000001", format_float(0.04000000000000001));
    }

    #[test]
    fn test_format_float_exponent() {
        assert_eq!("5e-05", format_float(5e-5));
        assert_eq!("1.5e-05", format_float(1.5e-5));
        assert_eq!("-2e-07", format_float(-2e-7));
        assert_eq!("1e-100", format_float(1e-100));
        assert_eq!("1e+16", format_float(1e16));
    }
}
