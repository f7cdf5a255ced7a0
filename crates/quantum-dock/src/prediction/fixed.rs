//! Fixed-point rendering shared by the rationale text and pose strings.
//!
//! Ties round away from zero on the exact binary value, and negative zero prints
//! without a sign. Rust's `{:.N}` rounds ties to even, which would turn `-9.125`
//! into `-9.12` instead of `-9.13`.

/// Enough fractional digits to print any `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1_100;

pub(crate) fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // -0.0 < 0.0 is false, so negative zero loses its sign here.
    let negative = value < 0.0;
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();
    let mut whole_len = whole.len();

    if fraction.as_bytes().get(digits).is_some_and(|digit| *digit >= b'5') {
        let mut carried = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carried = false;
                break;
            }
        }
        if carried {
            kept.insert(0, b'1');
            whole_len += 1;
        }
    }

    let mut rendered = String::with_capacity(kept.len() + 2);
    if negative {
        rendered.push('-');
    }
    rendered.extend(kept[..whole_len].iter().map(|&b| char::from(b)));
    if digits > 0 {
        rendered.push('.');
        rendered.extend(kept[whole_len..].iter().map(|&b| char::from(b)));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::to_fixed;

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(to_fixed(-9.125, 2), "-9.13");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(0.03125, 4), "0.0313");
    }

    #[test]
    fn inexact_halves_follow_the_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(9.4149, 2), "9.41");
    }

    #[test]
    fn carries_into_the_whole_part() {
        assert_eq!(to_fixed(9.999, 2), "10.00");
        assert_eq!(to_fixed(-99.9951, 2), "-100.00");
    }

    #[test]
    fn zero_signs_and_special_values() {
        assert_eq!(to_fixed(-0.0, 2), "0.00");
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(7.0, 4), "7.0000");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 4), "-Infinity");
    }
}
