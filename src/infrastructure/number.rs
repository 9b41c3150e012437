// Generic string-to-number conversion for CSV cells

/// Convert cell text to a number the way a loosely typed `Number(text)` would.
///
/// Surrounding whitespace is ignored and empty text is `0`. Decimal and exponent
/// notation, `0x`/`0o`/`0b` integer literals and a signed `Infinity` are accepted.
/// Anything else, including thousands separators and currency symbols, is `NaN`.
pub fn coerce_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    if let Some(value) = radix_literal(text) {
        return value;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // `str::parse` also takes "inf"/"nan" spellings; only plain decimals get through here.
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_literal(text: &str) -> Option<f64> {
    let (radix, digits) = match text.get(..2)? {
        "0x" | "0X" => (16, &text[2..]),
        "0o" | "0O" => (8, &text[2..]),
        "0b" | "0B" => (2, &text[2..]),
        _ => return None,
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }

    // Folding in f64 keeps arbitrarily long literals finite-or-infinite instead of overflowing.
    Some(
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * radix as f64 + d as f64),
    )
}
