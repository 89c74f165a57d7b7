// ============================================================================
// COERCION.RS - Field Text to Number Conversion
// ============================================================================
//
// Every grid field is typed as text. The resolver only ever sees the final
// committed string, so coercion never errors: empty or unparseable text is
// simply "missing" (None) and the caller decides whether that is acceptable.
//
// The keystroke filters below are pure string functions. Front ends call
// them on every edit event; the resolver never sees intermediate keystrokes.
// ============================================================================

/// What kind of number a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Real,
}

/// A coerced field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Real(x) => x,
        }
    }
}

/// Parse `text` as a number of the requested kind. Returns None for empty
/// or unparseable text.
pub fn coerce(text: &str, kind: NumberKind) -> Option<Number> {
    match kind {
        NumberKind::Integer => coerce_integer(text).map(Number::Integer),
        NumberKind::Real => coerce_real(text).map(Number::Real),
    }
}

pub fn coerce_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}

/// True for whole-number text ("-" sign allowed) too large for an i64.
/// Such text is filled in, not missing, so callers report it separately.
pub fn integer_out_of_range(text: &str) -> bool {
    let text = text.trim();
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) && text.parse::<i64>().is_err()
}

/// NaN and infinities parse fine in Rust but are never valid grid values.
pub fn coerce_real(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|x| x.is_finite())
}

// ─── Keystroke Filtering ─────────────────────────────────────────────────────
//
// Rules: digits only, one optional leading minus, and for reals one optional
// decimal point that must follow a digit (not first char, not after minus).

/// True when `text` is an acceptable in-progress entry for `kind`.
/// Empty text and a lone "-" are acceptable.
pub fn is_valid_partial(text: &str, kind: NumberKind) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() {
        return true;
    }
    match kind {
        NumberKind::Integer => digits.chars().all(|c| c.is_ascii_digit()),
        NumberKind::Real => {
            if digits.starts_with('.') {
                return false;
            }
            let parts: Vec<&str> = digits.split('.').collect();
            parts.len() <= 2
                && parts
                    .iter()
                    .all(|p| p.chars().all(|c| c.is_ascii_digit()))
        }
    }
}

/// Strip every character that cannot belong to a number of `kind`.
/// The result always satisfies [`is_valid_partial`].
pub fn sanitize(text: &str, kind: NumberKind) -> String {
    let mut out = String::with_capacity(text.len());
    let mut seen_digit = false;
    let mut seen_point = false;

    for c in text.chars() {
        match c {
            '0'..='9' => {
                out.push(c);
                seen_digit = true;
            }
            '-' if out.is_empty() => out.push(c),
            '.' if kind == NumberKind::Real && seen_digit && !seen_point => {
                out.push(c);
                seen_point = true;
            }
            _ => {}
        }
    }

    out
}

/// Accept a whole value typed at once (a console line, a pasted value).
///
/// Text that already passes [`is_valid_partial`] is kept as typed. Text
/// that is not a valid entry but still parses as a number ("1e3", ".5") is
/// rewritten to the same number in plain digits ("1000", "0.5"). Anything
/// else returns None; nothing is ever stripped.
pub fn normalize_entry(text: &str, kind: NumberKind) -> Option<String> {
    let text = text.trim();
    if is_valid_partial(text, kind) {
        return Some(text.to_string());
    }
    match coerce(text, kind)? {
        Number::Integer(n) => Some(n.to_string()),
        Number::Real(x) => Some(x.to_string()),
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_integer() {
        assert_eq!(coerce_integer("50"), Some(50));
        assert_eq!(coerce_integer(" -3 "), Some(-3));
        assert_eq!(coerce_integer(""), None);
        assert_eq!(coerce_integer("   "), None);
        assert_eq!(coerce_integer("12.5"), None);
        assert_eq!(coerce_integer("abc"), None);
    }

    #[test]
    fn test_coerce_real() {
        assert_eq!(coerce_real("10"), Some(10.0));
        assert_eq!(coerce_real("-0.25"), Some(-0.25));
        assert_eq!(coerce_real("5."), Some(5.0));
        assert_eq!(coerce_real(""), None);
        assert_eq!(coerce_real("1e3"), Some(1000.0));
        assert_eq!(coerce_real("nan"), None);
        assert_eq!(coerce_real("inf"), None);
        assert_eq!(coerce_real("-"), None);
    }

    #[test]
    fn test_coerce_by_kind() {
        assert_eq!(coerce("7", NumberKind::Integer), Some(Number::Integer(7)));
        assert_eq!(coerce("7", NumberKind::Real), Some(Number::Real(7.0)));
        assert_eq!(coerce("7.5", NumberKind::Integer), None);
        assert_eq!(Number::Integer(3).as_f64(), 3.0);
    }

    #[test]
    fn test_partial_real_entries() {
        assert!(is_valid_partial("", NumberKind::Real));
        assert!(is_valid_partial("-", NumberKind::Real));
        assert!(is_valid_partial("12.", NumberKind::Real));
        assert!(is_valid_partial("-12.75", NumberKind::Real));
        assert!(!is_valid_partial(".5", NumberKind::Real));
        assert!(!is_valid_partial("1.2.3", NumberKind::Real));
        assert!(!is_valid_partial("1a", NumberKind::Real));
        assert!(!is_valid_partial("--1", NumberKind::Real));
    }

    #[test]
    fn test_partial_integer_entries() {
        assert!(is_valid_partial("50", NumberKind::Integer));
        assert!(is_valid_partial("-5", NumberKind::Integer));
        assert!(!is_valid_partial("5.0", NumberKind::Integer));
        assert!(!is_valid_partial("5-", NumberKind::Integer));
    }

    #[test]
    fn test_sanitize_strips_stray_characters() {
        assert_eq!(sanitize("1x0", NumberKind::Integer), "10");
        assert_eq!(sanitize("12.5", NumberKind::Integer), "125");
        assert_eq!(sanitize("-1.2.3", NumberKind::Real), "-1.23");
        assert_eq!(sanitize(".5", NumberKind::Real), "5");
        assert_eq!(sanitize("1-2", NumberKind::Real), "12");
        assert_eq!(sanitize(" 100 m", NumberKind::Real), "100");
        assert_eq!(sanitize("abc", NumberKind::Real), "");
    }

    #[test]
    fn test_integer_out_of_range() {
        assert!(integer_out_of_range("9223372036854775808"));
        assert!(integer_out_of_range(" -99999999999999999999 "));
        assert!(!integer_out_of_range("9223372036854775807"));
        assert!(!integer_out_of_range(""));
        assert!(!integer_out_of_range("-"));
        assert!(!integer_out_of_range("12.5"));
    }

    #[test]
    fn test_normalize_entry_keeps_meaning() {
        assert_eq!(normalize_entry("1e3", NumberKind::Real).as_deref(), Some("1000"));
        assert_eq!(normalize_entry(".5", NumberKind::Real).as_deref(), Some("0.5"));
        assert_eq!(normalize_entry("-12.5", NumberKind::Real).as_deref(), Some("-12.5"));
        assert_eq!(normalize_entry(" 50 ", NumberKind::Integer).as_deref(), Some("50"));
        assert_eq!(normalize_entry("", NumberKind::Real).as_deref(), Some(""));
        assert_eq!(normalize_entry("1x0", NumberKind::Integer), None);
        assert_eq!(normalize_entry("2.5", NumberKind::Integer), None);
        assert_eq!(normalize_entry("nan", NumberKind::Real), None);
    }

    #[test]
    fn test_sanitize_output_is_always_valid() {
        let samples = ["--5..3", "a-1.b2", "..", "-.-", "9e9", "1,000.5"];
        for kind in [NumberKind::Integer, NumberKind::Real] {
            for s in samples {
                let clean = sanitize(s, kind);
                assert!(is_valid_partial(&clean, kind), "{s:?} -> {clean:?}");
            }
        }
    }
}
