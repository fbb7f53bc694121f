use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static WAGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap());
static AMOUNT_IN_PROGRESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").unwrap());

pub fn validate_wager(wager: &str) -> Result<(), ValidationError> {
    if !WAGER.is_match(wager) {
        return Err(ValidationError::new("invalid_wager"));
    }
    Ok(())
}

/// Converts a wager typed in display units into the currency's base units.
pub fn wager_to_base_units(wager: &str, display_unit_scale: f64) -> Result<f64, ValidationError> {
    validate_wager(wager)?;
    let amount: f64 = wager
        .parse()
        .map_err(|_| ValidationError::new("invalid_wager"))?;
    Ok(amount * display_unit_scale)
}

/// Decimal places shown for a currency with the given display scale (100 -> 2).
pub fn display_decimals(display_unit_scale: f64) -> usize {
    display_unit_scale.log10().round().max(0.0) as usize
}

/// Cuts what the user typed down to the precision the currency supports.
///
/// Lenient with amounts still being typed (`"1."`, `"."`, `""`); returns
/// `None` for anything that can't become an amount.
///
/// With a scale of 100: `"1.234"` becomes `"1.23"`, `"-1"` is rejected.
pub fn truncate_to_display_scale(value: &str, display_unit_scale: f64) -> Option<String> {
    if !AMOUNT_IN_PROGRESS.is_match(value) {
        return None;
    }
    if value.is_empty() || value == "." {
        return Some(value.to_string());
    }

    let decimals = display_decimals(display_unit_scale);
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };
    match fraction {
        None => Some(value.to_string()),
        Some(fraction) if fraction.len() <= decimals => Some(value.to_string()),
        Some(fraction) if !whole.is_empty() && !fraction.is_empty() => {
            let kept: String = fraction.chars().take(decimals).collect();
            Some(format!("{}.{}", whole, kept))
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_wager() {
        assert!(validate_wager("10").is_ok());
        assert!(validate_wager("0.25").is_ok());
        assert!(validate_wager("").is_err());
        assert!(validate_wager("1.").is_err());
        assert!(validate_wager("-3").is_err());
        assert!(validate_wager("1e5").is_err());
    }

    #[test]
    fn test_wager_to_base_units() {
        assert_eq!(wager_to_base_units("1.5", 100.0).unwrap(), 150.0);
        assert!(wager_to_base_units("abc", 100.0).is_err());
    }

    #[test]
    fn test_truncate_to_display_scale() {
        assert_eq!(truncate_to_display_scale("1.234", 100.0).as_deref(), Some("1.23"));
        assert_eq!(truncate_to_display_scale("1.23", 100.0).as_deref(), Some("1.23"));
        assert_eq!(truncate_to_display_scale("1.", 100.0).as_deref(), Some("1."));
        assert_eq!(truncate_to_display_scale(".", 100.0).as_deref(), Some("."));
        assert_eq!(truncate_to_display_scale("", 100.0).as_deref(), Some(""));
        assert_eq!(truncate_to_display_scale("42", 100.0).as_deref(), Some("42"));
        assert_eq!(truncate_to_display_scale("-1", 100.0), None);
        assert_eq!(truncate_to_display_scale(".12345", 100.0), None);
        assert_eq!(truncate_to_display_scale("7.99", 1.0).as_deref(), Some("7."));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Devanagari and fullwidth digits count as \d in Unicode regexes
        assert_eq!(truncate_to_display_scale("1.\u{0967}", 100.0), None);
        assert_eq!(truncate_to_display_scale("1.2\u{0967}\u{0968}", 100.0), None);
        assert_eq!(truncate_to_display_scale("\u{FF11}", 100.0), None);
        assert!(validate_wager("\u{0967}").is_err());
        assert!(validate_wager("1.\u{0967}").is_err());
        assert!(wager_to_base_units("\u{FF15}", 100.0).is_err());
    }

    #[test]
    fn test_display_decimals() {
        assert_eq!(display_decimals(100.0), 2);
        assert_eq!(display_decimals(1.0), 0);
        assert_eq!(display_decimals(100_000_000.0), 8);
    }
}
