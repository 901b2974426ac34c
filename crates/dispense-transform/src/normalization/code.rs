//! Identifier cleanup.
//!
//! Codes pass through spreadsheets and columnar files that store them as
//! floats, so `27491` often arrives as `27491.0` or `27491,0`.

use dispense_model::CodeCleaning;

/// Cleans a possibly float-corrupted identifier.
///
/// Values that parse as a finite number become their integer part
/// (truncated toward zero); anything else keeps its text with a trailing
/// `.0…` suffix removed.
pub fn clean_code(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut text = trimmed.replace(',', ".");
    if text.starts_with('.') {
        text.insert(0, '0');
    }

    if let Ok(value) = text.parse::<f64>()
        && value.is_finite()
    {
        let whole = value.trunc();
        return if whole == 0.0 {
            "0".to_string()
        } else {
            format!("{whole}")
        };
    }

    strip_zero_fraction(&text).to_string()
}

/// Removes a trailing `.0`, `.00`, … suffix.
fn strip_zero_fraction(text: &str) -> &str {
    let without_zeros = text.trim_end_matches('0');
    if without_zeros.len() < text.len()
        && let Some(stem) = without_zeros.strip_suffix('.')
    {
        return stem;
    }
    text
}

/// Applies the cleaning rule configured for a reference domain.
pub fn clean_with(rule: CodeCleaning, raw: &str) -> String {
    match rule {
        CodeCleaning::Numeric => clean_code(Some(raw)),
        CodeCleaning::Trim => raw.trim().to_string(),
    }
}
