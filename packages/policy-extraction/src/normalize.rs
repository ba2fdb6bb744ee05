//! Normalization primitives: currency formatting, filename sanitization
//! and digit extraction.
//!
//! Everything here is a pure function. Extraction payloads arrive with
//! monetary values in whatever shape the source document used
//! (`"1.234,56"`, `"1,234.56"`, `"1234.56"`, bare numbers); the canonical
//! record must only ever contain either the missing-value sentinel or a
//! `R$ x.xxx,xx` string.

/// Canonical marker for a field that is absent or unusable.
///
/// This is the same literal the extraction instructions tell the model to
/// emit, so it round-trips through payloads unchanged. Distinct from both
/// the empty string and zero; never silently defaulted to `0`.
pub const MISSING_VALUE: &str = "Não consta";

/// Format a raw monetary value as Brazilian currency (`R$ x.xxx,xx`).
///
/// Recognized "nothing here" inputs (empty, `"0"`, `"null"`, the sentinel
/// itself) return [`MISSING_VALUE`]. Text that survives stripping but does
/// not parse as a number is returned unchanged, so unrecognized-but-present
/// values stay visible instead of being discarded.
///
/// Idempotent: formatting an already-formatted value reproduces it.
pub fn format_currency(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed == "0"
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed == MISSING_VALUE
    {
        return MISSING_VALUE.to_string();
    }

    let stripped: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    if stripped.is_empty() {
        return MISSING_VALUE.to_string();
    }

    // The rightmost separator is the decimal point; the other is a
    // thousands mark. A lone ',' is decimal. A lone '.' is parsed as-is,
    // which cannot distinguish "1.234" (thousands) from "1.234" (decimal).
    let decimal = match (stripped.rfind(','), stripped.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => {
            stripped.replace('.', "").replace(',', ".")
        }
        (Some(_), Some(_)) => stripped.replace(',', ""),
        (Some(_), None) => stripped.replace(',', "."),
        _ => stripped,
    };

    match decimal.parse::<f64>() {
        Ok(value) => render_brl(value),
        Err(_) => raw.to_string(),
    }
}

/// Render a non-negative amount as `R$ x.xxx,xx`.
fn render_brl(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    format!("R$ {},{}", int_grouped, frac_part)
}

/// Remove the characters `\ / * ? : " < > |` from a candidate filename.
///
/// Everything else passes through unchanged.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|'))
        .collect()
}

/// Keep only the digit characters of the input, in original order.
///
/// Used on free-text identifiers (tax ids, policy numbers) before
/// downstream comparison.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}
