//! Input validators for documents and extracted identifiers.

use crate::normalize::{digits_only, MISSING_VALUE};

/// Default ceiling for a single document (50 MB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 50 * 1024 * 1024;

/// PDF magic number.
const PDF_SIGNATURE: &[u8] = b"%PDF";

/// Validate raw document bytes before they are sent anywhere.
///
/// Checks: non-empty, recognizable PDF signature, size under `max_bytes`.
/// Returns a human-readable reason on failure; the caller turns it into an
/// `InvalidDocument` task failure rather than an error.
pub fn validate_pdf_bytes(bytes: &[u8], max_bytes: usize) -> std::result::Result<(), String> {
    if bytes.is_empty() {
        return Err("empty document".to_string());
    }

    if bytes.len() > max_bytes {
        return Err(format!(
            "document of {} bytes exceeds the {} byte limit",
            bytes.len(),
            max_bytes
        ));
    }

    if !bytes.starts_with(PDF_SIGNATURE) {
        return Err("document is not a valid PDF".to_string());
    }

    Ok(())
}

/// Basic CNPJ format check: exactly 14 digits once punctuation is removed.
///
/// Does not verify check digits.
pub fn is_valid_tax_id(tax_id: &str) -> bool {
    digits_only(tax_id).len() == 14
}

/// Whether a date string starts with a recognizable format:
/// `DD/MM/YYYY`, `DD-MM-YYYY` or `YYYY-MM-DD`.
pub fn is_recognized_date(date: &str) -> bool {
    if date.is_empty() || date == MISSING_VALUE {
        return false;
    }

    let bytes = date.as_bytes();
    let digits = |range: std::ops::Range<usize>| {
        bytes
            .get(range)
            .is_some_and(|s| s.iter().all(u8::is_ascii_digit))
    };

    // DD/MM/YYYY or DD-MM-YYYY
    let day_first = digits(0..2)
        && matches!(bytes.get(2), Some(b'/') | Some(b'-'))
        && digits(3..5)
        && bytes.get(5) == bytes.get(2)
        && digits(6..10);

    // YYYY-MM-DD
    let year_first = digits(0..4)
        && bytes.get(4) == Some(&b'-')
        && digits(5..7)
        && bytes.get(7) == Some(&b'-')
        && digits(8..10);

    day_first || year_first
}
