//! Structural IBAN validation.
//!
//! An IBAN consists of a two-letter country code, two check digits and up to
//! thirty alphanumeric characters of BBAN. The check digits are verified
//! with the ISO/IEC 7064 MOD97-10 scheme; IBANs are case-insensitive.
//!
//! This module checks well-formedness only. Country-specific BBAN lengths
//! and bank-identifier positions are out of scope and left to an external
//! registry service.

/// Shortest IBAN currently in use (Norway, 15 characters).
const MIN_LENGTH: usize = 15;
/// Longest IBAN permitted by ISO 13616 (34 characters).
const MAX_LENGTH: usize = 34;

/// Check whether `text` is a structurally valid IBAN.
///
/// Accepts mixed case. Returns `false` for wrong length, a malformed
/// country-code/check-digit prefix, non-alphanumeric characters, or a
/// failing MOD97-10 checksum.
///
/// # Examples
///
/// ```
/// use statement_validator::iban;
///
/// assert!(iban::is_well_formed("NL91ABNA0417164300"));
/// assert!(!iban::is_well_formed("NL91ABNA0417164301"));
/// ```
pub fn is_well_formed(text: &str) -> bool {
    let normalized = text.trim().to_ascii_uppercase();

    if normalized.len() < MIN_LENGTH || normalized.len() > MAX_LENGTH {
        return false;
    }
    if !normalized.is_char_boundary(4) {
        return false;
    }

    let (prefix, bban) = normalized.split_at(4);
    let mut prefix_chars = prefix.chars();
    let country_ok = prefix_chars.by_ref().take(2).all(|c| c.is_ascii_uppercase());
    let check_digits_ok = prefix_chars.all(|c| c.is_ascii_digit());
    if !country_ok || !check_digits_ok {
        return false;
    }
    if !bban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }

    // MOD97-10: move the country code and check digits to the end, then
    // interpret letters as 10..=35 and reduce modulo 97. Valid IBANs
    // leave a remainder of exactly 1.
    let mut remainder: u32 = 0;
    for c in bban.chars().chain(prefix.chars()) {
        if c.is_ascii_digit() {
            remainder = (remainder * 10 + (c as u32 - '0' as u32)) % 97;
        } else {
            remainder = (remainder * 100 + (c as u32 - 'A' as u32 + 10)) % 97;
        }
    }
    remainder == 1
}
