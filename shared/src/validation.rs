//! Validation utilities for the stock advisor

use chrono::NaiveDate;

/// Longest accepted product name, in characters
pub const MAX_PRODUCT_NAME_CHARS: usize = 120;

/// Storage format for sale dates
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Product Validations
// ============================================================================

/// Validate a product name and return it trimmed
pub fn validate_product_name(name: &str) -> Result<&str, &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Product name cannot be empty");
    }
    if trimmed.chars().count() > MAX_PRODUCT_NAME_CHARS {
        return Err("Product name is too long");
    }
    if trimmed.chars().any(char::is_control) {
        return Err("Product name cannot contain control characters");
    }
    Ok(trimmed)
}

// ============================================================================
// Sale Validations
// ============================================================================

/// Parse a stored sale date. Only 10-character `YYYY-MM-DD` strings qualify.
pub fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, SALE_DATE_FORMAT).ok()
}

/// Validate a submitted sale date
pub fn validate_sale_date(raw: &str) -> Result<NaiveDate, &'static str> {
    parse_sale_date(raw.trim()).ok_or("Sale date must be a valid YYYY-MM-DD date")
}

/// Validate a submitted sale quantity (whole units, not negative)
pub fn validate_sale_quantity(quantity: i64) -> Result<u64, &'static str> {
    u64::try_from(quantity).map_err(|_| "Sale quantity cannot be negative")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name_trims() {
        assert_eq!(validate_product_name("  Café molido  "), Ok("Café molido"));
    }

    #[test]
    fn test_validate_product_name_invalid() {
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name("a\tb").is_err());
        assert!(validate_product_name(&"x".repeat(MAX_PRODUCT_NAME_CHARS + 1)).is_err());
    }

    #[test]
    fn test_validate_product_name_counts_chars_not_bytes() {
        let name = "ñ".repeat(MAX_PRODUCT_NAME_CHARS);
        assert!(validate_product_name(&name).is_ok());
    }

    #[test]
    fn test_parse_sale_date() {
        assert_eq!(parse_sale_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_sale_date("2023-02-29"), None);
        assert_eq!(parse_sale_date("2024-2-9"), None);
        assert_eq!(parse_sale_date("2024-02-29T00:00"), None);
        assert_eq!(parse_sale_date(""), None);
    }

    #[test]
    fn test_validate_sale_date() {
        assert!(validate_sale_date(" 2024-01-15 ").is_ok());
        assert!(validate_sale_date("15/01/2024").is_err());
    }

    #[test]
    fn test_validate_sale_quantity() {
        assert_eq!(validate_sale_quantity(0), Ok(0));
        assert_eq!(validate_sale_quantity(12), Ok(12));
        assert!(validate_sale_quantity(-1).is_err());
    }
}
