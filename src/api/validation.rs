use chrono::NaiveDate;

use super::ApiError;

pub fn validate_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid id: {}. Id must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_required(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Minimal email shape check; real validation happens in the mail client.
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') || trimmed.starts_with('@') {
        return Err(ApiError::validation(format!("Invalid email: {email}")));
    }
    Ok(())
}

/// A reference month must be exactly "YYYY-MM" with a month of 01-12.
pub fn validate_reference_month(value: &str) -> Result<(), ApiError> {
    let bytes = value.as_bytes();
    let valid = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..].iter().all(u8::is_ascii_digit)
        && matches!(
            value.get(5..7).and_then(|m| m.parse::<u8>().ok()),
            Some(1..=12)
        );

    if valid {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "Invalid reference month '{value}'. Expected YYYY-MM"
        )))
    }
}

/// Parse an ISO "YYYY-MM-DD" date from user input.
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::validation(format!("Invalid {field} '{value}'. Expected YYYY-MM-DD"))
    })
}

/// Parse an optional date query parameter.
pub fn parse_date_opt(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    value.map(|v| parse_date(v, field)).transpose()
}

pub fn validate_non_negative(value: rust_decimal::Decimal, field: &str) -> Result<(), ApiError> {
    if value < rust_decimal::Decimal::ZERO {
        return Err(ApiError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_id() {
        assert!(validate_id(1).is_ok());
        assert!(validate_id(12345).is_ok());
        assert!(validate_id(0).is_err());
        assert!(validate_id(-1).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("Education", "name").is_ok());
        assert!(validate_required("", "name").is_err());
        assert!(validate_required("   ", "name").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.gov").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@leading.at").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_reference_month() {
        assert!(validate_reference_month("2026-08").is_ok());
        assert!(validate_reference_month("2026-01").is_ok());
        assert!(validate_reference_month("2026-13").is_err());
        assert!(validate_reference_month("2026-00").is_err());
        assert!(validate_reference_month("2026-8").is_err());
        assert!(validate_reference_month("202608").is_err());
        assert!(validate_reference_month("08-2026").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-08-06", "start date").is_ok());
        assert!(parse_date("06/08/2026", "start date").is_err());
        assert!(parse_date("2026-02-30", "start date").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(dec!(0.00), "amount").is_ok());
        assert!(validate_non_negative(dec!(10.50), "amount").is_ok());
        assert!(validate_non_negative(dec!(-0.01), "amount").is_err());
    }
}
