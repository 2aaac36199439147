//! Input validation utilities

/// Validate email format (basic validation)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !email.contains('@') {
        return Err("Invalid email format");
    }
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err("Invalid email format");
    }
    if parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format");
    }
    if !parts[1].contains('.') {
        return Err("Invalid email domain");
    }
    Ok(())
}

/// Normalize an email to its canonical lowercase form
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a national id (carnet): digits with an optional one- or
/// two-letter extension, as issued regionally
pub fn validate_carnet(carnet: &str) -> Result<(), &'static str> {
    let trimmed = carnet.trim();
    if trimmed.len() < 5 || trimmed.len() > 12 {
        return Err("Carnet must be between 5 and 12 characters");
    }
    let digits = trimmed.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    if trimmed.len() - digits.len() > 2 {
        return Err("Carnet extension must be at most 2 letters");
    }
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err("Carnet must be numeric");
    }
    Ok(())
}

/// Validate a phone number: digits, optionally prefixed with '+'
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let trimmed = phone.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.len() < 7 || digits.len() > 15 {
        return Err("Phone must be between 7 and 15 digits");
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone must contain only digits");
    }
    Ok(())
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@x.com").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@X.Com "), "ana@x.com");
    }

    #[test]
    fn test_validate_carnet() {
        assert!(validate_carnet("1234567").is_ok());
        assert!(validate_carnet("1234567LP").is_ok());
        assert!(validate_carnet("123").is_err()); // Too short
        assert!(validate_carnet("12a4567").is_err()); // Letter inside
        assert!(validate_carnet("1234567ABC").is_err()); // Extension too long
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("71234567").is_ok());
        assert!(validate_phone("+59171234567").is_ok());
        assert!(validate_phone("12345").is_err()); // Too short
        assert!(validate_phone("7123-4567").is_err()); // Non-digit
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  Colegio San Andrés \u{0000}"), "Colegio San Andrés");
    }
}
