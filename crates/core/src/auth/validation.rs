use crate::resource::ValidationError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Number of digits in an accepted phone number.
pub const PHONE_DIGITS: usize = 10;

/// Accepts `local@domain.tld`: no whitespace, exactly one `@`, and a dot in
/// the domain with text on both sides.
///
/// ```
/// use sheconnects_core::auth::validate_email;
///
/// assert!(validate_email("asha@example.com").is_ok());
/// assert!(validate_email("asha@example").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    let has_dotted_domain = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if has_dotted_domain {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Requires exactly ten ASCII digits.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(validate_email("asha@example.com").is_ok());
        assert!(validate_email("first.last@mail.example.org").is_ok());
    }

    #[test]
    fn rejects_email_without_at() {
        assert_eq!(validate_email("asha.example.com"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn rejects_email_with_two_ats() {
        assert_eq!(validate_email("a@b@c.com"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn rejects_email_without_dotted_domain() {
        assert_eq!(validate_email("asha@example"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("asha@.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("asha@example."), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn rejects_email_with_whitespace() {
        assert_eq!(validate_email("as ha@example.com"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn rejects_email_with_empty_local_part() {
        assert_eq!(validate_email("@example.com"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn phone_must_be_ten_digits() {
        assert!(validate_phone("0123456789").is_ok());
        assert_eq!(validate_phone("012345678"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone("01234567890"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone("01234-6789"), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("secret").is_ok());
        assert_eq!(validate_password("short"), Err(ValidationError::PasswordTooShort));
    }
}
