//! Validation of user input before it reaches the backend.
//!
//! Rules and messages match the product's sign-in and registration forms.

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    fn from_check(check: Result<(), String>, message: &str) -> Self {
        match check {
            Ok(()) => Self::ok(),
            Err(_) => Self::err(message),
        }
    }
}

pub fn validate_username(username: &str) -> ValidationResult {
    ValidationResult::from_check(
        lib_utils::validate_min_length(username.trim(), 3, "username"),
        "Минимум 3 символа",
    )
}

pub fn validate_email(email: &str) -> ValidationResult {
    ValidationResult::from_check(lib_utils::validate_email(email), "Введите корректный email")
}

/// Registration and sign-in only require a non-empty password.
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Введите пароль");
    }
    ValidationResult::ok()
}

/// Password reset enforces a minimum length.
pub fn validate_new_password(password: &str) -> ValidationResult {
    ValidationResult::from_check(
        lib_utils::validate_min_length(password, 8, "password"),
        "Пароль должен содержать минимум 8 символов",
    )
}

/// Report ids are UUIDs; the nil UUID marks a report that does not exist yet.
pub fn validate_report_id(id: &str) -> ValidationResult {
    if !shared::is_valid_report_id(id) {
        return ValidationResult::err("Некорректный идентификатор отчета");
    }
    ValidationResult::from_check(lib_utils::validate_uuid(id, "report id"), "Некорректный идентификатор отчета")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("test@example.com").is_valid);
        assert!(validate_email("user@domain.co.uk").is_valid);
        assert!(!validate_email("").is_valid);
        assert!(!validate_email("invalid").is_valid);
        assert_eq!(validate_email("@example.com").error.as_deref(), Some("Введите корректный email"));
    }

    #[test]
    fn test_username_validation() {
        assert!(validate_username("гость").is_valid);
        assert!(!validate_username("ab").is_valid);
        assert!(!validate_username("  ab  ").is_valid);
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("x").is_valid);
        assert!(!validate_password("").is_valid);
        assert!(validate_new_password("longenough").is_valid);
        assert!(!validate_new_password("short").is_valid);
    }

    #[test]
    fn test_report_id_validation() {
        assert!(validate_report_id("3f2504e0-4f89-11d3-9a0c-0305e82c3301").is_valid);
        assert!(!validate_report_id("00000000-0000-0000-0000-000000000000").is_valid);
        assert!(!validate_report_id("42").is_valid);
    }
}
