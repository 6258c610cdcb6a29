//! Employee validation
//!
//! Rules run in order and stop at the first failure:
//! 1. name length (characters) strictly between 3 and 30
//! 2. phone is exactly 11 ASCII digits
//! 3. `city_id` references an existing city

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::db::Storage;
use crate::models::Employee;

/// Names must be longer than this
pub const MIN_NAME_LEN: usize = 3;

/// Names must be shorter than this
pub const MAX_NAME_LEN: usize = 30;

/// `\d` is Unicode-aware in `regex`, so spell out the ASCII class.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{11}$").expect("invalid phone regex"));

/// Reason an employee was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidName,
    InvalidPhone,
    InvalidCity,
    /// The city lookup itself failed (backend error)
    CityCheckFailed,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName => write!(f, "name is invalid"),
            Self::InvalidPhone => write!(f, "phone is invalid"),
            Self::InvalidCity => write!(f, "city invalid"),
            Self::CityCheckFailed => write!(f, "error checking city"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check the name length rule.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len <= MIN_NAME_LEN || len >= MAX_NAME_LEN {
        return Err(ValidationError::InvalidName);
    }
    Ok(())
}

/// Check the phone format rule.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !PHONE_RE.is_match(phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// Validate an employee before it is persisted.
///
/// The city check hits the store, so this is the only async rule.
pub async fn validate_employee(
    store: &dyn Storage,
    employee: &Employee,
) -> Result<(), ValidationError> {
    validate_name(&employee.name)?;
    validate_phone(&employee.phone)?;

    match store.city_exists(employee.city_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ValidationError::InvalidCity),
        Err(e) => {
            tracing::warn!(city_id = employee.city_id, error = %e, "city lookup failed");
            Err(ValidationError::CityCheckFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn name_boundaries() {
        assert_eq!(validate_name("abc"), Err(ValidationError::InvalidName));
        assert!(validate_name("abcd").is_ok());
        assert!(validate_name(&"a".repeat(29)).is_ok());
        assert_eq!(
            validate_name(&"a".repeat(30)),
            Err(ValidationError::InvalidName)
        );
        assert_eq!(validate_name(""), Err(ValidationError::InvalidName));
    }

    #[test]
    fn name_counts_characters_not_bytes() {
        // 4 characters, 8 bytes
        assert!(validate_name("Дана").is_ok());
    }

    #[test]
    fn phone_format() {
        assert!(validate_phone("87076219166").is_ok());
        assert_eq!(validate_phone("123"), Err(ValidationError::InvalidPhone));
        assert_eq!(
            validate_phone("870762191667"),
            Err(ValidationError::InvalidPhone)
        );
        assert_eq!(
            validate_phone("8707621916a"),
            Err(ValidationError::InvalidPhone)
        );
        assert_eq!(
            validate_phone("+7076219166"),
            Err(ValidationError::InvalidPhone)
        );
        assert_eq!(
            validate_phone("87076219166\n"),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn phone_rejects_non_ascii_digits() {
        // Arabic-Indic digits
        assert_eq!(
            validate_phone("٠١٢٣٤٥٦٧٨٩٠"),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(ValidationError::InvalidName.to_string(), "name is invalid");
        assert_eq!(ValidationError::InvalidPhone.to_string(), "phone is invalid");
        assert_eq!(ValidationError::InvalidCity.to_string(), "city invalid");
        assert_eq!(
            ValidationError::CityCheckFailed.to_string(),
            "error checking city"
        );
    }

    #[tokio::test]
    async fn accepts_valid_employee() {
        let store = MemoryStore::new();
        let employee = Employee::new("Test", "87076219166", 1);
        assert!(validate_employee(&store, &employee).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_unknown_city() {
        let store = MemoryStore::new();
        let employee = Employee::new("Test", "87076219166", 99);
        assert_eq!(
            validate_employee(&store, &employee).await,
            Err(ValidationError::InvalidCity)
        );
    }

    #[tokio::test]
    async fn first_failing_rule_wins() {
        let store = MemoryStore::new();
        let employee = Employee::new("abc", "123", 99);
        assert_eq!(
            validate_employee(&store, &employee).await,
            Err(ValidationError::InvalidName)
        );

        let employee = Employee::new("Test", "123", 99);
        assert_eq!(
            validate_employee(&store, &employee).await,
            Err(ValidationError::InvalidPhone)
        );
    }

    #[tokio::test]
    async fn backend_failure_is_check_failed() {
        let store = MemoryStore::new();
        store.set_failing(true);
        let employee = Employee::new("Test", "87076219166", 1);
        assert_eq!(
            validate_employee(&store, &employee).await,
            Err(ValidationError::CityCheckFailed)
        );
    }

    #[tokio::test]
    async fn format_rules_do_not_touch_the_store() {
        let store = MemoryStore::new();
        store.set_failing(true);
        let employee = Employee::new("Test", "123", 1);
        assert_eq!(
            validate_employee(&store, &employee).await,
            Err(ValidationError::InvalidPhone)
        );
    }
}
