//! Synchronous input validation for the auth forms.
//!
//! Each validator applies its rules in a fixed order and returns the first
//! failing rule's message. Nothing here touches the network: a failed
//! validation stops the form before any pipeline call.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ValidationConfig;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 16;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .unwrap_or_else(|e| panic!("email pattern is a valid regex: {e}"))
});

/// Outcome of one validator. `error_message` is `None` iff `successful`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub successful: bool,
    pub error_message: Option<String>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            successful: true,
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            successful: false,
            error_message: Some(message.into()),
        }
    }
}

/// Password rules parameterized by the configured minimum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl From<&ValidationConfig> for PasswordPolicy {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }
}

/// blank → malformed → ok
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::failure("Email cannot be empty");
    }
    if !EMAIL_PATTERN.is_match(email) {
        return ValidationResult::failure("That's not a valid email");
    }
    ValidationResult::success()
}

/// blank → shorter than the policy minimum → ok
pub fn validate_password(password: &str, policy: PasswordPolicy) -> ValidationResult {
    if password.trim().is_empty() {
        return ValidationResult::failure("Password cannot be empty");
    }
    if password.chars().count() < policy.min_length {
        return ValidationResult::failure(format!(
            "Password needs to consist of at least {} characters",
            policy.min_length
        ));
    }
    ValidationResult::success()
}

/// blank → too short → too long → leading digit → leading non-lowercase →
/// characters outside `[a-z0-9_]` → ok
pub fn validate_username(username: &str) -> ValidationResult {
    if username.trim().is_empty() {
        return ValidationResult::failure("Username cannot be empty");
    }
    let length = username.chars().count();
    if length < USERNAME_MIN_LENGTH {
        return ValidationResult::failure(format!(
            "Username must be at least {USERNAME_MIN_LENGTH} characters"
        ));
    }
    if length > USERNAME_MAX_LENGTH {
        return ValidationResult::failure(format!(
            "Username cannot be longer than {USERNAME_MAX_LENGTH} characters"
        ));
    }
    // non-empty checked above
    let first = username.chars().next().unwrap_or_default();
    if first.is_ascii_digit() {
        return ValidationResult::failure("Username cannot start with a number");
    }
    if !first.is_ascii_lowercase() {
        return ValidationResult::failure("Username must start with a lowercase letter");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return ValidationResult::failure(
            "Username can only contain lowercase letters, numbers and underscores",
        );
    }
    ValidationResult::success()
}
