//! Password policy for new passwords.

use serde_json::json;

use fithub_core::AppError;
use fithub_core::config::AuthConfig;

/// Checks new passwords against length, character-class, and guessability rules.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Reject `password` unless it satisfies every rule.
    ///
    /// The error lists all broken rules under `details.password`. The
    /// account's email and name (`user_inputs`) count against the
    /// guessability score.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        let mut problems = Vec::new();

        if password.chars().count() < self.min_length {
            problems.push(format!("must be at least {} characters", self.min_length));
        }
        let classes = [
            (password.chars().any(char::is_uppercase), "an uppercase letter"),
            (password.chars().any(char::is_lowercase), "a lowercase letter"),
            (password.chars().any(|c| c.is_ascii_digit()), "a digit"),
        ];
        for (present, class) in classes {
            if !present {
                problems.push(format!("must contain {class}"));
            }
        }

        // Only score passwords that already pass the cheap checks.
        if problems.is_empty() && zxcvbn::zxcvbn(password, user_inputs).score() < zxcvbn::Score::Two {
            problems.push("is too easy to guess".to_string());
        }

        if problems.is_empty() {
            return Ok(());
        }
        Err(
            AppError::validation(format!("Password {}", problems[0]))
                .with_details(json!({ "password": problems })),
        )
    }

    /// A password change must actually change the password.
    pub fn validate_not_same(&self, current: &str, new: &str) -> Result<(), AppError> {
        if current == new {
            return Err(AppError::validation(
                "New password must differ from the current one",
            ));
        }
        Ok(())
    }
}
