use crate::errors::TrackerError;
use crate::models::{LoginRequest, PasswordStrengthResponse, SignupRequest, StrengthLevel};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@gmail\.com$").expect("valid email regex"));

const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordChecks {
    pub long_enough: bool,
    pub has_letter: bool,
    pub has_number: bool,
    pub has_symbol: bool,
}

impl PasswordChecks {
    pub fn of(password: &str) -> Self {
        Self {
            long_enough: password.chars().count() >= MIN_PASSWORD_LEN,
            has_letter: password.chars().any(|c| c.is_ascii_alphabetic()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
            has_symbol: password.chars().any(|c| SYMBOLS.contains(c)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.passed() == 4
    }

    fn passed(&self) -> usize {
        [
            self.long_enough,
            self.has_letter,
            self.has_number,
            self.has_symbol,
        ]
        .into_iter()
        .filter(|ok| *ok)
        .count()
    }

    fn missing(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.long_enough {
            missing.push(format!("at least {MIN_PASSWORD_LEN} characters"));
        }
        if !self.has_letter {
            missing.push("letters".to_string());
        }
        if !self.has_number {
            missing.push("numbers".to_string());
        }
        if !self.has_symbol {
            missing.push("symbols".to_string());
        }
        missing
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn password_strength(password: &str) -> PasswordStrengthResponse {
    if password.is_empty() {
        return PasswordStrengthResponse {
            level: None,
            missing: Vec::new(),
        };
    }

    let checks = PasswordChecks::of(password);
    let level = match checks.passed() {
        2 => StrengthLevel::Medium,
        3 => StrengthLevel::Good,
        4 => StrengthLevel::Strong,
        _ => StrengthLevel::Weak,
    };

    PasswordStrengthResponse {
        level: Some(level),
        missing: checks.missing(),
    }
}

pub fn validate_signup(req: &SignupRequest) -> Result<(), TrackerError> {
    if req.name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.password.is_empty()
        || req.confirm_password.is_empty()
    {
        return Err(TrackerError::validation("All fields are required"));
    }

    if !is_valid_email(req.email.trim()) {
        return Err(TrackerError::validation(
            "Please enter a valid email (format: name@gmail.com)",
        ));
    }

    if !PasswordChecks::of(&req.password).is_valid() {
        return Err(TrackerError::validation(
            "Password must be at least 6 characters and contain letters, numbers, and symbols",
        ));
    }

    if req.password != req.confirm_password {
        return Err(TrackerError::validation("Passwords do not match"));
    }

    Ok(())
}

pub fn validate_login(req: &LoginRequest) -> Result<(), TrackerError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(TrackerError::validation("Please fill in all fields"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, password: &str, confirm: &str) -> SignupRequest {
        SignupRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn email_must_be_gmail() {
        assert!(is_valid_email("ada.lovelace@gmail.com"));
        assert!(!is_valid_email("ada@example.com"));
        assert!(!is_valid_email("ada lovelace@gmail.com"));
    }

    #[test]
    fn signup_requires_every_field() {
        let mut req = signup("ada@gmail.com", "abc12!", "abc12!");
        req.name = "  ".to_string();
        assert_eq!(
            validate_signup(&req),
            Err(TrackerError::validation("All fields are required"))
        );
    }

    #[test]
    fn signup_checks_run_in_form_order() {
        let err = validate_signup(&signup("ada@yahoo.com", "short", "other")).unwrap_err();
        assert!(err.to_string().contains("valid email"));

        let err = validate_signup(&signup("ada@gmail.com", "abcdef1", "abcdef1")).unwrap_err();
        assert!(err.to_string().starts_with("Password must be"));

        let err = validate_signup(&signup("ada@gmail.com", "abc12!", "abc12?")).unwrap_err();
        assert_eq!(err, TrackerError::validation("Passwords do not match"));

        assert!(validate_signup(&signup("ada@gmail.com", "abc12!", "abc12!")).is_ok());
    }

    #[test]
    fn strength_levels_follow_rule_count() {
        assert_eq!(password_strength("").level, None);
        assert_eq!(password_strength("a").level, Some(StrengthLevel::Weak));
        assert_eq!(password_strength("a1").level, Some(StrengthLevel::Medium));
        assert_eq!(password_strength("abcdef1").level, Some(StrengthLevel::Good));
        assert_eq!(password_strength("abcde1!").level, Some(StrengthLevel::Strong));
    }

    #[test]
    fn strength_lists_missing_requirements() {
        let strength = password_strength("abc");
        assert_eq!(
            strength.missing,
            vec!["at least 6 characters", "numbers", "symbols"]
        );
        assert!(password_strength("abcde1!").missing.is_empty());
    }

    #[test]
    fn login_requires_both_fields() {
        let req = LoginRequest {
            email: "ada@gmail.com".to_string(),
            password: String::new(),
        };
        assert!(validate_login(&req).is_err());
    }
}
