//! Input validation applied before any request leaves the client.
//!
//! Every check returns the message a form would show next to the offending field.

use crate::model::{LoginRequest, RegisterRequest, MAX_CONTENT_CHARS};
use regex::Regex;
use std::sync::OnceLock;

const MIN_PASSWORD_CHARS: usize = 8;
const MIN_USERNAME_CHARS: usize = 3;
const MAX_USERNAME_CHARS: usize = 50;

/// Trims post content and checks its length. Returns the trimmed content.
pub fn validate_post_content(content: &str) -> Result<String, String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err("Content is required".to_string());
    }
    if trimmed.chars().count() > MAX_CONTENT_CHARS {
        return Err(format!(
            "Content must be at most {MAX_CONTENT_CHARS} characters"
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Please enter a valid email address".to_string());
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    let len = username.chars().count();
    if len < MIN_USERNAME_CHARS {
        return Err(format!(
            "Username must be at least {MIN_USERNAME_CHARS} characters"
        ));
    }
    if len > MAX_USERNAME_CHARS {
        return Err(format!(
            "Username must be at most {MAX_USERNAME_CHARS} characters"
        ));
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err(
            "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
        );
    }

    Ok(())
}

/// Minimal password check used at login: present and long enough.
pub fn validate_password_present(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        ));
    }
    Ok(())
}

/// Full strength check used at registration.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    validate_password_present(password)?;

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_upper && has_lower && has_digit) {
        return Err(
            "Password must contain at least one uppercase letter, one lowercase letter, and one number"
                .to_string(),
        );
    }
    Ok(())
}

pub fn validate_login(request: &LoginRequest) -> Result<(), String> {
    validate_email(&request.email)?;
    validate_password_present(&request.password)
}

pub fn validate_registration(request: &RegisterRequest) -> Result<(), String> {
    validate_email(&request.email)?;
    validate_username(&request.username)?;
    validate_password_strength(&request.password)?;

    if request.confirm_password.is_empty() {
        return Err("Please confirm your password".to_string());
    }
    if request.password != request.confirm_password {
        return Err("Passwords don't match".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_content_is_trimmed() {
        assert_eq!(validate_post_content("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn test_post_content_bounds() {
        assert!(validate_post_content("").is_err());
        assert!(validate_post_content(" \n\t ").is_err());
        assert!(validate_post_content(&"a".repeat(1000)).is_ok());
        assert!(validate_post_content(&"a".repeat(1001)).is_err());
        // counted in characters, not bytes
        assert!(validate_post_content(&"é".repeat(1000)).is_ok());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("test.user+tag@sub.example.co.uk").is_ok());
        assert_eq!(validate_email("").unwrap_err(), "Email is required");
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_username() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("a-b").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(50)).is_ok());
        assert!(validate_username(&"a".repeat(51)).is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("dot.name").is_err());
    }

    #[test]
    fn test_password_strength() {
        assert!(validate_password_strength("Secret123").is_ok());
        assert!(validate_password_strength("Sh0rt").is_err());
        assert!(validate_password_strength("alllowercase1").is_err());
        assert!(validate_password_strength("ALLUPPERCASE1").is_err());
        assert!(validate_password_strength("NoDigitsHere").is_err());
    }

    #[test]
    fn test_login_only_needs_length() {
        assert!(validate_login(&LoginRequest::new("a@b.co", "password")).is_ok());
        assert!(validate_login(&LoginRequest::new("a@b.co", "")).is_err());
        assert!(validate_login(&LoginRequest::new("a@b.co", "short")).is_err());
        assert!(validate_login(&LoginRequest::new("", "password")).is_err());
    }

    #[test]
    fn test_registration_confirmation() {
        let ok = RegisterRequest::new("a@b.co", "alice", "Secret123", "Secret123");
        assert!(validate_registration(&ok).is_ok());

        let mismatch = RegisterRequest::new("a@b.co", "alice", "Secret123", "Secret124");
        assert_eq!(
            validate_registration(&mismatch).unwrap_err(),
            "Passwords don't match"
        );

        let missing = RegisterRequest::new("a@b.co", "alice", "Secret123", "");
        assert_eq!(
            validate_registration(&missing).unwrap_err(),
            "Please confirm your password"
        );
    }
}
