//! Login and sign-up form validation.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use crate::api::{Credentials, SignUpRequest};

pub const PASSWORD_MIN_LEN: usize = 8;
/// Special characters the backend's password policy accepts.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const MSG_LOGIN_FAILED: &str = "Incorrect username or password.";
pub const MSG_LOGOUT_CONFIRM: &str = "Do you really want to log out?";
pub const MSG_SIGN_UP_DONE: &str = "Sign-up complete.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Enter your username and password.")]
    MissingCredentials,
    #[error("Fill in every field.")]
    MissingFields,
    #[error("Password must be at least 8 characters and include a number, a letter and a special character.")]
    WeakPassword,
    #[error("Passwords do not match.")]
    ConfirmMismatch,
}

/// Per-rule password check, for the live checklist under the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordRules {
    pub length: bool,
    pub digit: bool,
    pub letter: bool,
    pub special: bool,
}

impl PasswordRules {
    #[must_use]
    pub fn check(password: &str) -> Self {
        Self {
            length: password.chars().count() >= PASSWORD_MIN_LEN,
            digit: password.chars().any(|c| c.is_ascii_digit()),
            letter: password.chars().any(|c| c.is_ascii_alphabetic()),
            special: password.chars().any(|c| PASSWORD_SPECIALS.contains(c)),
        }
    }

    #[must_use]
    pub fn all(self) -> bool {
        self.length && self.digit && self.letter && self.special
    }
}

/// # Errors
///
/// Both fields are required. The username is trimmed; the password is sent
/// as typed.
pub fn validate_login(username: &str, password: &str) -> Result<Credentials, FormError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(FormError::MissingCredentials);
    }
    Ok(Credentials { username: username.to_owned(), password: password.to_owned() })
}

/// # Errors
///
/// Checked in order: missing fields, password policy, confirmation.
pub fn validate_sign_up(
    username: &str,
    nickname: &str,
    password: &str,
    confirm: &str,
) -> Result<SignUpRequest, FormError> {
    let (username, nickname, password, confirm) = (username.trim(), nickname.trim(), password.trim(), confirm.trim());
    if username.is_empty() || nickname.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(FormError::MissingFields);
    }
    if !PasswordRules::check(password).all() {
        return Err(FormError::WeakPassword);
    }
    if password != confirm {
        return Err(FormError::ConfirmMismatch);
    }
    Ok(SignUpRequest {
        username: username.to_owned(),
        password: password.to_owned(),
        nickname: nickname.to_owned(),
    })
}

/// Live hint under the confirmation field. `None` while it is empty.
#[must_use]
pub fn confirm_hint(password: &str, confirm: &str) -> Option<(bool, &'static str)> {
    let (password, confirm) = (password.trim(), confirm.trim());
    if confirm.is_empty() {
        return None;
    }
    if !password.is_empty() && password == confirm {
        Some((true, "Passwords match."))
    } else {
        Some((false, "Passwords do not match."))
    }
}

/// Welcome line after login.
#[must_use]
pub fn greeting(nickname: Option<&str>) -> String {
    match nickname.filter(|name| !name.is_empty()) {
        Some(name) => format!("Welcome, {name}!"),
        None => "Logged in!".to_owned(),
    }
}
