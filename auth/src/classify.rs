//! Sign-up failure classification.
//!
//! Providers report failures inconsistently: sometimes a structured code,
//! sometimes only prose. The structured code wins when present; message
//! patterns are the fallback. All patterns live in the tables below.

use crate::actions::ProviderFault;
use serde::Serialize;

/// Code fragments meaning the account already exists.
const DUPLICATE_CODES: &[&str] = &["ALREADY_EXISTS", "DUPLICATE"];

/// Code fragments meaning the password was rejected.
const PASSWORD_CODES: &[&str] = &["PASSWORD"];

/// Message fragments (lowercase) meaning the account already exists.
const DUPLICATE_MESSAGES: &[&str] = &["already exists", "duplicate"];

/// Message fragments (lowercase) meaning the password was rejected.
const PASSWORD_MESSAGES: &[&str] = &["password"];

/// Why a sign-up failed, as far as the user needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignUpFailure {
    /// An account with this email exists.
    AlreadyRegistered,
    /// The password was rejected.
    PasswordRequirements,
    /// Anything else.
    Other,
}

impl SignUpFailure {
    /// Classify from an optional structured code and a message.
    ///
    /// # Examples
    ///
    /// ```
    /// use signalist_auth::classify::SignUpFailure;
    ///
    /// assert_eq!(
    ///     SignUpFailure::classify(Some("USER_ALREADY_EXISTS"), "Bad request"),
    ///     SignUpFailure::AlreadyRegistered
    /// );
    /// assert_eq!(
    ///     SignUpFailure::classify(None, "Password too short"),
    ///     SignUpFailure::PasswordRequirements
    /// );
    /// ```
    #[must_use]
    pub fn classify(code: Option<&str>, message: &str) -> Self {
        if let Some(failure) = code.and_then(Self::from_code) {
            return failure;
        }

        let message = message.to_lowercase();
        if contains_any(&message, DUPLICATE_MESSAGES) {
            Self::AlreadyRegistered
        } else if contains_any(&message, PASSWORD_MESSAGES) {
            Self::PasswordRequirements
        } else {
            Self::Other
        }
    }

    /// Classify a provider fault.
    #[must_use]
    pub fn of(fault: &ProviderFault) -> Self {
        Self::classify(fault.code.as_deref(), &fault.message)
    }

    fn from_code(code: &str) -> Option<Self> {
        let code = code.to_uppercase();
        if contains_any(&code, DUPLICATE_CODES) {
            Some(Self::AlreadyRegistered)
        } else if contains_any(&code, PASSWORD_CODES) {
            Some(Self::PasswordRequirements)
        } else {
            None
        }
    }

    /// Short message shown on the form.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::AlreadyRegistered => "Email already registered",
            Self::PasswordRequirements => "Password does not meet requirements",
            Self::Other => "Failed to create account. Please try again.",
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
