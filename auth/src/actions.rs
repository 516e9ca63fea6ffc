//! Authentication actions.
//!
//! Commands come from the HTTP boundary; every command ends in exactly one
//! `*Completed` action carrying the [`ActionResult`] the caller sees. The
//! intermediate sign-up actions are produced by effects only.
//!
//! ```text
//! SignIn  ──► SignInCompleted
//! SignOut ──► SignOutCompleted
//! SignUp  ──► SignUpResponded ──┬──────────────────────► SignUpCompleted
//!                               └─► SessionProbed ─────► SignUpCompleted
//! ```

use crate::classify::SignUpFailure;
use crate::providers::{ForwardedHeaders, ProviderResponse, ProviderSession};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Email and password submitted by the sign-in form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Everything the sign-up form collects.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpProfile {
    /// Account email
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Display name
    pub full_name: String,
    /// Country of residence
    pub country: String,
    /// Investment goals, free text
    pub investment_goals: String,
    /// Risk tolerance, free text
    pub risk_tolerance: String,
    /// Preferred industry, free text
    pub preferred_industry: String,
}

impl std::fmt::Debug for SignUpProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpProfile")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .field("country", &self.country)
            .field("investment_goals", &self.investment_goals)
            .field("risk_tolerance", &self.risk_tolerance)
            .field("preferred_industry", &self.preferred_industry)
            .finish()
    }
}

/// Uniform result shape returned to forms.
///
/// Only constructible through [`ActionResult::ok`], [`ActionResult::ok_empty`]
/// and [`ActionResult::failure`]: a successful result never carries an error
/// and a failed one always does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ActionResult {
    /// Success carrying the provider's response body.
    #[must_use]
    pub const fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Success with nothing to report.
    #[must_use]
    pub const fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: None,
        }
    }

    /// Failure with a short user-facing error.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Attach an informational message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether the action succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Data returned on success.
    #[must_use]
    pub const fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    /// User-facing error on failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Informational message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Where an ambiguous sign-up signal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultOrigin {
    /// 2xx response that was `null` or error-shaped.
    ErrorResponse,
    /// The call itself failed.
    Exception,
}

/// Details of a sign-up call that did not plainly succeed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFault {
    /// Message used for classification and logs
    pub message: String,
    /// Structured code, when the provider sent one
    pub code: Option<String>,
    /// Which path produced the fault
    pub origin: FaultOrigin,
    /// The response, for the error-response path
    pub response: Option<ProviderResponse>,
}

impl ProviderFault {
    /// Cookies issued alongside the fault, if any.
    #[must_use]
    pub fn set_cookies(&self) -> &[String] {
        self.response
            .as_ref()
            .map_or(&[], |response| response.set_cookies.as_slice())
    }
}

/// Result of the sign-up provider call, reduced to what matters.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// Non-null response without an `error` member.
    Created(ProviderResponse),
    /// Anything else; the account may or may not exist.
    Ambiguous(ProviderFault),
}

/// Authentication actions (commands and their results).
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    // ═══════════════════════════════════════════════════════════
    // Sign In
    // ═══════════════════════════════════════════════════════════
    /// Sign in with email and password.
    SignIn {
        /// Request id, unique per request
        correlation_id: Uuid,
        /// Submitted credentials
        credentials: Credentials,
    },

    /// Sign-in finished.
    SignInCompleted {
        /// Request id, unique per request
        correlation_id: Uuid,
        /// What the caller sees
        result: ActionResult,
        /// Cookies to relay to the caller
        set_cookies: Vec<String>,
    },

    // ═══════════════════════════════════════════════════════════
    // Sign Out
    // ═══════════════════════════════════════════════════════════
    /// End the caller's session.
    SignOut {
        /// Request id, unique per request
        correlation_id: Uuid,
        /// Caller's cookies
        headers: ForwardedHeaders,
    },

    /// Sign-out finished.
    SignOutCompleted {
        /// Request id, unique per request
        correlation_id: Uuid,
        /// What the caller sees
        result: ActionResult,
        /// Cookies to relay to the caller (usually expiring the session)
        set_cookies: Vec<String>,
    },

    // ═══════════════════════════════════════════════════════════
    // Sign Up
    // ═══════════════════════════════════════════════════════════
    /// Create an account.
    SignUp {
        /// Request id, unique per request
        correlation_id: Uuid,
        /// Submitted profile
        profile: SignUpProfile,
        /// Caller's cookies
        headers: ForwardedHeaders,
    },

    /// The provider answered the sign-up call.
    SignUpResponded {
        /// Request id, unique per request
        correlation_id: Uuid,
        /// Reduced outcome
        outcome: SignUpOutcome,
    },

    /// Session lookup after an ambiguous sign-up finished.
    SessionProbed {
        /// Request id, unique per request
        correlation_id: Uuid,
        /// Session found, if any (lookup errors count as none)
        session: Option<ProviderSession>,
    },

    /// Sign-up finished.
    SignUpCompleted {
        /// Request id, unique per request
        correlation_id: Uuid,
        /// What the caller sees
        result: ActionResult,
        /// Classified failure, when `result` is a failure
        failure: Option<SignUpFailure>,
        /// Cookies to relay to the caller
        set_cookies: Vec<String>,
    },
}

impl AuthAction {
    /// Correlation id carried by every action.
    #[must_use]
    pub const fn correlation_id(&self) -> Uuid {
        match self {
            Self::SignIn { correlation_id, .. }
            | Self::SignInCompleted { correlation_id, .. }
            | Self::SignOut { correlation_id, .. }
            | Self::SignOutCompleted { correlation_id, .. }
            | Self::SignUp { correlation_id, .. }
            | Self::SignUpResponded { correlation_id, .. }
            | Self::SessionProbed { correlation_id, .. }
            | Self::SignUpCompleted { correlation_id, .. } => *correlation_id,
        }
    }

    /// Whether this action ends a request.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::SignInCompleted { .. } | Self::SignOutCompleted { .. } | Self::SignUpCompleted { .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_result_serializes_without_error() {
        let value = serde_json::to_value(ActionResult::ok(json!({ "user": { "id": "u1" } }))).unwrap();
        assert_eq!(value, json!({ "success": true, "data": { "user": { "id": "u1" } } }));
    }

    #[test]
    fn empty_and_failure_shapes() {
        assert_eq!(
            serde_json::to_value(ActionResult::ok_empty()).unwrap(),
            json!({ "success": true })
        );
        assert_eq!(
            serde_json::to_value(ActionResult::failure("Sign out failed")).unwrap(),
            json!({ "success": false, "error": "Sign out failed" })
        );
    }

    #[test]
    fn message_is_optional_extra() {
        let result = ActionResult::ok_empty().with_message("Signed out");
        assert!(result.is_success());
        assert_eq!(result.message(), Some("Signed out"));
        assert_eq!(result.error(), None);
    }

    #[test]
    fn profile_uses_camel_case_and_redacts_password() {
        let profile: SignUpProfile = serde_json::from_value(json!({
            "email": "ada@example.com",
            "password": "s3cret-pass",
            "fullName": "Ada Lovelace",
            "country": "United Kingdom",
            "investmentGoals": "Growth",
            "riskTolerance": "High",
            "preferredIndustry": "Technology"
        }))
        .unwrap();

        assert_eq!(profile.full_name, "Ada Lovelace");
        assert!(!format!("{profile:?}").contains("s3cret-pass"));
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials {
            email: "ada@example.com".to_string(),
            password: "s3cret-pass".to_string(),
        };
        assert!(!format!("{credentials:?}").contains("s3cret-pass"));
    }

    #[test]
    fn terminal_actions() {
        let id = Uuid::new_v4();
        let done = AuthAction::SignOutCompleted {
            correlation_id: id,
            result: ActionResult::ok_empty(),
            set_cookies: vec![],
        };
        assert!(done.is_terminal());
        assert_eq!(done.correlation_id(), id);

        let start = AuthAction::SignOut {
            correlation_id: id,
            headers: ForwardedHeaders::default(),
        };
        assert!(!start.is_terminal());
    }
}
