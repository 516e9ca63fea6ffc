//! Events emitted by the auth reducers.

use crate::actions::SignUpProfile;
use serde::{Deserialize, Serialize};
use signalist_core::event::Event;

/// A new account was created.
///
/// Published once per successful sign-up. Carries the profile answers (never
/// the password) so the welcome email can be personalised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    /// Account email
    pub email: String,
    /// Display name
    pub name: String,
    /// Country of residence
    pub country: String,
    /// Investment goals
    pub investment_goals: String,
    /// Risk tolerance
    pub risk_tolerance: String,
    /// Preferred industry
    pub preferred_industry: String,
}

impl UserCreated {
    /// Event name.
    pub const NAME: &'static str = "app/user.created";
}

impl Event for UserCreated {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl From<&SignUpProfile> for UserCreated {
    fn from(profile: &SignUpProfile) -> Self {
        Self {
            email: profile.email.clone(),
            name: profile.full_name.clone(),
            country: profile.country.clone(),
            investment_goals: profile.investment_goals.clone(),
            risk_tolerance: profile.risk_tolerance.clone(),
            preferred_industry: profile.preferred_industry.clone(),
        }
    }
}
