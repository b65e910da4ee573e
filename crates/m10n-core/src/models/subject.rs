//! Billing subject addressing
//!
//! Monetization data is always requested on behalf of a subject: a
//! developer, or a team the developer acts for. Team context travels as an
//! optional value next to the developer id rather than as a separate
//! subject type; cache keys and upstream routing switch on its presence.

use serde::{Deserialize, Serialize};

/// Whose monetization data a request is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSubject {
    /// The developer id (email address upstream)
    pub developer_id: String,

    /// Team the request is scoped to, when the developer acts for one
    pub team: Option<String>,
}

impl BillingSubject {
    /// A developer acting for themselves
    pub fn developer(developer_id: impl Into<String>) -> Self {
        Self {
            developer_id: developer_id.into(),
            team: None,
        }
    }

    /// A developer acting for a team
    pub fn for_team(developer_id: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            developer_id: developer_id.into(),
            team: Some(team.into()),
        }
    }

    /// The id the upstream billing API and the cache are addressed with
    pub fn billing_id(&self) -> &str {
        self.team.as_deref().unwrap_or(&self.developer_id)
    }

    pub fn is_team(&self) -> bool {
        self.team.is_some()
    }
}
