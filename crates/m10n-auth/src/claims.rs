//! JWT Claims structure
//!
//! Defines the claims carried in portal tokens: the developer the token
//! belongs to and the monetization permissions it grants.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// A monetization permission a token can grant
///
/// "Own" permissions apply only to the subject's own resources; "any"
/// permissions apply to every developer in the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// View the subject's own prepaid balances
    ViewOwnBalance,
    /// View any developer's prepaid balances
    ViewAnyBalance,
    /// Force-refresh the subject's own prepaid balances
    RefreshOwnBalance,
    /// Force-refresh any developer's prepaid balances
    RefreshAnyBalance,
    /// View the rate plans the subject can purchase
    ViewOwnRatePlans,
    /// View the rate plans any developer can purchase
    ViewAnyRatePlans,
    /// View the prepaid balances of teams the subject belongs to
    ViewTeamBalance,
    /// Force-refresh the prepaid balances of teams the subject belongs to
    RefreshTeamBalance,
    /// View the rate plans teams the subject belongs to can purchase
    ViewTeamRatePlans,
    /// Administer the portal (currency setup, add-credit products)
    AdministerPortal,
}

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (developer id, usually an email address)
    pub sub: String,

    /// Permissions granted to the token
    pub permissions: Vec<Permission>,

    /// Teams the subject is a member of
    #[serde(default)]
    pub teams: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims for a developer
    ///
    /// The expiration is left unset and stamped by `JwtService` when the
    /// token is created.
    pub fn new(developer_id: &str, permissions: Vec<Permission>) -> Self {
        let now = Utc::now();

        Self {
            sub: developer_id.to_string(),
            permissions,
            teams: Vec::new(),
            iat: now.timestamp(),
            exp: 0, // Will be set by JwtService
        }
    }

    /// Record team memberships on the claims
    pub fn with_teams(mut self, teams: Vec<String>) -> Self {
        self.teams = teams;
        self
    }

    /// Create new claims with custom expiration duration
    pub fn with_expiration(
        developer_id: &str,
        permissions: Vec<Permission>,
        expires_in_secs: i64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expires_in_secs);

        Self {
            sub: developer_id.to_string(),
            permissions,
            teams: Vec::new(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        self.exp <= now
    }

    /// Check if the token grants a permission
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Get the developer id from the claims
    pub fn developer_id(&self) -> &str {
        &self.sub
    }

    /// Check team membership (case-insensitive)
    pub fn is_member_of(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t.eq_ignore_ascii_case(team))
    }

    /// Check if the token grants portal administration
    pub fn is_admin(&self) -> bool {
        self.has(Permission::AdministerPortal)
    }
}
