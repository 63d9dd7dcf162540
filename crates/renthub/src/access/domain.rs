use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Functional category of a marketplace user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Tenant,
    Agent,
    Landlord,
    Admin,
}

impl Role {
    pub const fn ordered() -> [Self; 4] {
        [Self::Tenant, Self::Agent, Self::Landlord, Self::Admin]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tenant => "Tenant",
            Self::Agent => "Agent",
            Self::Landlord => "Landlord",
            Self::Admin => "Admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tenant" => Some(Self::Tenant),
            "agent" => Some(Self::Agent),
            "landlord" => Some(Self::Landlord),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Account standing, ordered so gating is a plain comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Basic,
    Verified,
    Premium,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Verified => "Verified",
            Self::Premium => "Premium",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "verified" => Some(Self::Verified),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}

/// Static capability names gated by the policy. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    UseMessaging,
    ViewTenantDirectory,
    SendInvitations,
    ManageListings,
    ViewMarketAnalytics,
    UploadDocuments,
    RequestShowings,
}

impl Permission {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::UseMessaging,
            Self::ViewTenantDirectory,
            Self::SendInvitations,
            Self::ManageListings,
            Self::ViewMarketAnalytics,
            Self::UploadDocuments,
            Self::RequestShowings,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UseMessaging => "use_messaging",
            Self::ViewTenantDirectory => "view_tenant_directory",
            Self::SendInvitations => "send_invitations",
            Self::ManageListings => "manage_listings",
            Self::ViewMarketAnalytics => "view_market_analytics",
            Self::UploadDocuments => "upload_documents",
            Self::RequestShowings => "request_showings",
        }
    }
}

/// Read-only session snapshot supplied by the identity collaborator.
///
/// Captured once per request and passed explicitly; the policy never caches it
/// across requests, so a role change takes effect on the next snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub tier: Tier,
    pub is_verified: bool,
}

impl UserSnapshot {
    /// Rebuild the snapshot from the identity headers the edge proxy injects.
    /// `None` means the identity fetch has not completed for this request,
    /// which callers must treat as loading, not as denial.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let text = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };

        let user_id = text("x-user-id")?;
        let email = text("x-user-email").unwrap_or_default();
        let role = Role::parse(&text("x-user-role")?)?;
        let tier = text("x-user-tier")
            .as_deref()
            .and_then(Tier::parse)
            .unwrap_or(Tier::Basic);
        let is_verified = text("x-user-verified")
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Some(Self {
            user_id,
            email,
            role,
            tier,
            is_verified,
        })
    }
}
