use serde::Serialize;

use super::domain::{Permission, Role, Tier, UserSnapshot};
use super::policy::{AccessDecision, DenialGround, PermissionPolicy};

/// The three fixed explanation messages a blocked feature can show, keyed by
/// the tier the rule demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierMessage {
    Generic,
    PremiumRequired,
    VerifiedRequired,
}

impl TierMessage {
    pub(crate) const fn for_denial(ground: DenialGround) -> Self {
        match ground {
            DenialGround::TierTooLow {
                required: Tier::Premium,
            } => Self::PremiumRequired,
            DenialGround::TierTooLow {
                required: Tier::Verified,
            }
            | DenialGround::VerificationRequired => Self::VerifiedRequired,
            _ => Self::Generic,
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Self::Generic => "You do not have access to this feature.",
            Self::PremiumRequired => "Upgrade to a Premium plan to unlock this feature.",
            Self::VerifiedRequired => "Verify your account to unlock this feature.",
        }
    }

    /// Action the explanation can offer alongside the message.
    pub const fn upgrade_action(self) -> Option<&'static str> {
        match self {
            Self::Generic => None,
            Self::PremiumRequired => Some("/settings/billing"),
            Self::VerifiedRequired => Some("/settings/verification"),
        }
    }
}

/// What a feature wrapper should render for the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureGateOutcome {
    /// Identity fetch still in flight; show neither content nor a denial.
    Loading,
    /// Access granted, render the wrapped content.
    Render,
    /// A fallback was supplied; it wins unconditionally over any message.
    Fallback,
    /// No fallback; show the explanation keyed by the required tier.
    Blocked(TierMessage),
}

/// Feature-level wrapper around the permission resolver.
#[derive(Debug, Clone)]
pub struct FeatureGate {
    permission: Permission,
    has_fallback: bool,
}

impl FeatureGate {
    pub const fn new(permission: Permission) -> Self {
        Self {
            permission,
            has_fallback: false,
        }
    }

    /// Supplying a fallback replaces every denied outcome, before any
    /// messaging is evaluated. Loading stays loading either way.
    pub const fn with_fallback(mut self) -> Self {
        self.has_fallback = true;
        self
    }

    pub fn evaluate(
        &self,
        policy: &PermissionPolicy,
        snapshot: Option<&UserSnapshot>,
    ) -> FeatureGateOutcome {
        match policy.resolve(snapshot, self.permission) {
            AccessDecision::Loading => FeatureGateOutcome::Loading,
            AccessDecision::Allowed => FeatureGateOutcome::Render,
            _ if self.has_fallback => FeatureGateOutcome::Fallback,
            AccessDecision::Denied(ground) => {
                FeatureGateOutcome::Blocked(TierMessage::for_denial(ground))
            }
        }
    }
}

/// What a routed screen should do for the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteGateOutcome {
    /// Identity fetch still in flight; block behind a spinner.
    Loading,
    /// Role allow-list miss; send the user away, remembering where they were
    /// headed so sign-in can come back.
    Redirect { to: String, preserve_target: String },
    /// Permission miss; blocking panel, no redirect.
    PermissionDenied { permission: Permission },
    /// Verification demanded by the route but the account is unverified.
    VerificationRequired,
    Allow,
}

/// Route-level guard. The four checks run strictly in order and the first
/// failure wins: loading, then role allow-list, then permission, then
/// verification.
#[derive(Debug, Clone)]
pub struct RouteGate {
    allowed_roles: Vec<Role>,
    required_permission: Option<Permission>,
    requires_verification: bool,
    fallback_path: String,
}

impl RouteGate {
    pub fn new(fallback_path: impl Into<String>) -> Self {
        Self {
            allowed_roles: Vec::new(),
            required_permission: None,
            requires_verification: false,
            fallback_path: fallback_path.into(),
        }
    }

    /// Restrict the route to the given roles. An empty allow-list admits any
    /// role.
    pub fn allow_roles(mut self, roles: &[Role]) -> Self {
        self.allowed_roles = roles.to_vec();
        self
    }

    pub fn require_permission(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }

    pub fn require_verification(mut self) -> Self {
        self.requires_verification = true;
        self
    }

    pub fn evaluate(
        &self,
        policy: &PermissionPolicy,
        snapshot: Option<&UserSnapshot>,
        target: &str,
    ) -> RouteGateOutcome {
        let Some(snapshot) = snapshot else {
            return RouteGateOutcome::Loading;
        };

        if !self.allowed_roles.is_empty() && !self.allowed_roles.contains(&snapshot.role) {
            return RouteGateOutcome::Redirect {
                to: self.fallback_path.clone(),
                preserve_target: target.to_string(),
            };
        }

        if let Some(permission) = self.required_permission {
            if !policy.resolve(Some(snapshot), permission).is_allowed() {
                return RouteGateOutcome::PermissionDenied { permission };
            }
        }

        if self.requires_verification && !snapshot.is_verified {
            return RouteGateOutcome::VerificationRequired;
        }

        RouteGateOutcome::Allow
    }
}
