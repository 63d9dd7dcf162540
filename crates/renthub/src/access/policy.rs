use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{Permission, Role, Tier, UserSnapshot};

/// Rule gating a single capability: who may hold it and at what standing.
#[derive(Debug, Clone)]
pub struct PermissionRule {
    pub allowed_roles: Vec<Role>,
    pub minimum_tier: Tier,
    pub requires_verification: bool,
}

impl PermissionRule {
    fn any_role(minimum_tier: Tier) -> Self {
        Self {
            allowed_roles: Role::ordered().to_vec(),
            minimum_tier,
            requires_verification: false,
        }
    }

    fn roles(allowed_roles: &[Role], minimum_tier: Tier) -> Self {
        Self {
            allowed_roles: allowed_roles.to_vec(),
            minimum_tier,
            requires_verification: false,
        }
    }

    fn verified(mut self) -> Self {
        self.requires_verification = true;
        self
    }
}

/// Why a permission check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialGround {
    RoleNotAllowed,
    TierTooLow { required: Tier },
    VerificationRequired,
}

/// Result of resolving a permission against a session snapshot.
///
/// `Loading` is produced when no snapshot is available yet (identity fetch in
/// flight) and is deliberately distinct from `Denied`: callers must never
/// collapse the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Loading,
    Allowed,
    Denied(DenialGround),
}

impl AccessDecision {
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// The static capability table. Effective permissions are a pure function of
/// `(role, tier, is_verified)` and are recomputed on every check.
#[derive(Debug, Clone)]
pub struct PermissionPolicy {
    rules: BTreeMap<Permission, PermissionRule>,
}

impl PermissionPolicy {
    /// The marketplace's standard capability table.
    ///
    /// Messaging requires at least `Verified` standing regardless of role; the
    /// tenant directory and invitations are supply-side capabilities; market
    /// analytics is a premium upsell.
    pub fn standard() -> Self {
        let mut rules = BTreeMap::new();

        rules.insert(
            Permission::UseMessaging,
            PermissionRule::any_role(Tier::Verified),
        );
        rules.insert(
            Permission::ViewTenantDirectory,
            PermissionRule::roles(&[Role::Agent, Role::Landlord, Role::Admin], Tier::Basic),
        );
        rules.insert(
            Permission::SendInvitations,
            PermissionRule::roles(&[Role::Agent, Role::Landlord, Role::Admin], Tier::Verified),
        );
        rules.insert(
            Permission::ManageListings,
            PermissionRule::roles(&[Role::Agent, Role::Landlord, Role::Admin], Tier::Basic),
        );
        rules.insert(
            Permission::ViewMarketAnalytics,
            PermissionRule::any_role(Tier::Premium),
        );
        rules.insert(
            Permission::UploadDocuments,
            PermissionRule::any_role(Tier::Basic).verified(),
        );
        rules.insert(
            Permission::RequestShowings,
            PermissionRule::roles(&[Role::Tenant, Role::Admin], Tier::Basic),
        );

        Self { rules }
    }

    pub fn rule_for(&self, permission: Permission) -> Option<&PermissionRule> {
        self.rules.get(&permission)
    }

    /// Resolve a capability against the current snapshot. A missing snapshot
    /// reports `Loading`, never `Denied`.
    pub fn resolve(
        &self,
        snapshot: Option<&UserSnapshot>,
        permission: Permission,
    ) -> AccessDecision {
        let Some(snapshot) = snapshot else {
            return AccessDecision::Loading;
        };

        let Some(rule) = self.rules.get(&permission) else {
            // Unknown capability names deny closed.
            return AccessDecision::Denied(DenialGround::RoleNotAllowed);
        };

        if !rule.allowed_roles.contains(&snapshot.role) {
            return AccessDecision::Denied(DenialGround::RoleNotAllowed);
        }

        if snapshot.tier < rule.minimum_tier {
            return AccessDecision::Denied(DenialGround::TierTooLow {
                required: rule.minimum_tier,
            });
        }

        if rule.requires_verification && !snapshot.is_verified {
            return AccessDecision::Denied(DenialGround::VerificationRequired);
        }

        AccessDecision::Allowed
    }

    /// Boolean convenience form for callers that already hold a snapshot.
    pub fn can_access(&self, snapshot: &UserSnapshot, permission: Permission) -> bool {
        self.resolve(Some(snapshot), permission).is_allowed()
    }
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
