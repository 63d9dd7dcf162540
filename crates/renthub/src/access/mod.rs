//! Role- and tier-based access policy for marketplace features.
//!
//! The policy is a static table from [`Permission`] to the rule that gates it;
//! the resolver recomputes the answer from the caller's `(role, tier,
//! is_verified)` snapshot on every check. Nothing here is persisted or cached.
//! The two gates mirror the surfaces pages use: a feature gate deciding
//! whether a fragment renders, and a route gate deciding whether a whole
//! screen is reachable.

pub mod domain;
pub mod gate;
pub mod policy;

pub use domain::{Permission, Role, Tier, UserSnapshot};
pub use gate::{FeatureGate, FeatureGateOutcome, RouteGate, RouteGateOutcome, TierMessage};
pub use policy::{AccessDecision, DenialGround, PermissionPolicy, PermissionRule};
