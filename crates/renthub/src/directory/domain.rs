use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Household and preference attributes for a tenant in the directory.
///
/// Owned by the relational collaborator; this core only reads it as filter
/// input. Optional fields are genuinely unknown, not zero: an unspecified
/// income must pass an income filter unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantProfile {
    pub tenant_id: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub household_income: Option<u32>,
    #[serde(default)]
    pub household_size: Option<u8>,
    #[serde(default)]
    pub has_pets: Option<bool>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub move_in_date: Option<NaiveDate>,
}

/// Tri-state pet predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetsFilter {
    #[default]
    Any,
    With,
    Without,
}

impl PetsFilter {
    pub(crate) fn admits(self, has_pets: Option<bool>) -> bool {
        match self {
            Self::Any => true,
            Self::With => has_pets == Some(true),
            Self::Without => has_pets == Some(false),
        }
    }
}
