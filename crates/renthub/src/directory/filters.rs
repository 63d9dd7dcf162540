use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{PetsFilter, TenantProfile};

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive substring match over email, preferred locations, and bio.
pub fn matches_query(tenant: &TenantProfile, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    contains_ignore_case(&tenant.email, query)
        || tenant
            .preferred_locations
            .iter()
            .any(|location| contains_ignore_case(location, query))
        || tenant
            .bio
            .as_deref()
            .map(|bio| contains_ignore_case(bio, query))
            .unwrap_or(false)
}

/// Inclusive income bounds; tenants with no declared income always pass.
pub fn matches_income(tenant: &TenantProfile, min: u32, max: u32) -> bool {
    match tenant.household_income {
        Some(income) => income >= min && income <= max,
        None => true,
    }
}

/// Inclusive lower bound on the desired move-in date.
pub fn matches_move_in(tenant: &TenantProfile, earliest: NaiveDate) -> bool {
    match tenant.move_in_date {
        Some(date) => date >= earliest,
        None => true,
    }
}

/// Case-insensitive substring over preferred locations.
pub fn matches_location(tenant: &TenantProfile, location: &str) -> bool {
    let location = location.trim();
    if location.is_empty() {
        return true;
    }

    tenant
        .preferred_locations
        .iter()
        .any(|preferred| contains_ignore_case(preferred, location))
}

/// Exact household size match; an undeclared size never matches.
pub fn matches_household_size(tenant: &TenantProfile, size: u8) -> bool {
    tenant.household_size == Some(size)
}

pub fn filter_by_query(tenants: &[TenantProfile], query: &str) -> Vec<TenantProfile> {
    tenants
        .iter()
        .filter(|tenant| matches_query(tenant, query))
        .cloned()
        .collect()
}

pub fn filter_by_income(tenants: &[TenantProfile], min: u32, max: u32) -> Vec<TenantProfile> {
    tenants
        .iter()
        .filter(|tenant| matches_income(tenant, min, max))
        .cloned()
        .collect()
}

pub fn filter_by_move_in(tenants: &[TenantProfile], earliest: NaiveDate) -> Vec<TenantProfile> {
    tenants
        .iter()
        .filter(|tenant| matches_move_in(tenant, earliest))
        .cloned()
        .collect()
}

pub fn filter_by_location(tenants: &[TenantProfile], location: &str) -> Vec<TenantProfile> {
    tenants
        .iter()
        .filter(|tenant| matches_location(tenant, location))
        .cloned()
        .collect()
}

pub fn filter_by_pets(tenants: &[TenantProfile], pets: PetsFilter) -> Vec<TenantProfile> {
    tenants
        .iter()
        .filter(|tenant| pets.admits(tenant.has_pets))
        .cloned()
        .collect()
}

pub fn filter_by_household_size(tenants: &[TenantProfile], size: u8) -> Vec<TenantProfile> {
    tenants
        .iter()
        .filter(|tenant| matches_household_size(tenant, size))
        .cloned()
        .collect()
}

/// A composed directory search. Inactive fields are skipped; active fields
/// AND together over the same base collection, so composition order never
/// changes the result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantQuery {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub min_income: Option<u32>,
    #[serde(default)]
    pub max_income: Option<u32>,
    #[serde(default)]
    pub move_in_after: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub pets: PetsFilter,
    #[serde(default)]
    pub household_size: Option<u8>,
}

impl TenantQuery {
    pub fn matches(&self, tenant: &TenantProfile) -> bool {
        if let Some(query) = self.query.as_deref() {
            if !matches_query(tenant, query) {
                return false;
            }
        }

        let min = self.min_income.unwrap_or(0);
        let max = self.max_income.unwrap_or(u32::MAX);
        if (self.min_income.is_some() || self.max_income.is_some())
            && !matches_income(tenant, min, max)
        {
            return false;
        }

        if let Some(earliest) = self.move_in_after {
            if !matches_move_in(tenant, earliest) {
                return false;
            }
        }

        if let Some(location) = self.location.as_deref() {
            if !matches_location(tenant, location) {
                return false;
            }
        }

        if !self.pets.admits(tenant.has_pets) {
            return false;
        }

        if let Some(size) = self.household_size {
            if !matches_household_size(tenant, size) {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, tenants: &[TenantProfile]) -> Vec<TenantProfile> {
        tenants
            .iter()
            .filter(|tenant| self.matches(tenant))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: &str) -> TenantProfile {
        TenantProfile {
            tenant_id: id.to_string(),
            email: format!("{id}@example.com"),
            bio: None,
            household_income: None,
            household_size: None,
            has_pets: None,
            preferred_locations: Vec::new(),
            move_in_date: None,
        }
    }

    fn sample() -> Vec<TenantProfile> {
        vec![
            TenantProfile {
                bio: Some("Quiet professional, works downtown".to_string()),
                household_income: Some(4200),
                household_size: Some(1),
                has_pets: Some(false),
                preferred_locations: vec!["Des Moines".to_string()],
                move_in_date: NaiveDate::from_ymd_opt(2025, 10, 1),
                ..tenant("t-1")
            },
            TenantProfile {
                household_income: Some(800),
                household_size: Some(4),
                has_pets: Some(true),
                preferred_locations: vec!["Ankeny".to_string(), "des moines".to_string()],
                move_in_date: NaiveDate::from_ymd_opt(2025, 12, 15),
                ..tenant("t-2")
            },
            TenantProfile {
                // Income deliberately undeclared.
                household_size: Some(2),
                ..tenant("t-3")
            },
        ]
    }

    fn ids(tenants: &[TenantProfile]) -> Vec<&str> {
        tenants
            .iter()
            .map(|tenant| tenant.tenant_id.as_str())
            .collect()
    }

    #[test]
    fn income_filter_always_admits_undeclared_income() {
        let tenants = sample();
        let filtered = filter_by_income(&tenants, 1000, 5000);
        assert_eq!(ids(&filtered), vec!["t-1", "t-3"]);
    }

    #[test]
    fn income_bounds_are_inclusive() {
        let tenants = sample();
        let filtered = filter_by_income(&tenants, 4200, 4200);
        assert_eq!(ids(&filtered), vec!["t-1", "t-3"]);
    }

    #[test]
    fn query_matches_email_location_and_bio_case_insensitively() {
        let tenants = sample();
        assert_eq!(ids(&filter_by_query(&tenants, "T-3@EXAMPLE")), vec!["t-3"]);
        assert_eq!(
            ids(&filter_by_query(&tenants, "des moines")),
            vec!["t-1", "t-2"]
        );
        assert_eq!(ids(&filter_by_query(&tenants, "downtown")), vec!["t-1"]);
    }

    #[test]
    fn blank_query_admits_everyone() {
        let tenants = sample();
        assert_eq!(filter_by_query(&tenants, "  ").len(), tenants.len());
    }

    #[test]
    fn move_in_lower_bound_is_inclusive_and_skips_undated() {
        let tenants = sample();
        let earliest = NaiveDate::from_ymd_opt(2025, 12, 15).expect("valid date");
        let filtered = filter_by_move_in(&tenants, earliest);
        assert_eq!(ids(&filtered), vec!["t-2", "t-3"]);
    }

    #[test]
    fn pets_filter_is_tri_state() {
        let tenants = sample();
        assert_eq!(filter_by_pets(&tenants, PetsFilter::Any).len(), 3);
        assert_eq!(ids(&filter_by_pets(&tenants, PetsFilter::With)), vec!["t-2"]);
        assert_eq!(
            ids(&filter_by_pets(&tenants, PetsFilter::Without)),
            vec!["t-1"]
        );
    }

    #[test]
    fn household_size_is_exact_match() {
        let tenants = sample();
        assert_eq!(ids(&filter_by_household_size(&tenants, 4)), vec!["t-2"]);
        assert!(filter_by_household_size(&tenants, 7).is_empty());
    }

    #[test]
    fn composition_is_commutative() {
        let tenants = sample();
        let query_then_income = filter_by_income(&filter_by_query(&tenants, "des moines"), 1000, 5000);
        let income_then_query = filter_by_query(&filter_by_income(&tenants, 1000, 5000), "des moines");
        assert_eq!(query_then_income, income_then_query);
    }

    #[test]
    fn composed_query_matches_sequential_filters() {
        let tenants = sample();
        let composed = TenantQuery {
            query: Some("des moines".to_string()),
            min_income: Some(1000),
            max_income: Some(5000),
            pets: PetsFilter::Without,
            ..TenantQuery::default()
        };

        let sequential =
            filter_by_pets(&filter_by_income(&filter_by_query(&tenants, "des moines"), 1000, 5000), PetsFilter::Without);
        assert_eq!(composed.apply(&tenants), sequential);
        assert_eq!(ids(&composed.apply(&tenants)), vec!["t-1"]);
    }
}
