//! Tenant directory: the profile record agents browse and the pure filter
//! predicates used to narrow a search. Filters compose as a logical AND and
//! are order-insensitive; none of them mutates the underlying collection.

pub mod domain;
pub mod filters;

pub use domain::{PetsFilter, TenantProfile};
pub use filters::{
    filter_by_household_size, filter_by_income, filter_by_location, filter_by_move_in,
    filter_by_pets, filter_by_query, TenantQuery,
};
