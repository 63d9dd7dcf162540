//! Core library for the RentHub rental marketplace.
//!
//! The library is organized around the pieces a marketplace page composes at
//! request time: the [`access`] policy and gates that decide what a signed-in
//! user may see, the [`workflows`] that persist invitations and property
//! showings, the [`directory`] filters agents use to narrow tenant searches,
//! and the [`documents`] rules applied before a file is handed to object
//! storage. Configuration, telemetry, and the application-boundary error type
//! live alongside them.

pub mod access;
pub mod config;
pub mod directory;
pub mod documents;
pub mod error;
pub mod telemetry;
pub mod workflows;
