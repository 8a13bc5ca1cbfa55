//! Clinical trial interest registration service.
//!
//! The crate covers the full intake pipeline: field validation for the public
//! interest form, derived eligibility with advisory screening, repository and
//! mail-dispatch contracts, admin dashboard utilities (filter/sort/export),
//! transient notices, and a client for the public trial registry.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod registration;
pub mod telemetry;
