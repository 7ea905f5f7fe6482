//! Workflows. Each mutation authorizes first, then checks the CSRF token, then
//! validates input and integrity rules, and only then writes.

pub mod agreement_types;
pub mod auth;
pub mod businesses;
pub mod contacts;
pub mod leads;
pub mod notifications;
pub mod offers;
pub mod projects;
pub mod roles;
pub mod service_agreements;
pub mod settings;
pub mod users;
pub mod validation;
