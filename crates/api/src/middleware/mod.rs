//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token
//!   and enforces the idle session timeout.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireDesigner`] -- Requires the `designer` role.

pub mod auth;
pub mod rbac;
