//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.
//! - [`bootstrap`] -- first admin account on an empty studio.

pub mod bootstrap;
pub mod jwt;
pub mod password;
