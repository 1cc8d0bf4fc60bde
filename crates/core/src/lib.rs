//! Domain logic for the studio productivity tracker.
//!
//! Everything in this crate is pure: no database or HTTP access. The `db`
//! and `api` crates build on these types and rules.

pub mod awards;
pub mod dashboard;
pub mod demand;
pub mod error;
pub mod feedback;
pub mod lessons;
pub mod links;
pub mod notification;
pub mod period;
pub mod roles;
pub mod session;
pub mod settings;
pub mod types;
