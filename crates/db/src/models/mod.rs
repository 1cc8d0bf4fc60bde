//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod art_type;
pub mod award;
pub mod dashboard;
pub mod demand;
pub mod feedback;
pub mod lesson;
pub mod link;
pub mod notification;
pub mod session;
pub mod settings;
pub mod user;
pub mod work_session;
