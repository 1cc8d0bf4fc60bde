//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in the initial
//! migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_DESIGNER: &str = "designer";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_DESIGNER];

/// Validate that a role name is one of [`VALID_ROLES`].
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
