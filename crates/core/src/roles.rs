//! Dashboard user roles.

/// Full administrator, created by the seeding tool.
pub const ROLE_GLOBAL_ADMIN: &str = "global_admin";

/// Regular dashboard administrator.
pub const ROLE_ADMIN: &str = "admin";

/// All roles accepted by the `users.role` check constraint.
pub const VALID_ROLES: &[&str] = &[ROLE_GLOBAL_ADMIN, ROLE_ADMIN];

pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(is_valid_role("admin"));
        assert!(is_valid_role("global_admin"));
    }

    #[test]
    fn unknown_role_is_invalid() {
        assert!(!is_valid_role("viewer"));
        assert!(!is_valid_role(""));
    }
}
