//! Permission module
//!
//! Role-set gates. Each endpoint names the set of ranks allowed to call it;
//! handlers check the acting user against that set before doing any work.

use crate::entity::Role;

/// Role sets used by the HTTP surface
pub mod roles {
    use super::Role;

    pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
    pub const COMMAND: &[Role] = &[Role::Admin, Role::Boss];
    pub const FIELD: &[Role] = &[Role::Admin, Role::Boss, Role::Lieutenant];
    /// Territory lookups
    pub const TERRITORY: &[Role] = FIELD;
}

/// Check whether `role` is a member of `allowed`
pub fn role_allowed(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

/// ADMIN and BOSS bypass ownership checks on operations and transactions
pub fn is_command(role: Role) -> bool {
    role_allowed(role, roles::COMMAND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_sets() {
        assert!(role_allowed(Role::Admin, roles::ADMIN_ONLY));
        assert!(!role_allowed(Role::Boss, roles::ADMIN_ONLY));
        assert!(role_allowed(Role::Boss, roles::COMMAND));
        assert!(!role_allowed(Role::Lieutenant, roles::COMMAND));
        assert!(role_allowed(Role::Lieutenant, roles::FIELD));
        assert!(!role_allowed(Role::User, roles::FIELD));
    }

    #[test]
    fn test_is_command() {
        assert!(is_command(Role::Admin));
        assert!(is_command(Role::Boss));
        assert!(!is_command(Role::Lieutenant));
    }
}
