//! # Roles
//!
//! Role ids as stored in `users.role_id`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Staff,
    SecretGuest,
}

impl Role {
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Staff),
            3 => Some(Role::SecretGuest),
            _ => None,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::Staff => 2,
            Role::SecretGuest => 3,
        }
    }

    /// Name shown in the product UI.
    pub fn display_name(self) -> &'static str {
        match self {
            Role::Admin => "Администратор",
            Role::Staff => "Модератор",
            Role::SecretGuest => "Секретный гость",
        }
    }

    /// Admins and staff may use `/staff/*` endpoints.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Staff)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ids() {
        for role in [Role::Admin, Role::Staff, Role::SecretGuest] {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::SecretGuest.to_string(), "Секретный гость");
        assert!(Role::Staff.is_staff());
        assert!(!Role::SecretGuest.is_staff());
    }
}
