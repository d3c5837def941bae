//! User roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User roles for access control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    pub fn can_submit_papers(&self) -> bool {
        matches!(self, Self::Student)
    }

    pub fn can_grade(&self) -> bool {
        matches!(self, Self::Teacher)
    }

    pub fn can_review(&self) -> bool {
        matches!(self, Self::Teacher)
    }

    pub fn can_view_statistics(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn can_manage_exam_papers(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role may read submissions owned by other users
    pub fn can_view_any_submission(&self) -> bool {
        matches!(self, Self::Teacher | Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Student.can_submit_papers());
        assert!(!UserRole::Student.can_grade());
        assert!(UserRole::Teacher.can_grade());
        assert!(UserRole::Teacher.can_review());
        assert!(!UserRole::Teacher.can_view_statistics());
        assert!(UserRole::Admin.can_view_statistics());
        assert!(!UserRole::Admin.can_grade());
        assert!(UserRole::Admin.can_manage_exam_papers());
        assert!(!UserRole::Teacher.can_manage_exam_papers());
    }

    #[test]
    fn test_role_wire_names() {
        let role: UserRole = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(role, UserRole::Teacher);
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    }
}
