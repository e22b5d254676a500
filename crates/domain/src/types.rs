// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Declares an integer-backed identifier newtype.
///
/// Identifiers are assigned by the persistence layer and are never
/// constructed from user-facing text.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a user.
    UserId
);
entity_id!(
    /// Identifies a department.
    DepartmentId
);
entity_id!(
    /// Identifies a financial year.
    FinancialYearId
);
entity_id!(
    /// Identifies a holiday request.
    RequestId
);

/// The role of a user within the organisation.
///
/// Every role may request leave. Managers and admins review requests;
/// only admins configure users, departments, financial years and settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A regular employee.
    #[default]
    User,
    /// Reviews requests for their department.
    Manager,
    /// Full administrative authority.
    Admin,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns true if this role may review holiday requests.
    #[must_use]
    pub const fn can_review(&self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }

    /// Returns true for the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person who can request leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's identifier.
    pub id: UserId,
    /// The user's display name.
    pub name: String,
    /// The user's email address. Used to sign in.
    pub email: String,
    /// The user's role.
    pub role: Role,
    /// The department the user belongs to.
    pub department_id: DepartmentId,
    /// When the user record was created.
    pub created_at: OffsetDateTime,
    /// Optional avatar reference.
    pub avatar_url: Option<String>,
    /// Archived users are hidden from active listings but keep their history.
    pub archived: bool,
}

impl User {
    /// Returns true if this user has not been archived.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.archived
    }
}

/// The editable fields of a user.
///
/// Used both when creating a user and when an admin edits one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: Role,
    /// Department.
    pub department_id: DepartmentId,
    /// Optional avatar reference.
    pub avatar_url: Option<String>,
}

/// An organisational unit users belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// The department's identifier.
    pub id: DepartmentId,
    /// The department's name.
    pub name: String,
}
