//! Project roles that decide whether a viewer may reorder tasks.

use super::ParseMemberRoleError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Role of a user within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Project owner.
    Owner,
    /// Administrator.
    Admin,
    /// Regular contributor.
    Editor,
    /// Read-only member or anonymous visitor.
    Viewer,
}

impl MemberRole {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// Returns `true` when the role may write task order and status.
    #[must_use]
    pub const fn can_edit(self) -> bool {
        !matches!(self, Self::Viewer)
    }
}

impl TryFrom<&str> for MemberRole {
    type Error = ParseMemberRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(ParseMemberRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ownership and explicit role assignments of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAccess {
    owner_id: String,
    #[serde(default)]
    member_roles: HashMap<String, MemberRole>,
}

impl ProjectAccess {
    /// Creates access rules for a project owned by `owner_id`.
    #[must_use]
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            member_roles: HashMap::new(),
        }
    }

    /// Assigns an explicit role to a member.
    #[must_use]
    pub fn with_role(mut self, user_id: impl Into<String>, role: MemberRole) -> Self {
        self.member_roles.insert(user_id.into(), role);
        self
    }

    /// Resolves the role of `user_id`.
    ///
    /// Anonymous visitors are viewers, the owner is always owner, and
    /// members without an explicit assignment default to editor.
    #[must_use]
    pub fn role_of(&self, user_id: Option<&str>) -> MemberRole {
        let Some(user) = user_id else {
            return MemberRole::Viewer;
        };
        if user == self.owner_id {
            return MemberRole::Owner;
        }
        self.member_roles
            .get(user)
            .copied()
            .unwrap_or(MemberRole::Editor)
    }
}
