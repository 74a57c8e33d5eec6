use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Back-office role.
///
/// Closed set: adding a role forces every `match` in the permission table and
/// the capability resolver to be revisited.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
    Supervisor,
    Auditor,
    Operador,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct RoleParseError(pub String);

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Superadmin,
        Role::Admin,
        Role::Supervisor,
        Role::Auditor,
        Role::Operador,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Auditor => "auditor",
            Role::Operador => "operador",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Role::Superadmin => "Platform operator with access to every company",
            Role::Admin => "Company administrator; may switch between business units",
            Role::Supervisor => "Runs one or more assigned business units",
            Role::Auditor => "Read-only reviewer of assigned business units",
            Role::Operador => "Registers fuel loads and maintains dispensers and tanks",
        }
    }

    /// Roles that are scoped to their assigned units by the unit filter.
    pub const fn is_unit_scoped(&self) -> bool {
        matches!(self, Role::Supervisor | Role::Auditor)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}
