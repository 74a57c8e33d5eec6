use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use fuelops_core::{CompanyId, UserId};

use crate::{Permission, Role, SessionUser};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("no authenticated user")]
    Unauthenticated,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(Permission),
}

/// Per-user permission checks.
///
/// Built from the current session user (or its absence). Every method is a pure
/// function of the user and the static permission table:
///
/// - No IO
/// - No panics
/// - Absent user or unknown role answers `false` everywhere
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Permissions {
    user: Option<SessionUser>,
}

/// How a guard combines its required permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardMode {
    RequireAll,
    RequireAny,
}

/// Outcome handed to route/section guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    Deny,
}

impl Permissions {
    /// Snapshot the checks for `user`; later session changes are not observed.
    pub fn for_user(user: Option<SessionUser>) -> Self {
        Self { user }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(SessionUser::role)
    }

    pub fn can(&self, permission: Permission) -> bool {
        match self.role() {
            Some(role) => permission.is_granted_to(role),
            None => false,
        }
    }

    /// Every permission must be held. An empty requirement list never grants.
    pub fn can_all(&self, permissions: &[Permission]) -> bool {
        !permissions.is_empty() && permissions.iter().all(|p| self.can(*p))
    }

    /// At least one permission must be held. An empty requirement list never grants.
    pub fn can_any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.can(*p))
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.role().is_some_and(|role| roles.contains(&role))
    }

    pub fn is_superadmin(&self) -> bool {
        self.role() == Some(Role::Superadmin)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn is_supervisor(&self) -> bool {
        self.role() == Some(Role::Supervisor)
    }

    pub fn is_auditor(&self) -> bool {
        self.role() == Some(Role::Auditor)
    }

    pub fn is_operador(&self) -> bool {
        self.role() == Some(Role::Operador)
    }

    /// Command-boundary variant of [`Permissions::can`].
    pub fn require(&self, permission: Permission) -> Result<(), AuthzError> {
        let Some(user) = &self.user else {
            tracing::debug!(%permission, "permission check without session");
            return Err(AuthzError::Unauthenticated);
        };
        if self.can(permission) {
            Ok(())
        } else {
            tracing::debug!(user_id = %user.id, role = ?user.role, %permission, "permission denied");
            Err(AuthzError::Forbidden(permission))
        }
    }

    pub fn guard(&self, required: &[Permission], mode: GuardMode) -> GuardDecision {
        let allowed = match mode {
            GuardMode::RequireAll => self.can_all(required),
            GuardMode::RequireAny => self.can_any(required),
        };
        if allowed { GuardDecision::Allow } else { GuardDecision::Deny }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of a permission decision.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub required_permission: Permission,
    pub granted: bool,
    pub reason: String,
    pub user: Option<UserState>,
    /// Roles that hold the permission; useful when suggesting a fix.
    pub granting_roles: Vec<Role>,
    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserState {
    pub user_id: UserId,
    pub company_id: CompanyId,
    pub role: Option<Role>,
    pub effective_permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    Unauthenticated,
    UnknownRole,
    MissingPermission,
}

/// Explain why `user` does or does not hold `required`.
pub fn explain(user: Option<&SessionUser>, required: Permission) -> AuthorizationExplanation {
    let granting_roles = required.roles().to_vec();

    let Some(user) = user else {
        return AuthorizationExplanation {
            required_permission: required,
            granted: false,
            reason: "No authenticated user in session".to_string(),
            user: None,
            granting_roles,
            denial: Some(DenialKind::Unauthenticated),
        };
    };

    let state = UserState {
        user_id: user.id,
        company_id: user.id_company,
        role: user.role,
        effective_permissions: user.role.map(|r| r.permissions()).unwrap_or_default(),
    };

    let (granted, reason, denial) = match user.role {
        None => (
            false,
            "User has no recognized role; every permission is denied".to_string(),
            Some(DenialKind::UnknownRole),
        ),
        Some(role) if required.is_granted_to(role) => (
            true,
            format!("Role '{}' holds '{}'", role, required),
            None,
        ),
        Some(role) => (
            false,
            format!(
                "Role '{}' does not hold '{}'; granted to: {}",
                role,
                required,
                granting_roles.iter().map(Role::as_str).collect::<Vec<_>>().join(", ")
            ),
            Some(DenialKind::MissingPermission),
        ),
    };

    AuthorizationExplanation {
        required_permission: required,
        granted,
        reason,
        user: Some(state),
        granting_roles,
        denial,
    }
}

/// Role definition with its granted permissions (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub name: Role,
    pub description: &'static str,
    pub permissions: Vec<Permission>,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub name: Permission,
    pub module: &'static str,
    pub description: String,
    pub roles: Vec<Role>,
}

/// Complete view of the permission table, for auditing.
#[derive(Debug, Clone, Serialize)]
pub struct RbacRegistry {
    pub roles: BTreeMap<Role, RoleDefinition>,
    pub permissions: BTreeMap<Permission, PermissionDefinition>,
}

impl RbacRegistry {
    pub fn build() -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| {
                (
                    role,
                    RoleDefinition {
                        name: role,
                        description: role.description(),
                        permissions: role.permissions(),
                    },
                )
            })
            .collect();

        let permissions = Permission::ALL
            .into_iter()
            .map(|p| {
                (
                    p,
                    PermissionDefinition {
                        name: p,
                        module: p.module(),
                        description: p.description(),
                        roles: p.roles().to_vec(),
                    },
                )
            })
            .collect();

        Self { roles, permissions }
    }

    /// Permissions grouped by module, in catalogue order.
    pub fn by_module(&self) -> BTreeMap<&'static str, Vec<Permission>> {
        let mut modules: BTreeMap<&'static str, Vec<Permission>> = BTreeMap::new();
        for p in self.permissions.keys() {
            modules.entry(p.module()).or_default().push(*p);
        }
        modules
    }
}
