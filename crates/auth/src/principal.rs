use serde::{Deserialize, Serialize};

use fuelops_core::{BusinessUnitId, CompanyId, UserId};

use crate::Role;

/// The authenticated back-office user, as held by the session store.
///
/// `role` is `None` when the auth store delivered no role or a role string this
/// build does not know; every check treats such a user as holding nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSessionUser")]
pub struct SessionUser {
    pub id: UserId,
    pub role: Option<Role>,
    pub id_company: CompanyId,
    pub id_business_unit: Option<BusinessUnitId>,
    pub unidades_asignadas: Vec<BusinessUnitId>,
}

/// Session payload as delivered by the auth store (loosely typed).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSessionUser {
    id: UserId,
    #[serde(default)]
    role: Option<String>,
    id_company: CompanyId,
    #[serde(default)]
    id_business_unit: Option<BusinessUnitId>,
    #[serde(default)]
    unidades_asignadas: Option<Vec<BusinessUnitId>>,
}

impl From<RawSessionUser> for SessionUser {
    fn from(raw: RawSessionUser) -> Self {
        let role = match raw.role.as_deref() {
            None => None,
            Some(value) => match value.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    tracing::warn!(user_id = %raw.id, %err, "session role not recognized; denying all");
                    None
                }
            },
        };

        Self {
            id: raw.id,
            role,
            id_company: raw.id_company,
            id_business_unit: raw.id_business_unit,
            unidades_asignadas: raw.unidades_asignadas.unwrap_or_default(),
        }
    }
}

impl SessionUser {
    pub fn new(id: UserId, role: Role, id_company: CompanyId) -> Self {
        Self {
            id,
            role: Some(role),
            id_company,
            id_business_unit: None,
            unidades_asignadas: Vec::new(),
        }
    }

    pub fn with_primary_unit(mut self, unit: BusinessUnitId) -> Self {
        self.id_business_unit = Some(unit);
        self
    }

    pub fn with_assigned_units(mut self, units: impl IntoIterator<Item = BusinessUnitId>) -> Self {
        self.unidades_asignadas = units.into_iter().collect();
        self
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    pub fn assigned_units(&self) -> &[BusinessUnitId] {
        &self.unidades_asignadas
    }

    pub fn is_assigned_to(&self, unit: BusinessUnitId) -> bool {
        self.unidades_asignadas.contains(&unit)
    }

    /// An admin bound to a specific unit loses the company-wide capabilities.
    pub fn is_admin_assigned(&self) -> bool {
        self.is(Role::Admin)
            && (self.id_business_unit.is_some() || !self.unidades_asignadas.is_empty())
    }
}
