//! Business unit record ("unidad de negocio").

use serde::{Deserialize, Serialize};

use crate::{BusinessUnitId, CompanyId, DomainError, DomainResult, Entity};

/// A business unit belonging to exactly one company.
///
/// Units are referenced (never owned) by every scoped resource: vehicles,
/// drivers, dispensers, tanks and fuel loads all carry a unit id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUnit {
    pub id: BusinessUnitId,
    pub nombre: String,
    pub codigo: String,
    pub id_company: CompanyId,
    #[serde(default = "default_activa")]
    pub activa: bool,
}

fn default_activa() -> bool {
    true
}

impl BusinessUnit {
    pub fn new(
        id: BusinessUnitId,
        id_company: CompanyId,
        nombre: impl Into<String>,
        codigo: impl Into<String>,
    ) -> DomainResult<Self> {
        let nombre = nombre.into();
        let codigo = codigo.into();
        if nombre.trim().is_empty() {
            return Err(DomainError::validation("unit name cannot be empty"));
        }
        if codigo.trim().is_empty() {
            return Err(DomainError::validation("unit code cannot be empty"));
        }
        Ok(Self {
            id,
            nombre,
            codigo,
            id_company,
            activa: true,
        })
    }

    pub fn belongs_to(&self, company: CompanyId) -> bool {
        self.id_company == company
    }
}

impl Entity for BusinessUnit {
    type Id = BusinessUnitId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
