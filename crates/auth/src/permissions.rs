//! Permission catalogue and the static permission table.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

use Role::{Admin, Auditor, Operador, Superadmin, Supervisor};

/// Permission identifier.
///
/// Permissions are never stored; they are derived from the role through
/// [`Permission::roles`]. Wire form is `"<module>:<action>"`, e.g.
/// `"eventos:validar"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Permission {
    EmpresasVer,
    EmpresasGestionar,
    UnidadesVer,
    UnidadesGestionar,
    UsuariosVer,
    UsuariosGestionar,
    VehiculosVer,
    VehiculosGestionar,
    ChoferesVer,
    ChoferesGestionar,
    EventosVer,
    EventosCrear,
    EventosEditar,
    EventosEliminar,
    EventosValidar,
    EventosExportar,
    SurtidoresVer,
    SurtidoresGestionar,
    TanquesVer,
    TanquesGestionar,
    CentrosCostoVer,
    CentrosCostoGestionar,
    AlertasVer,
    AlertasGestionar,
    ReportesVer,
    ReportesExportar,
    ConfiguracionVer,
    ConfiguracionGestionar,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown permission '{0}'")]
pub struct PermissionParseError(pub String);

const ALL_ROLES: &[Role] = &[Superadmin, Admin, Supervisor, Auditor, Operador];
const MANAGERS: &[Role] = &[Superadmin, Admin, Supervisor];
const OPERATIONS: &[Role] = &[Superadmin, Admin, Supervisor, Operador];
const REVIEWERS: &[Role] = &[Superadmin, Admin, Supervisor, Auditor];
const COMPANY_ADMINS: &[Role] = &[Superadmin, Admin];
const PLATFORM: &[Role] = &[Superadmin];

impl Permission {
    pub const ALL: [Permission; 28] = [
        Permission::EmpresasVer,
        Permission::EmpresasGestionar,
        Permission::UnidadesVer,
        Permission::UnidadesGestionar,
        Permission::UsuariosVer,
        Permission::UsuariosGestionar,
        Permission::VehiculosVer,
        Permission::VehiculosGestionar,
        Permission::ChoferesVer,
        Permission::ChoferesGestionar,
        Permission::EventosVer,
        Permission::EventosCrear,
        Permission::EventosEditar,
        Permission::EventosEliminar,
        Permission::EventosValidar,
        Permission::EventosExportar,
        Permission::SurtidoresVer,
        Permission::SurtidoresGestionar,
        Permission::TanquesVer,
        Permission::TanquesGestionar,
        Permission::CentrosCostoVer,
        Permission::CentrosCostoGestionar,
        Permission::AlertasVer,
        Permission::AlertasGestionar,
        Permission::ReportesVer,
        Permission::ReportesExportar,
        Permission::ConfiguracionVer,
        Permission::ConfiguracionGestionar,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::EmpresasVer => "empresas:ver",
            Permission::EmpresasGestionar => "empresas:gestionar",
            Permission::UnidadesVer => "unidades:ver",
            Permission::UnidadesGestionar => "unidades:gestionar",
            Permission::UsuariosVer => "usuarios:ver",
            Permission::UsuariosGestionar => "usuarios:gestionar",
            Permission::VehiculosVer => "vehiculos:ver",
            Permission::VehiculosGestionar => "vehiculos:gestionar",
            Permission::ChoferesVer => "choferes:ver",
            Permission::ChoferesGestionar => "choferes:gestionar",
            Permission::EventosVer => "eventos:ver",
            Permission::EventosCrear => "eventos:crear",
            Permission::EventosEditar => "eventos:editar",
            Permission::EventosEliminar => "eventos:eliminar",
            Permission::EventosValidar => "eventos:validar",
            Permission::EventosExportar => "eventos:exportar",
            Permission::SurtidoresVer => "surtidores:ver",
            Permission::SurtidoresGestionar => "surtidores:gestionar",
            Permission::TanquesVer => "tanques:ver",
            Permission::TanquesGestionar => "tanques:gestionar",
            Permission::CentrosCostoVer => "centros-costo:ver",
            Permission::CentrosCostoGestionar => "centros-costo:gestionar",
            Permission::AlertasVer => "alertas:ver",
            Permission::AlertasGestionar => "alertas:gestionar",
            Permission::ReportesVer => "reportes:ver",
            Permission::ReportesExportar => "reportes:exportar",
            Permission::ConfiguracionVer => "configuracion:ver",
            Permission::ConfiguracionGestionar => "configuracion:gestionar",
        }
    }

    /// Roles allowed to hold this permission.
    pub const fn roles(&self) -> &'static [Role] {
        match self {
            Permission::EmpresasVer => COMPANY_ADMINS,
            Permission::EmpresasGestionar => PLATFORM,
            Permission::UnidadesVer => REVIEWERS,
            Permission::UnidadesGestionar => COMPANY_ADMINS,
            Permission::UsuariosVer | Permission::UsuariosGestionar => MANAGERS,
            Permission::VehiculosVer
            | Permission::ChoferesVer
            | Permission::EventosVer
            | Permission::SurtidoresVer
            | Permission::TanquesVer
            | Permission::AlertasVer => ALL_ROLES,
            Permission::VehiculosGestionar
            | Permission::ChoferesGestionar
            | Permission::CentrosCostoGestionar
            | Permission::AlertasGestionar => MANAGERS,
            Permission::EventosCrear => OPERATIONS,
            Permission::EventosEditar | Permission::EventosValidar => MANAGERS,
            Permission::EventosEliminar => COMPANY_ADMINS,
            Permission::EventosExportar => REVIEWERS,
            Permission::SurtidoresGestionar | Permission::TanquesGestionar => OPERATIONS,
            Permission::CentrosCostoVer => REVIEWERS,
            Permission::ReportesVer | Permission::ReportesExportar => REVIEWERS,
            Permission::ConfiguracionVer | Permission::ConfiguracionGestionar => COMPANY_ADMINS,
        }
    }

    pub fn is_granted_to(&self, role: Role) -> bool {
        self.roles().contains(&role)
    }

    /// Module part of the key (`"eventos"` for `eventos:validar`).
    pub fn module(&self) -> &'static str {
        self.split().0
    }

    /// Action part of the key (`"validar"` for `eventos:validar`).
    pub fn action(&self) -> &'static str {
        self.split().1
    }

    fn split(&self) -> (&'static str, &'static str) {
        let key = self.as_str();
        key.split_once(':').unwrap_or((key, ""))
    }

    pub fn description(&self) -> String {
        let action = match self.action() {
            "ver" => "View",
            "crear" => "Create",
            "editar" => "Edit",
            "eliminar" => "Delete",
            "validar" => "Validate",
            "exportar" => "Export",
            "gestionar" => "Manage",
            other => other,
        };
        format!("{} {}", action, self.module())
    }
}

impl Role {
    /// Every permission held by this role, in catalogue order.
    pub fn permissions(&self) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| p.is_granted_to(*self))
            .collect()
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == key)
            .ok_or_else(|| PermissionParseError(s.to_string()))
    }
}

impl TryFrom<String> for Permission {
    type Error = PermissionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permission> for &'static str {
    fn from(value: Permission) -> Self {
        value.as_str()
    }
}
