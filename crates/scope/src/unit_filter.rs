//! Unit-filter resolver.
//!
//! Computes which business unit (or units) every list and report query must be
//! scoped to for the current user. Recomputed on every call from the user, the
//! active selection and the unit list; nothing is cached, so a unit switch is
//! visible to the very next query.

use serde::Serialize;

use fuelops_auth::{Role, SessionUser};
use fuelops_core::{BusinessUnit, BusinessUnitId, ValueObject};

use crate::ScopeConfig;

/// Resolved unit scope for one user at one moment.
///
/// Invariant: when both are present, `unidad_id_filter` is an element of
/// `unidad_ids_filter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFilter {
    pub unidad_id_filter: Option<BusinessUnitId>,
    pub unidad_ids_filter: Option<Vec<BusinessUnitId>>,
    /// The user sees every unit of the company (no unit filter applies).
    pub can_view_all: bool,
    pub has_filter: bool,
    pub unidad_nombre: String,
    pub is_admin: bool,
}

impl ValueObject for UnitFilter {}

impl UnitFilter {
    fn unscoped(can_view_all: bool, is_admin: bool, unidad_nombre: String) -> Self {
        Self {
            unidad_id_filter: None,
            unidad_ids_filter: None,
            can_view_all,
            has_filter: false,
            unidad_nombre,
            is_admin,
        }
    }

    fn scoped(unit: BusinessUnitId, all: Vec<BusinessUnitId>, unidad_nombre: String, is_admin: bool) -> Self {
        Self {
            unidad_id_filter: Some(unit),
            unidad_ids_filter: Some(all),
            can_view_all: false,
            has_filter: true,
            unidad_nombre,
            is_admin,
        }
    }
}

/// Resolve the unit filter. First matching rule wins:
///
/// 1. admin: the active unit if one is selected, otherwise no filter.
/// 2. supervisor/auditor with assigned units: the single assigned unit, or for
///    several, the active unit when it is one of them, else the first assigned.
/// 3. everyone else (superadmin, operador, unknown role, no assignments): no filter.
pub fn resolve_unit_filter(
    user: Option<&SessionUser>,
    active: Option<&BusinessUnit>,
    units: &[BusinessUnit],
    config: &ScopeConfig,
) -> UnitFilter {
    let Some(user) = user else {
        return UnitFilter::unscoped(false, false, String::new());
    };

    match user.role {
        Some(Role::Admin) => match active {
            Some(unit) => UnitFilter::scoped(unit.id, vec![unit.id], unit.nombre.clone(), true),
            None => UnitFilter::unscoped(true, true, config.all_units_label.clone()),
        },
        Some(Role::Supervisor | Role::Auditor) => match user.assigned_units() {
            [] => UnitFilter::unscoped(false, false, String::new()),
            [only] => UnitFilter::scoped(
                *only,
                vec![*only],
                unit_name(*only, units, config),
                false,
            ),
            [first, _rest @ ..] => {
                let assigned = user.assigned_units();
                let selected = active.filter(|unit| assigned.contains(&unit.id));
                match selected {
                    Some(unit) => {
                        UnitFilter::scoped(unit.id, assigned.to_vec(), unit.nombre.clone(), false)
                    }
                    None => UnitFilter::scoped(
                        *first,
                        assigned.to_vec(),
                        unit_name(*first, units, config),
                        false,
                    ),
                }
            }
        },
        Some(Role::Superadmin) => UnitFilter::unscoped(true, false, String::new()),
        Some(Role::Operador) | None => UnitFilter::unscoped(false, false, String::new()),
    }
}

fn unit_name(id: BusinessUnitId, units: &[BusinessUnit], config: &ScopeConfig) -> String {
    units
        .iter()
        .find(|u| u.id == id)
        .map(|u| u.nombre.clone())
        .unwrap_or_else(|| config.own_unit_label.clone())
}
