//! Role-capability resolver.
//!
//! Flattens role + unit assignment into the boolean flags the UI uses to show or
//! hide actions. Advisory only: data services still enforce their own checks.

use serde::Serialize;

use fuelops_auth::{Role, SessionUser};
use fuelops_core::{BusinessUnitId, CompanyId, UserId, ValueObject};

use crate::{ScopeConfig, UnitFilter, resolve_unit_filter};

/// Everything a screen needs to gate its actions, in one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleCapabilities {
    pub role: Option<Role>,
    pub is_superadmin: bool,
    pub is_admin: bool,
    pub is_supervisor: bool,
    pub is_auditor: bool,
    pub is_operador: bool,
    /// Admin bound to a specific unit (primary unit or assigned list).
    pub is_admin_assigned: bool,

    pub can_view_all_units: bool,
    pub can_view_all_data: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_validate: bool,
    pub can_export: bool,
    pub can_manage_users: bool,
    pub can_manage_units: bool,
    pub can_manage_vehicles: bool,
    pub can_manage_drivers: bool,
    pub can_manage_cost_centers: bool,
    pub can_manage_resources: bool,
    pub can_manage_settings: bool,
    pub is_read_only: bool,

    pub unidad_id_filter: Option<BusinessUnitId>,
    pub unidad_ids_filter: Option<Vec<BusinessUnitId>>,
    pub has_unidad_filter: bool,
    pub company_id_filter: Option<CompanyId>,

    pub show_edit_buttons: bool,
    pub show_delete_buttons: bool,
    pub show_create_buttons: bool,
    pub show_export_buttons: bool,
}

impl ValueObject for RoleCapabilities {}

#[derive(Debug, Clone, Copy, Default)]
struct Grants {
    view_all: bool,
    create: bool,
    edit: bool,
    delete: bool,
    validate: bool,
    export: bool,
    manage_users: bool,
    manage_units: bool,
    manage_fleet: bool,
    manage_resources: bool,
    manage_settings: bool,
    read_only: bool,
}

fn grants(role: Option<Role>, admin_assigned: bool) -> Grants {
    match role {
        Some(Role::Superadmin) => Grants {
            view_all: true,
            create: true,
            edit: true,
            delete: true,
            validate: true,
            export: true,
            manage_users: true,
            manage_units: true,
            manage_fleet: true,
            manage_resources: true,
            manage_settings: true,
            read_only: false,
        },
        Some(Role::Admin) => Grants {
            view_all: !admin_assigned,
            create: true,
            edit: true,
            delete: true,
            validate: true,
            export: true,
            manage_users: true,
            manage_units: !admin_assigned,
            manage_fleet: true,
            manage_resources: true,
            manage_settings: !admin_assigned,
            read_only: false,
        },
        Some(Role::Supervisor) => Grants {
            create: true,
            edit: true,
            validate: true,
            export: true,
            manage_users: true,
            manage_fleet: true,
            manage_resources: true,
            ..Grants::default()
        },
        Some(Role::Auditor) => Grants {
            export: true,
            read_only: true,
            ..Grants::default()
        },
        Some(Role::Operador) => Grants {
            create: true,
            manage_resources: true,
            ..Grants::default()
        },
        None => Grants::default(),
    }
}

/// Resolve capabilities for `user`, embedding the already-resolved unit filter.
///
/// Absent user or unknown role: every flag is false and no company filter is set.
pub fn resolve_capabilities(user: Option<&SessionUser>, filter: &UnitFilter) -> RoleCapabilities {
    let role = user.and_then(SessionUser::role);
    let is_admin_assigned = user.is_some_and(SessionUser::is_admin_assigned);
    let g = grants(role, is_admin_assigned);

    RoleCapabilities {
        role,
        is_superadmin: role == Some(Role::Superadmin),
        is_admin: role == Some(Role::Admin),
        is_supervisor: role == Some(Role::Supervisor),
        is_auditor: role == Some(Role::Auditor),
        is_operador: role == Some(Role::Operador),
        is_admin_assigned,

        can_view_all_units: g.view_all,
        can_view_all_data: g.view_all,
        can_create: g.create,
        can_edit: g.edit,
        can_delete: g.delete,
        can_validate: g.validate,
        can_export: g.export,
        can_manage_users: g.manage_users,
        can_manage_units: g.manage_units,
        can_manage_vehicles: g.manage_fleet,
        can_manage_drivers: g.manage_fleet,
        can_manage_cost_centers: g.manage_fleet,
        can_manage_resources: g.manage_resources,
        can_manage_settings: g.manage_settings,
        is_read_only: g.read_only,

        unidad_id_filter: filter.unidad_id_filter,
        unidad_ids_filter: filter.unidad_ids_filter.clone(),
        has_unidad_filter: filter.has_filter,
        company_id_filter: user.map(|u| u.id_company),

        show_edit_buttons: g.edit,
        show_delete_buttons: g.delete,
        show_create_buttons: g.create,
        show_export_buttons: g.export,
    }
}

/// One row of the capability matrix: a role, with or without a unit assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityRow {
    pub role: Role,
    pub unit_assigned: bool,
    pub capabilities: RoleCapabilities,
}

/// Capabilities of every role, unassigned and bound to one unit, with no
/// active selection.
pub fn capability_matrix(config: &ScopeConfig) -> Vec<CapabilityRow> {
    let mut rows = Vec::with_capacity(Role::ALL.len() * 2);
    for role in Role::ALL {
        for unit_assigned in [false, true] {
            let mut user = SessionUser::new(UserId::new(0), role, CompanyId::new(0));
            if unit_assigned {
                user = user.with_assigned_units([BusinessUnitId::new(0)]);
            }
            let filter = resolve_unit_filter(Some(&user), None, &[], config);
            rows.push(CapabilityRow {
                role,
                unit_assigned,
                capabilities: resolve_capabilities(Some(&user), &filter),
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelops_auth::{Permission, Permissions};

    fn uid(id: i64) -> BusinessUnitId {
        BusinessUnitId::new(id)
    }

    fn user(role: Role) -> SessionUser {
        SessionUser::new(UserId::new(3), role, CompanyId::new(20))
    }

    fn caps(user: &SessionUser) -> RoleCapabilities {
        let filter = resolve_unit_filter(Some(user), None, &[], &ScopeConfig::default());
        resolve_capabilities(Some(user), &filter)
    }

    /// Expected row of the capability matrix, in the order:
    /// view_all, create, edit, delete, validate, export, users, units,
    /// vehicles/drivers/cost centers, resources, settings, read_only.
    fn row(c: &RoleCapabilities) -> [bool; 12] {
        assert_eq!(c.can_view_all_units, c.can_view_all_data);
        assert_eq!(c.can_manage_vehicles, c.can_manage_drivers);
        assert_eq!(c.can_manage_vehicles, c.can_manage_cost_centers);
        [
            c.can_view_all_units,
            c.can_create,
            c.can_edit,
            c.can_delete,
            c.can_validate,
            c.can_export,
            c.can_manage_users,
            c.can_manage_units,
            c.can_manage_vehicles,
            c.can_manage_resources,
            c.can_manage_settings,
            c.is_read_only,
        ]
    }

    #[test]
    fn capability_matrix_matches_roles() {
        let t = true;
        let f = false;
        let cases = [
            (user(Role::Superadmin), [t, t, t, t, t, t, t, t, t, t, t, f]),
            (user(Role::Admin), [t, t, t, t, t, t, t, t, t, t, t, f]),
            (
                user(Role::Admin).with_primary_unit(uid(4)),
                [f, t, t, t, t, t, t, f, t, t, f, f],
            ),
            (
                user(Role::Admin).with_assigned_units([uid(4)]),
                [f, t, t, t, t, t, t, f, t, t, f, f],
            ),
            (user(Role::Supervisor), [f, t, t, f, t, t, t, f, t, t, f, f]),
            (user(Role::Auditor), [f, f, f, f, f, t, f, f, f, f, f, t]),
            (user(Role::Operador), [f, t, f, f, f, f, f, f, f, t, f, f]),
        ];

        for (u, expected) in cases {
            assert_eq!(row(&caps(&u)), expected, "role {:?}, assigned {}", u.role, u.is_admin_assigned());
        }
    }

    #[test]
    fn absent_user_gets_nothing() {
        let filter = resolve_unit_filter(None, None, &[], &ScopeConfig::default());
        let c = resolve_capabilities(None, &filter);
        assert_eq!(row(&c), [false; 12]);
        assert_eq!(c.role, None);
        assert_eq!(c.company_id_filter, None);
        assert!(!c.show_create_buttons);
    }

    #[test]
    fn unknown_role_gets_nothing_but_keeps_company() {
        let u = SessionUser { role: None, ..user(Role::Admin) };
        let c = caps(&u);
        assert_eq!(row(&c), [false; 12]);
        assert_eq!(c.company_id_filter, Some(CompanyId::new(20)));
    }

    #[test]
    fn button_aliases_mirror_flags() {
        for role in Role::ALL {
            let c = caps(&user(role));
            assert_eq!(c.show_edit_buttons, c.can_edit);
            assert_eq!(c.show_delete_buttons, c.can_delete);
            assert_eq!(c.show_create_buttons, c.can_create);
            assert_eq!(c.show_export_buttons, c.can_export);
        }
    }

    #[test]
    fn operador_scenario() {
        let c = caps(&user(Role::Operador));
        assert!(c.can_create);
        assert!(!c.can_edit);
        assert!(!c.can_delete);
        assert!(!c.is_read_only);
        assert_eq!(c.unidad_id_filter, None);
    }

    #[test]
    fn auditor_scenario() {
        let u = user(Role::Auditor).with_assigned_units([uid(3)]);
        let c = caps(&u);
        assert!(c.is_read_only);
        assert!(c.can_export);
        assert!(!c.can_create);
        assert_eq!(c.unidad_id_filter, Some(uid(3)));
        assert!(c.has_unidad_filter);
    }

    #[test]
    fn embeds_filter_and_company() {
        let u = user(Role::Supervisor).with_assigned_units([uid(5), uid(7)]);
        let c = caps(&u);
        assert_eq!(c.unidad_id_filter, Some(uid(5)));
        assert_eq!(c.unidad_ids_filter, Some(vec![uid(5), uid(7)]));
        assert_eq!(c.company_id_filter, Some(CompanyId::new(20)));
    }

    #[test]
    fn capabilities_agree_with_permission_table() {
        for role in Role::ALL {
            let u = user(role);
            let c = caps(&u);
            let p = Permissions::for_user(Some(u));
            assert_eq!(c.can_create, p.can(Permission::EventosCrear), "{role} create");
            assert_eq!(c.can_edit, p.can(Permission::EventosEditar), "{role} edit");
            assert_eq!(c.can_delete, p.can(Permission::EventosEliminar), "{role} delete");
            assert_eq!(c.can_validate, p.can(Permission::EventosValidar), "{role} validate");
            assert_eq!(c.can_export, p.can(Permission::ReportesExportar), "{role} export");
            assert_eq!(c.can_manage_users, p.can(Permission::UsuariosGestionar), "{role} users");
            assert_eq!(c.can_manage_vehicles, p.can(Permission::VehiculosGestionar), "{role} vehicles");
            assert_eq!(c.can_manage_resources, p.can(Permission::TanquesGestionar), "{role} resources");
        }
    }

    #[test]
    fn matrix_covers_each_role_with_and_without_assignment() {
        let rows = capability_matrix(&ScopeConfig::default());
        assert_eq!(rows.len(), Role::ALL.len() * 2);

        let admin_assigned = rows
            .iter()
            .find(|r| r.role == Role::Admin && r.unit_assigned)
            .unwrap();
        assert!(admin_assigned.capabilities.is_admin_assigned);
        assert!(!admin_assigned.capabilities.can_manage_units);

        let supervisor = rows
            .iter()
            .find(|r| r.role == Role::Supervisor && r.unit_assigned)
            .unwrap();
        assert_eq!(supervisor.capabilities.unidad_id_filter, Some(uid(0)));

        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["role"], "superadmin");
        assert_eq!(json[0]["capabilities"]["can_delete"], true);
    }
}
