//! The documented access scenarios, checked through the public context API.

use std::sync::Arc;

use chrono::{Duration, Utc};

use fuelops_auth::{GuardDecision, GuardMode, Permission, Role, SessionClaims, SessionUser};
use fuelops_core::{BusinessUnit, BusinessUnitId, CompanyId, UserId};
use fuelops_scope::{ScopeConfig, ScopeContext, SessionStore, UnitStore};

fn uid(id: i64) -> BusinessUnitId {
    BusinessUnitId::new(id)
}

fn unit_store() -> Arc<UnitStore> {
    let units = [(3, "Base Córdoba"), (5, "Planta Norte"), (7, "Planta Sur"), (9, "Depósito")]
        .into_iter()
        .map(|(id, nombre)| BusinessUnit::new(uid(id), CompanyId::new(1), nombre, format!("U{id}")).unwrap())
        .collect();
    Arc::new(UnitStore::with_units(units))
}

fn context_with(user: Option<SessionUser>, units: Arc<UnitStore>) -> ScopeContext {
    let session = Arc::new(SessionStore::new());
    if let Some(user) = user {
        let now = Utc::now();
        let claims = SessionClaims {
            user,
            issued_at: now - Duration::seconds(30),
            expires_at: now + Duration::hours(1),
        };
        session.login(claims, now).unwrap();
    }
    ScopeContext::new(session, units, ScopeConfig::default())
}

fn context(user: Option<SessionUser>) -> ScopeContext {
    context_with(user, unit_store())
}

fn user(role: Role, assigned: &[i64]) -> SessionUser {
    SessionUser::new(UserId::new(77), role, CompanyId::new(1)).with_assigned_units(assigned.iter().copied().map(uid))
}

#[test]
fn operador_without_unit() {
    let ctx = context(Some(user(Role::Operador, &[])));
    let caps = ctx.role_logic();
    assert!(caps.can_create);
    assert!(!caps.can_edit);
    assert!(!caps.can_delete);
    assert!(!caps.is_read_only);
    assert_eq!(caps.unidad_id_filter, None);
}

#[test]
fn auditor_with_single_unit() {
    let ctx = context(Some(user(Role::Auditor, &[3])));
    let caps = ctx.role_logic();
    assert!(caps.is_read_only);
    assert!(caps.can_export);
    assert!(!caps.can_create);
    assert_eq!(caps.unidad_id_filter, Some(uid(3)));
    assert_eq!(ctx.unit_filter().unidad_nombre, "Base Córdoba");
}

#[test]
fn multi_unit_supervisor_with_unassigned_or_no_selection() {
    let units = unit_store();
    let ctx = context_with(Some(user(Role::Supervisor, &[5, 7])), units.clone());
    assert_eq!(ctx.unit_id_filter(), Some(uid(5)));

    // An admin sharing the unit store selects unit 9, outside the assignment.
    let admin = context_with(Some(user(Role::Admin, &[])), units);
    admin.select_unit(Some(uid(9))).unwrap();

    let filter = ctx.unit_filter();
    assert_eq!(filter.unidad_id_filter, Some(uid(5)));
    assert_eq!(filter.unidad_ids_filter, Some(vec![uid(5), uid(7)]));
}

#[test]
fn absent_user_is_denied_everything() {
    let ctx = context(None);
    let perms = ctx.permissions();
    assert!(Permission::ALL.iter().all(|p| !perms.can(*p)));
    assert_eq!(perms.guard(&[Permission::EventosVer], GuardMode::RequireAny), GuardDecision::Deny);
    let caps = ctx.role_logic();
    assert!(!caps.can_create && !caps.can_export && !caps.is_read_only);
    assert_eq!(ctx.unit_id_filter(), None);
}

#[test]
fn empty_permission_lists_deny_for_every_role() {
    for role in Role::ALL {
        let perms = context(Some(user(role, &[5]))).permissions();
        assert!(!perms.can_all(&[]), "{role}");
        assert!(!perms.can_any(&[]), "{role}");
    }
}

#[test]
fn resolution_is_idempotent() {
    for role in Role::ALL {
        let ctx = context(Some(user(role, &[5, 7])));
        assert_eq!(ctx.unit_filter(), ctx.unit_filter());
        assert_eq!(ctx.role_logic(), ctx.role_logic());
        assert_eq!(ctx.permissions(), ctx.permissions());
    }
}

#[test]
fn guard_combines_requirements() {
    let perms = context(Some(user(Role::Supervisor, &[5]))).permissions();
    let required = [Permission::EventosValidar, Permission::EventosEliminar];
    assert_eq!(perms.guard(&required, GuardMode::RequireAny), GuardDecision::Allow);
    assert_eq!(perms.guard(&required, GuardMode::RequireAll), GuardDecision::Deny);
}
