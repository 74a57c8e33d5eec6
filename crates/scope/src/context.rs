use std::sync::Arc;

use fuelops_auth::{Permissions, Role, SessionUser};
use fuelops_core::{BusinessUnit, BusinessUnitId};

use crate::{
    RoleCapabilities, ScopeConfig, ScopeError, SessionStore, UnitFilter, UnitStore,
    resolve_capabilities, resolve_unit_filter,
};

/// Per-screen entry point: reads the session and unit stores and answers the
/// permission, filter and capability questions.
///
/// Stores are injected, so tests build isolated instances. Every accessor
/// recomputes from the current store contents.
#[derive(Debug, Clone)]
pub struct ScopeContext {
    session: Arc<SessionStore>,
    units: Arc<UnitStore>,
    config: ScopeConfig,
}

impl ScopeContext {
    pub fn new(session: Arc<SessionStore>, units: Arc<UnitStore>, config: ScopeConfig) -> Self {
        Self {
            session,
            units,
            config,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn units(&self) -> &UnitStore {
        &self.units
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.session.current_user()
    }

    pub fn permissions(&self) -> Permissions {
        Permissions::for_user(self.user())
    }

    pub fn unit_filter(&self) -> UnitFilter {
        let user = self.user();
        self.filter_for(user.as_ref())
    }

    /// Scalar unit id used to parameterize scoped list and report queries.
    pub fn unit_id_filter(&self) -> Option<BusinessUnitId> {
        self.unit_filter().unidad_id_filter
    }

    pub fn role_logic(&self) -> RoleCapabilities {
        let user = self.user();
        let filter = self.filter_for(user.as_ref());
        resolve_capabilities(user.as_ref(), &filter)
    }

    pub(crate) fn filter_for(&self, user: Option<&SessionUser>) -> UnitFilter {
        let active = self.units.active();
        let units = self.units.units();
        resolve_unit_filter(user, active.as_ref(), &units, &self.config)
    }

    /// Switch the active unit (`None` = all units). The only public writer of the
    /// selection.
    ///
    /// Admins and superadmins may pick any unit of their company; supervisors and
    /// auditors with several assigned units may pick among those. Everyone else
    /// is pinned and gets [`ScopeError::SelectionNotAllowed`].
    pub fn select_unit(&self, unit: Option<BusinessUnitId>) -> Result<(), ScopeError> {
        let user = self.user().ok_or(ScopeError::Unauthenticated)?;

        let may_switch = match user.role {
            Some(Role::Superadmin | Role::Admin) => true,
            Some(Role::Supervisor | Role::Auditor) => user.assigned_units().len() > 1,
            Some(Role::Operador) | None => false,
        };
        if !may_switch {
            tracing::warn!(user_id = %user.id, role = ?user.role, "unit switch refused");
            return Err(ScopeError::SelectionNotAllowed);
        }

        let Some(unit_id) = unit else {
            tracing::info!(user_id = %user.id, "active unit cleared");
            self.units.set_active(None);
            return Ok(());
        };

        let unit = self.units.find(unit_id).ok_or(ScopeError::UnknownUnit(unit_id))?;
        ensure_same_company(&user, &unit)?;

        if user.role.is_some_and(|r| r.is_unit_scoped()) && !user.is_assigned_to(unit.id) {
            tracing::warn!(user_id = %user.id, unit_id = %unit.id, "unit outside assignment refused");
            return Err(ScopeError::SelectionNotAllowed);
        }

        tracing::info!(user_id = %user.id, unit_id = %unit.id, "active unit switched");
        self.units.set_active(Some(unit));
        Ok(())
    }

    /// Pin the selection of single-unit supervisors/auditors to their unit.
    ///
    /// Call after login and after every unit-list refresh. No-op for everyone
    /// else, or when the assigned unit is not in the list yet.
    pub fn reconcile_selection(&self) {
        let Some(user) = self.user() else {
            return;
        };
        if !user.role.is_some_and(|r| r.is_unit_scoped()) {
            return;
        }
        let [only] = user.assigned_units() else {
            return;
        };
        if self.units.active().is_some_and(|a| a.id == *only) {
            return;
        }
        if let Some(unit) = self.units.find(*only) {
            tracing::debug!(user_id = %user.id, unit_id = %unit.id, "pinning active unit");
            self.units.set_active(Some(unit));
        }
    }
}

fn ensure_same_company(user: &SessionUser, unit: &BusinessUnit) -> Result<(), ScopeError> {
    if unit.belongs_to(user.id_company) {
        return Ok(());
    }
    tracing::warn!(
        user_id = %user.id,
        unit_id = %unit.id,
        unit_company = %unit.id_company,
        user_company = %user.id_company,
        "cross-company unit selection refused"
    );
    Err(ScopeError::TenantMismatch {
        unit: unit.id,
        unit_company: unit.id_company,
        user_company: user.id_company,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use fuelops_auth::SessionClaims;
    use fuelops_core::{CompanyId, UserId};

    fn uid(id: i64) -> BusinessUnitId {
        BusinessUnitId::new(id)
    }

    fn unit(id: i64, company: i64) -> BusinessUnit {
        BusinessUnit::new(uid(id), CompanyId::new(company), format!("Unidad {id}"), format!("U{id}")).unwrap()
    }

    fn context(user: Option<SessionUser>) -> ScopeContext {
        let session = Arc::new(SessionStore::new());
        if let Some(user) = user {
            let now = Utc::now();
            let claims = SessionClaims {
                user,
                issued_at: now - Duration::minutes(1),
                expires_at: now + Duration::hours(8),
            };
            session.login(claims, now).unwrap();
        }
        let units = Arc::new(UnitStore::with_units(vec![
            unit(5, 1),
            unit(7, 1),
            unit(9, 1),
            unit(50, 2),
        ]));
        ScopeContext::new(session, units, ScopeConfig::default())
    }

    fn user(role: Role, assigned: &[i64]) -> SessionUser {
        SessionUser::new(UserId::new(8), role, CompanyId::new(1))
            .with_assigned_units(assigned.iter().copied().map(uid))
    }

    #[test]
    fn admin_switch_is_visible_to_next_resolution() {
        let ctx = context(Some(user(Role::Admin, &[])));
        assert_eq!(ctx.unit_id_filter(), None);

        ctx.select_unit(Some(uid(7))).unwrap();
        assert_eq!(ctx.unit_id_filter(), Some(uid(7)));
        assert_eq!(ctx.role_logic().unidad_ids_filter, Some(vec![uid(7)]));

        ctx.select_unit(None).unwrap();
        assert_eq!(ctx.unit_id_filter(), None);
        assert!(ctx.role_logic().can_view_all_units);
    }

    #[test]
    fn admin_cannot_select_unit_of_other_company() {
        let ctx = context(Some(user(Role::Admin, &[])));
        let err = ctx.select_unit(Some(uid(50))).unwrap_err();
        assert!(matches!(err, ScopeError::TenantMismatch { .. }));
        assert_eq!(ctx.units().active(), None);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let ctx = context(Some(user(Role::Superadmin, &[])));
        assert_eq!(ctx.select_unit(Some(uid(404))), Err(ScopeError::UnknownUnit(uid(404))));
    }

    #[test]
    fn multi_unit_supervisor_may_switch_within_assignment_only() {
        let ctx = context(Some(user(Role::Supervisor, &[5, 7])));
        ctx.select_unit(Some(uid(7))).unwrap();
        assert_eq!(ctx.unit_id_filter(), Some(uid(7)));

        assert_eq!(ctx.select_unit(Some(uid(9))), Err(ScopeError::SelectionNotAllowed));
        assert_eq!(ctx.unit_id_filter(), Some(uid(7)));
    }

    #[test]
    fn pinned_roles_cannot_switch() {
        for u in [user(Role::Supervisor, &[5]), user(Role::Operador, &[]), user(Role::Auditor, &[])] {
            let ctx = context(Some(u));
            assert_eq!(ctx.select_unit(Some(uid(5))), Err(ScopeError::SelectionNotAllowed));
        }
        let ctx = context(None);
        assert_eq!(ctx.select_unit(None), Err(ScopeError::Unauthenticated));
    }

    #[test]
    fn reconcile_pins_single_unit_user() {
        let ctx = context(Some(user(Role::Auditor, &[9])));
        assert_eq!(ctx.units().active(), None);
        ctx.reconcile_selection();
        assert_eq!(ctx.units().active().map(|u| u.id), Some(uid(9)));
        assert_eq!(ctx.unit_id_filter(), Some(uid(9)));
    }

    #[test]
    fn reconcile_leaves_admins_alone() {
        let ctx = context(Some(user(Role::Admin, &[5])));
        ctx.reconcile_selection();
        assert_eq!(ctx.units().active(), None);
    }

    #[test]
    fn logout_drops_everything() {
        let ctx = context(Some(user(Role::Admin, &[])));
        assert!(ctx.permissions().is_admin());
        ctx.session().logout();
        assert!(!ctx.permissions().is_admin());
        assert!(!ctx.role_logic().can_create);
        assert_eq!(ctx.role_logic().company_id_filter, None);
    }
}
