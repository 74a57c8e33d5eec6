//! Scoped list requests: merge caller filters with the resolved unit filter and
//! the session company.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fuelops_auth::{AuthzError, Permission, SessionUser};
use fuelops_core::{BusinessUnitId, CompanyId};

use crate::{ScopeError, UnitFilter};

/// Unit-scoped resources served by the back-office data services.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopedResource {
    Vehiculos,
    Choferes,
    Surtidores,
    Tanques,
    /// Fuel-loading events.
    Cargas,
    CentrosCosto,
    Reportes,
}

impl ScopedResource {
    pub const ALL: [ScopedResource; 7] = [
        ScopedResource::Vehiculos,
        ScopedResource::Choferes,
        ScopedResource::Surtidores,
        ScopedResource::Tanques,
        ScopedResource::Cargas,
        ScopedResource::CentrosCosto,
        ScopedResource::Reportes,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ScopedResource::Vehiculos => "vehiculos",
            ScopedResource::Choferes => "choferes",
            ScopedResource::Surtidores => "surtidores",
            ScopedResource::Tanques => "tanques",
            ScopedResource::Cargas => "eventos",
            ScopedResource::CentrosCosto => "centros-costo",
            ScopedResource::Reportes => "reportes",
        }
    }

    /// Permission needed to list this resource.
    pub const fn read_permission(&self) -> Permission {
        match self {
            ScopedResource::Vehiculos => Permission::VehiculosVer,
            ScopedResource::Choferes => Permission::ChoferesVer,
            ScopedResource::Surtidores => Permission::SurtidoresVer,
            ScopedResource::Tanques => Permission::TanquesVer,
            ScopedResource::Cargas => Permission::EventosVer,
            ScopedResource::CentrosCosto => Permission::CentrosCostoVer,
            ScopedResource::Reportes => Permission::ReportesVer,
        }
    }
}

impl core::fmt::Display for ScopedResource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List parameters as accepted by the data services.
///
/// `company_id` is accepted for wire compatibility but always replaced by the
/// session company in [`scope_request`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidad_id: Option<BusinessUnitId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Resource-specific filters (date ranges, status, ...), passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ListParams {
    pub fn for_unit(unit: BusinessUnitId) -> Self {
        Self {
            unidad_id: Some(unit),
            ..Self::default()
        }
    }
}

/// A list request ready for dispatch: company fixed, unit filter merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedRequest {
    pub resource: ScopedResource,
    pub company_id: CompanyId,
    pub params: ListParams,
}

/// Identity of a request for caching and stale-response detection.
///
/// Two dispatches with different unit filters never share a key, so a late
/// response for a superseded filter cannot be served for the current one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    pub resource: ScopedResource,
    pub company_id: CompanyId,
    pub unidad_id: Option<BusinessUnitId>,
    pub fingerprint: String,
}

impl ScopedRequest {
    pub fn key(&self) -> QueryKey {
        QueryKey {
            resource: self.resource,
            company_id: self.company_id,
            unidad_id: self.params.unidad_id,
            // Field order is fixed and `extra` is a BTreeMap, so this is canonical.
            fingerprint: serde_json::to_string(&self.params).unwrap_or_default(),
        }
    }
}

/// Build the request actually sent to the data service.
///
/// - the caller's explicit `unidad_id` wins over the resolved filter
/// - the company always comes from the session user; a caller-supplied company
///   is discarded
/// - the user must hold the resource's read permission
/// - scope keys passed through `extra` are dropped
pub fn scope_request(
    resource: ScopedResource,
    user: Option<&SessionUser>,
    filter: &UnitFilter,
    mut caller: ListParams,
) -> Result<ScopedRequest, ScopeError> {
    let user = user.ok_or(ScopeError::Unauthenticated)?;
    let permission = resource.read_permission();
    if !user.role.is_some_and(|role| permission.is_granted_to(role)) {
        tracing::debug!(user_id = %user.id, role = ?user.role, %permission, "scoped list denied");
        return Err(AuthzError::Forbidden(permission).into());
    }

    if let Some(requested) = caller.company_id
        && requested != user.id_company
    {
        tracing::warn!(
            user_id = %user.id,
            %resource,
            requested_company = %requested,
            session_company = %user.id_company,
            "caller-supplied company id discarded"
        );
    }

    // Scope keys smuggled through the flattened map would shadow the typed
    // fields on the wire.
    for key in RESERVED_EXTRA_KEYS {
        if let Some(value) = caller.extra.remove(key) {
            tracing::warn!(
                user_id = %user.id,
                %resource,
                key,
                %value,
                "caller-supplied scope key in extra filters discarded"
            );
        }
    }

    let params = ListParams {
        unidad_id: caller.unidad_id.or(filter.unidad_id_filter),
        company_id: Some(user.id_company),
        ..caller
    };

    Ok(ScopedRequest {
        resource,
        company_id: user.id_company,
        params,
    })
}

/// Keys of `ListParams.extra` that would collide with the scope fields.
const RESERVED_EXTRA_KEYS: [&str; 4] = ["companyId", "company_id", "unidadId", "unidad_id"];
