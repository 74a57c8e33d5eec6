use thiserror::Error;

use fuelops_auth::{AuthzError, TokenValidationError};
use fuelops_core::{BusinessUnitId, CompanyId};

/// Failures at the writer and IO seams of the scoping layer.
///
/// The resolvers themselves never fail; these only surface from unit selection,
/// login and scoped fetches.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("no authenticated user")]
    Unauthenticated,

    #[error("unit selection not allowed for this user")]
    SelectionNotAllowed,

    #[error("unit {unit} belongs to company {unit_company}, user belongs to {user_company}")]
    TenantMismatch {
        unit: BusinessUnitId,
        unit_company: CompanyId,
        user_company: CompanyId,
    },

    #[error("session store unavailable")]
    SessionUnavailable,

    #[error("unit {0} is not in the unit list")]
    UnknownUnit(BusinessUnitId),

    #[error(transparent)]
    Authz(#[from] AuthzError),

    #[error(transparent)]
    Session(#[from] TokenValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Error reported by a data service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("data service unavailable: {0}")]
    Unavailable(String),

    #[error("data service rejected the request: {0}")]
    Rejected(String),
}
