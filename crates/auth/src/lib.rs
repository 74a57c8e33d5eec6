//! `fuelops-auth` — roles, permissions and per-user checks for the back-office.
//!
//! Everything here is a pure function of the session user and the compile-time
//! permission table. Decoupled from HTTP, token storage and the unit store.

pub mod authorize;
pub mod claims;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{
    AuthorizationExplanation, AuthzError, DenialKind, GuardDecision, GuardMode, Permissions,
    RbacRegistry, explain,
};
pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use permissions::{Permission, PermissionParseError};
pub use principal::SessionUser;
pub use roles::{Role, RoleParseError};
