//! `fuelops-core` — shared building blocks for the fuel-management back-office.
//!
//! Only pure domain primitives live here: identifiers, the business-unit record
//! and the error model. No IO, no session state.

pub mod entity;
pub mod error;
pub mod id;
pub mod unit;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BusinessUnitId, CompanyId, UserId};
pub use unit::BusinessUnit;
pub use value_object::ValueObject;
