//! `fuelops-scope` — per-user request scoping for the fuel-management back-office.
//!
//! Turns the session user and the active business-unit selection into:
//! - a resolved unit filter ([`UnitFilter`])
//! - a flat set of UI/action capabilities ([`RoleCapabilities`])
//! - scoped list requests whose company id cannot be overridden ([`ScopedClient`])

pub mod cache;
pub mod capabilities;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod query;
pub mod session;
pub mod source;
pub mod unit_filter;
pub mod unit_store;

pub use cache::QueryCache;
pub use capabilities::{CapabilityRow, RoleCapabilities, capability_matrix, resolve_capabilities};
pub use client::ScopedClient;
pub use config::ScopeConfig;
pub use context::ScopeContext;
pub use error::{ScopeError, SourceError};
pub use query::{ListParams, QueryKey, ScopedRequest, ScopedResource, scope_request};
pub use session::SessionStore;
pub use source::{InMemorySource, ScopedSource, UnitScoped};
pub use unit_filter::{UnitFilter, resolve_unit_filter};
pub use unit_store::UnitStore;
