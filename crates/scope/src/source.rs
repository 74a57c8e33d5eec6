//! Data-service seam for scoped list fetches.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use fuelops_core::{BusinessUnitId, CompanyId};

use crate::{ListParams, ScopedResource, SourceError};

/// A back-office data service that lists records of one or more resources.
///
/// Implementations receive the company id separately from the params; they
/// must treat it as the tenant boundary.
#[async_trait]
pub trait ScopedSource: Send + Sync {
    type Record: Clone + Send + Sync;

    async fn list(
        &self,
        resource: ScopedResource,
        company_id: CompanyId,
        params: &ListParams,
    ) -> Result<Vec<Self::Record>, SourceError>;
}

/// Records that live inside a company and (optionally) a business unit.
pub trait UnitScoped {
    fn company_id(&self) -> CompanyId;
    fn unit_id(&self) -> Option<BusinessUnitId>;
}

/// In-memory data service for tests/dev.
///
/// Filters by company, then by `params.unidad_id` when present. Records without
/// a unit (company-wide) are only returned for unfiltered requests. Every call
/// is recorded so tests can inspect what was actually dispatched.
#[derive(Debug)]
pub struct InMemorySource<R> {
    records: RwLock<HashMap<ScopedResource, Vec<R>>>,
    calls: Mutex<Vec<(ScopedResource, CompanyId, ListParams)>>,
}

impl<R> Default for InMemorySource<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<R> InMemorySource<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, resource: ScopedResource, record: R) {
        if let Ok(mut map) = self.records.write() {
            map.entry(resource).or_default().push(record);
        }
    }

    pub fn calls(&self) -> Vec<(ScopedResource, CompanyId, ListParams)> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(_) => vec![],
        }
    }
}

#[async_trait]
impl<R> ScopedSource for InMemorySource<R>
where
    R: UnitScoped + Clone + Send + Sync + 'static,
{
    type Record = R;

    async fn list(
        &self,
        resource: ScopedResource,
        company_id: CompanyId,
        params: &ListParams,
    ) -> Result<Vec<R>, SourceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((resource, company_id, params.clone()));
        }

        let map = self
            .records
            .read()
            .map_err(|_| SourceError::Unavailable("record store poisoned".to_string()))?;

        let Some(records) = map.get(&resource) else {
            return Ok(vec![]);
        };

        Ok(records
            .iter()
            .filter(|r| r.company_id() == company_id)
            .filter(|r| match params.unidad_id {
                Some(unit) => r.unit_id() == Some(unit),
                None => true,
            })
            .cloned()
            .collect())
    }
}
