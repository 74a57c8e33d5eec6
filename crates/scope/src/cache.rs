//! Response cache keyed by the resolved request.

use std::collections::HashMap;
use std::sync::RwLock;

use fuelops_core::CompanyId;

use crate::{QueryKey, ScopedResource};

/// Cache of list responses, one entry per [`QueryKey`].
///
/// Because the key carries the unit filter in effect at dispatch, a response
/// that arrives after the user switched units is stored under the old key and
/// never served for the new one.
#[derive(Debug)]
pub struct QueryCache<V> {
    inner: RwLock<HashMap<QueryKey, V>>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    pub fn insert(&self, key: QueryKey, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    /// Drop every entry of `resource` for `company` (e.g. after a mutation).
    pub fn invalidate(&self, company: CompanyId, resource: ScopedResource) {
        if let Ok(mut map) = self.inner.write() {
            map.retain(|k, _| !(k.company_id == company && k.resource == resource));
        }
    }

    /// Drop everything (logout).
    pub fn clear(&self) {
        if let Ok(mut map) = self.inner.write() {
            map.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelops_core::BusinessUnitId;

    fn key(resource: ScopedResource, unit: Option<i64>) -> QueryKey {
        QueryKey {
            resource,
            company_id: CompanyId::new(1),
            unidad_id: unit.map(BusinessUnitId::new),
            fingerprint: String::new(),
        }
    }

    #[test]
    fn late_response_for_old_unit_is_not_served_for_new_unit() {
        let cache: QueryCache<Vec<&str>> = QueryCache::new();
        let old = key(ScopedResource::Vehiculos, Some(5));
        let current = key(ScopedResource::Vehiculos, Some(7));

        cache.insert(old.clone(), vec!["AB-123"]);
        assert_eq!(cache.get(&current), None);
        assert_eq!(cache.get(&old), Some(vec!["AB-123"]));
    }

    #[test]
    fn invalidate_is_per_resource() {
        let cache: QueryCache<u32> = QueryCache::new();
        cache.insert(key(ScopedResource::Vehiculos, Some(5)), 1);
        cache.insert(key(ScopedResource::Vehiculos, None), 2);
        cache.insert(key(ScopedResource::Tanques, Some(5)), 3);

        cache.invalidate(CompanyId::new(1), ScopedResource::Vehiculos);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key(ScopedResource::Tanques, Some(5))), Some(3));

        cache.clear();
        assert!(cache.is_empty());
    }
}
