//! Scoped query client: the glue between the resolvers and a data service.

use std::sync::Mutex;

use fuelops_core::UserId;

use crate::{
    ListParams, QueryCache, ScopeContext, ScopeError, ScopedRequest, ScopedResource, ScopedSource,
    scope_request,
};

/// Wraps a [`ScopedSource`] so every list call is scoped to the session company
/// and the resolved unit filter.
///
/// The filter is snapshotted when the request is built; responses are cached
/// under the key of that snapshot. Cached responses never outlive the session
/// user that fetched them: a logout or a different user empties the cache.
pub struct ScopedClient<S: ScopedSource> {
    context: ScopeContext,
    source: S,
    cache: QueryCache<Vec<S::Record>>,
    cache_owner: Mutex<Option<UserId>>,
}

impl<S: ScopedSource> ScopedClient<S> {
    pub fn new(context: ScopeContext, source: S) -> Self {
        Self {
            context,
            source,
            cache: QueryCache::new(),
            cache_owner: Mutex::new(None),
        }
    }

    pub fn context(&self) -> &ScopeContext {
        &self.context
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Build the request for the current session and unit selection.
    pub fn request(&self, resource: ScopedResource, caller: ListParams) -> Result<ScopedRequest, ScopeError> {
        let user = self.context.user();
        self.track_session(user.as_ref().map(|u| u.id));
        let filter = self.context.filter_for(user.as_ref());
        scope_request(resource, user.as_ref(), &filter, caller)
    }

    /// Execute a previously built request and cache the result under its key.
    pub async fn fetch(&self, request: ScopedRequest) -> Result<Vec<S::Record>, ScopeError> {
        let key = request.key();
        tracing::debug!(
            resource = %request.resource,
            company_id = %request.company_id,
            unidad_id = ?request.params.unidad_id,
            "scoped fetch"
        );
        let records = self
            .source
            .list(request.resource, request.company_id, &request.params)
            .await?;
        self.cache.insert(key, records.clone());
        Ok(records)
    }

    /// Cached result for what `list` would dispatch right now, if any.
    pub fn cached(&self, resource: ScopedResource, caller: ListParams) -> Result<Option<Vec<S::Record>>, ScopeError> {
        let request = self.request(resource, caller)?;
        Ok(self.cache.get(&request.key()))
    }

    /// Scoped list: served from cache when the current key is present.
    pub async fn list(&self, resource: ScopedResource, caller: ListParams) -> Result<Vec<S::Record>, ScopeError> {
        let request = self.request(resource, caller)?;
        if let Some(hit) = self.cache.get(&request.key()) {
            return Ok(hit);
        }
        self.fetch(request).await
    }

    /// Force the next `list` of `resource` to refetch (after a mutation).
    pub fn invalidate(&self, resource: ScopedResource) {
        if let Some(user) = self.context.user() {
            self.cache.invalidate(user.id_company, resource);
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn track_session(&self, current: Option<UserId>) {
        let Ok(mut owner) = self.cache_owner.lock() else {
            self.cache.clear();
            return;
        };
        if *owner != current {
            if !self.cache.is_empty() {
                tracing::debug!(previous = ?*owner, current = ?current, "session user changed; clearing cache");
            }
            self.cache.clear();
            *owner = current;
        }
    }
}
