//! # Caching Module
//!
//! Shifting fitness into positive range needs the minimum of the expression
//! over the whole domain, which costs 256 evaluations. The [`DomainCache`]
//! remembers the bounds of the last expression it saw, keyed by the
//! expression's source text, and recomputes them when asked about a different
//! expression.
//!
//! The cache is a plain value owned by whoever drives a run. Hosts that want a
//! single cache across threads can use [`SharedDomainCache`], which guards one
//! with a mutex.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::expression::Expression;
use crate::fitness::{find_min_max, DomainBounds};

/// Memoized domain bounds for the most recently used expression.
#[derive(Debug, Clone, Default)]
pub struct DomainCache {
    entry: Option<(String, DomainBounds)>,
}

impl DomainCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bounds of `expression`, computing them if the cache holds
    /// nothing or holds another expression.
    pub fn bounds(&mut self, expression: &Expression) -> DomainBounds {
        if let Some((key, bounds)) = &self.entry {
            if key == expression.source() {
                tracing::trace!(expression = %key, "domain bounds cache hit");
                return *bounds;
            }
            tracing::debug!(previous = %key, expression = %expression, "expression changed, recomputing domain bounds");
        }

        let bounds = find_min_max(expression);
        self.entry = Some((expression.source().to_string(), bounds));
        bounds
    }

    /// Forgets the cached bounds.
    pub fn reset(&mut self) {
        if self.entry.take().is_some() {
            tracing::debug!("domain bounds cache cleared");
        }
    }

    /// The expression whose bounds are cached, if any.
    pub fn cached_expression(&self) -> Option<&str> {
        self.entry.as_ref().map(|(key, _)| key.as_str())
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

/// A [`DomainCache`] that can be shared between threads.
///
/// Clones share the same underlying cache.
#[derive(Debug, Clone, Default)]
pub struct SharedDomainCache {
    cache: Arc<Mutex<DomainCache>>,
}

impl SharedDomainCache {
    /// Creates an empty shared cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing cache.
    pub fn with_cache(cache: DomainCache) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    // The cache holds no invariant a panicking holder could break.
    fn lock(&self) -> MutexGuard<'_, DomainCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`DomainCache::bounds`]. The lock is held while bounds are computed.
    pub fn bounds(&self, expression: &Expression) -> DomainBounds {
        self.lock().bounds(expression)
    }

    /// See [`DomainCache::reset`].
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// The expression whose bounds are cached, if any.
    pub fn cached_expression(&self) -> Option<String> {
        self.lock().cached_expression().map(str::to_string)
    }

    /// Returns a copy of the current cache contents.
    pub fn snapshot(&self) -> DomainCache {
        self.lock().clone()
    }
}
