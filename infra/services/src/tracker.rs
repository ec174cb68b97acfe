use crate::filter::ServiceFilter;
use crate::optional::{OptionalService, OptionalServiceCollection, SelectionPolicy};
use crate::registry::{Service, ServiceRegistry};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

/// A live view of the instances of `T` in a [`ServiceRegistry`].
///
/// Every call re-reads the registry, so instances registered or withdrawn after
/// the tracker was created are reflected immediately. An optional
/// [`ServiceFilter`] narrows the view; the [`SelectionPolicy`] decides which
/// instance [`OptionalService::service`] returns (default: highest ranking).
pub struct ServiceTracker<T: ?Sized> {
    registry: ServiceRegistry,
    filter: ServiceFilter,
    policy: SelectionPolicy,
    _service: PhantomData<fn() -> Arc<T>>,
}

impl<T: Service + ?Sized> ServiceTracker<T> {
    #[must_use]
    pub fn new(registry: ServiceRegistry) -> Self {
        Self {
            registry,
            filter: ServiceFilter::default(),
            policy: SelectionPolicy::default(),
            _service: PhantomData,
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: ServiceFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn filter(&self) -> &ServiceFilter {
        &self.filter
    }

    #[must_use]
    pub const fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Number of instances currently matching the filter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.ranked_services::<T>(&self.filter).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized> Clone for ServiceTracker<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            filter: self.filter.clone(),
            policy: self.policy,
            _service: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for ServiceTracker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceTracker")
            .field("service", &std::any::type_name::<T>())
            .field("filter", &self.filter)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<T: Service + ?Sized> OptionalServiceCollection<T> for ServiceTracker<T> {
    fn services(&self) -> impl Iterator<Item = Arc<T>> + '_ {
        self.ranked_services().map(|(_, s)| s)
    }

    fn ranked_services(&self) -> impl Iterator<Item = (i32, Arc<T>)> + '_ {
        let snapshot = self.registry.ranked_services::<T>(&self.filter);
        trace!(service = std::any::type_name::<T>(), matched = snapshot.len(), "Tracker lookup");
        snapshot.into_iter()
    }
}

impl<T: Service + ?Sized> OptionalService<T> for ServiceTracker<T> {
    fn service(&self) -> Option<Arc<T>> {
        self.policy.select(self)
    }
}
