use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Zero or more instances of a service.
pub trait OptionalServiceCollection<T: ?Sized> {
    /// Lazily enumerates the available instances. May be empty.
    fn services(&self) -> impl Iterator<Item = Arc<T>> + '_;

    /// Enumerates instances together with their ranking.
    ///
    /// Collections without ranking information report `0` for every instance.
    fn ranked_services(&self) -> impl Iterator<Item = (i32, Arc<T>)> + '_ {
        self.services().map(|s| (0, s))
    }
}

/// At most one instance of a service.
pub trait OptionalService<T: ?Sized> {
    fn service(&self) -> Option<Arc<T>>;

    /// Returns the available instance, or `fallback` when there is none.
    fn service_or(&self, fallback: Arc<T>) -> Arc<T> {
        self.service().unwrap_or(fallback)
    }

    /// Returns the available instance.
    ///
    /// # Errors
    /// Returns [`ServiceError::NotFound`] when no instance is available.
    fn require(&self) -> Result<Arc<T>, ServiceError> {
        self.service().ok_or_else(|| ServiceError::NotFound {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }
}

impl<T: ?Sized> OptionalService<T> for Option<Arc<T>> {
    fn service(&self) -> Option<Arc<T>> {
        self.clone()
    }
}

/// How a single instance is chosen from an [`OptionalServiceCollection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// The first instance in enumeration order.
    FirstAvailable,
    /// The instance with the greatest ranking; ties go to the earliest enumerated.
    #[default]
    HighestRanking,
}

impl SelectionPolicy {
    pub fn select<T, C>(self, collection: &C) -> Option<Arc<T>>
    where
        T: ?Sized,
        C: OptionalServiceCollection<T>,
    {
        match self {
            Self::FirstAvailable => collection.services().next(),
            Self::HighestRanking => collection
                .ranked_services()
                .fold(None, |best: Option<(i32, Arc<T>)>, (ranking, service)| match best {
                    Some((best_ranking, _)) if best_ranking >= ranking => best,
                    _ => Some((ranking, service)),
                })
                .map(|(_, service)| service),
        }
    }
}

/// Picks one instance from `collection` according to `policy`.
pub fn select<T, C>(collection: &C, policy: SelectionPolicy) -> Option<Arc<T>>
where
    T: ?Sized,
    C: OptionalServiceCollection<T>,
{
    policy.select(collection)
}

/// A fixed list of instances, e.g. for wiring without a registry.
pub struct StaticServiceCollection<T: ?Sized> {
    services: Vec<(i32, Arc<T>)>,
    policy: SelectionPolicy,
}

impl<T: ?Sized> StaticServiceCollection<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { services: Vec::new(), policy: SelectionPolicy::HighestRanking }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn push(&mut self, service: Arc<T>) {
        self.push_ranked(0, service);
    }

    pub fn push_ranked(&mut self, ranking: i32, service: Arc<T>) {
        self.services.push((ranking, service));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl<T: ?Sized> Default for StaticServiceCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for StaticServiceCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticServiceCollection")
            .field("service", &std::any::type_name::<T>())
            .field("len", &self.services.len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<T: ?Sized> From<Vec<Arc<T>>> for StaticServiceCollection<T> {
    fn from(services: Vec<Arc<T>>) -> Self {
        let mut collection = Self::new();
        for service in services {
            collection.push(service);
        }
        collection
    }
}

impl<T: ?Sized> OptionalServiceCollection<T> for StaticServiceCollection<T> {
    fn services(&self) -> impl Iterator<Item = Arc<T>> + '_ {
        self.services.iter().map(|(_, s)| Arc::clone(s))
    }

    fn ranked_services(&self) -> impl Iterator<Item = (i32, Arc<T>)> + '_ {
        self.services.iter().map(|(r, s)| (*r, Arc::clone(s)))
    }
}

impl<T: ?Sized> OptionalService<T> for StaticServiceCollection<T> {
    fn service(&self) -> Option<Arc<T>> {
        self.policy.select(self)
    }
}
