use crate::error::ServiceError;
use crate::filter::{ServiceFilter, ServiceProperties};
use crate::optional::OptionalService;
use crate::tracker::ServiceTracker;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace, warn};

/// Marker trait for types that can be registered as services.
///
/// Implemented for every `Send + Sync + 'static` type, including trait objects
/// such as `dyn MyService`.
pub trait Service: Any + Send + Sync {}
impl<T: ?Sized + Any + Send + Sync> Service for T {}

#[derive(Debug)]
struct Entry {
    id: u64,
    properties: ServiceProperties,
    /// Always an `Arc<T>` for the `TypeId` this entry is stored under.
    instance: Box<dyn Any + Send + Sync>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    entries: RwLock<FxHashMap<TypeId, Vec<Entry>>>,
    next_id: AtomicU64,
}

/// A thread-safe registry of services, indexed by the [`TypeId`] of the service type.
///
/// Cloning the registry yields another handle to the same entries. Instances of a
/// type enumerate in registration order.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    inner: Arc<RegistryInner>,
}

/// Handle returned by [`ServiceRegistry::register`], used to withdraw the instance.
///
/// Dropping the handle does **not** unregister the service.
#[derive(Debug, Clone)]
pub struct ServiceRegistration {
    id: u64,
    type_id: TypeId,
    type_name: &'static str,
    registry: Weak<RegistryInner>,
}

impl ServiceRegistration {
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn service_type(&self) -> &'static str {
        self.type_name
    }

    /// Withdraws the instance. Returns `false` if it was already withdrawn or the
    /// registry no longer exists.
    pub fn unregister(self) -> bool {
        self.registry.upgrade().is_some_and(|inner| remove_entry(&inner, &self))
    }
}

impl ServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `service` with default properties.
    pub fn register<T: Service + ?Sized>(&self, service: Arc<T>) -> ServiceRegistration {
        self.register_with(service, ServiceProperties::default())
    }

    /// Registers `service` with the given properties.
    pub fn register_with<T: Service + ?Sized>(
        &self,
        service: Arc<T>,
        properties: ServiceProperties,
    ) -> ServiceRegistration {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let type_name = std::any::type_name::<T>();
        let ranking = properties.ranking();

        self.inner
            .entries
            .write()
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Entry { id, properties, instance: Box::new(service) });

        debug!(service = type_name, id, ranking, "Service registered");

        ServiceRegistration {
            id,
            type_id: TypeId::of::<T>(),
            type_name,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Withdraws a registration. Returns `false` if it was not registered here.
    pub fn unregister(&self, registration: &ServiceRegistration) -> bool {
        registration.registry.upgrade().is_some_and(|inner| {
            Arc::ptr_eq(&inner, &self.inner) && remove_entry(&inner, registration)
        })
    }

    #[must_use]
    pub fn is_registered(&self, registration: &ServiceRegistration) -> bool {
        let owned = registration
            .registry
            .upgrade()
            .is_some_and(|inner| Arc::ptr_eq(&inner, &self.inner));
        owned
            && self
                .inner
                .entries
                .read()
                .get(&registration.type_id)
                .is_some_and(|entries| entries.iter().any(|e| e.id == registration.id))
    }

    /// Snapshot of every instance of `T`, in registration order.
    #[must_use]
    pub fn services<T: Service + ?Sized>(&self) -> Vec<Arc<T>> {
        self.ranked_services(&ServiceFilter::default()).into_iter().map(|(_, s)| s).collect()
    }

    /// Snapshot of the instances of `T` whose properties match `filter`, with their
    /// rankings, in registration order.
    #[must_use]
    pub fn ranked_services<T: Service + ?Sized>(
        &self,
        filter: &ServiceFilter,
    ) -> Vec<(i32, Arc<T>)> {
        let entries = self.inner.entries.read();
        let Some(entries) = entries.get(&TypeId::of::<T>()) else {
            trace!(service = std::any::type_name::<T>(), "No services registered");
            return Vec::new();
        };

        entries
            .iter()
            .filter(|e| filter.matches(&e.properties))
            .filter_map(|e| match downcast::<T>(e) {
                Ok(service) => Some((e.properties.ranking(), service)),
                Err(err) => {
                    warn!(id = e.id, error = %err, "Skipping corrupt registry entry");
                    None
                },
            })
            .collect()
    }

    /// The highest-ranked instance of `T`; ties go to the earliest registration.
    #[must_use]
    pub fn service<T: Service + ?Sized>(&self) -> Option<Arc<T>> {
        self.tracker::<T>().service()
    }

    /// Like [`ServiceRegistry::service`] but fails when no instance is registered.
    ///
    /// # Errors
    /// Returns [`ServiceError::NotFound`] if no instance of `T` is registered.
    pub fn require<T: Service + ?Sized>(&self) -> Result<Arc<T>, ServiceError> {
        self.service::<T>().ok_or_else(|| ServiceError::NotFound {
            message: std::any::type_name::<T>().into(),
            context: Some("Registry lookup".into()),
        })
    }

    /// Properties of every instance of `T`, in registration order.
    #[must_use]
    pub fn properties<T: Service + ?Sized>(&self) -> Vec<ServiceProperties> {
        self.inner
            .entries
            .read()
            .get(&TypeId::of::<T>())
            .map(|entries| entries.iter().map(|e| e.properties.clone()).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn count<T: Service + ?Sized>(&self) -> usize {
        self.inner.entries.read().get(&TypeId::of::<T>()).map_or(0, Vec::len)
    }

    /// A live view of the instances of `T`.
    #[must_use]
    pub fn tracker<T: Service + ?Sized>(&self) -> ServiceTracker<T> {
        ServiceTracker::new(self.clone())
    }

    /// Removes every registration.
    pub fn clear(&self) {
        let removed: usize = self.inner.entries.write().drain().map(|(_, v)| v.len()).sum();
        debug!(removed, "Service registry cleared");
    }
}

fn downcast<T: Service + ?Sized>(entry: &Entry) -> Result<Arc<T>, ServiceError> {
    entry.instance.downcast_ref::<Arc<T>>().cloned().ok_or_else(|| ServiceError::TypeMismatch {
        message: std::any::type_name::<T>().into(),
        context: Some("Unexpected service instance type".into()),
    })
}

fn remove_entry(inner: &RegistryInner, registration: &ServiceRegistration) -> bool {
    let mut map = inner.entries.write();
    let Some(entries) = map.get_mut(&registration.type_id) else {
        return false;
    };
    let Some(index) = entries.iter().position(|e| e.id == registration.id) else {
        return false;
    };

    entries.remove(index);
    if entries.is_empty() {
        map.remove(&registration.type_id);
    }
    debug!(service = registration.type_name, id = registration.id, "Service unregistered");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Sensor;

    #[test]
    fn empty_type_vectors_are_dropped() {
        let registry = ServiceRegistry::new();
        let reg = registry.register(Arc::new(Sensor));
        assert_eq!(registry.inner.entries.read().len(), 1);

        assert!(registry.unregister(&reg));
        assert!(registry.inner.entries.read().is_empty());
    }

    #[test]
    fn foreign_registration_is_rejected() {
        let a = ServiceRegistry::new();
        let b = ServiceRegistry::new();
        let reg = a.register(Arc::new(Sensor));
        let twin = b.register(Arc::new(Sensor));
        assert_eq!(reg.id(), twin.id());

        assert!(!b.is_registered(&reg));
        assert!(!a.is_registered(&twin));
        assert!(!b.unregister(&reg));
        assert!(a.is_registered(&reg));
        assert!(b.is_registered(&twin));
    }

    #[test]
    fn registration_outlives_registry() {
        let registry = ServiceRegistry::new();
        let reg = registry.register(Arc::new(Sensor));
        drop(registry);
        assert!(!reg.unregister());
    }
}
