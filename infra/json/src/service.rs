use crate::config::MapperConfig;
use crate::mapper::ObjectMapper;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Provides the shared [`ObjectMapper`].
pub trait ObjectMapperService: Send + Sync {
    /// The current mapper. Callers keep the returned `Arc` for as long as they need it;
    /// a later replacement does not affect mappers already handed out.
    fn object_mapper(&self) -> Arc<ObjectMapper>;
}

/// Holds one replaceable [`ObjectMapper`].
///
/// The mapper is shared as an `Arc` behind a read-write lock: readers clone the
/// current `Arc`, and [`SimpleObjectMapperService::set_object_mapper`] swaps it
/// atomically. [`ObjectMapperService::object_mapper`] always returns the exact
/// `Arc` most recently set.
#[derive(Debug)]
pub struct SimpleObjectMapperService {
    mapper: RwLock<Arc<ObjectMapper>>,
}

impl SimpleObjectMapperService {
    /// A service holding a default [`ObjectMapper`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_mapper(Arc::new(ObjectMapper::new()))
    }

    #[must_use]
    pub fn with_mapper(mapper: Arc<ObjectMapper>) -> Self {
        Self { mapper: RwLock::new(mapper) }
    }

    /// A service holding a default mapper configured by `config`.
    #[must_use]
    pub fn from_config(config: &MapperConfig) -> Self {
        Self::with_mapper(Arc::new(ObjectMapper::new().with_config(*config)))
    }

    /// Replaces the mapper, returning the previous one.
    pub fn set_object_mapper(&self, mapper: Arc<ObjectMapper>) -> Arc<ObjectMapper> {
        debug!(config = ?mapper.config(), "Object mapper replaced");
        std::mem::replace(&mut *self.mapper.write(), mapper)
    }
}

impl Default for SimpleObjectMapperService {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectMapperService for SimpleObjectMapperService {
    fn object_mapper(&self) -> Arc<ObjectMapper> {
        Arc::clone(&self.mapper.read())
    }
}

impl<S: ObjectMapperService + ?Sized> ObjectMapperService for Arc<S> {
    fn object_mapper(&self) -> Arc<ObjectMapper> {
        (**self).object_mapper()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_exactly_the_mapper_set() {
        let service = SimpleObjectMapperService::new();
        let first = service.object_mapper();
        assert!(Arc::ptr_eq(&first, &service.object_mapper()));

        let replacement = Arc::new(ObjectMapper::new());
        let previous = service.set_object_mapper(Arc::clone(&replacement));

        assert!(Arc::ptr_eq(&previous, &first));
        assert!(Arc::ptr_eq(&service.object_mapper(), &replacement));
    }

    #[test]
    fn from_config_applies_settings() {
        let config = MapperConfig { pretty: true, include_nulls: true };
        let service = SimpleObjectMapperService::from_config(&config);
        assert_eq!(*service.object_mapper().config(), config);
    }

    #[test]
    fn shared_service_delegates() {
        let service: Arc<dyn ObjectMapperService> = Arc::new(SimpleObjectMapperService::default());
        assert!(!service.object_mapper().config().pretty);
    }
}
