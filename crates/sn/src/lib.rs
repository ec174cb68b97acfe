//! Facade crate for the common crates.
//! Re-exports the utility, service, JSON, logging and configuration crates and
//! composes the shared services from a [`ToolkitConfig`].
//! Keep this crate thin: it should compose other crates, not implement behavior.
//!
//! ## Usage
//! ```rust
//! use sn::prelude::*;
//!
//! let toolkit = Toolkit::from_config(&ToolkitConfig::default());
//! let mapper = toolkit.registry().require::<dyn ObjectMapperService>().unwrap().object_mapper();
//! assert_eq!(mapper.to_string(&json!({ "a": null })).unwrap(), "{}");
//! ```

pub use sn_json as json;
pub use sn_kernel as kernel;
pub use sn_logger as logger;
pub use sn_service as service;
pub use sn_util as util;

use sn_json::{ObjectMapper, ObjectMapperService, SimpleObjectMapperService};
use sn_kernel::{ConfigError, ToolkitConfig};
use sn_logger::{Logger, LoggerError};
use sn_service::{ServiceProperties, ServiceRegistry};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Service property naming the component that registered a service.
pub const COMPONENT_PROPERTY: &str = "component";

pub mod prelude {
    pub use crate::Toolkit;
    pub use sn_json::{ObjectMapper, ObjectMapperService, SimpleObjectMapperService, json};
    pub use sn_kernel::ToolkitConfig;
    pub use sn_service::{
        OptionalService, OptionalServiceCollection, SelectionPolicy, ServiceProperties,
        ServiceRegistry,
    };
    pub use sn_util::prelude::*;
}

/// Shared services assembled from configuration.
///
/// The object mapper service is registered in [`Toolkit::registry`] as
/// `dyn ObjectMapperService`, so other components can find it there.
#[derive(Debug, Clone)]
pub struct Toolkit {
    config: ToolkitConfig,
    registry: ServiceRegistry,
    mapper_service: Arc<SimpleObjectMapperService>,
}

impl Toolkit {
    #[must_use]
    pub fn from_config(config: &ToolkitConfig) -> Self {
        let registry = ServiceRegistry::new();
        let mapper_service = Arc::new(SimpleObjectMapperService::from_config(&config.mapper));

        let mut properties = ServiceProperties::new();
        // `component` is not a reserved key, so this cannot fail.
        let _ = properties.insert(COMPONENT_PROPERTY, env!("CARGO_PKG_NAME"));
        let shared: Arc<dyn ObjectMapperService> = mapper_service.clone();
        registry.register_with(shared, properties);

        info!(mapper = ?config.mapper, "Toolkit assembled");
        Self { config: config.clone(), registry, mapper_service }
    }

    /// Loads a [`ToolkitConfig`] (see [`sn_kernel::load_config`]) and assembles from it.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the configuration cannot be loaded.
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let config = sn_kernel::load_config::<ToolkitConfig>(path)?;
        Ok(Self::from_config(&config))
    }

    /// Installs the global logger described by the logging section.
    ///
    /// # Errors
    /// See [`Logger::from_config`].
    pub fn init_logging(&self, name: impl Into<String>) -> Result<Logger, LoggerError> {
        Logger::from_config(name, &self.config.logging)
    }

    #[must_use]
    pub const fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn mapper_service(&self) -> &Arc<SimpleObjectMapperService> {
        &self.mapper_service
    }

    /// The current shared mapper.
    #[must_use]
    pub fn object_mapper(&self) -> Arc<ObjectMapper> {
        self.mapper_service.object_mapper()
    }
}
