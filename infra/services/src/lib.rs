//! # Service Registry
//!
//! An in-process registry of shared services, keyed by the service's Rust type.
//!
//! ## Overview
//!
//! * [`ServiceRegistry`] stores any number of instances per service type, each with
//!   [`ServiceProperties`] (a ranking plus string properties).
//! * [`OptionalServiceCollection`] exposes zero or more instances of a service.
//! * [`OptionalService`] exposes at most one instance, chosen by an explicit
//!   [`SelectionPolicy`].
//! * [`ServiceTracker`] is a live, filterable view over the registry implementing both.
//!
//! Services may be concrete types or trait objects (`dyn Trait`).
//!
//! # Example
//!
//! ```rust
//! use sn_service::{OptionalService, ServiceProperties, ServiceRegistry};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self) -> String { "hello".to_owned() }
//! }
//!
//! let registry = ServiceRegistry::new();
//! let tracker = registry.tracker::<dyn Greeter>();
//! assert!(tracker.service().is_none());
//!
//! let _reg = registry.register_with::<dyn Greeter>(
//!     Arc::new(English),
//!     ServiceProperties::new().with_ranking(10),
//! );
//! assert_eq!(tracker.service().unwrap().greet(), "hello");
//! ```

mod error;
mod filter;
mod optional;
mod registry;
mod tracker;

pub use error::{ServiceError, ServiceErrorExt};
pub use filter::{ServiceFilter, ServiceProperties};
pub use optional::{
    OptionalService, OptionalServiceCollection, SelectionPolicy, StaticServiceCollection, select,
};
pub use registry::{Service, ServiceRegistration, ServiceRegistry};
pub use tracker::ServiceTracker;
