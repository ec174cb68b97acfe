//! # JSON
//!
//! A configurable JSON [`ObjectMapper`] built on `serde_json`, a service holding the
//! shared mapper ([`SimpleObjectMapperService`]), and typed map-key deserializers
//! ([`TypedKeyDeserializer`]) registered through a [`KeyDeserializerModule`].
//!
//! ## Example
//!
//! ```rust
//! use sn_json::{FromStrKeyDeserializer, KeyDeserializerModule, ObjectMapper};
//!
//! # fn main() -> Result<(), sn_json::JsonError> {
//! let mapper = ObjectMapper::new().with_module(
//!     KeyDeserializerModule::new("numeric-keys").with(FromStrKeyDeserializer::<u16>::new()),
//! );
//!
//! let readings = mapper.read_map::<u16, f64>(r#"{"1": 3.5, "2": 4.0}"#)?;
//! assert_eq!(readings[&2], 4.0);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod key;
mod mapper;
mod service;

pub use config::MapperConfig;
pub use error::{JsonError, JsonErrorExt};
pub use key::{
    FnKeyDeserializer, FromStrKeyDeserializer, KeyDeserializerModule, KeyType, TypedKeyDeserializer,
};
pub use mapper::ObjectMapper;
pub use serde_json::{Value, json};
pub use service::{ObjectMapperService, SimpleObjectMapperService};
