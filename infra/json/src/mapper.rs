use crate::config::MapperConfig;
use crate::error::{JsonError, JsonErrorExt};
use crate::key::{KeyDeserializerModule, KeyType};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::hash::Hash;
use std::io::{Read, Write};
use tracing::trace;

/// A configured JSON reader/writer.
///
/// Serialization honours [`MapperConfig`]; map reading resolves member names
/// through the registered key deserializers. Mappers are immutable once built
/// and are typically shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ObjectMapper {
    config: MapperConfig,
    keys: KeyDeserializerModule,
    modules: Vec<String>,
}

impl ObjectMapper {
    /// A mapper with default settings and no key deserializers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds the key deserializers of `module`, replacing any for the same key types.
    #[must_use]
    pub fn with_module(mut self, module: KeyDeserializerModule) -> Self {
        self.keys.merge(&module);
        self.modules.push(module.name().to_owned());
        self
    }

    #[must_use]
    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Names of the registered modules, in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }

    #[must_use]
    pub const fn key_deserializers(&self) -> &KeyDeserializerModule {
        &self.keys
    }

    /// Converts `value` to a JSON tree, applying the null-inclusion policy.
    ///
    /// # Errors
    /// Returns [`JsonError::Serde`] if `value` cannot be represented as JSON.
    pub fn to_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value, JsonError> {
        let mut tree = serde_json::to_value(value).context("Serializing value")?;
        if !self.config.include_nulls {
            strip_nulls(&mut tree);
        }
        Ok(tree)
    }

    /// Serializes `value` to a string.
    ///
    /// # Errors
    /// Returns [`JsonError::Serde`] if `value` cannot be represented as JSON.
    pub fn to_string<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, JsonError> {
        let tree = self.to_value(value)?;
        let text = if self.config.pretty {
            serde_json::to_string_pretty(&tree)
        } else {
            serde_json::to_string(&tree)
        };
        text.context("Rendering JSON")
    }

    /// Serializes `value` to bytes.
    ///
    /// # Errors
    /// Returns [`JsonError::Serde`] if `value` cannot be represented as JSON.
    pub fn to_vec<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, JsonError> {
        self.to_string(value).map(String::into_bytes)
    }

    /// Serializes `value` into `writer`.
    ///
    /// # Errors
    /// Returns [`JsonError::Serde`] on serialization failure and [`JsonError::Io`]
    /// when the writer fails.
    pub fn to_writer<W: Write, T: Serialize + ?Sized>(
        &self,
        mut writer: W,
        value: &T,
    ) -> Result<(), JsonError> {
        let bytes = self.to_vec(value)?;
        writer.write_all(&bytes).context("Writing JSON")?;
        Ok(())
    }

    /// # Errors
    /// Returns [`JsonError::Serde`] if `text` is not valid JSON for `T`.
    pub fn from_str<T: DeserializeOwned>(&self, text: &str) -> Result<T, JsonError> {
        serde_json::from_str(text).context("Deserializing JSON text")
    }

    /// # Errors
    /// Returns [`JsonError::Serde`] if `bytes` are not valid JSON for `T`.
    pub fn from_slice<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, JsonError> {
        serde_json::from_slice(bytes).context("Deserializing JSON bytes")
    }

    /// # Errors
    /// Returns [`JsonError::Serde`] if `value` does not match `T`.
    pub fn from_value<T: DeserializeOwned>(&self, value: Value) -> Result<T, JsonError> {
        serde_json::from_value(value).context("Deserializing JSON tree")
    }

    /// # Errors
    /// Returns [`JsonError::Serde`] if the reader fails or its content does not match `T`.
    pub fn from_reader<R: Read, T: DeserializeOwned>(&self, reader: R) -> Result<T, JsonError> {
        serde_json::from_reader(reader).context("Deserializing JSON stream")
    }

    /// Reads a JSON object into a map whose keys are produced by the key
    /// deserializer registered for `K`.
    ///
    /// # Errors
    /// * [`JsonError::Serde`] if `text` is not a JSON object or a member value does not match `V`.
    /// * [`JsonError::NoKeyDeserializer`] if nothing is registered for `K`.
    /// * [`JsonError::InvalidKey`] if a member name is rejected by the deserializer.
    pub fn read_map<K, V>(&self, text: &str) -> Result<HashMap<K, V>, JsonError>
    where
        K: Eq + Hash + 'static,
        V: DeserializeOwned,
    {
        let object: Map<String, Value> =
            serde_json::from_str(text).context("Reading JSON object")?;
        self.map_from_object(object)
    }

    /// Like [`ObjectMapper::read_map`], starting from a parsed JSON tree.
    ///
    /// # Errors
    /// Same as [`ObjectMapper::read_map`]: a tree that is not an object is a
    /// [`JsonError::Serde`] error.
    pub fn read_map_value<K, V>(&self, value: Value) -> Result<HashMap<K, V>, JsonError>
    where
        K: Eq + Hash + 'static,
        V: DeserializeOwned,
    {
        let object: Map<String, Value> =
            serde_json::from_value(value).context("Reading JSON object")?;
        self.map_from_object(object)
    }

    fn map_from_object<K, V>(
        &self,
        object: Map<String, Value>,
    ) -> Result<HashMap<K, V>, JsonError>
    where
        K: Eq + Hash + 'static,
        V: DeserializeOwned,
    {
        let key_type = KeyType::of::<K>();
        let deserializer = self.keys.get::<K>().ok_or_else(|| JsonError::NoKeyDeserializer {
            message: key_type.name().into(),
            context: Some(format!("Registered modules: {}", self.modules.join(", ")).into()),
        })?;

        trace!(key = key_type.name(), members = object.len(), "Reading keyed map");

        let mut map = HashMap::with_capacity(object.len());
        for (name, value) in object {
            let key = deserializer.deserialize_key(&name)?;
            let value = serde_json::from_value(value).context(format!("Value of member '{name}'"))?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

/// Removes `null` object members at every depth. Array items are kept.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        },
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strip_nulls_keeps_array_items() {
        let mut value = json!({
            "a": null,
            "b": { "c": null, "d": 1 },
            "e": [null, { "f": null }]
        });
        strip_nulls(&mut value);
        assert_eq!(value, json!({ "b": { "d": 1 }, "e": [null, {}] }));
    }

    #[test]
    fn include_nulls_preserves_members() {
        let mapper = ObjectMapper::new()
            .with_config(MapperConfig { include_nulls: true, ..MapperConfig::default() });
        let text = mapper.to_string(&json!({ "a": null })).unwrap();
        assert_eq!(text, r#"{"a":null}"#);
    }

    #[test]
    fn missing_key_deserializer_names_key_type() {
        let err = ObjectMapper::new().read_map::<u64, i32>("{}").unwrap_err();
        assert!(matches!(err, JsonError::NoKeyDeserializer { .. }));
        assert!(err.to_string().contains("u64"));
    }
}
