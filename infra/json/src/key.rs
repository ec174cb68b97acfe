use crate::error::JsonError;
use fxhash::FxHashMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Type token identifying the key type a deserializer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyType {
    id: TypeId,
    name: &'static str,
}

impl KeyType {
    #[must_use]
    pub fn of<K: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<K>(), name: std::any::type_name::<K>() }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Converts JSON object member names into keys of a fixed type.
///
/// Implementations are immutable registration descriptors: the key type is fixed
/// by [`TypedKeyDeserializer::Key`] and reported by [`TypedKeyDeserializer::key_type`].
pub trait TypedKeyDeserializer: Send + Sync + 'static {
    type Key: 'static;

    /// The type token of [`TypedKeyDeserializer::Key`].
    fn key_type(&self) -> KeyType {
        KeyType::of::<Self::Key>()
    }

    /// Parses one member name.
    ///
    /// # Errors
    /// Returns [`JsonError::InvalidKey`] if `key` does not describe a valid key.
    fn deserialize_key(&self, key: &str) -> Result<Self::Key, JsonError>;
}

/// Key deserializer for any [`FromStr`] key type.
pub struct FromStrKeyDeserializer<K> {
    _key: PhantomData<fn() -> K>,
}

impl<K> FromStrKeyDeserializer<K> {
    #[must_use]
    pub const fn new() -> Self {
        Self { _key: PhantomData }
    }
}

impl<K> Default for FromStrKeyDeserializer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for FromStrKeyDeserializer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FromStrKeyDeserializer").field(&std::any::type_name::<K>()).finish()
    }
}

impl<K> TypedKeyDeserializer for FromStrKeyDeserializer<K>
where
    K: FromStr + 'static,
    K::Err: fmt::Display,
{
    type Key = K;

    fn deserialize_key(&self, key: &str) -> Result<K, JsonError> {
        key.parse::<K>().map_err(|e| JsonError::InvalidKey {
            message: format!("'{key}': {e}").into(),
            context: Some(std::any::type_name::<K>().into()),
        })
    }
}

/// Key deserializer backed by a function.
pub struct FnKeyDeserializer<K, F> {
    parse: F,
    _key: PhantomData<fn() -> K>,
}

impl<K, F> FnKeyDeserializer<K, F>
where
    F: Fn(&str) -> Result<K, JsonError>,
{
    pub const fn new(parse: F) -> Self {
        Self { parse, _key: PhantomData }
    }
}

impl<K, F> fmt::Debug for FnKeyDeserializer<K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnKeyDeserializer").field(&std::any::type_name::<K>()).finish()
    }
}

impl<K, F> TypedKeyDeserializer for FnKeyDeserializer<K, F>
where
    K: 'static,
    F: Fn(&str) -> Result<K, JsonError> + Send + Sync + 'static,
{
    type Key = K;

    fn deserialize_key(&self, key: &str) -> Result<K, JsonError> {
        (self.parse)(key)
    }
}

#[derive(Debug, Clone)]
struct Registered {
    key_type: KeyType,
    /// Always an `Arc<dyn TypedKeyDeserializer<Key = K>>` for `key_type`.
    deserializer: Arc<dyn Any + Send + Sync>,
}

/// A named set of key deserializers, at most one per key type.
///
/// Registering a second deserializer for the same key type replaces the first.
#[derive(Debug, Clone, Default)]
pub struct KeyDeserializerModule {
    name: String,
    entries: FxHashMap<TypeId, Registered>,
}

impl KeyDeserializerModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: FxHashMap::default() }
    }

    #[must_use]
    pub fn with<D: TypedKeyDeserializer>(mut self, deserializer: D) -> Self {
        self.add(deserializer);
        self
    }

    /// Registers `deserializer`. Returns `true` if it replaced an earlier registration.
    pub fn add<D: TypedKeyDeserializer>(&mut self, deserializer: D) -> bool {
        let key_type = KeyType::of::<D::Key>();
        let shared: Arc<dyn TypedKeyDeserializer<Key = D::Key>> = Arc::new(deserializer);
        let replaced = self
            .entries
            .insert(key_type.id(), Registered { key_type, deserializer: Arc::new(shared) })
            .is_some();

        debug!(module = %self.name, key = key_type.name(), replaced, "Key deserializer registered");
        replaced
    }

    /// Copies every registration of `other` into this module, replacing clashes.
    pub fn merge(&mut self, other: &Self) {
        for (id, registered) in &other.entries {
            self.entries.insert(*id, registered.clone());
        }
        debug!(module = %self.name, from = %other.name, "Key deserializer module merged");
    }

    #[must_use]
    pub fn get<K: 'static>(&self) -> Option<Arc<dyn TypedKeyDeserializer<Key = K>>> {
        self.entries
            .get(&TypeId::of::<K>())?
            .deserializer
            .downcast_ref::<Arc<dyn TypedKeyDeserializer<Key = K>>>()
            .cloned()
    }

    #[must_use]
    pub fn contains<K: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<K>())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key_types(&self) -> impl Iterator<Item = KeyType> + '_ {
        self.entries.values().map(|r| r.key_type)
    }
}
