use serde::{Deserialize, Serialize};

/// Output settings of an [`ObjectMapper`](crate::ObjectMapper).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Indent serialized output.
    pub pretty: bool,
    /// Keep object members whose value is `null`. Off by default, so `None` fields vanish.
    pub include_nulls: bool,
}
