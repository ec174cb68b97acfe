use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registration metadata attached to a service instance.
///
/// `ranking` orders competing instances (higher wins); the string properties
/// identify an instance for filtering, e.g. by [`ServiceProperties::UID`].
///
/// Properties serialize as one flat object next to `ranking`, so
/// [`ServiceProperties::RANKING`] cannot be used as a property key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceProperties {
    ranking: i32,
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl ServiceProperties {
    /// Unique identifier of a service instance.
    pub const UID: &'static str = "uid";
    /// Identifier of the group a service instance belongs to.
    pub const GROUP_UID: &'static str = "groupUid";
    /// Reserved for the ranking in the serialized form.
    pub const RANKING: &'static str = "ranking";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_ranking(mut self, ranking: i32) -> Self {
        self.ranking = ranking;
        self
    }

    /// Adds a property.
    ///
    /// # Errors
    /// Returns [`ServiceError::ReservedProperty`] for [`ServiceProperties::RANKING`].
    pub fn with(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ServiceError> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Sets a property, returning the previous value.
    ///
    /// # Errors
    /// Returns [`ServiceError::ReservedProperty`] for [`ServiceProperties::RANKING`];
    /// use [`ServiceProperties::with_ranking`] instead.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, ServiceError> {
        let key = key.into();
        if key == Self::RANKING {
            return Err(ServiceError::ReservedProperty {
                message: key.into(),
                context: Some("Set the ranking with `with_ranking`".into()),
            });
        }
        Ok(self.values.insert(key, value.into()))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[must_use]
    pub const fn ranking(&self) -> i32 {
        self.ranking
    }

    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get(Self::UID)
    }

    #[must_use]
    pub fn group_uid(&self) -> Option<&str> {
        self.get(Self::GROUP_UID)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A conjunction of property equality conditions.
///
/// An empty filter matches every instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    conditions: Vec<(String, String)>,
}

impl ServiceFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `key` to be present with exactly `value`.
    #[must_use]
    pub fn eq(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn uid(self, uid: impl Into<String>) -> Self {
        self.eq(ServiceProperties::UID, uid)
    }

    #[must_use]
    pub fn group_uid(self, group_uid: impl Into<String>) -> Self {
        self.eq(ServiceProperties::GROUP_UID, group_uid)
    }

    #[must_use]
    pub fn matches(&self, properties: &ServiceProperties) -> bool {
        self.conditions.iter().all(|(k, v)| properties.get(k) == Some(v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
