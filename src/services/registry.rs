use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by a [`ManagementRegistry`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("instance not found: {0}")]
    InstanceNotFound(String),
    #[error("attribute {attribute} not found on {name}")]
    AttributeNotFound { name: String, attribute: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed object name {name:?}: {reason}")]
pub struct MalformedObjectName {
    pub name: String,
    pub reason: &'static str,
}

/// Name of a registry entry, `domain:key=value[,key=value...]`.
///
/// Properties are kept sorted so that key order does not affect equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName {
    domain: String,
    properties: BTreeMap<String, String>,
}

impl ObjectName {
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[cfg(test)]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl FromStr for ObjectName {
    type Err = MalformedObjectName;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| MalformedObjectName {
            name: name.to_string(),
            reason,
        };

        let (domain, props) = name.split_once(':').ok_or_else(|| malformed("missing ':'"))?;
        if domain.is_empty() {
            return Err(malformed("empty domain"));
        }
        if props.is_empty() {
            return Err(malformed("no key properties"));
        }

        let mut properties = BTreeMap::new();
        for pair in props.split(',') {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| malformed("key property without '='"))?;
            if key.is_empty() || value.is_empty() {
                return Err(malformed("empty key or value"));
            }
            if properties
                .insert(key.to_string(), value.to_string())
                .is_some()
            {
                return Err(malformed("duplicate key"));
            }
        }

        Ok(Self {
            domain: domain.to_string(),
            properties,
        })
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.domain())?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl AttributeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "java.lang.String",
            AttributeValue::Integer(_) => "long",
            AttributeValue::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub type_name: String,
}

/// Handle to an entry returned by [`ManagementRegistry::find_entry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHandle {
    name: ObjectName,
}

impl EntryHandle {
    pub fn new(name: ObjectName) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &ObjectName {
        &self.name
    }
}

/// Queryable store of named entries describing runtime state
pub trait ManagementRegistry: Send + Sync {
    fn find_entry(&self, name: &ObjectName) -> Result<EntryHandle, RegistryError>;

    fn attribute_metadata(
        &self,
        handle: &EntryHandle,
    ) -> Result<Vec<AttributeDescriptor>, RegistryError>;

    fn attribute_value(
        &self,
        handle: &EntryHandle,
        attribute: &str,
    ) -> Result<AttributeValue, RegistryError>;
}

/// In-process registry
#[derive(Default)]
pub struct InMemoryRegistry {
    entries: DashMap<ObjectName, BTreeMap<String, AttributeValue>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`, replacing any previous attributes
    pub fn register<I>(&self, name: ObjectName, attributes: I)
    where
        I: IntoIterator<Item = (String, AttributeValue)>,
    {
        tracing::debug!("Registering management entry {}", name);
        self.entries.insert(name, attributes.into_iter().collect());
    }

    pub fn set_attribute(
        &self,
        name: &ObjectName,
        attribute: impl Into<String>,
        value: AttributeValue,
    ) -> Result<(), RegistryError> {
        let mut entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| RegistryError::InstanceNotFound(name.to_string()))?;
        entry.insert(attribute.into(), value);
        Ok(())
    }
}

impl ManagementRegistry for InMemoryRegistry {
    fn find_entry(&self, name: &ObjectName) -> Result<EntryHandle, RegistryError> {
        if self.entries.contains_key(name) {
            Ok(EntryHandle::new(name.clone()))
        } else {
            Err(RegistryError::InstanceNotFound(name.to_string()))
        }
    }

    fn attribute_metadata(
        &self,
        handle: &EntryHandle,
    ) -> Result<Vec<AttributeDescriptor>, RegistryError> {
        let entry = self
            .entries
            .get(handle.name())
            .ok_or_else(|| RegistryError::InstanceNotFound(handle.name().to_string()))?;
        Ok(entry
            .iter()
            .map(|(name, value)| AttributeDescriptor {
                name: name.clone(),
                type_name: value.type_name().to_string(),
            })
            .collect())
    }

    fn attribute_value(
        &self,
        handle: &EntryHandle,
        attribute: &str,
    ) -> Result<AttributeValue, RegistryError> {
        let entry = self
            .entries
            .get(handle.name())
            .ok_or_else(|| RegistryError::InstanceNotFound(handle.name().to_string()))?;
        entry
            .get(attribute)
            .cloned()
            .ok_or_else(|| RegistryError::AttributeNotFound {
                name: handle.name().to_string(),
                attribute: attribute.to_string(),
            })
    }
}
