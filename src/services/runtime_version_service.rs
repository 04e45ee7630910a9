use crate::services::registry::{
    AttributeValue, InMemoryRegistry, MalformedObjectName, ManagementRegistry, ObjectName,
    RegistryError,
};
use crate::config::RuntimeSettings;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error(transparent)]
    MalformedName(#[from] MalformedObjectName),
    #[error("management entry not available: {0}")]
    EntryNotFound(RegistryError),
    #[error("failed to read attribute metadata: {0}")]
    Metadata(RegistryError),
    #[error("attribute {attribute} is not exposed by {name}")]
    AttributeMissing { name: String, attribute: String },
    #[error("failed to read attribute value: {0}")]
    Attribute(RegistryError),
}

/// Reads the server version from the management registry
pub struct RuntimeVersionService {
    registry: Arc<dyn ManagementRegistry>,
    object_name: String,
    version_attribute: String,
}

impl RuntimeVersionService {
    pub fn new(
        registry: Arc<dyn ManagementRegistry>,
        object_name: impl Into<String>,
        version_attribute: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            object_name: object_name.into(),
            version_attribute: version_attribute.into(),
        }
    }

    /// Looks the version up on every call, nothing is cached.
    pub fn server_version(&self) -> Result<String, LookupError> {
        let name: ObjectName = self.object_name.parse()?;
        let handle = self
            .registry
            .find_entry(&name)
            .map_err(LookupError::EntryNotFound)?;
        let attributes = self
            .registry
            .attribute_metadata(&handle)
            .map_err(LookupError::Metadata)?;

        let descriptor = attributes
            .iter()
            .find(|attr| attr.name == self.version_attribute)
            .ok_or_else(|| LookupError::AttributeMissing {
                name: name.to_string(),
                attribute: self.version_attribute.clone(),
            })?;
        tracing::debug!(
            "Reading {} ({}) from {}",
            descriptor.name,
            descriptor.type_name,
            name
        );

        let value = self
            .registry
            .attribute_value(&handle, &descriptor.name)
            .map_err(LookupError::Attribute)?;
        Ok(value.to_string())
    }
}

/// Publishes the `ServerInfo` entry the version endpoint reads
pub fn register_server_info(
    registry: &InMemoryRegistry,
    object_name: &str,
    version_attribute: &str,
    version: &str,
) -> Result<(), MalformedObjectName> {
    let name: ObjectName = object_name.parse()?;
    registry.register(
        name,
        [
            (
                version_attribute.to_string(),
                AttributeValue::from(version),
            ),
            (
                "InstallDirectory".to_string(),
                AttributeValue::from(
                    std::env::current_dir()
                        .map(|dir| dir.display().to_string())
                        .unwrap_or_default(),
                ),
            ),
            (
                "Name".to_string(),
                AttributeValue::from(env!("CARGO_PKG_NAME")),
            ),
            (
                "ProcessId".to_string(),
                AttributeValue::Integer(std::process::id().into()),
            ),
            (
                "DebugBuild".to_string(),
                AttributeValue::Boolean(cfg!(debug_assertions)),
            ),
        ],
    );
    Ok(())
}

/// Republishes the configured version on an already registered entry
pub fn refresh_server_version(
    registry: &InMemoryRegistry,
    runtime: &RuntimeSettings,
) -> Result<(), LookupError> {
    let name: ObjectName = runtime.object_name.parse()?;
    registry
        .set_attribute(
            &name,
            runtime.version_attribute.as_str(),
            AttributeValue::from(runtime.server_version()),
        )
        .map_err(LookupError::EntryNotFound)
}
