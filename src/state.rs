use crate::config::Settings;
use crate::models::{PropertiesDocument, SystemSnapshot};
use crate::services::{MaintenanceFlag, PropertiesMetrics, RuntimeVersionService};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub maintenance: Arc<dyn MaintenanceFlag>,
    pub runtime_version_service: Arc<RuntimeVersionService>,
    pub metrics: PropertiesMetrics,
    pub custom_properties: Arc<BTreeMap<String, String>>,
}

impl AppState {
    pub fn new(
        maintenance: Arc<dyn MaintenanceFlag>,
        runtime_version_service: Arc<RuntimeVersionService>,
        metrics: PropertiesMetrics,
        settings: &Settings,
    ) -> Self {
        Self {
            maintenance,
            runtime_version_service,
            metrics,
            custom_properties: Arc::new(settings.properties.custom.clone()),
        }
    }

    /// Fresh snapshot of the process properties
    pub fn properties_document(&self) -> PropertiesDocument {
        SystemSnapshot::capture().to_document(&self.custom_properties)
    }
}
